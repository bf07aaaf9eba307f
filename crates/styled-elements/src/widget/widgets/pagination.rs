//! Page navigation controls.
//!
//! [`PaginationInterface`] renders first/previous/next/last buttons and
//! page labels for any [`Pagination`] source. Its layout comes from a
//! pattern such as `"%(prevBtn)s Page %(currentPage)s %(nextBtn)s"`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use styled_elements::widget::widgets::{Pagination, PaginationInterface, PaginationOptions};
//! use styled_elements::Document;
//!
//! struct Pages { current: usize, total: usize }
//!
//! impl Pagination for Pages {
//!     fn current_page(&self) -> usize { self.current }
//!     fn total_pages(&self) -> usize { self.total }
//!     fn go_to_first(&mut self) { self.current = 1; }
//!     fn go_to_previous(&mut self) { self.current = self.current.saturating_sub(1).max(1); }
//!     fn go_to_next(&mut self) { self.current = (self.current + 1).min(self.total); }
//!     fn go_to_last(&mut self) { self.current = self.total; }
//! }
//!
//! let doc = Document::headless();
//! let pages = Arc::new(Mutex::new(Pages { current: 1, total: 3 }));
//! let interface = PaginationInterface::new(&doc, pages, PaginationOptions::default());
//! assert_eq!(interface.current_page_label(), "1");
//! ```

use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use regex::Regex;
use serde::Deserialize;
use styled_elements_core::{Document, NodeGuard, NodeId, ObjectWithEvents};

use super::button::{ButtonOptions, StyledButton};
use crate::logging::targets;
use crate::widget::base::ElementBase;
use crate::widget::{NativeEvent, StyledElement};

/// Default layout pattern.
pub const DEFAULT_LAYOUT: &str =
    "%(firstBtn)s%(prevBtn)s Page: %(currentPage)s/%(totalPages)s %(nextBtn)s%(lastBtn)s";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\((\w+)\)s").expect("placeholder pattern is valid"));

/// A paged data source.
///
/// Pages are numbered from 1.
pub trait Pagination: Send {
    fn current_page(&self) -> usize;
    fn total_pages(&self) -> usize;
    fn go_to_first(&mut self);
    fn go_to_previous(&mut self);
    fn go_to_next(&mut self);
    fn go_to_last(&mut self);
}

/// Options for [`PaginationInterface`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationOptions {
    /// Layout pattern. See [`parse_layout`].
    pub layout: String,
    /// Hide the controls while there is a single page.
    pub auto_hide: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            auto_hide: false,
        }
    }
}

impl PaginationOptions {
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }
}

/// A control a layout placeholder can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationElement {
    FirstButton,
    PreviousButton,
    NextButton,
    LastButton,
    CurrentPage,
    TotalPages,
}

impl PaginationElement {
    /// Resolve a placeholder name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "firstBtn" => Some(Self::FirstButton),
            "prevBtn" => Some(Self::PreviousButton),
            "nextBtn" => Some(Self::NextButton),
            "lastBtn" => Some(Self::LastButton),
            "currentPage" => Some(Self::CurrentPage),
            "totalPages" => Some(Self::TotalPages),
            _ => None,
        }
    }
}

/// One piece of a parsed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutToken {
    Text(String),
    Element(PaginationElement),
}

/// Split a layout pattern into text runs and controls. Placeholders naming
/// no known control are kept as literal text.
pub fn parse_layout(pattern: &str) -> Vec<LayoutToken> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for captures in PLACEHOLDER.captures_iter(pattern) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(LayoutToken::Text(pattern[last..whole.start()].to_string()));
        }
        tokens.push(match PaginationElement::from_name(name.as_str()) {
            Some(element) => LayoutToken::Element(element),
            None => LayoutToken::Text(whole.as_str().to_string()),
        });
        last = whole.end();
    }
    if last < pattern.len() {
        tokens.push(LayoutToken::Text(pattern[last..].to_string()));
    }
    tokens
}

/// Navigation controls bound to a [`Pagination`].
///
/// Clicking a button moves the pagination and refreshes the controls. When
/// the source changes on its own, call
/// [`pagination_changed`](Self::pagination_changed).
pub struct PaginationInterface<P: Pagination + 'static> {
    base: ElementBase,
    pagination: Arc<Mutex<P>>,
    first: StyledButton,
    previous: StyledButton,
    next: StyledButton,
    last: StyledButton,
    current_page: NodeGuard,
    total_pages: NodeGuard,
    text_runs: Vec<NodeGuard>,
    auto_hide: bool,
}

impl<P: Pagination + 'static> PaginationInterface<P> {
    pub fn new(document: &Document, pagination: Arc<Mutex<P>>, options: PaginationOptions) -> Self {
        let base = ElementBase::new(document, "div", "styled_container pagination");

        let first = nav_button(document, "icon-first-page", &pagination, P::go_to_first);
        let previous = nav_button(document, "icon-prev-page", &pagination, P::go_to_previous);
        let next = nav_button(document, "icon-next-page", &pagination, P::go_to_next);
        let last = nav_button(document, "icon-last-page", &pagination, P::go_to_last);

        let mut interface = Self {
            base,
            pagination,
            first,
            previous,
            next,
            last,
            current_page: NodeGuard::element(document, "span", "current-page"),
            total_pages: NodeGuard::element(document, "span", "total-pages"),
            text_runs: Vec::new(),
            auto_hide: options.auto_hide,
        };
        interface.change_layout(&options.layout);
        interface.pagination_changed();
        interface
    }

    pub fn pagination(&self) -> &Arc<Mutex<P>> {
        &self.pagination
    }

    /// Rebuild the controls from `pattern`, dropping the previous layout.
    pub fn change_layout(&mut self, pattern: &str) {
        let doc = self.document().clone();
        let wrapper = self.wrapper();
        let _ = doc.clear_children(wrapper);
        self.text_runs.clear();

        for token in parse_layout(pattern) {
            let node = match token {
                LayoutToken::Text(text) => {
                    let run = NodeGuard::new(&doc, doc.create_text(&text));
                    let id = run.id();
                    self.text_runs.push(run);
                    id
                }
                LayoutToken::Element(element) => self.element_node(element),
            };
            let _ = doc.append_child(wrapper, node);
        }
        tracing::trace!(target: targets::WIDGET, pattern, "pagination layout changed");
    }

    /// Refresh labels, button states and visibility from the pagination.
    pub fn pagination_changed(&mut self) {
        let (current, total) = {
            let pagination = self.pagination.lock();
            (pagination.current_page(), pagination.total_pages())
        };
        let doc = self.document().clone();

        if self.auto_hide && total == 1 {
            doc.set_style(self.wrapper(), "display", "none");
        } else {
            doc.remove_style(self.wrapper(), "display");
        }

        doc.set_text_content(self.total_pages.id(), &total.to_string());
        doc.set_text_content(self.current_page.id(), &current.to_string());

        let at_start = current <= 1;
        let at_end = current >= total;
        self.first.set_disabled(at_start);
        self.previous.set_disabled(at_start);
        self.next.set_disabled(at_end);
        self.last.set_disabled(at_end);
    }

    pub fn current_page_label(&self) -> String {
        self.document().text_content(self.current_page.id())
    }

    pub fn total_pages_label(&self) -> String {
        self.document().text_content(self.total_pages.id())
    }

    /// The node rendering `element`.
    pub fn element_node(&self, element: PaginationElement) -> NodeId {
        match element {
            PaginationElement::FirstButton => self.first.wrapper(),
            PaginationElement::PreviousButton => self.previous.wrapper(),
            PaginationElement::NextButton => self.next.wrapper(),
            PaginationElement::LastButton => self.last.wrapper(),
            PaginationElement::CurrentPage => self.current_page.id(),
            PaginationElement::TotalPages => self.total_pages.id(),
        }
    }

    pub fn button(&self, element: PaginationElement) -> Option<&StyledButton> {
        match element {
            PaginationElement::FirstButton => Some(&self.first),
            PaginationElement::PreviousButton => Some(&self.previous),
            PaginationElement::NextButton => Some(&self.next),
            PaginationElement::LastButton => Some(&self.last),
            _ => None,
        }
    }
}

fn nav_button<P: Pagination + 'static>(
    document: &Document,
    class: &str,
    pagination: &Arc<Mutex<P>>,
    action: fn(&mut P),
) -> StyledButton {
    let button = StyledButton::new(document, ButtonOptions::default().with_plain(true).with_class(class));
    let pagination = Arc::clone(pagination);
    let _ = button.add_event_listener("click", move |_| action(&mut pagination.lock()));
    button
}

impl<P: Pagination + 'static> StyledElement for PaginationInterface<P> {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        let consumed = [&mut self.first, &mut self.previous, &mut self.next, &mut self.last]
            .into_iter()
            .any(|button| button.handle_event(event));
        if consumed {
            self.pagination_changed();
        }
        consumed
    }

    fn destroy(&mut self) {
        for button in [&mut self.first, &mut self.previous, &mut self.next, &mut self.last] {
            button.destroy();
        }
        let _ = self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pages {
        current: usize,
        total: usize,
    }

    impl Pagination for Pages {
        fn current_page(&self) -> usize {
            self.current
        }
        fn total_pages(&self) -> usize {
            self.total
        }
        fn go_to_first(&mut self) {
            self.current = 1;
        }
        fn go_to_previous(&mut self) {
            self.current = self.current.saturating_sub(1).max(1);
        }
        fn go_to_next(&mut self) {
            self.current = (self.current + 1).min(self.total);
        }
        fn go_to_last(&mut self) {
            self.current = self.total;
        }
    }

    fn interface(current: usize, total: usize, options: PaginationOptions) -> (Document, PaginationInterface<Pages>) {
        let doc = Document::headless();
        let pages = Arc::new(Mutex::new(Pages { current, total }));
        let interface = PaginationInterface::new(&doc, pages, options);
        (doc, interface)
    }

    #[test]
    fn test_parse_layout() {
        let tokens = parse_layout("%(prevBtn)s Page %(currentPage)s of %(bogus)s");
        assert_eq!(
            tokens,
            vec![
                LayoutToken::Element(PaginationElement::PreviousButton),
                LayoutToken::Text(" Page ".into()),
                LayoutToken::Element(PaginationElement::CurrentPage),
                LayoutToken::Text(" of ".into()),
                LayoutToken::Text("%(bogus)s".into()),
            ]
        );
        assert!(parse_layout("").is_empty());
    }

    #[test]
    fn test_default_layout_renders_all_controls() {
        let (doc, interface) = interface(2, 5, PaginationOptions::default());
        let text = doc.text_content(interface.wrapper());
        assert_eq!(text, " Page: 2/5 ");
        assert_eq!(interface.current_page_label(), "2");
        assert_eq!(interface.total_pages_label(), "5");
        assert_eq!(
            doc.parent(interface.element_node(PaginationElement::LastButton)),
            Some(interface.wrapper())
        );
    }

    #[test]
    fn test_buttons_disabled_at_edges() {
        let (_doc, interface) = interface(1, 3, PaginationOptions::default());
        assert!(!interface.button(PaginationElement::FirstButton).unwrap().is_enabled());
        assert!(!interface.button(PaginationElement::PreviousButton).unwrap().is_enabled());
        assert!(interface.button(PaginationElement::NextButton).unwrap().is_enabled());
        assert!(interface.button(PaginationElement::LastButton).unwrap().is_enabled());
    }

    #[test]
    fn test_click_moves_and_refreshes() {
        let (_doc, mut interface) = interface(1, 3, PaginationOptions::default());
        let last = interface.element_node(PaginationElement::LastButton);
        assert!(interface.handle_event(&NativeEvent::click(last)));

        assert_eq!(interface.pagination().lock().current, 3);
        assert_eq!(interface.current_page_label(), "3");
        assert!(!interface.button(PaginationElement::NextButton).unwrap().is_enabled());
        assert!(interface.button(PaginationElement::FirstButton).unwrap().is_enabled());
    }

    #[test]
    fn test_auto_hide_single_page() {
        let (doc, mut interface) = interface(1, 1, PaginationOptions::default().with_auto_hide(true));
        assert_eq!(doc.style(interface.wrapper(), "display").as_deref(), Some("none"));

        interface.pagination().lock().total = 4;
        interface.pagination_changed();
        assert_eq!(doc.style(interface.wrapper(), "display"), None);
    }

    #[test]
    fn test_change_layout_replaces_previous() {
        let (doc, mut interface) = interface(1, 2, PaginationOptions::default());
        interface.change_layout("%(currentPage)s");
        assert_eq!(doc.children(interface.wrapper()).len(), 1);
        assert_eq!(doc.text_content(interface.wrapper()), "1");
        assert_eq!(
            doc.parent(interface.element_node(PaginationElement::FirstButton)),
            None
        );
    }
}
