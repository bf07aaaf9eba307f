//! Button widget implementation.
//!
//! This module provides [`StyledButton`], a clickable element used on its own
//! and as the building block of tab close buttons, pagination controls and
//! popup buttons.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{ButtonOptions, StyledButton};
//! use styled_elements::widget::{NativeEvent, StyledElement};
//! use styled_elements::{Document, ObjectWithEvents};
//!
//! let doc = Document::headless();
//! let mut button = StyledButton::new(&doc, ButtonOptions::text("Save").with_title("Save changes"));
//! button.add_event_listener("click", |_| println!("saved")).unwrap();
//!
//! assert!(button.handle_event(&NativeEvent::click(button.wrapper())));
//! ```

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, NodeId, ObjectWithEvents};

use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Events declared by [`StyledButton`].
pub const BUTTON_EVENTS: &[&str] = &["click"];

/// Options for [`StyledButton`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonOptions {
    /// Label text. No label node is created when empty.
    pub text: String,
    pub class: String,
    /// Render without the button chrome.
    pub plain: bool,
    /// Tooltip text, stored in the `title` attribute.
    pub title: String,
    /// Icon class of an `i` node placed before the label.
    pub icon_class: String,
    pub id: String,
}

impl ButtonOptions {
    /// Options for a button showing `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_icon_class(mut self, icon_class: impl Into<String>) -> Self {
        self.icon_class = icon_class.into();
        self
    }
}

/// A clickable button.
///
/// # Events
///
/// - `click`: the button was clicked while enabled
pub struct StyledButton {
    base: ElementBase,
    label: Option<NodeId>,
    events: EventTable<()>,
}

impl StyledButton {
    pub fn new(document: &Document, options: ButtonOptions) -> Self {
        let mut class = join_classes("styled_button", &options.class);
        if options.plain {
            class.push_str(" plain");
        }
        let base = ElementBase::new(document, "div", &class);
        base.set_element_id(&options.id);
        let wrapper = base.wrapper();

        if !options.title.is_empty() {
            document.set_attribute(wrapper, "title", &options.title);
        }

        if !options.icon_class.is_empty() {
            let icon = document.create_element_with_class("i", &options.icon_class);
            let _ = document.append_child(wrapper, icon);
        }

        let mut button = Self {
            base,
            label: None,
            events: EventTable::new(BUTTON_EVENTS),
        };
        if !options.text.is_empty() {
            button.set_text(&options.text);
        }
        button
    }

    pub fn text(&self) -> String {
        self.label
            .map(|label| self.document().text_content(label))
            .unwrap_or_default()
    }

    pub fn set_text(&mut self, text: &str) {
        match self.label {
            Some(label) => self.document().set_text_content(label, text),
            None => {
                let label = self.document().create_element("span");
                self.document().set_text_content(label, text);
                if self.document().append_child(self.wrapper(), label).is_ok() {
                    self.label = Some(label);
                }
            }
        }
    }

    pub fn set_title(&self, title: &str) {
        if title.is_empty() {
            self.document().remove_attribute(self.wrapper(), "title");
        } else {
            self.document().set_attribute(self.wrapper(), "title", title);
        }
    }

    /// Fire `click` as if the user clicked the button.
    pub fn click(&self) {
        if self.is_enabled() {
            self.events.emit("click", &());
        }
    }
}

impl ObjectWithEvents for StyledButton {
    type Args = ();

    fn events(&self) -> &EventTable<()> {
        &self.events
    }
}

impl StyledElement for StyledButton {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if event.kind != NativeEventKind::Click || !event.is_within(self.document(), self.wrapper()) {
            return false;
        }
        self.click();
        true
    }

    fn destroy(&mut self) {
        let _ = self.detach();
        self.events.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_button_structure() {
        let doc = Document::headless();
        let button = StyledButton::new(
            &doc,
            ButtonOptions::text("X")
                .with_plain(true)
                .with_class("close_button")
                .with_title("Close Tab"),
        );
        assert_eq!(
            doc.class_names(button.wrapper()),
            vec!["styled_button", "close_button", "plain"]
        );
        assert_eq!(doc.attribute(button.wrapper(), "title").as_deref(), Some("Close Tab"));
        assert_eq!(button.text(), "X");
    }

    #[test]
    fn test_click_respects_enabled_state() {
        let doc = Document::headless();
        let mut button = StyledButton::new(&doc, ButtonOptions::text("Go"));
        let clicks = Arc::new(AtomicUsize::new(0));
        let c = clicks.clone();
        button
            .add_event_listener("click", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let label = doc.children(button.wrapper())[0];
        assert!(button.handle_event(&NativeEvent::click(label)));
        button.disable();
        assert!(button.handle_event(&NativeEvent::click(button.wrapper())));
        assert!(!button.handle_event(&NativeEvent::click(doc.body())));

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_icon_precedes_label() {
        let doc = Document::headless();
        let button = StyledButton::new(
            &doc,
            ButtonOptions::text("Next").with_icon_class("icon-next-page"),
        );
        let children = doc.children(button.wrapper());
        assert_eq!(doc.tag(children[0]).as_deref(), Some("i"));
        assert_eq!(doc.tag(children[1]).as_deref(), Some("span"));
    }
}
