//! Modal message box covering its parent.
//!
//! [`StyledAlert`] lays a translucent background over the node it is
//! inserted into and shows a message box with a title bar and a content
//! container. The sizing rules live in [`AlertGeometry::compute`].

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, NodeId, ObjectWithEvents, Rect, Result, Size};

use super::container::{Container, ContainerOptions};
use crate::logging::{PerfSpan, targets};
use crate::widget::base::ElementBase;
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Events declared by [`StyledAlert`].
pub const ALERT_EVENTS: &[&str] = &["close"];

/// Severity of an alert, reflected in its wrapper class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    #[default]
    Info,
    Warning,
    Error,
}

impl AlertKind {
    pub fn class_name(self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
        }
    }
}

/// Options for [`StyledAlert`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertOptions {
    /// Show a close cell in the title bar. Default: `true`.
    pub closable: bool,
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
    #[serde(alias = "type")]
    pub kind: AlertKind,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            closable: true,
            min_width: 200.0,
            max_width: 400.0,
            min_height: 100.0,
            max_height: 200.0,
            kind: AlertKind::Info,
        }
    }
}

impl AlertOptions {
    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn with_kind(mut self, kind: AlertKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_width_range(mut self, min: f64, max: f64) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    pub fn with_height_range(mut self, min: f64, max: f64) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }
}

/// Initial body of an alert.
pub enum AlertContent {
    Text(String),
    Widget(Box<dyn StyledElement>),
}

impl From<&str> for AlertContent {
    fn from(text: &str) -> Self {
        AlertContent::Text(text.to_string())
    }
}

impl From<String> for AlertContent {
    fn from(text: String) -> Self {
        AlertContent::Text(text)
    }
}

impl From<Box<dyn StyledElement>> for AlertContent {
    fn from(widget: Box<dyn StyledElement>) -> Self {
        AlertContent::Widget(widget)
    }
}

/// Computed placement of the message box inside the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertGeometry {
    /// Message box, relative to the overlay.
    pub message: Rect,
    /// Height left for the content container.
    pub content_height: f64,
}

impl AlertGeometry {
    /// Size the message box at 80 % of the overlay, offset by 10 %, then
    /// clamp it to the option limits. `chrome_height` is the vertical space
    /// taken by the title bar, the message borders and the margins; the
    /// content gets the rest, never less than zero.
    pub fn compute(overlay: Size, options: &AlertOptions, chrome_height: f64) -> Self {
        let width = clamp(overlay.width * 80.0 / 100.0, options.min_width, options.max_width);
        let height = clamp(overlay.height * 80.0 / 100.0, options.min_height, options.max_height);
        let message = Rect::new(overlay.width / 10.0, overlay.height / 10.0, width, height);
        Self {
            message,
            content_height: (height - chrome_height).max(0.0),
        }
    }
}

// Inverted limits resolve to the maximum instead of panicking.
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// A message box over its parent node.
///
/// Inserting the alert sizes it to its parent. Once closed the alert is
/// spent: it stays detached and its events are released.
///
/// # Events
///
/// - `close`: the alert was removed from its parent; carries the wrapper id
pub struct StyledAlert {
    base: ElementBase,
    message: NodeId,
    header: NodeId,
    close_button: Option<NodeId>,
    content: Container,
    options: AlertOptions,
    closed: bool,
    events: EventTable<NodeId>,
}

impl StyledAlert {
    pub fn new(document: &Document, title: &str, content: impl Into<AlertContent>, options: AlertOptions) -> Self {
        let base = ElementBase::new(
            document,
            "div",
            &format!("styled_alert {}", options.kind.class_name()),
        );
        let wrapper = base.wrapper();

        let background = document.create_element_with_class("div", "background");
        let _ = document.append_child(wrapper, background);
        let message = document.create_element_with_class("div", "message");
        let _ = document.append_child(wrapper, message);

        let header = document.create_element_with_class("div", "header");
        let table = document.create_element("table");
        document.set_attribute(table, "width", "100%");
        let tbody = document.create_element("tbody");
        let row = document.create_element("tr");
        let title_cell = document.create_element_with_class("td", "title");
        let icon = document.create_element_with_class("span", &format!("icon dialog-{}", options.kind.class_name()));
        let _ = document.append_child(title_cell, icon);
        if !title.is_empty() {
            let text = document.create_text(title);
            let _ = document.append_child(title_cell, text);
        }
        let _ = document.append_child(row, title_cell);

        let close_button = options.closable.then(|| {
            let cell = document.create_element_with_class("td", "close_button");
            let _ = document.append_child(row, cell);
            cell
        });

        let _ = document.append_child(tbody, row);
        let _ = document.append_child(table, tbody);
        let _ = document.append_child(header, table);
        let _ = document.append_child(message, header);

        let mut content_container = Container::new(document, ContainerOptions::default().with_class("content"));
        match content.into() {
            AlertContent::Text(text) => document.set_text_content(content_container.wrapper(), &text),
            AlertContent::Widget(widget) => {
                let _ = content_container.append_boxed(widget);
            }
        }
        let _ = content_container.insert_into(message, None);

        Self {
            base,
            message,
            header,
            close_button,
            content: content_container,
            options,
            closed: false,
            events: EventTable::new(ALERT_EVENTS),
        }
    }

    pub fn options(&self) -> &AlertOptions {
        &self.options
    }

    pub fn content(&self) -> &Container {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Container {
        &mut self.content
    }

    /// The message box node.
    pub fn message(&self) -> NodeId {
        self.message
    }

    /// Append a widget to the content container.
    pub fn append_child<W: StyledElement + 'static>(&mut self, child: W) -> Result<NodeId> {
        self.content.append_child(child)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Remove the alert from its parent and fire `close`. Only the first call
    /// has any effect.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.base.parent().is_some() {
            let _ = self.base.detach();
            self.events.emit("close", &self.wrapper());
        }
        tracing::debug!(target: targets::WIDGET, kind = ?self.options.kind, "alert closed");
        self.events.destroy();
    }

    /// Vertical space used around the content: title bar height, message
    /// borders, header margins and the content's bottom margin.
    fn chrome_height(&self) -> f64 {
        let doc = self.document();
        let message = doc.box_model(self.message);
        let header = doc.box_model(self.header);
        let content = doc.box_model(self.content.wrapper());
        doc.offset_height(self.header) + message.border.vertical() + header.margin.vertical() + content.margin.bottom
    }
}

impl ObjectWithEvents for StyledAlert {
    type Args = NodeId;

    fn events(&self) -> &EventTable<NodeId> {
        &self.events
    }
}

impl StyledElement for StyledAlert {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn insert_into(&mut self, parent: NodeId, before: Option<NodeId>) -> Result<()> {
        self.base.insert_into(parent, before)?;
        self.repaint(false);
        Ok(())
    }

    fn repaint(&mut self, temporal: bool) {
        let Some(parent) = self.base.parent() else {
            return;
        };
        let _span = PerfSpan::new("alert_repaint");
        let doc = self.document().clone();
        let wrapper = self.wrapper();

        let position = doc.bounding_client_rect(parent);
        doc.set_style_px(wrapper, "top", position.y);
        doc.set_style_px(wrapper, "left", position.x);
        doc.set_style_px(wrapper, "width", doc.client_width(parent));
        doc.set_style_px(wrapper, "height", doc.client_height(parent));

        let overlay = Size::new(doc.offset_width(wrapper), doc.offset_height(wrapper));
        let geometry = AlertGeometry::compute(overlay, &self.options, self.chrome_height());
        let message = self.message;
        doc.set_style_px(message, "top", geometry.message.y);
        doc.set_style_px(message, "left", geometry.message.x);
        doc.set_style_px(message, "width", geometry.message.width);
        doc.set_style_px(message, "height", geometry.message.height);
        doc.set_style_px(self.content.wrapper(), "height", geometry.content_height);
        tracing::trace!(target: targets::LAYOUT, ?geometry, "alert layout");

        self.content.repaint(temporal);
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if event.kind == NativeEventKind::Click {
            if let Some(cell) = self.close_button {
                if event.is_within(self.document(), cell) {
                    self.close();
                    return true;
                }
            }
        }
        self.content.handle_event(event)
    }

    fn destroy(&mut self) {
        self.close();
        self.content.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::widgets::{ButtonOptions, StyledButton};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use styled_elements_core::StaticLayout;

    #[test]
    fn test_geometry_uses_eighty_percent_within_limits() {
        let options = AlertOptions::default();
        let geometry = AlertGeometry::compute(Size::new(400.0, 200.0), &options, 20.0);
        assert_eq!(geometry.message, Rect::new(40.0, 20.0, 320.0, 160.0));
        assert_eq!(geometry.content_height, 140.0);
    }

    #[test]
    fn test_geometry_clamps_to_limits() {
        let options = AlertOptions::default();
        let large = AlertGeometry::compute(Size::new(2000.0, 1000.0), &options, 0.0);
        assert_eq!(large.message.width, 400.0);
        assert_eq!(large.message.height, 200.0);

        let small = AlertGeometry::compute(Size::new(100.0, 50.0), &options, 0.0);
        assert_eq!(small.message.width, 200.0);
        assert_eq!(small.message.height, 100.0);
    }

    #[test]
    fn test_content_height_never_negative() {
        let options = AlertOptions::default();
        let geometry = AlertGeometry::compute(Size::new(100.0, 50.0), &options, 500.0);
        assert_eq!(geometry.content_height, 0.0);
    }

    #[test]
    fn test_alert_structure() {
        let doc = Document::headless();
        let alert = StyledAlert::new(&doc, "Oops", "Something failed", AlertOptions::default().with_kind(AlertKind::Error));
        assert_eq!(doc.class_names(alert.wrapper()), vec!["styled_alert", "error"]);
        assert_eq!(doc.find_by_class(alert.wrapper(), "close_button").len(), 1);
        assert_eq!(doc.text_content(alert.content().wrapper()), "Something failed");

        let plain = StyledAlert::new(&doc, "", "x", AlertOptions::default().with_closable(false));
        assert!(doc.find_by_class(plain.wrapper(), "close_button").is_empty());
    }

    #[test]
    fn test_insert_sizes_to_parent() {
        let layout = Arc::new(StaticLayout::new());
        let doc = Document::new(layout.clone());
        let host = doc.create_element("div");
        doc.append_child(doc.body(), host).unwrap();
        layout.set_size(host, 500.0, 300.0);

        let mut alert = StyledAlert::new(&doc, "Title", "body", AlertOptions::default());
        alert.insert_into(host, None).unwrap();

        assert_eq!(doc.style_px(alert.wrapper(), "width"), Some(500.0));
        assert_eq!(doc.style_px(alert.message(), "width"), Some(400.0));
        assert_eq!(doc.style_px(alert.message(), "height"), Some(200.0));
        assert_eq!(doc.style_px(alert.message(), "left"), Some(50.0));
    }

    #[test]
    fn test_close_fires_once() {
        let doc = Document::headless();
        let mut alert = StyledAlert::new(&doc, "Title", "body", AlertOptions::default());
        alert.insert_into(doc.body(), None).unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        alert
            .add_event_listener("close", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let close_cell = doc.find_by_class(alert.wrapper(), "close_button")[0];
        assert!(alert.handle_event(&NativeEvent::click(close_cell)));
        alert.close();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(alert.is_closed());
        assert!(doc.parent(alert.wrapper()).is_none());
    }

    #[test]
    fn test_append_child_goes_to_content() {
        let doc = Document::headless();
        let mut alert = StyledAlert::new(&doc, "Title", "", AlertOptions::default());
        let button = StyledButton::new(&doc, ButtonOptions::text("Ok"));
        let id = alert.append_child(button).unwrap();
        assert_eq!(doc.parent(id), Some(alert.content().wrapper()));
    }

    #[test]
    fn test_options_from_json() {
        let options: AlertOptions = serde_json::from_str(r#"{"type": "warning", "maxWidth": 600}"#).unwrap();
        assert_eq!(options.kind, AlertKind::Warning);
        assert_eq!(options.max_width, 600.0);
        assert!(options.closable);
    }
}
