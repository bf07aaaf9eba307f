//! Panel widget implementation.
//!
//! This module provides [`Panel`], a box with a heading (title, optional
//! subtitle, action buttons) and an optional body container.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{ButtonOptions, Panel, PanelOptions};
//! use styled_elements::widget::StyledElement;
//! use styled_elements::Document;
//!
//! let doc = Document::headless();
//! let panel = Panel::new(
//!     &doc,
//!     PanelOptions::titled("Operators")
//!         .with_subtitle("3 available")
//!         .with_button(ButtonOptions::text("Add")),
//! );
//! assert_eq!(panel.title(), "Operators");
//! assert!(panel.body().is_some());
//! ```

use serde::Deserialize;
use styled_elements_core::{Document, NodeId};

use super::button::{ButtonOptions, StyledButton};
use super::container::{Container, ContainerOptions};
use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, StyledElement};

/// Class of a panel marked as selected.
pub const ACTIVE_CLASS: &str = "active";

/// Options for [`Panel`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelOptions {
    pub title: String,
    pub subtitle: String,
    /// Extra classes for the wrapper.
    #[serde(alias = "extraClass")]
    pub class: String,
    /// Visual state, rendered as `panel-<state>`. Default: `"default"`.
    pub state: String,
    /// Whether the panel can be marked active.
    pub selectable: bool,
    /// Build the panel without a body container.
    pub no_body: bool,
    pub buttons: Vec<ButtonOptions>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            class: String::new(),
            state: "default".to_string(),
            selectable: false,
            no_body: false,
            buttons: Vec::new(),
        }
    }
}

impl PanelOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_no_body(mut self, no_body: bool) -> Self {
        self.no_body = no_body;
        self
    }

    pub fn with_button(mut self, button: ButtonOptions) -> Self {
        self.buttons.push(button);
        self
    }
}

/// A titled box.
pub struct Panel {
    base: ElementBase,
    heading: NodeId,
    title: NodeId,
    subtitle: NodeId,
    options_area: NodeId,
    buttons: Vec<StyledButton>,
    body: Option<Container>,
    selectable: bool,
}

impl Panel {
    pub fn new(document: &Document, options: PanelOptions) -> Self {
        let state = if options.state.is_empty() { "default" } else { options.state.as_str() };
        let mut class = format!("panel panel-{state}");
        if options.selectable {
            class.push_str(" panel-selectable");
        }
        let base = ElementBase::new(document, "div", &join_classes(&class, &options.class));
        let wrapper = base.wrapper();

        let heading = document.create_element_with_class("div", "panel-heading");
        let title = document.create_element_with_class("h4", "panel-title");
        let subtitle = document.create_element_with_class("div", "panel-subtitle");
        let options_area = document.create_element_with_class("div", "panel-options");
        for node in [title, subtitle, options_area] {
            let _ = document.append_child(heading, node);
        }
        let _ = document.append_child(wrapper, heading);

        let body = (!options.no_body).then(|| {
            let mut body = Container::new(document, ContainerOptions::default().with_class("panel-body"));
            let _ = body.insert_into(wrapper, None);
            body
        });

        let mut panel = Self {
            base,
            heading,
            title,
            subtitle,
            options_area,
            buttons: Vec::new(),
            body,
            selectable: options.selectable,
        };
        panel.set_title(&options.title);
        panel.set_subtitle(&options.subtitle);
        for button in options.buttons {
            panel.add_button(StyledButton::new(document, button));
        }
        panel
    }

    pub fn heading(&self) -> NodeId {
        self.heading
    }

    pub fn title_node(&self) -> NodeId {
        self.title
    }

    pub fn subtitle_node(&self) -> NodeId {
        self.subtitle
    }

    /// The heading area holding the buttons.
    pub fn options_node(&self) -> NodeId {
        self.options_area
    }

    pub fn title(&self) -> String {
        self.document().text_content(self.title)
    }

    pub fn set_title(&mut self, title: &str) {
        self.document().set_text_content(self.title, title);
    }

    pub fn subtitle(&self) -> String {
        self.document().text_content(self.subtitle)
    }

    pub fn set_subtitle(&mut self, subtitle: &str) {
        self.document().set_text_content(self.subtitle, subtitle);
    }

    /// Place `button` in the heading. Returns its index.
    pub fn add_button(&mut self, mut button: StyledButton) -> usize {
        let _ = button.insert_into(self.options_area, None);
        self.buttons.push(button);
        self.buttons.len() - 1
    }

    pub fn button(&self, index: usize) -> Option<&StyledButton> {
        self.buttons.get(index)
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut StyledButton> {
        self.buttons.get_mut(index)
    }

    pub fn body(&self) -> Option<&Container> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut Container> {
        self.body.as_mut()
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Mark the panel active. Ignored unless the panel is selectable.
    pub fn set_active(&mut self, active: bool) {
        if self.selectable {
            self.document().toggle_class(self.wrapper(), ACTIVE_CLASS, active);
        }
    }

    pub fn is_active(&self) -> bool {
        self.has_class_name(ACTIVE_CLASS)
    }
}

impl StyledElement for Panel {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn repaint(&mut self, temporal: bool) {
        if let Some(body) = &mut self.body {
            body.repaint(temporal);
        }
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if self.buttons.iter_mut().any(|button| button.handle_event(event)) {
            return true;
        }
        self.body.as_mut().is_some_and(|body| body.handle_event(event))
    }

    fn destroy(&mut self) {
        for button in &mut self.buttons {
            button.destroy();
        }
        if let Some(body) = &mut self.body {
            body.destroy();
        }
        let _ = self.detach();
    }
}
