//! Multi-line text input.

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, NodeId, ObjectWithEvents};

use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, NativeEventKind, StyledElement, StyledInputElement};

/// Events declared by [`StyledTextArea`].
pub const TEXT_AREA_EVENTS: &[&str] = &["change"];

/// Options for [`StyledTextArea`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAreaOptions {
    pub initial_value: String,
    pub class: String,
    /// Form name of the `textarea` node.
    pub name: String,
    /// Value of the wrapper's `id` attribute.
    pub id: String,
}

impl TextAreaOptions {
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A `textarea` wrapped in a `styled_text_area` block.
///
/// # Events
///
/// - `change`: the user committed a new value; carries the value
pub struct StyledTextArea {
    base: ElementBase,
    input: NodeId,
    default_value: String,
    events: EventTable<String>,
}

impl StyledTextArea {
    pub fn new(document: &Document, options: TextAreaOptions) -> Self {
        let base = ElementBase::new(
            document,
            "div",
            &join_classes("styled_text_area", &options.class),
        );
        base.set_element_id(&options.id);

        let input = document.create_element("textarea");
        if !options.name.is_empty() {
            document.set_attribute(input, "name", &options.name);
        }
        document.set_value(input, &options.initial_value);

        let inner = document.create_element("div");
        let _ = document.append_child(inner, input);
        let _ = document.append_child(base.wrapper(), inner);

        Self {
            base: base.with_input(input),
            input,
            default_value: options.initial_value,
            events: EventTable::new(TEXT_AREA_EVENTS),
        }
    }
}

impl ObjectWithEvents for StyledTextArea {
    type Args = String;

    fn events(&self) -> &EventTable<String> {
        &self.events
    }
}

impl StyledElement for StyledTextArea {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if event.kind != NativeEventKind::Change || event.target != self.input {
            return false;
        }
        if self.is_enabled() {
            self.events.emit("change", &self.value());
        }
        true
    }

    fn destroy(&mut self) {
        let _ = self.detach();
        self.events.destroy();
    }
}

impl StyledInputElement for StyledTextArea {
    type Value = String;

    fn value(&self) -> String {
        self.document().value(self.input)
    }

    fn set_value(&mut self, value: String) {
        self.document().set_value(self.input, &value);
    }

    fn default_value(&self) -> String {
        self.default_value.clone()
    }
}
