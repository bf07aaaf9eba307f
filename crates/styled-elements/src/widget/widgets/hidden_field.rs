//! Hidden form field.

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, NodeId, ObjectWithEvents};

use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{StyledElement, StyledInputElement};

/// Options for [`StyledHiddenField`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HiddenFieldOptions {
    pub initial_value: String,
    pub class: String,
    pub name: String,
    pub id: String,
}

impl HiddenFieldOptions {
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// An `input type=hidden` carrying a value through a form. Declares no
/// events.
pub struct StyledHiddenField {
    base: ElementBase,
    input: NodeId,
    default_value: String,
    events: EventTable<String>,
}

impl StyledHiddenField {
    pub fn new(document: &Document, options: HiddenFieldOptions) -> Self {
        let base = ElementBase::new(
            document,
            "div",
            &join_classes("styled_hidden_field", &options.class),
        );
        base.set_element_id(&options.id);

        let input = document.create_element("input");
        document.set_attribute(input, "type", "hidden");
        if !options.name.is_empty() {
            document.set_attribute(input, "name", &options.name);
        }
        document.set_value(input, &options.initial_value);
        let _ = document.append_child(base.wrapper(), input);

        Self {
            base: base.with_input(input),
            input,
            default_value: options.initial_value,
            events: EventTable::new(&[]),
        }
    }
}

impl ObjectWithEvents for StyledHiddenField {
    type Args = String;

    fn events(&self) -> &EventTable<String> {
        &self.events
    }
}

impl StyledElement for StyledHiddenField {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl StyledInputElement for StyledHiddenField {
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
