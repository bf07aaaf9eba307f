//! RadioButton widget implementation.

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, ObjectWithEvents};

use super::button_group::{ButtonKind, GroupButton};
use super::checkbox::{TOGGLE_EVENTS, toggle_change, toggle_input};
use crate::widget::base::ElementBase;
use crate::widget::{NativeEvent, StyledElement, StyledInputElement};

/// Options for [`StyledRadioButton`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadioButtonOptions {
    pub initially_checked: bool,
    pub class: String,
    /// Input name, used when the radio is created without a group name.
    pub name: String,
    pub id: String,
}

impl RadioButtonOptions {
    pub fn with_initially_checked(mut self, checked: bool) -> Self {
        self.initially_checked = checked;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A native radio button.
///
/// Radios sharing a group name are exclusive inside a
/// [`ButtonsGroup`](super::ButtonsGroup).
///
/// # Events
///
/// - `change`: the user selected the radio; carries the checked flag
pub struct StyledRadioButton {
    base: ElementBase,
    default_checked: bool,
    events: EventTable<bool>,
}

impl StyledRadioButton {
    /// Create a radio in `group` submitting `value`. An empty group falls
    /// back to the `name` option.
    pub fn new(document: &Document, group: &str, value: &str, options: RadioButtonOptions) -> Self {
        let name = if group.is_empty() { options.name.as_str() } else { group };
        let base = toggle_input(
            document,
            "radio",
            &options.class,
            name,
            &options.id,
            value,
            options.initially_checked,
        );
        Self {
            base,
            default_checked: options.initially_checked,
            events: EventTable::new(TOGGLE_EVENTS),
        }
    }
}

impl ObjectWithEvents for StyledRadioButton {
    type Args = bool;

    fn events(&self) -> &EventTable<bool> {
        &self.events
    }
}

impl StyledElement for StyledRadioButton {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        toggle_change(&self.base, &self.events, event)
    }

    fn destroy(&mut self) {
        let _ = self.detach();
        self.events.destroy();
    }
}

impl StyledInputElement for StyledRadioButton {
    type Value = bool;

    fn value(&self) -> bool {
        self.document().checked(self.wrapper())
    }

    fn set_value(&mut self, checked: bool) {
        self.document().set_checked(self.wrapper(), checked);
    }

    fn default_value(&self) -> bool {
        self.default_checked
    }
}

impl GroupButton for StyledRadioButton {
    fn kind(&self) -> ButtonKind {
        ButtonKind::Radio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radio_input() {
        let doc = Document::headless();
        let radio = StyledRadioButton::new(
            &doc,
            "size",
            "large",
            RadioButtonOptions::default().with_initially_checked(true).with_id("size-large"),
        );
        let input = radio.wrapper();
        assert_eq!(doc.attribute(input, "type").as_deref(), Some("radio"));
        assert_eq!(doc.attribute(input, "name").as_deref(), Some("size"));
        assert_eq!(doc.attribute(input, "id").as_deref(), Some("size-large"));
        assert_eq!(radio.button_value(), "large");
        assert!(radio.value());
    }

    #[test]
    fn test_name_option_without_group() {
        let doc = Document::headless();
        let radio = StyledRadioButton::new(
            &doc,
            "",
            "a",
            RadioButtonOptions {
                name: "fallback".into(),
                ..Default::default()
            },
        );
        assert_eq!(doc.attribute(radio.wrapper(), "name").as_deref(), Some("fallback"));
    }
}
