//! CheckBox widget implementation.
//!
//! This module provides [`StyledCheckBox`], a native checkbox whose value is
//! its checked flag.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{CheckBoxOptions, StyledCheckBox};
//! use styled_elements::widget::StyledInputElement;
//! use styled_elements::{Document, ObjectWithEvents};
//!
//! let doc = Document::headless();
//! let mut checkbox = StyledCheckBox::new(&doc, CheckBoxOptions::default().with_value("terms"));
//! checkbox.add_event_listener("change", |checked| println!("checked: {checked}")).unwrap();
//!
//! checkbox.set_value(true);
//! assert!(checkbox.value());
//! ```

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, ObjectWithEvents};

use super::button_group::{ButtonKind, GroupButton};
use crate::widget::base::ElementBase;
use crate::widget::{NativeEvent, NativeEventKind, StyledElement, StyledInputElement};

/// Events declared by checkboxes and radio buttons.
pub const TOGGLE_EVENTS: &[&str] = &["change"];

/// Options for [`StyledCheckBox`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckBoxOptions {
    pub initially_checked: bool,
    pub class: String,
    pub name: String,
    pub id: String,
    /// Form value submitted when checked.
    pub value: String,
    /// Name of the group the checkbox belongs to. Overrides `name`.
    ///
    /// Only the `name` attribute is set; the checkbox joins a
    /// [`ButtonsGroup`](super::ButtonsGroup) instance through
    /// [`ButtonsGroup::insert_button`](super::ButtonsGroup::insert_button),
    /// which also renames it after the group.
    pub group: Option<String>,
}

impl Default for CheckBoxOptions {
    fn default() -> Self {
        Self {
            initially_checked: false,
            class: String::new(),
            name: String::new(),
            id: String::new(),
            value: "on".to_string(),
            group: None,
        }
    }
}

impl CheckBoxOptions {
    pub fn with_initially_checked(mut self, checked: bool) -> Self {
        self.initially_checked = checked;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Build the `input` node shared by checkboxes and radio buttons.
pub(crate) fn toggle_input(
    document: &Document,
    input_type: &str,
    class: &str,
    name: &str,
    id: &str,
    value: &str,
    checked: bool,
) -> ElementBase {
    let base = ElementBase::new(document, "input", class);
    let input = base.wrapper();
    document.set_attribute(input, "type", input_type);
    document.set_attribute(input, "value", value);
    if !name.is_empty() {
        document.set_attribute(input, "name", name);
    }
    base.set_element_id(id);
    document.set_checked(input, checked);
    base.with_input(input)
}

/// Handle a native change on a toggle input. Returns whether the event
/// targeted it.
pub(crate) fn toggle_change(
    base: &ElementBase,
    events: &EventTable<bool>,
    event: &NativeEvent,
) -> bool {
    if event.kind != NativeEventKind::Change || event.target != base.wrapper() {
        return false;
    }
    if base.is_enabled() {
        events.emit("change", &base.document().checked(base.wrapper()));
    }
    true
}

/// A native checkbox.
///
/// # Events
///
/// - `change`: the user toggled the box; carries the new checked flag
pub struct StyledCheckBox {
    base: ElementBase,
    default_checked: bool,
    events: EventTable<bool>,
}

impl StyledCheckBox {
    pub fn new(document: &Document, options: CheckBoxOptions) -> Self {
        let name = options.group.as_deref().unwrap_or(options.name.as_str());
        let base = toggle_input(
            document,
            "checkbox",
            &options.class,
            name,
            &options.id,
            &options.value,
            options.initially_checked,
        );
        Self {
            base,
            default_checked: options.initially_checked,
            events: EventTable::new(TOGGLE_EVENTS),
        }
    }
}

impl ObjectWithEvents for StyledCheckBox {
    type Args = bool;

    fn events(&self) -> &EventTable<bool> {
        &self.events
    }
}

impl StyledElement for StyledCheckBox {
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

impl StyledInputElement for StyledCheckBox {
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

impl GroupButton for StyledCheckBox {
    fn kind(&self) -> ButtonKind {
        ButtonKind::CheckBox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::widgets::ButtonsGroup;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_checkbox_input() {
        let doc = Document::headless();
        let checkbox = StyledCheckBox::new(
            &doc,
            CheckBoxOptions::default()
                .with_initially_checked(true)
                .with_name("ignored")
                .with_group("features"),
        );
        let input = checkbox.wrapper();
        assert_eq!(checkbox.base().input(), Some(input));
        assert_eq!(doc.attribute(input, "type").as_deref(), Some("checkbox"));
        assert_eq!(doc.attribute(input, "name").as_deref(), Some("features"));
        assert_eq!(checkbox.button_value(), "on");
        assert!(checkbox.value());
    }

    #[test]
    fn test_group_name_is_replaced_when_joining_a_group() {
        let doc = Document::headless();
        let checkbox = StyledCheckBox::new(&doc, CheckBoxOptions::default().with_group("draft"));
        let input = checkbox.wrapper();
        let mut group = ButtonsGroup::new("features");
        assert!(group.is_empty());

        group.insert_button(checkbox);
        assert_eq!(group.len(), 1);
        assert_eq!(doc.attribute(input, "name").as_deref(), Some("features"));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let doc = Document::headless();
        let mut checkbox = StyledCheckBox::new(&doc, CheckBoxOptions::default());
        checkbox.set_value(true);
        checkbox.reset();
        assert!(!checkbox.value());
    }

    #[test]
    fn test_change_carries_checked_flag() {
        let doc = Document::headless();
        let mut checkbox = StyledCheckBox::new(&doc, CheckBoxOptions::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        checkbox
            .add_event_listener("change", move |&checked| s.lock().push(checked))
            .unwrap();

        doc.set_checked(checkbox.wrapper(), true);
        assert!(checkbox.handle_event(&NativeEvent::change(checkbox.wrapper())));

        checkbox.disable();
        assert!(doc.disabled(checkbox.wrapper()));
        doc.set_checked(checkbox.wrapper(), false);
        checkbox.handle_event(&NativeEvent::change(checkbox.wrapper()));

        assert_eq!(*seen.lock(), vec![true]);
    }
}
