//! Groups of checkboxes or radio buttons read as one field.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{ButtonsGroup, RadioButtonOptions, StyledRadioButton};
//! use styled_elements::widget::StyledElement;
//! use styled_elements::Document;
//!
//! let doc = Document::headless();
//! let mut group = ButtonsGroup::new("size");
//! for value in ["small", "large"] {
//!     let index = group.insert_button(StyledRadioButton::new(&doc, "", value, RadioButtonOptions::default()));
//!     group.button_mut(index).unwrap().insert_into(doc.body(), None).unwrap();
//! }
//!
//! assert!(group.value().is_empty());
//! group.set_value(&["large"]);
//! assert_eq!(group.value(), vec!["large".to_string()]);
//! ```

use styled_elements_core::{EventTable, ObjectWithEvents};

use crate::logging::targets;
use crate::widget::{NativeEvent, NativeEventKind, StyledInputElement};

/// Events declared by [`ButtonsGroup`].
pub const BUTTONS_GROUP_EVENTS: &[&str] = &["change"];

/// Kind of the inputs in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    CheckBox,
    Radio,
}

/// A checkbox or radio button that can join a [`ButtonsGroup`].
pub trait GroupButton: StyledInputElement<Value = bool> {
    fn kind(&self) -> ButtonKind;

    /// The form value of the input (its `value` attribute).
    fn button_value(&self) -> String {
        self.document()
            .attribute(self.wrapper(), "value")
            .unwrap_or_default()
    }

    /// Stamp the group name on the input.
    fn set_group_name(&mut self, name: &str) {
        self.document().set_attribute(self.wrapper(), "name", name);
    }
}

/// Several checkboxes or radio buttons treated as one input.
///
/// The group owns its buttons; place them anywhere in the tree through
/// [`button_mut`](Self::button_mut) and route native events through
/// [`handle_event`](Self::handle_event).
///
/// The kind of the first inserted button decides how the value is read:
/// every checked value for checkboxes, at most one value for radios.
///
/// # Events
///
/// - `change`: a member changed; carries the group value
pub struct ButtonsGroup {
    name: String,
    buttons: Vec<Box<dyn GroupButton>>,
    events: EventTable<Vec<String>>,
}

impl ButtonsGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buttons: Vec::new(),
            events: EventTable::new(BUTTONS_GROUP_EVENTS),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take ownership of `button`, giving it the group name. Returns its
    /// index in the group.
    pub fn insert_button<B: GroupButton + 'static>(&mut self, mut button: B) -> usize {
        button.set_group_name(&self.name);
        self.buttons.push(Box::new(button));
        self.buttons.len() - 1
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn kind(&self) -> Option<ButtonKind> {
        self.buttons.first().map(|button| button.kind())
    }

    pub fn button(&self, index: usize) -> Option<&dyn GroupButton> {
        self.buttons.get(index).map(|button| &**button as &dyn GroupButton)
    }

    pub fn button_mut(&mut self, index: usize) -> Option<&mut (dyn GroupButton + 'static)> {
        self.buttons.get_mut(index).map(|button| &mut **button)
    }

    /// The checked buttons; at most one for a radio group.
    pub fn selected_buttons(&self) -> Vec<&dyn GroupButton> {
        let checked = self
            .buttons
            .iter()
            .filter(|button| button.value())
            .map(|button| &**button as &dyn GroupButton);
        match self.kind() {
            Some(ButtonKind::Radio) => checked.take(1).collect(),
            _ => checked.collect(),
        }
    }

    /// Values of the checked buttons.
    pub fn value(&self) -> Vec<String> {
        self.selected_buttons()
            .into_iter()
            .map(|button| button.button_value())
            .collect()
    }

    /// Check exactly the buttons whose value is listed. A radio group keeps
    /// only the last listed button in group order checked.
    pub fn set_value<S: AsRef<str>>(&mut self, values: &[S]) {
        let listed: Vec<bool> = self
            .buttons
            .iter()
            .map(|button| {
                let value = button.button_value();
                values.iter().any(|v| v.as_ref() == value)
            })
            .collect();
        let last_radio = match self.kind() {
            Some(ButtonKind::Radio) => listed.iter().rposition(|&checked| checked),
            _ => None,
        };
        for (index, (button, checked)) in self.buttons.iter_mut().zip(listed).enumerate() {
            let checked = match last_radio {
                Some(last) => index == last,
                None => checked,
            };
            button.set_value(checked);
        }
    }

    /// Reset every button to its initial state.
    pub fn reset(&mut self) {
        for button in &mut self.buttons {
            button.reset();
        }
    }

    /// Forward a native event to the members. A change on a member fires the
    /// group `change`; a radio selected by the user unchecks its siblings.
    pub fn handle_event(&mut self, event: &NativeEvent) -> bool {
        let Some(index) = self
            .buttons
            .iter_mut()
            .position(|button| button.handle_event(event))
        else {
            return false;
        };

        if event.kind == NativeEventKind::Change {
            let selected = &self.buttons[index];
            if selected.kind() == ButtonKind::Radio && selected.value() {
                for (i, button) in self.buttons.iter_mut().enumerate() {
                    if i != index {
                        button.set_value(false);
                    }
                }
            }
            let value = self.value();
            tracing::trace!(target: targets::WIDGET, group = %self.name, ?value, "buttons group changed");
            self.events.emit("change", &value);
        }
        true
    }

    /// Destroy every member and release the group's events.
    pub fn destroy(&mut self) {
        for button in &mut self.buttons {
            button.destroy();
        }
        self.events.destroy();
    }
}

impl ObjectWithEvents for ButtonsGroup {
    type Args = Vec<String>;

    fn events(&self) -> &EventTable<Vec<String>> {
        &self.events
    }
}

impl std::fmt::Debug for ButtonsGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonsGroup")
            .field("name", &self.name)
            .field("len", &self.buttons.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{CheckBoxOptions, RadioButtonOptions, StyledCheckBox, StyledRadioButton};
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use styled_elements_core::Document;

    fn radio_group(doc: &Document, values: &[&str]) -> ButtonsGroup {
        let mut group = ButtonsGroup::new("choice");
        for value in values {
            group.insert_button(StyledRadioButton::new(doc, "", value, RadioButtonOptions::default()));
        }
        group
    }

    #[test]
    fn test_radio_group_value() {
        let doc = Document::headless();
        let mut group = radio_group(&doc, &["a", "b", "c"]);
        assert_eq!(group.kind(), Some(ButtonKind::Radio));
        assert!(group.value().is_empty());

        group.set_value(&["b"]);
        assert_eq!(group.value(), vec!["b".to_string()]);
        assert_eq!(group.selected_buttons().len(), 1);
    }

    #[test]
    fn test_radio_set_value_keeps_last_listed() {
        let doc = Document::headless();
        let mut group = radio_group(&doc, &["a", "b", "c"]);
        group.set_value(&["c", "a"]);
        let checked: Vec<bool> = (0..3).map(|i| group.button(i).unwrap().value()).collect();
        assert_eq!(checked, vec![false, false, true]);
        assert_eq!(group.value(), vec!["c".to_string()]);
    }

    #[test]
    fn test_group_stamps_name() {
        let doc = Document::headless();
        let group = radio_group(&doc, &["a"]);
        let input = group.button(0).unwrap().wrapper();
        assert_eq!(doc.attribute(input, "name").as_deref(), Some("choice"));
    }

    #[test]
    fn test_checkbox_group_collects_all_checked() {
        let doc = Document::headless();
        let mut group = ButtonsGroup::new("features");
        for (value, checked) in [("x", true), ("y", false), ("z", true)] {
            group.insert_button(StyledCheckBox::new(
                &doc,
                CheckBoxOptions::default()
                    .with_value(value)
                    .with_initially_checked(checked),
            ));
        }
        assert_eq!(group.value(), vec!["x".to_string(), "z".to_string()]);

        group.set_value(&["y"]);
        assert_eq!(group.value(), vec!["y".to_string()]);

        group.reset();
        assert_eq!(group.value(), vec!["x".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_member_change_fires_group_change() {
        let doc = Document::headless();
        let mut group = radio_group(&doc, &["a", "b"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        group
            .add_event_listener("change", move |value: &Vec<String>| s.lock().push(value.clone()))
            .unwrap();

        group.set_value(&["a"]);
        let b = group.button(1).unwrap().wrapper();
        doc.set_checked(b, true);
        assert!(group.handle_event(&NativeEvent::change(b)));
        assert!(!group.handle_event(&NativeEvent::change(doc.body())));

        assert_eq!(*seen.lock(), vec![vec!["b".to_string()]]);
        assert!(!group.button(0).unwrap().value());
    }
}
