//! Date input.
//!
//! The field stores free text like any text input; [`StyledDateField::date`]
//! interprets it as an ISO `YYYY-MM-DD` date.

use chrono::NaiveDate;
use serde::Deserialize;
use styled_elements_core::{Document, EventTable, NodeId, ObjectWithEvents};

use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, NativeEventKind, StyledElement, StyledInputElement};

/// Events declared by [`StyledDateField`].
pub const DATE_FIELD_EVENTS: &[&str] = &["change"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Options for [`StyledDateField`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateFieldOptions {
    pub initial_value: String,
    pub class: String,
    pub name: String,
    /// Value of the input's `id` attribute.
    pub id: String,
    pub placeholder: String,
}

impl DateFieldOptions {
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn with_initial_date(self, date: NaiveDate) -> Self {
        self.with_initial_value(date.format(DATE_FORMAT).to_string())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

/// A text input holding a date.
///
/// # Events
///
/// - `change`: the user committed a new value; carries the raw text
pub struct StyledDateField {
    base: ElementBase,
    input: NodeId,
    default_value: String,
    events: EventTable<String>,
}

impl StyledDateField {
    pub fn new(document: &Document, options: DateFieldOptions) -> Self {
        let base = ElementBase::new(
            document,
            "div",
            &join_classes("styled_date_field", &options.class),
        );

        let input = document.create_element("input");
        document.set_attribute(input, "type", "text");
        for (name, value) in [
            ("name", &options.name),
            ("id", &options.id),
            ("placeholder", &options.placeholder),
        ] {
            if !value.is_empty() {
                document.set_attribute(input, name, value);
            }
        }
        document.set_value(input, &options.initial_value);

        let inner = document.create_element("div");
        let _ = document.append_child(inner, input);
        let _ = document.append_child(base.wrapper(), inner);

        Self {
            base: base.with_input(input),
            input,
            default_value: options.initial_value,
            events: EventTable::new(DATE_FIELD_EVENTS),
        }
    }

    /// The current value parsed as an ISO date, if it is one.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.value().trim(), DATE_FORMAT).ok()
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.set_value(date.format(DATE_FORMAT).to_string());
    }
}

impl ObjectWithEvents for StyledDateField {
    type Args = String;

    fn events(&self) -> &EventTable<String> {
        &self.events
    }
}

impl StyledElement for StyledDateField {
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

impl StyledInputElement for StyledDateField {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_on_input() {
        let doc = Document::headless();
        let field = StyledDateField::new(
            &doc,
            DateFieldOptions::default()
                .with_name("due")
                .with_id("due-date")
                .with_placeholder("YYYY-MM-DD"),
        );
        let input = field.base().input().unwrap();
        assert_eq!(doc.attribute(input, "id").as_deref(), Some("due-date"));
        assert_eq!(doc.attribute(input, "placeholder").as_deref(), Some("YYYY-MM-DD"));
        assert_eq!(doc.attribute(field.wrapper(), "id"), None);
    }

    #[test]
    fn test_date_parsing() {
        let doc = Document::headless();
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let mut field = StyledDateField::new(&doc, DateFieldOptions::default().with_initial_date(date));
        assert_eq!(field.value(), "2024-02-29");
        assert_eq!(field.date(), Some(date));

        field.set_value("next week".into());
        assert_eq!(field.date(), None);

        field.reset();
        assert_eq!(field.date(), Some(date));
    }
}
