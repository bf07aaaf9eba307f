//! Numeric input with stepper buttons.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{NumericFieldOptions, StyledNumericField};
//! use styled_elements::widget::StyledInputElement;
//! use styled_elements::Document;
//!
//! let doc = Document::headless();
//! let mut field = StyledNumericField::new(
//!     &doc,
//!     NumericFieldOptions::default().with_initial_value(9.5).with_range(0.0, 10.0),
//! );
//! field.increment();
//! assert_eq!(field.value(), 10.0);
//! ```

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, NodeId, ObjectWithEvents};

use crate::logging::targets;
use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, NativeEventKind, StyledElement, StyledInputElement};

/// Events declared by [`StyledNumericField`].
pub const NUMERIC_FIELD_EVENTS: &[&str] = &["change"];

/// Options for [`StyledNumericField`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumericFieldOptions {
    pub initial_value: f64,
    /// Extra classes of the input node, after `numeric_field`.
    pub class: String,
    pub name: String,
    pub id: String,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Amount added or subtracted by the stepper buttons.
    pub inc: f64,
}

impl Default for NumericFieldOptions {
    fn default() -> Self {
        Self {
            initial_value: 0.0,
            class: String::new(),
            name: String::new(),
            id: String::new(),
            min_value: None,
            max_value: None,
            inc: 1.0,
        }
    }
}

impl NumericFieldOptions {
    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = value;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn with_min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn with_max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn with_inc(mut self, inc: f64) -> Self {
        self.inc = inc;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Round to two decimal places.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A text input holding a number, with increment and decrement buttons.
///
/// Stepping rounds to two decimals, then clamps to `max_value` when
/// incrementing and to `min_value` when decrementing. Text typed by the user
/// is not clamped.
///
/// # Events
///
/// - `change`: the value changed through the steppers or a native change
pub struct StyledNumericField {
    base: ElementBase,
    input: NodeId,
    top_button: NodeId,
    bottom_button: NodeId,
    min_value: Option<f64>,
    max_value: Option<f64>,
    inc: f64,
    default_value: f64,
    events: EventTable<f64>,
}

impl StyledNumericField {
    pub fn new(document: &Document, options: NumericFieldOptions) -> Self {
        let base = ElementBase::new(document, "div", "styled_numeric_field");
        base.set_element_id(&options.id);
        let wrapper = base.wrapper();

        let input = document.create_element_with_class(
            "input",
            &join_classes("numeric_field", &options.class),
        );
        document.set_attribute(input, "type", "text");
        if !options.name.is_empty() {
            document.set_attribute(input, "name", &options.name);
        }
        if let Some(min) = options.min_value {
            document.set_attribute(input, "min", &min.to_string());
        }
        if let Some(max) = options.max_value {
            document.set_attribute(input, "max", &max.to_string());
        }
        document.set_value(input, &options.initial_value.to_string());

        let top_button = document.create_element_with_class("div", "numeric_top_button");
        let bottom_button = document.create_element_with_class("div", "numeric_bottom_button");

        let inner = document.create_element("div");
        let _ = document.append_child(inner, input);
        for node in [inner, top_button, bottom_button] {
            let _ = document.append_child(wrapper, node);
        }

        Self {
            base: base.with_input(input),
            input,
            top_button,
            bottom_button,
            min_value: options.min_value,
            max_value: options.max_value,
            inc: options.inc,
            default_value: options.initial_value,
            events: EventTable::new(NUMERIC_FIELD_EVENTS),
        }
    }

    /// The raw text of the input.
    pub fn text(&self) -> String {
        self.document().value(self.input)
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// Step up by `inc`, as the top button does.
    pub fn increment(&mut self) {
        self.step(self.inc);
    }

    /// Step down by `inc`, as the bottom button does.
    pub fn decrement(&mut self) {
        self.step(-self.inc);
    }

    fn step(&mut self, inc: f64) {
        if !self.is_enabled() {
            return;
        }
        let current = self.value();
        if current.is_nan() {
            return;
        }

        let mut value = round_cents(current + inc);
        if inc > 0.0 {
            if let Some(max) = self.max_value.filter(|&max| value > max) {
                value = max;
            }
        } else if let Some(min) = self.min_value.filter(|&min| value < min) {
            value = min;
        }

        if value != current {
            tracing::trace!(target: targets::WIDGET, from = current, to = value, "numeric field stepped");
            self.set_value(value);
            self.events.emit("change", &value);
        }
    }
}

impl ObjectWithEvents for StyledNumericField {
    type Args = f64;

    fn events(&self) -> &EventTable<f64> {
        &self.events
    }
}

impl StyledElement for StyledNumericField {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        match event.kind {
            NativeEventKind::Click if event.is_within(self.document(), self.top_button) => {
                self.increment();
                true
            }
            NativeEventKind::Click if event.is_within(self.document(), self.bottom_button) => {
                self.decrement();
                true
            }
            NativeEventKind::Change if event.target == self.input => {
                if self.is_enabled() {
                    self.events.emit("change", &self.value());
                }
                true
            }
            // Clicks inside the field never reach the widgets below it.
            NativeEventKind::Click | NativeEventKind::MouseDown { .. } => {
                event.is_within(self.document(), self.wrapper())
            }
            _ => false,
        }
    }

    fn destroy(&mut self) {
        let _ = self.detach();
        self.events.destroy();
    }
}

impl StyledInputElement for StyledNumericField {
    type Value = f64;

    /// The parsed value, `NaN` when the text is not a number.
    fn value(&self) -> f64 {
        self.text().trim().parse().unwrap_or(f64::NAN)
    }

    fn set_value(&mut self, value: f64) {
        self.document().set_value(self.input, &value.to_string());
    }

    fn default_value(&self) -> f64 {
        self.default_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted(field: &StyledNumericField) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        field
            .add_event_listener("change", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        count
    }

    #[test]
    fn test_structure() {
        let doc = Document::headless();
        let field = StyledNumericField::new(
            &doc,
            NumericFieldOptions {
                class: "short".into(),
                ..NumericFieldOptions::default().with_range(0.0, 10.0)
            },
        );
        let input = field.base().input().unwrap();
        assert_eq!(doc.class_names(input), vec!["numeric_field", "short"]);
        assert_eq!(doc.attribute(input, "min").as_deref(), Some("0"));
        assert_eq!(doc.attribute(input, "max").as_deref(), Some("10"));
        assert_eq!(doc.find_by_class(field.wrapper(), "numeric_top_button").len(), 1);
        assert_eq!(field.text(), "0");
    }

    #[test]
    fn test_stepping_clamps_to_range() {
        let doc = Document::headless();
        let mut field = StyledNumericField::new(
            &doc,
            NumericFieldOptions::default().with_initial_value(10.0).with_range(0.0, 10.0),
        );
        let changes = counted(&field);

        field.increment();
        assert_eq!(field.value(), 10.0);
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        for _ in 0..9 {
            field.decrement();
        }
        assert_eq!(field.value(), 1.0);
        field.decrement();
        assert_eq!(field.value(), 0.0);
        field.decrement();
        assert_eq!(field.value(), 0.0);
        assert_eq!(changes.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let doc = Document::headless();
        let mut field = StyledNumericField::new(
            &doc,
            NumericFieldOptions::default().with_initial_value(0.1).with_inc(0.2),
        );
        field.increment();
        assert_eq!(field.text(), "0.3");
    }

    #[test]
    fn test_stepper_buttons_and_disabled_state() {
        let doc = Document::headless();
        let mut field = StyledNumericField::new(&doc, NumericFieldOptions::default());
        let top = doc.find_by_class(field.wrapper(), "numeric_top_button")[0];
        let bottom = doc.find_by_class(field.wrapper(), "numeric_bottom_button")[0];

        assert!(field.handle_event(&NativeEvent::click(top)));
        assert!(field.handle_event(&NativeEvent::click(top)));
        assert!(field.handle_event(&NativeEvent::click(bottom)));
        assert_eq!(field.value(), 1.0);

        field.disable();
        field.handle_event(&NativeEvent::click(top));
        assert_eq!(field.value(), 1.0);
    }

    #[test]
    fn test_non_numeric_text_is_left_alone() {
        let doc = Document::headless();
        let mut field = StyledNumericField::new(&doc, NumericFieldOptions::default());
        doc.set_value(field.base().input().unwrap(), "abc");
        field.increment();
        assert_eq!(field.text(), "abc");
        assert!(field.value().is_nan());
    }

    #[test]
    fn test_options_from_json() {
        let options: NumericFieldOptions =
            serde_json::from_str(r#"{"minValue": 1, "inc": 0.5}"#).unwrap();
        assert_eq!(options.min_value, Some(1.0));
        assert_eq!(options.max_value, None);
        assert_eq!(options.inc, 0.5);
        assert_eq!(options.initial_value, 0.0);
    }
}
