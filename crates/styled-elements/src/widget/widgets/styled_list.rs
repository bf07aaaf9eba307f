//! Selectable list widget implementation.
//!
//! This module provides [`StyledList`], a list of clickable rows keyed by
//! value with single or multiple selection.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{ListEntry, ListOptions, StyledList};
//! use styled_elements::{Document, ObjectWithEvents};
//!
//! let doc = Document::headless();
//! let mut list = StyledList::new(
//!     &doc,
//!     ListOptions::default().with_entries(["a", "b", "c"].map(|v| ListEntry::new(v.to_string()))),
//! );
//! list.add_event_listener("change", |change| {
//!     println!("added {:?}, removed {:?}", change.added, change.removed);
//! })
//! .unwrap();
//!
//! list.select(["a".to_string()]);
//! list.select(["b".to_string()]);
//! assert_eq!(list.selection(), vec!["b".to_string()]);
//! ```

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use serde::Deserialize;
use styled_elements_core::{Document, EventTable, NodeId, ObjectWithEvents};

use crate::logging::targets;
use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Events declared by [`StyledList`].
pub const LIST_EVENTS: &[&str] = &["change"];

/// Class marking selected rows.
pub const SELECTED_CLASS: &str = "selected";

/// Bounds on the values a [`StyledList`] is keyed by.
pub trait ListValue: Clone + Eq + Hash + Display + Send + Sync + 'static {}

impl<T: Clone + Eq + Hash + Display + Send + Sync + 'static> ListValue for T {}

/// One row of a [`StyledList`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListEntry<V> {
    pub value: V,
    /// Row text; the value's display form when absent.
    #[serde(default)]
    pub label: Option<String>,
}

impl<V: Display> ListEntry<V> {
    pub fn new(value: V) -> Self {
        Self { value, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn text(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.value.to_string())
    }
}

impl<V: Display> From<(V, &str)> for ListEntry<V> {
    fn from((value, label): (V, &str)) -> Self {
        Self::new(value).with_label(label)
    }
}

/// Payload of the list `change` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChange<V> {
    /// The selection after the change.
    pub selection: Vec<V>,
    pub added: Vec<V>,
    pub removed: Vec<V>,
}

/// Options for [`StyledList`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", bound(deserialize = "V: Deserialize<'de>"))]
pub struct ListOptions<V> {
    pub class: String,
    pub multivalued: bool,
    /// Whether the last selected row may be deselected by clicking it.
    /// Defaults to `multivalued`.
    pub allow_empty: Option<bool>,
    pub initial_entries: Vec<ListEntry<V>>,
    pub initial_selection: Vec<V>,
    /// Stretch to the full size of the parent.
    pub full: bool,
}

impl<V> Default for ListOptions<V> {
    fn default() -> Self {
        Self {
            class: String::new(),
            multivalued: false,
            allow_empty: None,
            initial_entries: Vec::new(),
            initial_selection: Vec::new(),
            full: false,
        }
    }
}

impl<V> ListOptions<V> {
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_multivalued(mut self, multivalued: bool) -> Self {
        self.multivalued = multivalued;
        self
    }

    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = Some(allow_empty);
        self
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = ListEntry<V>>) -> Self {
        self.initial_entries.extend(entries);
        self
    }

    pub fn with_selection(mut self, selection: impl IntoIterator<Item = V>) -> Self {
        self.initial_selection.extend(selection);
        self
    }

    pub fn with_full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }
}

/// A list of rows with single or multiple selection.
///
/// Every selection operation fires at most one `change` event, and none when
/// the selection did not change.
///
/// # Events
///
/// - `change`: carries a [`ListChange`]
pub struct StyledList<V: ListValue> {
    base: ElementBase,
    content: NodeId,
    entries: Vec<V>,
    rows: HashMap<V, NodeId>,
    selection: Vec<V>,
    multivalued: bool,
    allow_empty: bool,
    events: EventTable<ListChange<V>>,
}

impl<V: ListValue> StyledList<V> {
    pub fn new(document: &Document, options: ListOptions<V>) -> Self {
        let mut class = join_classes("styled_list", &options.class);
        if options.full {
            class.push_str(" full");
        }
        let base = ElementBase::new(document, "div", &class);
        let content = document.create_element("div");
        let _ = document.append_child(base.wrapper(), content);

        let mut list = Self {
            base,
            content,
            entries: Vec::new(),
            rows: HashMap::new(),
            selection: Vec::new(),
            multivalued: options.multivalued,
            allow_empty: options.allow_empty.unwrap_or(options.multivalued),
            events: EventTable::new(LIST_EVENTS),
        };
        list.add_entries(options.initial_entries);
        list.select(options.initial_selection);
        list
    }

    pub fn is_multivalued(&self) -> bool {
        self.multivalued
    }

    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    // =========================================================================
    // Entries
    // =========================================================================

    /// Append one row per entry. An entry whose value is already listed
    /// replaces the text of the existing row.
    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = ListEntry<V>>) {
        for entry in entries {
            let text = entry.text();
            if let Some(&row) = self.rows.get(&entry.value) {
                self.document().set_text_content(row, &text);
                continue;
            }
            let row = self.document().create_element_with_class("div", "row");
            self.document().set_text_content(row, &text);
            if let Err(err) = self.document().append_child(self.content, row) {
                tracing::warn!(target: targets::WIDGET, %err, "failed to append list row");
                continue;
            }
            self.rows.insert(entry.value.clone(), row);
            self.entries.push(entry.value);
        }
    }

    /// Remove the row of `value`. Fires `change` when it was selected.
    pub fn remove_entry_by_value(&mut self, value: &V) {
        let Some(row) = self.rows.remove(value) else {
            return;
        };
        self.entries.retain(|v| v != value);
        self.document().remove_node(row);

        if let Some(index) = self.selection.iter().position(|v| v == value) {
            let removed = self.selection.remove(index);
            self.fire(Vec::new(), vec![removed]);
        }
    }

    /// Remove every row, clearing the selection first.
    pub fn clear(&mut self) {
        self.clean_selection();
        for row in self.rows.drain().map(|(_, row)| row) {
            self.base.document().remove_node(row);
        }
        self.entries.clear();
    }

    /// Listed values in row order.
    pub fn entries(&self) -> &[V] {
        &self.entries
    }

    /// The row node of `value`.
    pub fn row(&self, value: &V) -> Option<NodeId> {
        self.rows.get(value).copied()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// A copy of the current selection, in selection order.
    pub fn selection(&self) -> Vec<V> {
        self.selection.clone()
    }

    pub fn is_selected(&self, value: &V) -> bool {
        self.selection.contains(value)
    }

    /// Deselect everything.
    pub fn clean_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let removed = std::mem::take(&mut self.selection);
        for value in &removed {
            self.mark(value, false);
        }
        self.fire(Vec::new(), removed);
    }

    /// Replace the selection. `removed` reports the values that were
    /// deselected; a single-select list keeps only the first value.
    pub fn select(&mut self, values: impl IntoIterator<Item = V>) {
        let mut wanted = Vec::new();
        for value in values {
            if !self.rows.contains_key(&value) {
                tracing::debug!(target: targets::WIDGET, %value, "ignoring selection of unknown entry");
                continue;
            }
            if !wanted.contains(&value) {
                wanted.push(value);
            }
            if !self.multivalued {
                break;
            }
        }

        let removed: Vec<V> = self
            .selection
            .iter()
            .filter(|v| !wanted.contains(v))
            .cloned()
            .collect();
        let added: Vec<V> = wanted
            .iter()
            .filter(|v| !self.selection.contains(v))
            .cloned()
            .collect();

        for value in &removed {
            self.mark(value, false);
        }
        for value in &added {
            self.mark(value, true);
        }
        self.selection = wanted;
        self.fire(added, removed);
    }

    /// Add values to the selection. A single-select list only considers the
    /// first value and replaces its selection with it.
    pub fn add_selection(&mut self, values: impl IntoIterator<Item = V>) {
        let values: Vec<V> = values
            .into_iter()
            .filter(|value| self.rows.contains_key(value))
            .collect();
        let Some(first) = values.first() else {
            return;
        };

        let mut removed = Vec::new();
        let mut added = Vec::new();
        if self.multivalued {
            for value in values {
                if !self.selection.contains(&value) {
                    self.mark(&value, true);
                    self.selection.push(value.clone());
                    added.push(value);
                }
            }
        } else {
            if self.selection.first() == Some(first) {
                return;
            }
            let first = first.clone();
            removed = std::mem::take(&mut self.selection);
            for value in &removed {
                self.mark(value, false);
            }
            self.mark(&first, true);
            self.selection.push(first.clone());
            added.push(first);
        }
        self.fire(added, removed);
    }

    /// Remove values from the selection.
    pub fn remove_selection(&mut self, values: impl IntoIterator<Item = V>) {
        let mut removed = Vec::new();
        for value in values {
            if let Some(index) = self.selection.iter().position(|v| *v == value) {
                self.selection.remove(index);
                self.mark(&value, false);
                removed.push(value);
            }
        }
        self.fire(Vec::new(), removed);
    }

    /// Select `value` if it is not selected; deselect it otherwise, unless
    /// the list does not allow an empty selection.
    pub fn toggle_element_selection(&mut self, value: &V) {
        if !self.is_selected(value) {
            self.add_selection([value.clone()]);
        } else if self.allow_empty {
            self.remove_selection([value.clone()]);
        }
    }

    fn mark(&self, value: &V, selected: bool) {
        if let Some(&row) = self.rows.get(value) {
            self.document().toggle_class(row, SELECTED_CLASS, selected);
        }
    }

    fn fire(&self, added: Vec<V>, removed: Vec<V>) {
        if added.is_empty() && removed.is_empty() {
            return;
        }
        tracing::trace!(
            target: targets::WIDGET,
            added = added.len(),
            removed = removed.len(),
            "list selection changed"
        );
        self.events.emit(
            "change",
            &ListChange {
                selection: self.selection.clone(),
                added,
                removed,
            },
        );
    }
}

impl<V: ListValue> ObjectWithEvents for StyledList<V> {
    type Args = ListChange<V>;

    fn events(&self) -> &EventTable<ListChange<V>> {
        &self.events
    }
}

impl<V: ListValue> StyledElement for StyledList<V> {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if event.kind != NativeEventKind::Click {
            return false;
        }
        let document = self.document().clone();
        let Some(value) = self
            .rows
            .iter()
            .find(|&(_, &row)| event.is_within(&document, row))
            .map(|(value, _)| value.clone())
        else {
            return false;
        };
        if self.is_enabled() {
            self.toggle_element_selection(&value);
        }
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
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Changes = Arc<Mutex<Vec<ListChange<&'static str>>>>;

    fn list(doc: &Document, options: ListOptions<&'static str>) -> (StyledList<&'static str>, Changes) {
        let options = options.with_entries(["A", "B", "C"].map(ListEntry::new));
        let list = StyledList::new(doc, options);
        let changes: Changes = Arc::default();
        let c = changes.clone();
        list.add_event_listener("change", move |change| c.lock().push(change.clone()))
            .unwrap();
        (list, changes)
    }

    #[test]
    fn test_rows() {
        let doc = Document::headless();
        let mut list = StyledList::new(
            &doc,
            ListOptions::default()
                .with_full(true)
                .with_class("compact")
                .with_entries([ListEntry::from((1, "one")), ListEntry::new(2)]),
        );
        assert_eq!(doc.class_names(list.wrapper()), vec!["styled_list", "compact", "full"]);
        assert_eq!(doc.text_content(list.row(&1).unwrap()), "one");
        assert_eq!(doc.text_content(list.row(&2).unwrap()), "2");
        assert_eq!(list.entries(), &[1, 2]);

        list.remove_entry_by_value(&1);
        assert_eq!(list.entries(), &[2]);
        assert_eq!(list.row(&1), None);
    }

    #[test]
    fn test_single_select_reports_replaced_value() {
        let doc = Document::headless();
        let (mut list, changes) = list(&doc, ListOptions::default());

        list.select(["A"]);
        list.select(["B"]);

        assert_eq!(list.selection(), vec!["B"]);
        let changes = changes.lock();
        assert_eq!(changes.len(), 2);
        assert_eq!((changes[0].added.clone(), changes[0].removed.clone()), (vec!["A"], vec![]));
        assert_eq!((changes[1].added.clone(), changes[1].removed.clone()), (vec!["B"], vec!["A"]));
        assert!(doc.has_class(list.row(&"B").unwrap(), SELECTED_CLASS));
        assert!(!doc.has_class(list.row(&"A").unwrap(), SELECTED_CLASS));
    }

    #[test]
    fn test_single_select_truncates_and_ignores_same_value() {
        let doc = Document::headless();
        let (mut list, changes) = list(&doc, ListOptions::default());

        list.add_selection(["B", "C"]);
        assert_eq!(list.selection(), vec!["B"]);
        list.add_selection(["B"]);
        list.add_selection([]);
        assert_eq!(changes.lock().len(), 1);
    }

    #[test]
    fn test_toggle_without_allow_empty() {
        let doc = Document::headless();
        let (mut list, changes) = list(
            &doc,
            ListOptions::default()
                .with_multivalued(true)
                .with_allow_empty(false)
                .with_selection(["A"]),
        );
        assert_eq!(list.selection(), vec!["A"]);

        list.toggle_element_selection(&"A");
        assert_eq!(list.selection(), vec!["A"]);
        assert!(changes.lock().is_empty());

        list.toggle_element_selection(&"B");
        assert_eq!(list.selection(), vec!["A", "B"]);
    }

    #[test]
    fn test_multivalued_add_and_remove() {
        let doc = Document::headless();
        let (mut list, changes) = list(&doc, ListOptions::default().with_multivalued(true));
        assert!(list.allows_empty());

        list.add_selection(["A", "B"]);
        list.add_selection(["B"]);
        list.remove_selection(["C"]);
        list.remove_selection(["A"]);
        assert_eq!(list.selection(), vec!["B"]);

        let changes = changes.lock();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].removed, vec!["A"]);
        assert_eq!(changes[1].selection, vec!["B"]);
    }

    #[test]
    fn test_clean_selection_and_clear() {
        let doc = Document::headless();
        let (mut list, changes) = list(&doc, ListOptions::default().with_multivalued(true));
        list.clean_selection();
        assert!(changes.lock().is_empty());

        list.select(["A", "C"]);
        list.clear();
        assert!(list.selection().is_empty());
        assert!(list.entries().is_empty());
        assert_eq!(changes.lock().last().unwrap().removed, vec!["A", "C"]);
        assert!(doc.children(list.content).is_empty());
    }

    #[test]
    fn test_removing_selected_entry_fires_change() {
        let doc = Document::headless();
        let (mut list, changes) = list(&doc, ListOptions::default());
        list.select(["C"]);
        list.remove_entry_by_value(&"C");

        let last = changes.lock().last().cloned().unwrap();
        assert_eq!(last.removed, vec!["C"]);
        assert!(last.selection.is_empty());
    }

    #[test]
    fn test_row_click_toggles_when_enabled() {
        let doc = Document::headless();
        let (mut list, _) = list(&doc, ListOptions::default().with_multivalued(true));
        let row = list.row(&"B").unwrap();
        let text = doc.children(row)[0];

        assert!(list.handle_event(&NativeEvent::click(text)));
        assert_eq!(list.selection(), vec!["B"]);
        assert!(list.handle_event(&NativeEvent::click(row)));
        assert!(list.selection().is_empty());

        list.disable();
        list.handle_event(&NativeEvent::click(row));
        assert!(list.selection().is_empty());
    }

    #[test]
    fn test_options_from_json() {
        let options: ListOptions<String> = serde_json::from_str(
            r#"{"multivalued": true, "initialEntries": [{"value": "x", "label": "Ex"}], "initialSelection": ["x"]}"#,
        )
        .unwrap();
        assert!(options.multivalued);
        assert_eq!(options.allow_empty, None);
        assert_eq!(options.initial_entries[0].label.as_deref(), Some("Ex"));
    }
}
