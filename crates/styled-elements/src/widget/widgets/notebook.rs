//! Tabbed notebook implementation.
//!
//! This module provides [`StyledNotebook`] and its pages, [`Tab`]. Tabs are
//! only created through [`StyledNotebook::create_tab`], so every tab belongs
//! to exactly one notebook.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{NotebookOptions, StyledNotebook, TabOptions};
//! use styled_elements::widget::StyledElement;
//! use styled_elements::Document;
//!
//! let doc = Document::headless();
//! let mut notebook = StyledNotebook::new(&doc, NotebookOptions::default());
//! notebook.insert_into(doc.body(), None).unwrap();
//!
//! let first = notebook.create_tab(TabOptions::named("Wiring"));
//! let second = notebook.create_tab(TabOptions::named("Catalogue"));
//! assert_eq!(notebook.visible_tab(), Some(first));
//!
//! notebook.go_to_tab(second).unwrap();
//! assert!(notebook.tab(second).unwrap().is_visible());
//! ```

use serde::Deserialize;
use styled_elements_core::{Document, Error, EventTable, NodeGuard, NodeId, ObjectWithEvents, Result};

use super::button::{ButtonOptions, StyledButton};
use super::container::{Container, ContainerOptions};
use crate::logging::targets;
use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Events declared by [`Tab`].
pub const TAB_EVENTS: &[&str] = &["show", "hide", "close"];

/// Events declared by [`StyledNotebook`].
pub const NOTEBOOK_EVENTS: &[&str] = &["change"];

const HIDDEN_CLASS: &str = "hidden";
const SELECTED_CLASS: &str = "selected";

// ============================================================================
// Tab
// ============================================================================

/// Options for [`StyledNotebook::create_tab`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabOptions {
    /// Label shown on the tab.
    pub name: String,
    /// Tooltip of the tab; the name is used when absent.
    pub title: Option<String>,
    /// Show a close button on the tab.
    #[serde(alias = "closeable")]
    pub closable: bool,
    pub container_options: ContainerOptions,
}

impl Default for TabOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: None,
            closable: true,
            container_options: ContainerOptions::default(),
        }
    }
}

impl TabOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn with_container_options(mut self, options: ContainerOptions) -> Self {
        self.container_options = options;
        self
    }
}

/// A notebook page: a full-height container plus its label in the tab bar.
///
/// A tab is identified by the wrapper node of its container, returned by
/// [`id`](Self::id).
///
/// # Events
///
/// All events carry the tab id.
///
/// - `show`: the tab became the visible one
/// - `hide`: another tab replaced it
/// - `close`: the tab was removed from its notebook
pub struct Tab {
    container: Container,
    tab_element: NodeGuard,
    label: NodeId,
    close_button: Option<StyledButton>,
    icon: Option<NodeId>,
    name: String,
    title: Option<String>,
    events: EventTable<NodeId>,
}

impl Tab {
    fn new(document: &Document, options: TabOptions) -> Self {
        let container = Container::new(
            document,
            ContainerOptions {
                use_full_height: true,
                ..options.container_options
            },
        );
        container.add_class_name("tab hidden");

        let tab_element = NodeGuard::element(document, "div", "tab");
        let label = document.create_element("span");
        let _ = document.append_child(tab_element.id(), label);

        let close_button = options.closable.then(|| {
            let mut button = StyledButton::new(
                document,
                ButtonOptions::text("X")
                    .with_plain(true)
                    .with_class("close_button")
                    .with_title("Close Tab"),
            );
            let _ = button.insert_into(tab_element.id(), None);
            button
        });

        let mut tab = Self {
            container,
            tab_element,
            label,
            close_button,
            icon: None,
            name: String::new(),
            title: options.title,
            events: EventTable::new(TAB_EVENTS),
        };
        tab.rename(&options.name);
        tab
    }

    /// The tab id: the wrapper node of its container.
    pub fn id(&self) -> NodeId {
        self.container.wrapper()
    }

    /// The label node shown in the tab bar.
    pub fn tab_element(&self) -> NodeId {
        self.tab_element.id()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_closable(&self) -> bool {
        self.close_button.is_some()
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.document().set_text_content(self.label, name);
        self.update_title();
    }

    /// Set the tooltip. `None` falls back to the tab name.
    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = title.map(str::to_string);
        self.update_title();
    }

    fn update_title(&self) {
        let title = self.title.as_deref().unwrap_or(self.name.as_str());
        self.document().set_attribute(self.tab_element(), "title", title);
    }

    /// Show `url` as the first child of the tab label, or remove the icon.
    pub fn set_icon(&mut self, url: Option<&str>) {
        let document = self.container.document().clone();
        match (url, self.icon) {
            (None, Some(icon)) => {
                document.remove_node(icon);
                self.icon = None;
            }
            (None, None) => {}
            (Some(url), Some(icon)) => document.set_attribute(icon, "src", url),
            (Some(url), None) => {
                let icon = document.create_element("img");
                document.set_attribute(icon, "src", url);
                let first = document.children(self.tab_element()).first().copied();
                if document.insert_before(self.tab_element(), icon, first).is_ok() {
                    self.icon = Some(icon);
                }
            }
        }
    }

    pub fn icon(&self) -> Option<String> {
        self.icon
            .and_then(|icon| self.document().attribute(icon, "src"))
    }

    /// Show or hide the tab. Showing marks the label `selected`, reveals the
    /// container, repaints it and fires `show`; hiding reverses it and fires
    /// `hide`.
    pub fn set_visible(&mut self, visible: bool) {
        let document = self.container.document().clone();
        if visible {
            document.add_class(self.tab_element(), SELECTED_CLASS);
            self.container.remove_class_name(HIDDEN_CLASS);
            self.container.repaint(false);
            self.events.emit("show", &self.id());
        } else {
            document.remove_class(self.tab_element(), SELECTED_CLASS);
            self.container.add_class_name(HIDDEN_CLASS);
            self.events.emit("hide", &self.id());
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.container.has_class_name(HIDDEN_CLASS)
    }

    fn hit_close_button(&self, event: &NativeEvent) -> bool {
        self.close_button
            .as_ref()
            .is_some_and(|button| event.is_within(self.document(), button.wrapper()))
    }
}

impl ObjectWithEvents for Tab {
    type Args = NodeId;

    fn events(&self) -> &EventTable<NodeId> {
        &self.events
    }
}

impl StyledElement for Tab {
    fn base(&self) -> &ElementBase {
        self.container.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.container.base_mut()
    }

    fn repaint(&mut self, temporal: bool) {
        self.container.repaint(temporal);
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.container.set_disabled(disabled);
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        self.container.handle_event(event)
    }

    fn destroy(&mut self) {
        self.container.destroy();
        let _ = self.document().detach(self.tab_element());
        self.events.destroy();
    }
}

// ============================================================================
// Notebook
// ============================================================================

/// Options for [`StyledNotebook`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotebookOptions {
    pub class: String,
    pub id: String,
    /// Add the `full` class.
    pub full: bool,
}

impl NotebookOptions {
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }
}

/// Payload of the notebook `change` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotebookChange {
    pub previous: Option<NodeId>,
    /// `None` once the last tab is removed.
    pub current: Option<NodeId>,
}

/// A set of tabs of which one is visible at a time.
///
/// The first tab created becomes visible. Removing the visible tab shows the
/// tab after it, or the one before it when it was the last.
///
/// # Events
///
/// - `change`: the visible tab changed; carries a [`NotebookChange`]
pub struct StyledNotebook {
    base: ElementBase,
    tab_area: NodeId,
    content: NodeId,
    tabs: Vec<Tab>,
    visible: Option<NodeId>,
    events: EventTable<NotebookChange>,
}

impl StyledNotebook {
    pub fn new(document: &Document, options: NotebookOptions) -> Self {
        let mut class = join_classes("notebook", &options.class);
        if options.full {
            class.push_str(" full");
        }
        let base = ElementBase::new(document, "div", &class);
        base.set_element_id(&options.id);

        let tab_area = document.create_element_with_class("div", "tab_area");
        let content = document.create_element_with_class("div", "tab_wrapper");
        let _ = document.append_child(base.wrapper(), tab_area);
        let _ = document.append_child(base.wrapper(), content);

        Self {
            base,
            tab_area,
            content,
            tabs: Vec::new(),
            visible: None,
            events: EventTable::new(NOTEBOOK_EVENTS),
        }
    }

    /// Create a tab at the end of the tab bar and return its id.
    pub fn create_tab(&mut self, options: TabOptions) -> NodeId {
        let mut tab = Tab::new(self.document(), options);
        let id = tab.id();
        let _ = self.document().append_child(self.tab_area, tab.tab_element());
        let _ = tab.insert_into(self.content, None);
        tracing::debug!(target: targets::WIDGET, tab = ?id, name = tab.name(), "tab created");
        self.tabs.push(tab);

        if self.visible.is_none() {
            self.switch_to(Some(id));
        }
        id
    }

    pub fn tab(&self, id: NodeId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    pub fn tab_mut(&mut self, id: NodeId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id() == id)
    }

    /// Tabs in tab bar order.
    pub fn tabs(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn visible_tab(&self) -> Option<NodeId> {
        self.visible
    }

    /// Make `id` the visible tab.
    pub fn go_to_tab(&mut self, id: NodeId) -> Result<()> {
        if self.tab(id).is_none() {
            return Err(Error::UnknownChild(id));
        }
        self.switch_to(Some(id));
        Ok(())
    }

    /// Remove a tab, firing its `close` event.
    pub fn remove_tab(&mut self, id: NodeId) -> Result<()> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.id() == id)
            .ok_or(Error::UnknownChild(id))?;

        let mut tab = self.tabs.remove(index);
        let _ = tab.detach();
        tab.events.emit("close", &id);
        tab.destroy();
        tracing::debug!(target: targets::WIDGET, tab = ?id, "tab removed");

        if self.visible == Some(id) {
            let next = self
                .tabs
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|i| self.tabs.get(i)))
                .map(Tab::id);
            self.switch_to(next);
        }
        Ok(())
    }

    fn switch_to(&mut self, target: Option<NodeId>) {
        let previous = self.visible;
        if previous == target {
            return;
        }
        if let Some(tab) = previous.and_then(|id| self.tab_mut(id)) {
            tab.set_visible(false);
        }
        self.visible = target;
        if let Some(tab) = target.and_then(|id| self.tab_mut(id)) {
            tab.set_visible(true);
        }
        tracing::trace!(target: targets::WIDGET, ?previous, current = ?target, "notebook switched tab");
        self.events.emit(
            "change",
            &NotebookChange {
                previous,
                current: target,
            },
        );
    }
}

impl ObjectWithEvents for StyledNotebook {
    type Args = NotebookChange;

    fn events(&self) -> &EventTable<NotebookChange> {
        &self.events
    }
}

impl StyledElement for StyledNotebook {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn repaint(&mut self, temporal: bool) {
        if let Some(tab) = self.visible.and_then(|id| self.tab_mut(id)) {
            tab.repaint(temporal);
        }
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if event.kind == NativeEventKind::Click {
            let document = self.document().clone();
            let clicked = self
                .tabs
                .iter()
                .find(|tab| event.is_within(&document, tab.tab_element()))
                .map(|tab| (tab.id(), tab.hit_close_button(event)));
            if let Some((id, close)) = clicked {
                if self.is_enabled() {
                    let _ = if close { self.remove_tab(id) } else { self.go_to_tab(id) };
                }
                return true;
            }
        }
        match self.visible.and_then(|id| self.tab_mut(id)) {
            Some(tab) => tab.handle_event(event),
            None => false,
        }
    }

    fn destroy(&mut self) {
        for tab in &mut self.tabs {
            tab.destroy();
        }
        let _ = self.detach();
        self.events.destroy();
    }
}
