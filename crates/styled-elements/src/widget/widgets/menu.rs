//! Menu items and the entries a popup menu is built from.
//!
//! This module provides [`MenuItem`], the clickable row of a popup menu,
//! [`MenuEntry`], everything that can be appended to a menu, and
//! [`DynamicMenuItems`], a source of entries rebuilt each time the menu
//! opens.
//!
//! The menus themselves live in [`super::popup_menu`].

use std::sync::Arc;

use styled_elements_core::{Document, Event, EventTable, NodeId, ObjectWithEvents};

use super::popup_menu::SubMenuItem;
use super::separator::Separator;
use crate::widget::base::ElementBase;
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Events declared by [`MenuItem`].
pub const MENU_ITEM_EVENTS: &[&str] = &["click", "mouseover", "mouseout"];

/// Marker class of the item under the pointer.
pub const HOVERED_CLASS: &str = "hovered";

/// Callback run when an item is selected. Receives the context of the menu
/// the selection happened in (the root menu for submenu items).
pub type MenuHandler<C> = Arc<dyn Fn(Option<&C>) + Send + Sync>;

/// Payload of every menu-related event. Items report themselves by wrapper
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Click(NodeId),
    MouseOver(NodeId),
    MouseOut(NodeId),
    ItemOver(NodeId),
    VisibilityChange { visible: bool },
}

impl MenuEvent {
    /// The item the event is about, if any.
    pub fn item(&self) -> Option<NodeId> {
        match *self {
            MenuEvent::Click(id)
            | MenuEvent::MouseOver(id)
            | MenuEvent::MouseOut(id)
            | MenuEvent::ItemOver(id) => Some(id),
            MenuEvent::VisibilityChange { .. } => None,
        }
    }
}

/// How an item reacted to a native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemReaction {
    Ignored,
    Consumed,
    Hovered,
    Activated,
}

/// A selectable menu row.
///
/// # Events
///
/// - `click`: the item was selected; preceded by `mouseout`. Inside a
///   menu it fires once the menu has hidden, before the item's handler.
/// - `mouseover`: the pointer entered the enabled item
/// - `mouseout`: the pointer left the enabled item
pub struct MenuItem<C: 'static> {
    base: ElementBase,
    text: String,
    handler: Option<MenuHandler<C>>,
    events: EventTable<MenuEvent>,
}

impl<C: 'static> MenuItem<C> {
    /// An item without a handler.
    pub fn new(document: &Document, text: &str) -> Self {
        let base = ElementBase::new(document, "div", "menu_item");
        let label = document.create_element("span");
        document.set_text_content(label, text);
        let _ = document.append_child(base.wrapper(), label);
        Self {
            base,
            text: text.to_string(),
            handler: None,
            events: EventTable::new(MENU_ITEM_EVENTS),
        }
    }

    /// An item running `handler` when selected.
    pub fn with_handler<F>(document: &Document, text: &str, handler: F) -> Self
    where
        F: Fn(Option<&C>) + Send + Sync + 'static,
    {
        let mut item = Self::new(document, text);
        item.handler = Some(Arc::new(handler));
        item
    }

    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: Fn(Option<&C>) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handler(&self) -> Option<&MenuHandler<C>> {
        self.handler.as_ref()
    }

    /// Run the handler, if any, with `context`.
    pub fn run(&self, context: Option<&C>) {
        if let Some(handler) = &self.handler {
            handler(context);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.has_class_name(HOVERED_CLASS)
    }

    /// The `click` event, for a menu that dispatches it after hiding.
    pub(crate) fn click_event(&self) -> Option<Arc<Event<MenuEvent>>> {
        self.events.event("click").ok()
    }

    /// Hover and leave notifications only. Selection is reported as
    /// [`ItemReaction::Activated`] and the caller emits `click`.
    pub(crate) fn react(&mut self, event: &NativeEvent) -> ItemReaction {
        if !event.is_within(self.document(), self.wrapper()) {
            return ItemReaction::Ignored;
        }
        let id = self.wrapper();
        let enabled = self.is_enabled();
        match event.kind {
            NativeEventKind::MouseOver if enabled => {
                self.add_class_name(HOVERED_CLASS);
                self.events.emit("mouseover", &MenuEvent::MouseOver(id));
                ItemReaction::Hovered
            }
            NativeEventKind::MouseOut if enabled => {
                self.remove_class_name(HOVERED_CLASS);
                self.events.emit("mouseout", &MenuEvent::MouseOut(id));
                ItemReaction::Consumed
            }
            NativeEventKind::Click if enabled => {
                self.remove_class_name(HOVERED_CLASS);
                self.events.emit("mouseout", &MenuEvent::MouseOut(id));
                ItemReaction::Activated
            }
            NativeEventKind::MouseOver | NativeEventKind::MouseOut | NativeEventKind::Click => {
                ItemReaction::Consumed
            }
            _ => ItemReaction::Ignored,
        }
    }
}

impl<C: 'static> ObjectWithEvents for MenuItem<C> {
    type Args = MenuEvent;

    fn events(&self) -> &EventTable<MenuEvent> {
        &self.events
    }
}

impl<C: 'static> StyledElement for MenuItem<C> {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        match self.react(event) {
            ItemReaction::Ignored => false,
            ItemReaction::Activated => {
                self.events.emit("click", &MenuEvent::Click(self.wrapper()));
                true
            }
            ItemReaction::Consumed | ItemReaction::Hovered => true,
        }
    }

    fn destroy(&mut self) {
        let _ = self.detach();
        self.events.destroy();
    }
}

impl<C: 'static> std::fmt::Debug for MenuItem<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuItem")
            .field("text", &self.text)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// A source of menu entries built every time the menu opens.
///
/// Closures `Fn(&Document, Option<&C>) -> Vec<MenuEntry<C>>` implement it.
pub trait DynamicMenuItems<C: 'static>: Send {
    fn build(&self, document: &Document, context: Option<&C>) -> Vec<MenuEntry<C>>;
}

impl<C: 'static, F> DynamicMenuItems<C> for F
where
    F: Fn(&Document, Option<&C>) -> Vec<MenuEntry<C>> + Send,
{
    fn build(&self, document: &Document, context: Option<&C>) -> Vec<MenuEntry<C>> {
        self(document, context)
    }
}

/// Anything a popup menu can hold.
pub enum MenuEntry<C: 'static> {
    Item(MenuItem<C>),
    Separator(Separator),
    SubMenu(SubMenuItem<C>),
    Dynamic(Box<dyn DynamicMenuItems<C>>),
}

impl<C: 'static> MenuEntry<C> {
    /// The node rendered in the menu. Dynamic sources render nothing
    /// themselves.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            MenuEntry::Item(item) => Some(item.wrapper()),
            MenuEntry::Separator(separator) => Some(separator.wrapper()),
            MenuEntry::SubMenu(submenu) => Some(submenu.anchor().wrapper()),
            MenuEntry::Dynamic(_) => None,
        }
    }

    pub(crate) fn destroy(&mut self) {
        match self {
            MenuEntry::Item(item) => item.destroy(),
            MenuEntry::Separator(separator) => separator.destroy(),
            MenuEntry::SubMenu(submenu) => submenu.destroy(),
            MenuEntry::Dynamic(_) => {}
        }
    }
}

impl<C: 'static> From<MenuItem<C>> for MenuEntry<C> {
    fn from(item: MenuItem<C>) -> Self {
        MenuEntry::Item(item)
    }
}

impl<C: 'static> From<Separator> for MenuEntry<C> {
    fn from(separator: Separator) -> Self {
        MenuEntry::Separator(separator)
    }
}

impl<C: 'static> From<SubMenuItem<C>> for MenuEntry<C> {
    fn from(submenu: SubMenuItem<C>) -> Self {
        MenuEntry::SubMenu(submenu)
    }
}

impl<C: 'static> From<Box<dyn DynamicMenuItems<C>>> for MenuEntry<C> {
    fn from(source: Box<dyn DynamicMenuItems<C>>) -> Self {
        MenuEntry::Dynamic(source)
    }
}
