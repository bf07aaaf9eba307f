//! Popup menus.
//!
//! This module provides [`PopupMenuBase`], the floating list of menu
//! entries, [`PopupMenu`], which adds a click-catching layer that closes the
//! menu, and [`SubMenuItem`], a menu nested behind an anchor item.
//!
//! Native events are routed through the root menu's `handle_event`; open
//! submenus are reached from there. Selecting an item anywhere in the tree
//! hides the root menu (and every open submenu) before the item's handler
//! runs with the root menu's context.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{MenuItem, PopupMenu, PopupMenuOptions};
//! use styled_elements::widget::NativeEvent;
//! use styled_elements::{Document, Point};
//!
//! let doc = Document::headless();
//! let mut menu: PopupMenu<String> = PopupMenu::new(&doc, PopupMenuOptions::default());
//! menu.append(MenuItem::with_handler(&doc, "Close", |tab: Option<&String>| {
//!     println!("closing {tab:?}");
//! }));
//! menu.set_context("tab-1".to_string());
//!
//! menu.show(Point::new(10.0, 20.0));
//! let item = menu.item_nodes()[0];
//! assert!(menu.handle_event(&NativeEvent::click(item)));
//! assert!(!menu.is_visible());
//! ```

use std::sync::Arc;

use serde::Deserialize;
use styled_elements_core::{Document, Event, EventTable, ListenerId, NodeGuard, NodeId, ObjectWithEvents, Point, Rect, Result, Size};

use super::menu::{DynamicMenuItems, ItemReaction, MenuEntry, MenuEvent, MenuHandler, MenuItem};
use super::separator::Separator;
use crate::logging::targets;
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Events declared by [`PopupMenuBase`].
pub const POPUP_MENU_EVENTS: &[&str] = &["itemOver", "visibilityChange"];

const HIDDEN_CLASS: &str = "hidden";
const DISABLE_LAYER_CLASS: &str = "disable-layer";

// ============================================================================
// Placement
// ============================================================================

/// Where a menu opens relative to the rectangle it is shown for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuPosition {
    /// Above the reference, right edges aligned.
    TopLeft,
    /// Above the reference, left edges aligned.
    TopRight,
    /// Below the reference, right edges aligned.
    #[default]
    BottomLeft,
    /// Below the reference, left edges aligned.
    BottomRight,
}

impl MenuPosition {
    /// Top-left corner of a menu of size `menu` opened for `reference`. The
    /// menu overlaps the reference by one pixel.
    pub fn place(self, reference: Rect, menu: Size) -> Point {
        match self {
            MenuPosition::TopLeft => Point::new(reference.right() - menu.width, reference.top() - menu.height + 1.0),
            MenuPosition::TopRight => Point::new(reference.left(), reference.top() - menu.height + 1.0),
            MenuPosition::BottomRight => Point::new(reference.left(), reference.bottom() - 1.0),
            MenuPosition::BottomLeft => Point::new(reference.right() - menu.width, reference.bottom() - 1.0),
        }
    }
}

/// What a menu is shown for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefPosition {
    /// Open with the top-left corner at this point.
    At(Point),
    /// Open next to this rectangle, following the menu's [`MenuPosition`].
    Around(Rect),
}

impl From<Point> for RefPosition {
    fn from(point: Point) -> Self {
        RefPosition::At(point)
    }
}

impl From<Rect> for RefPosition {
    fn from(rect: Rect) -> Self {
        RefPosition::Around(rect)
    }
}

/// Options for [`PopupMenuBase`] and [`PopupMenu`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopupMenuOptions {
    pub position: MenuPosition,
}

impl PopupMenuOptions {
    pub fn with_position(mut self, position: MenuPosition) -> Self {
        self.position = position;
        self
    }
}

// ============================================================================
// PopupMenuBase
// ============================================================================

enum Routing<C: 'static> {
    Ignored,
    Consumed,
    Activated {
        item: NodeId,
        click: Option<Arc<Event<MenuEvent>>>,
        handler: Option<MenuHandler<C>>,
    },
}

/// A floating list of menu entries.
///
/// Hidden menus are detached from the document. Showing an already visible
/// menu, or hiding a hidden one, does nothing.
///
/// # Events
///
/// - `itemOver`: the pointer entered an item ([`MenuEvent::ItemOver`])
/// - `visibilityChange`: the menu was shown or hidden
///   ([`MenuEvent::VisibilityChange`])
pub struct PopupMenuBase<C: 'static> {
    document: Document,
    wrapper: NodeGuard,
    position: MenuPosition,
    context: Option<Arc<C>>,
    items: Vec<MenuEntry<C>>,
    generated: Vec<MenuEntry<C>>,
    events: EventTable<MenuEvent>,
}

impl<C: 'static> PopupMenuBase<C> {
    pub fn new(document: &Document, options: PopupMenuOptions) -> Self {
        Self {
            document: document.clone(),
            wrapper: NodeGuard::element(document, "div", "popup_menu hidden"),
            position: options.position,
            context: None,
            items: Vec::new(),
            generated: Vec::new(),
            events: EventTable::new(POPUP_MENU_EVENTS),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn wrapper(&self) -> NodeId {
        self.wrapper.id()
    }

    pub fn position(&self) -> MenuPosition {
        self.position
    }

    /// Add an entry. Entries appended while the menu is open appear the next
    /// time it opens.
    pub fn append(&mut self, entry: impl Into<MenuEntry<C>>) {
        self.items.push(entry.into());
    }

    pub fn append_separator(&mut self) {
        let separator = Separator::new(&self.document);
        self.append(separator);
    }

    /// Add a source of entries rebuilt on every show.
    pub fn append_dynamic(&mut self, source: impl DynamicMenuItems<C> + 'static) {
        self.items.push(MenuEntry::Dynamic(Box::new(source)));
    }

    /// Number of entries appended, counting a dynamic source as one.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn set_context(&mut self, context: C) {
        self.context = Some(Arc::new(context));
    }

    pub fn clear_context(&mut self) {
        self.context = None;
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.document.parent(self.wrapper()).is_some()
    }

    /// Nodes currently rendered in the menu, in order.
    pub fn item_nodes(&self) -> Vec<NodeId> {
        self.document.children(self.wrapper())
    }

    /// Open the menu at or next to `at`.
    pub fn show(&mut self, at: impl Into<RefPosition>) {
        let context = self.context.clone();
        self.open(at.into(), context.as_deref());
    }

    fn open(&mut self, at: RefPosition, context: Option<&C>) {
        if self.is_visible() {
            return;
        }
        let doc = self.document.clone();
        let wrapper = self.wrapper();

        for entry in &self.items {
            match entry {
                MenuEntry::Dynamic(source) => {
                    for generated in source.build(&doc, context) {
                        let Some(node) = generated.node() else {
                            tracing::warn!(target: targets::MENU, "nested dynamic menu entries are ignored");
                            continue;
                        };
                        let _ = doc.append_child(wrapper, node);
                        self.generated.push(generated);
                    }
                }
                other => {
                    if let Some(node) = other.node() {
                        let _ = doc.append_child(wrapper, node);
                    }
                }
            }
        }

        doc.remove_class(wrapper, HIDDEN_CLASS);
        let _ = doc.append_child(doc.body(), wrapper);
        self.events.emit("visibilityChange", &MenuEvent::VisibilityChange { visible: true });

        let corner = match at {
            RefPosition::At(point) => point,
            RefPosition::Around(rect) => {
                let size = Size::new(doc.offset_width(wrapper), doc.offset_height(wrapper));
                self.position.place(rect, size)
            }
        };
        doc.set_style_px(wrapper, "top", corner.y);
        doc.set_style_px(wrapper, "left", corner.x);
        doc.set_style(wrapper, "display", "block");
        tracing::debug!(target: targets::MENU, ?corner, generated = self.generated.len(), "menu shown");
    }

    /// Close the menu and every submenu opened from it. Dynamic entries are
    /// discarded.
    pub fn hide(&mut self) {
        let mut retired = Vec::new();
        self.close(&mut retired);
        for mut entry in retired {
            entry.destroy();
        }
    }

    /// Hide like [`hide`](Self::hide), but move the dynamic entries of this
    /// menu and its submenus into `retired` instead of destroying them.
    fn close(&mut self, retired: &mut Vec<MenuEntry<C>>) {
        if !self.is_visible() {
            return;
        }
        let doc = self.document.clone();
        let wrapper = self.wrapper();
        doc.add_class(wrapper, HIDDEN_CLASS);

        for entry in &mut self.items {
            if let MenuEntry::SubMenu(submenu) = entry {
                submenu.menu.close(retired);
            }
        }
        for mut entry in self.generated.drain(..) {
            if let MenuEntry::SubMenu(submenu) = &mut entry {
                submenu.menu.close(retired);
            }
            retired.push(entry);
        }

        let _ = doc.clear_children(wrapper);
        let _ = doc.detach(wrapper);
        self.events.emit("visibilityChange", &MenuEvent::VisibilityChange { visible: false });
        tracing::debug!(target: targets::MENU, "menu hidden");
    }

    /// Route a native event through the menu and its open submenus.
    /// Returns `true` when the event was consumed.
    pub fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if !self.is_visible() {
            return false;
        }
        let context = self.context.clone();
        match self.route(event, context.as_deref()) {
            Routing::Ignored => false,
            Routing::Consumed => true,
            Routing::Activated { item, click, handler } => {
                // Generated items outlive the hide until their click is out
                let mut retired = Vec::new();
                self.close(&mut retired);
                if let Some(click) = click {
                    click.dispatch(&MenuEvent::Click(item));
                }
                if let Some(handler) = handler {
                    handler(context.as_deref());
                }
                for mut entry in retired {
                    entry.destroy();
                }
                true
            }
        }
    }

    fn route(&mut self, event: &NativeEvent, context: Option<&C>) -> Routing<C> {
        for entry in self.items.iter_mut().chain(self.generated.iter_mut()) {
            if let MenuEntry::SubMenu(submenu) = entry {
                if submenu.menu.is_visible() {
                    match submenu.menu.route(event, context) {
                        Routing::Ignored => {}
                        routed => return routed,
                    }
                }
            }
        }

        let mut hovered = None;
        for entry in self.items.iter_mut().chain(self.generated.iter_mut()) {
            let item = match entry {
                MenuEntry::Item(item) => item,
                MenuEntry::SubMenu(submenu) => &mut submenu.anchor,
                _ => continue,
            };
            match item.react(event) {
                ItemReaction::Ignored => continue,
                ItemReaction::Consumed => return Routing::Consumed,
                ItemReaction::Activated => {
                    return Routing::Activated {
                        item: item.wrapper(),
                        click: item.click_event(),
                        handler: item.handler().cloned(),
                    };
                }
                ItemReaction::Hovered => {
                    hovered = Some(item.wrapper());
                    break;
                }
            }
        }

        match hovered {
            Some(item) => {
                self.item_over(item, context);
                Routing::Consumed
            }
            None => Routing::Ignored,
        }
    }

    /// Announce `item` and open the submenu it anchors, closing the others.
    fn item_over(&mut self, item: NodeId, context: Option<&C>) {
        self.events.emit("itemOver", &MenuEvent::ItemOver(item));
        let doc = self.document.clone();
        for entry in self.items.iter_mut().chain(self.generated.iter_mut()) {
            let MenuEntry::SubMenu(submenu) = entry else {
                continue;
            };
            if submenu.anchor.wrapper() == item {
                let anchor = doc.bounding_client_rect(item);
                submenu.menu.open(RefPosition::At(Point::new(anchor.right(), anchor.top())), context);
            } else {
                submenu.menu.hide();
            }
        }
    }

    /// Hide the menu and destroy every entry.
    pub fn destroy(&mut self) {
        self.hide();
        for entry in &mut self.items {
            entry.destroy();
        }
        self.items.clear();
        self.context = None;
        self.events.destroy();
    }
}

impl<C: 'static> ObjectWithEvents for PopupMenuBase<C> {
    type Args = MenuEvent;

    fn events(&self) -> &EventTable<MenuEvent> {
        &self.events
    }
}

impl<C: 'static> std::fmt::Debug for PopupMenuBase<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupMenuBase")
            .field("wrapper", &self.wrapper.id())
            .field("position", &self.position)
            .field("items", &self.items.len())
            .finish()
    }
}

// ============================================================================
// PopupMenu
// ============================================================================

/// A popup menu closed by clicking anywhere outside it.
///
/// While open, a `disable-layer` node covers the document body; a click or
/// context-menu request on it hides the menu.
pub struct PopupMenu<C: 'static> {
    menu: PopupMenuBase<C>,
    disable_layer: NodeGuard,
}

impl<C: 'static> PopupMenu<C> {
    pub fn new(document: &Document, options: PopupMenuOptions) -> Self {
        Self {
            menu: PopupMenuBase::new(document, options),
            disable_layer: NodeGuard::element(document, "div", DISABLE_LAYER_CLASS),
        }
    }

    pub fn menu(&self) -> &PopupMenuBase<C> {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut PopupMenuBase<C> {
        &mut self.menu
    }

    pub fn disable_layer(&self) -> NodeId {
        self.disable_layer.id()
    }

    pub fn append(&mut self, entry: impl Into<MenuEntry<C>>) {
        self.menu.append(entry);
    }

    pub fn append_separator(&mut self) {
        self.menu.append_separator();
    }

    pub fn append_dynamic(&mut self, source: impl DynamicMenuItems<C> + 'static) {
        self.menu.append_dynamic(source);
    }

    pub fn set_context(&mut self, context: C) {
        self.menu.set_context(context);
    }

    pub fn context(&self) -> Option<&C> {
        self.menu.context()
    }

    pub fn is_visible(&self) -> bool {
        self.menu.is_visible()
    }

    pub fn item_nodes(&self) -> Vec<NodeId> {
        self.menu.item_nodes()
    }

    pub fn show(&mut self, at: impl Into<RefPosition>) {
        if self.menu.is_visible() {
            return;
        }
        let doc = self.menu.document();
        let _ = doc.append_child(doc.body(), self.disable_layer.id());
        self.menu.show(at);
    }

    pub fn hide(&mut self) {
        self.menu.hide();
        let _ = self.menu.document().detach(self.disable_layer.id());
    }

    pub fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if !self.menu.is_visible() {
            return false;
        }
        if self.menu.handle_event(event) {
            if !self.menu.is_visible() {
                let _ = self.menu.document().detach(self.disable_layer.id());
            }
            return true;
        }
        let catches = matches!(event.kind, NativeEventKind::Click | NativeEventKind::ContextMenu);
        if catches && event.is_within(self.menu.document(), self.disable_layer.id()) {
            self.hide();
            return true;
        }
        false
    }

    pub fn destroy(&mut self) {
        self.hide();
        self.menu.destroy();
    }
}

impl<C: 'static> ObjectWithEvents for PopupMenu<C> {
    type Args = MenuEvent;

    fn events(&self) -> &EventTable<MenuEvent> {
        &self.menu.events
    }
}

// ============================================================================
// SubMenuItem
// ============================================================================

/// A menu opened from an anchor item of its parent menu.
///
/// The anchor carries the `submenu` class. Hovering it opens the submenu at
/// its right edge; hovering any other item of the parent closes it.
///
/// `click` and `mouseover` listeners are registered on the anchor item; all
/// other names go to the submenu.
pub struct SubMenuItem<C: 'static> {
    anchor: MenuItem<C>,
    menu: PopupMenuBase<C>,
}

impl<C: 'static> SubMenuItem<C> {
    pub fn new(document: &Document, text: &str) -> Self {
        let anchor = MenuItem::new(document, text);
        anchor.add_class_name("submenu");
        Self {
            anchor,
            menu: PopupMenuBase::new(document, PopupMenuOptions::default()),
        }
    }

    /// A submenu whose anchor runs `handler` when clicked.
    pub fn with_handler<F>(document: &Document, text: &str, handler: F) -> Self
    where
        F: Fn(Option<&C>) + Send + Sync + 'static,
    {
        let mut submenu = Self::new(document, text);
        submenu.anchor.set_handler(handler);
        submenu
    }

    pub fn anchor(&self) -> &MenuItem<C> {
        &self.anchor
    }

    pub fn menu(&self) -> &PopupMenuBase<C> {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut PopupMenuBase<C> {
        &mut self.menu
    }

    pub fn append(&mut self, entry: impl Into<MenuEntry<C>>) {
        self.menu.append(entry);
    }

    pub fn append_separator(&mut self) {
        self.menu.append_separator();
    }

    pub fn append_dynamic(&mut self, source: impl DynamicMenuItems<C> + 'static) {
        self.menu.append_dynamic(source);
    }

    pub fn is_visible(&self) -> bool {
        self.menu.is_visible()
    }

    pub fn destroy(&mut self) {
        self.anchor.destroy();
        self.menu.destroy();
    }
}

impl<C: 'static> ObjectWithEvents for SubMenuItem<C> {
    type Args = MenuEvent;

    fn events(&self) -> &EventTable<MenuEvent> {
        &self.menu.events
    }

    fn add_event_listener<F>(&self, name: &str, listener: F) -> Result<ListenerId>
    where
        F: Fn(&MenuEvent) + Send + Sync + 'static,
    {
        match name {
            "click" | "mouseover" => self.anchor.add_event_listener(name, listener),
            _ => self.menu.events.add_event_listener(name, listener),
        }
    }

    fn remove_event_listener(&self, name: &str, id: ListenerId) -> Result<bool> {
        match name {
            "click" | "mouseover" => self.anchor.remove_event_listener(name, id),
            _ => self.menu.events.remove_event_listener(name, id),
        }
    }
}
