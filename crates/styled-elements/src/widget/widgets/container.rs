//! Generic container widget implementation.
//!
//! This module provides [`Container`], a widget that owns an ordered list of
//! child widgets and keeps it in lock-step with the node tree.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{Container, ContainerOptions, StyledButton, ButtonOptions};
//! use styled_elements::widget::StyledElement;
//! use styled_elements::Document;
//!
//! let doc = Document::headless();
//! let mut container = Container::new(&doc, ContainerOptions::default().with_class("sidebar"));
//! container.insert_into(doc.body(), None).unwrap();
//!
//! let button = container.append_child(StyledButton::new(&doc, ButtonOptions::text("Go"))).unwrap();
//! assert_eq!(container.child_count(), 1);
//!
//! let removed = container.remove_child(button).unwrap();
//! assert!(!doc.is_attached(removed.wrapper()));
//! ```

use serde::Deserialize;
use styled_elements_core::{Document, Error, NodeGuard, NodeId, Result};

use crate::logging::targets;
use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{AsAny, NativeEvent, StyledElement};

/// Class of the overlay that blocks input on a disabled container.
pub const DISABLE_LAYER_CLASS: &str = "disable-layer";

/// Options for [`Container`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerOptions {
    /// Extra classes added after `container`.
    pub class: String,
    /// Value of the wrapper's `id` attribute.
    pub id: String,
    /// Stretch to the parent's usable height on every repaint.
    pub use_full_height: bool,
}

impl ContainerOptions {
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_full_height(mut self, use_full_height: bool) -> Self {
        self.use_full_height = use_full_height;
        self
    }
}

/// A widget holding other widgets.
///
/// Child widgets are owned by the container. Appending a child attaches its
/// wrapper; removing it detaches the wrapper and hands the widget back, so
/// the bookkeeping and the node tree never disagree. Plain nodes can be
/// appended too; they are released by [`clear`](Self::clear).
pub struct Container {
    base: ElementBase,
    children: Vec<Box<dyn StyledElement>>,
    nodes: Vec<NodeId>,
    use_full_height: bool,
    disabled_layer: Option<NodeGuard>,
}

impl Container {
    pub fn new(document: &Document, options: ContainerOptions) -> Self {
        let base = ElementBase::new(document, "div", &join_classes("container", &options.class));
        base.set_element_id(&options.id);
        Self {
            base,
            children: Vec::new(),
            nodes: Vec::new(),
            use_full_height: options.use_full_height,
            disabled_layer: None,
        }
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Append a widget and take ownership of it.
    ///
    /// Returns the child's wrapper node, which identifies it for
    /// [`remove_child`](Self::remove_child) and [`child_mut`](Self::child_mut).
    pub fn append_child<W: StyledElement + 'static>(&mut self, child: W) -> Result<NodeId> {
        self.append_boxed(Box::new(child))
    }

    pub fn append_boxed(&mut self, mut child: Box<dyn StyledElement>) -> Result<NodeId> {
        let before = self.disabled_layer.as_ref().map(NodeGuard::id);
        child.insert_into(self.wrapper(), before)?;
        let id = child.wrapper();
        self.children.push(child);
        Ok(id)
    }

    /// Append a plain node that is not backed by a widget.
    pub fn append_node(&mut self, node: NodeId) -> Result<()> {
        let before = self.disabled_layer.as_ref().map(NodeGuard::id);
        self.document().insert_before(self.wrapper(), node, before)?;
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a child widget, detaching it, and return it to the caller.
    pub fn remove_child(&mut self, wrapper: NodeId) -> Result<Box<dyn StyledElement>> {
        let index = self
            .children
            .iter()
            .position(|child| child.wrapper() == wrapper)
            .ok_or(Error::UnknownChild(wrapper))?;
        let mut child = self.children.remove(index);
        child.detach()?;
        Ok(child)
    }

    /// Detach a plain node appended with [`append_node`](Self::append_node).
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.document().remove_child(self.wrapper(), node)?;
        self.nodes.retain(|&n| n != node);
        Ok(())
    }

    /// Drop every child widget and release every plain node. The disable
    /// layer, if any, stays in place.
    pub fn clear(&mut self) {
        for mut child in self.children.drain(..) {
            child.destroy();
        }
        for node in self.nodes.drain(..) {
            self.base.document().remove_node(node);
        }
        let layer = self.disabled_layer.as_ref().map(NodeGuard::id);
        let document = self.base.document();
        for node in document.children(self.base.wrapper()) {
            if Some(node) != layer {
                document.remove_node(node);
            }
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn StyledElement> {
        self.children.iter().map(|child| &**child as &dyn StyledElement)
    }

    pub fn child(&self, wrapper: NodeId) -> Option<&dyn StyledElement> {
        self.children
            .iter()
            .find(|child| child.wrapper() == wrapper)
            .map(|child| &**child as &dyn StyledElement)
    }

    pub fn child_mut(&mut self, wrapper: NodeId) -> Option<&mut (dyn StyledElement + 'static)> {
        self.children
            .iter_mut()
            .find(|child| child.wrapper() == wrapper)
            .map(|child| &mut **child)
    }

    /// The child with this wrapper, if it is a `T`.
    ///
    /// ```
    /// use styled_elements::widget::widgets::{Container, ContainerOptions, NumericFieldOptions, StyledNumericField};
    /// use styled_elements::widget::StyledInputElement;
    /// use styled_elements::Document;
    ///
    /// let doc = Document::headless();
    /// let mut container = Container::new(&doc, ContainerOptions::default());
    /// let field = container.append_child(StyledNumericField::new(&doc, NumericFieldOptions::default())).unwrap();
    ///
    /// container.child_as_mut::<StyledNumericField>(field).unwrap().set_value(3.0);
    /// assert_eq!(container.child_as::<StyledNumericField>(field).unwrap().value(), 3.0);
    /// ```
    pub fn child_as<T: StyledElement>(&self, wrapper: NodeId) -> Option<&T> {
        self.child(wrapper)?.as_any().downcast_ref()
    }

    pub fn child_as_mut<T: StyledElement>(&mut self, wrapper: NodeId) -> Option<&mut T> {
        self.child_mut(wrapper)?.as_any_mut().downcast_mut()
    }

    // =========================================================================
    // Layout and state
    // =========================================================================

    pub fn uses_full_height(&self) -> bool {
        self.use_full_height
    }

    pub fn set_use_full_height(&mut self, use_full_height: bool) {
        self.use_full_height = use_full_height;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled_layer.is_some()
    }

    pub(crate) fn disabled_layer(&self) -> Option<NodeId> {
        self.disabled_layer.as_ref().map(NodeGuard::id)
    }

    fn resize_disabled_layer(&self) {
        if let Some(layer) = &self.disabled_layer {
            let height = self.document().scroll_height(self.wrapper());
            self.document().set_style_px(layer.id(), "height", height);
        }
    }
}

impl StyledElement for Container {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn repaint(&mut self, temporal: bool) {
        if self.use_full_height {
            let Some(height) = self.base.usable_height() else {
                return;
            };
            self.document().set_style_px(self.wrapper(), "height", height);
        }

        for child in &mut self.children {
            child.repaint(temporal);
        }

        self.resize_disabled_layer();
    }

    /// Overlay (or remove) a `disable-layer` node blocking input to the
    /// children. Setting the current state again does nothing.
    fn set_disabled(&mut self, disabled: bool) {
        if self.is_disabled() == disabled {
            return;
        }

        if disabled {
            let layer = NodeGuard::element(self.document(), "div", DISABLE_LAYER_CLASS);
            if let Err(err) = self.document().append_child(self.wrapper(), layer.id()) {
                tracing::warn!(target: targets::WIDGET, %err, "failed to attach disable layer");
                return;
            }
            self.disabled_layer = Some(layer);
            self.resize_disabled_layer();
        } else {
            self.disabled_layer = None;
        }
        self.base.set_enabled(!disabled);
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        if let Some(layer) = self.disabled_layer() {
            if event.is_within(self.document(), layer) {
                return true;
            }
        }
        self.children
            .iter_mut()
            .any(|child| child.handle_event(event))
    }

    fn destroy(&mut self) {
        for child in &mut self.children {
            child.destroy();
        }
        let _ = self.base.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use styled_elements_core::{NodeMetrics, StaticLayout};

    struct Marker {
        base: ElementBase,
        repaints: Arc<parking_lot::Mutex<Vec<bool>>>,
    }

    impl Marker {
        fn new(doc: &Document, repaints: Arc<parking_lot::Mutex<Vec<bool>>>) -> Self {
            Self {
                base: ElementBase::new(doc, "span", "marker"),
                repaints,
            }
        }
    }

    impl StyledElement for Marker {
        fn base(&self) -> &ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ElementBase {
            &mut self.base
        }

        fn repaint(&mut self, temporal: bool) {
            self.repaints.lock().push(temporal);
        }
    }

    #[test]
    fn test_container_classes() {
        let doc = Document::headless();
        let container = Container::new(
            &doc,
            ContainerOptions::default().with_class("a b").with_id("main"),
        );
        assert_eq!(doc.class_names(container.wrapper()), vec!["container", "a", "b"]);
        assert_eq!(doc.attribute(container.wrapper(), "id").as_deref(), Some("main"));
    }

    #[test]
    fn test_append_and_remove_stay_in_sync() {
        let doc = Document::headless();
        let log = Arc::default();
        let mut container = Container::new(&doc, ContainerOptions::default());

        let first = container.append_child(Marker::new(&doc, Arc::clone(&log))).unwrap();
        let second = container.append_child(Marker::new(&doc, Arc::clone(&log))).unwrap();
        assert_eq!(doc.children(container.wrapper()), vec![first, second]);

        let removed = container.remove_child(first).unwrap();
        assert_eq!(removed.wrapper(), first);
        assert_eq!(container.child_count(), 1);
        assert_eq!(doc.children(container.wrapper()), vec![second]);

        assert!(matches!(
            container.remove_child(first),
            Err(Error::UnknownChild(id)) if id == first
        ));
    }

    #[test]
    fn test_repaint_cascades_and_stretches() {
        let layout = Arc::new(StaticLayout::new());
        let doc = Document::new(layout.clone());
        let log: Arc<parking_lot::Mutex<Vec<bool>>> = Arc::default();

        let parent = doc.create_element("div");
        layout.set_metrics(parent, NodeMetrics::sized(200.0, 150.0));

        let mut container = Container::new(&doc, ContainerOptions::default().with_full_height(true));
        container.append_child(Marker::new(&doc, Arc::clone(&log))).unwrap();

        // Not attached: nothing happens
        container.repaint(false);
        assert!(log.lock().is_empty());

        container.insert_into(parent, None).unwrap();
        container.repaint(true);
        assert_eq!(doc.style(container.wrapper(), "height").as_deref(), Some("150px"));
        assert_eq!(*log.lock(), vec![true]);
    }

    #[test]
    fn test_disable_layer() {
        let doc = Document::headless();
        let mut container = Container::new(&doc, ContainerOptions::default());
        doc.set_style_px(container.wrapper(), "height", 80.0);

        container.disable();
        container.disable();
        assert!(container.is_disabled());
        assert!(!container.is_enabled());
        assert!(container.has_class_name("disabled"));
        let layers = doc.find_by_class(container.wrapper(), DISABLE_LAYER_CLASS);
        assert_eq!(layers.len(), 1);
        assert_eq!(doc.style(layers[0], "height").as_deref(), Some("80px"));

        container.enable();
        assert!(!container.is_disabled());
        assert!(container.is_enabled());
        assert!(doc.find_by_class(container.wrapper(), DISABLE_LAYER_CLASS).is_empty());
    }

    #[test]
    fn test_clear_keeps_disable_layer() {
        let doc = Document::headless();
        let log = Arc::default();
        let mut container = Container::new(&doc, ContainerOptions::default());
        let child = container.append_child(Marker::new(&doc, log)).unwrap();
        let node = doc.create_text("loose text");
        container.append_node(node).unwrap();
        container.disable();

        container.clear();
        assert!(container.is_empty());
        assert!(!doc.exists(child));
        assert!(!doc.exists(node));
        assert_eq!(doc.children(container.wrapper()).len(), 1);
        assert!(container.is_disabled());
    }

    #[test]
    fn test_children_inserted_before_disable_layer() {
        let doc = Document::headless();
        let log = Arc::default();
        let mut container = Container::new(&doc, ContainerOptions::default());
        container.disable();
        let child = container.append_child(Marker::new(&doc, log)).unwrap();

        let children = doc.children(container.wrapper());
        assert_eq!(children.first(), Some(&child));
        assert!(doc.has_class(children[1], DISABLE_LAYER_CLASS));
    }

    #[test]
    fn test_child_as_recovers_concrete_widget() {
        let doc = Document::headless();
        let log: Arc<parking_lot::Mutex<Vec<bool>>> = Arc::default();
        let mut container = Container::new(&doc, ContainerOptions::default());
        let marker = container.append_child(Marker::new(&doc, Arc::clone(&log))).unwrap();
        let inner = container
            .append_child(Container::new(&doc, ContainerOptions::default()))
            .unwrap();

        container.child_as_mut::<Marker>(marker).unwrap().repaint(false);
        assert_eq!(*log.lock(), vec![false]);
        assert!(container.child_as::<Marker>(marker).is_some());
        assert!(container.child_as::<Container>(marker).is_none());
        assert!(container.child_as::<Container>(inner).is_some());
        assert!(container.child_as::<Marker>(doc.body()).is_none());

        // A boxed child still downcasts to the widget inside the box
        let boxed = container
            .append_boxed(Box::new(Marker::new(&doc, Arc::clone(&log))))
            .unwrap();
        assert!(container.child_as::<Marker>(boxed).is_some());
    }

    #[test]
    fn test_options_from_json() {
        let options: ContainerOptions =
            serde_json::from_str(r#"{"class": "x", "useFullHeight": true, "unknown": 1}"#).unwrap();
        assert_eq!(options.class, "x");
        assert!(options.use_full_height);
    }
}
