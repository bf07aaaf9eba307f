//! The retained visual node tree.
//!
//! Every widget renders into a tree of nodes owned by a [`Document`]. A node
//! is an element (tag, classes, attributes, inline style, form state) or a
//! text run. The tree is arena-backed: nodes live in a `SlotMap` keyed by
//! [`NodeId`], and parent/child links are ids, so widgets can hold on to the
//! nodes they created without borrowing the tree.
//!
//! # Ownership
//!
//! A node stays alive until [`Document::remove_node`] releases it together
//! with its whole subtree. Widgets keep their root node in a [`NodeGuard`],
//! which releases it on drop. Releasing an already released node is a no-op,
//! so a guard may safely outlive the subtree that contained its node.
//!
//! # Operation kinds
//!
//! Structural operations (`append_child`, `insert_before`, `remove_child`,
//! ...) return a [`Result`] because a bad id or an impossible structure is a
//! caller bug. Class, attribute, style and form-state setters silently
//! ignore stale ids, mirroring how writes to a discarded node have no effect.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Error, Result};
use crate::layout::{BoxModel, LayoutBackend, NodeMetrics, Rect, StaticLayout};
use crate::logging::targets;

new_key_type! {
    /// A handle to one node of a [`Document`].
    ///
    /// Ids are versioned: once a node is released its id never resolves
    /// again, even if the slot is reused.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the id to a raw u64, for hosts that mirror the tree elsewhere.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Tag used for text nodes.
pub const TEXT_TAG: &str = "#text";

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    text: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    value: String,
    checked: bool,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            text: String::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            value: String::new(),
            checked: false,
            disabled: false,
            parent: None,
            children: Vec::new(),
        }
    }

    fn text(text: &str) -> Self {
        let mut data = Self::element(TEXT_TAG);
        data.text = text.to_string();
        data
    }
}

/// The node arena behind a [`Document`].
///
/// Read access is available through [`Document::with_tree`]; all mutation
/// goes through the `Document` handle.
pub struct DomTree {
    nodes: SlotMap<NodeId, NodeData>,
    body: NodeId,
    focused: Option<NodeId>,
}

impl DomTree {
    fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData::element("body"));
        Self {
            nodes,
            body,
            focused: None,
        }
    }

    /// The root node. It is never released.
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        self.nodes
            .get(id)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is reachable from the body.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.exists(id) && self.contains(self.body, id)
    }

    /// The topmost ancestor of the node.
    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// The `name` of a radio input, if the node is one and has a name.
    fn radio_name(&self, id: NodeId) -> Option<&str> {
        let node = self.nodes.get(id)?;
        if node.tag != "input" || node.attributes.get("type").map(String::as_str) != Some("radio") {
            return None;
        }
        node.attributes.get("name").map(String::as_str).filter(|name| !name.is_empty())
    }

    /// Concatenated text of the node and its descendants, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(node) = self.nodes.get(id) {
            out.push_str(&node.text);
            for &child in &node.children {
                self.collect_text(child, out);
            }
        }
    }

    /// Pre-order list of `root` and all its descendants.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                result.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        result
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    fn unlink(&mut self, id: NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|n| n.parent.take());
        if let Some(parent) = parent {
            if let Some(parent_data) = self.nodes.get_mut(parent) {
                parent_data.children.retain(|&child| child != id);
            }
        }
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(Error::NotAChild {
                    parent,
                    child: reference,
                });
            }
            if reference == child {
                return Ok(());
            }
        }
        if self.contains(child, parent) {
            return Err(Error::HierarchyCycle {
                parent,
                node: child,
            });
        }

        self.unlink(child);
        let index = reference.and_then(|r| self.children(parent).iter().position(|&c| c == r));
        if let Some(parent_data) = self.nodes.get_mut(parent) {
            match index {
                Some(index) => parent_data.children.insert(index, child),
                None => parent_data.children.push(child),
            }
        }
        if let Some(child_data) = self.nodes.get_mut(child) {
            child_data.parent = Some(parent);
        }
        Ok(())
    }

    fn release(&mut self, id: NodeId) -> bool {
        if id == self.body || !self.exists(id) {
            return false;
        }
        self.unlink(id);
        for node in self.descendants(id) {
            if self.focused == Some(node) {
                self.focused = None;
            }
            self.nodes.remove(node);
        }
        true
    }
}

/// A shared handle to a node tree and the layout backend measuring it.
///
/// Cloning a `Document` is cheap and yields a handle to the same tree.
#[derive(Clone)]
pub struct Document {
    tree: Arc<RwLock<DomTree>>,
    layout: Arc<dyn LayoutBackend>,
}

impl Document {
    /// Create an empty document measured by `layout`.
    pub fn new(layout: Arc<dyn LayoutBackend>) -> Self {
        Self {
            tree: Arc::new(RwLock::new(DomTree::new())),
            layout,
        }
    }

    /// Create a document backed by a fresh [`StaticLayout`] with no metrics.
    pub fn headless() -> Self {
        Self::new(Arc::new(StaticLayout::new()))
    }

    /// Whether both handles refer to the same tree.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree)
    }

    /// Run `f` with read access to the tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(&self.tree.read())
    }

    pub fn layout(&self) -> &Arc<dyn LayoutBackend> {
        &self.layout
    }

    pub fn body(&self) -> NodeId {
        self.tree.read().body
    }

    pub fn node_count(&self) -> usize {
        self.tree.read().node_count()
    }

    // -------------------------------------------------------------------------
    // Creation and structure
    // -------------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let id = self.tree.write().nodes.insert(NodeData::element(tag));
        tracing::trace!(target: targets::DOM, ?id, tag, "created element");
        id
    }

    /// Create a detached element carrying the whitespace-separated classes.
    pub fn create_element_with_class(&self, tag: &str, class_names: &str) -> NodeId {
        let id = self.create_element(tag);
        self.add_class(id, class_names);
        id
    }

    /// Create a detached text node.
    pub fn create_text(&self, text: &str) -> NodeId {
        self.tree.write().nodes.insert(NodeData::text(text))
    }

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`, or last when
    /// `reference` is `None`.
    ///
    /// Fails when `reference` is not a child of `parent` or when the move
    /// would make `child` its own ancestor.
    pub fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        self.tree.write().insert_before(parent, child, reference)?;
        tracing::trace!(target: targets::DOM, ?parent, ?child, ?reference, "inserted node");
        Ok(())
    }

    /// Detach `child` from `parent`. The node stays alive.
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tree = self.tree.write();
        tree.node(parent)?;
        tree.node(child)?;
        if tree.parent(child) != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }
        tree.unlink(child);
        Ok(())
    }

    /// Detach a node from whatever parent it has. Detached nodes are left
    /// alone.
    pub fn detach(&self, id: NodeId) -> Result<()> {
        let mut tree = self.tree.write();
        tree.node(id)?;
        tree.unlink(id);
        Ok(())
    }

    /// Detach every child of `id`. The children stay alive.
    pub fn clear_children(&self, id: NodeId) -> Result<()> {
        let mut tree = self.tree.write();
        let children = tree.node(id)?.children.clone();
        for child in children {
            tree.unlink(child);
        }
        Ok(())
    }

    /// Release a node and its whole subtree.
    ///
    /// Returns `false` when the node was already released. The body can not
    /// be released.
    pub fn remove_node(&self, id: NodeId) -> bool {
        let removed = self.tree.write().release(id);
        if removed {
            tracing::trace!(target: targets::DOM, ?id, "released node");
        }
        removed
    }

    /// Replace the children of `id` with a single text run.
    pub fn set_text_content(&self, id: NodeId, text: &str) {
        let mut tree = self.tree.write();
        let Some(children) = tree.nodes.get(id).map(|n| n.children.clone()) else {
            return;
        };
        for child in children {
            tree.release(child);
        }
        if let Some(node) = tree.nodes.get_mut(id) {
            node.text = text.to_string();
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn exists(&self, id: NodeId) -> bool {
        self.tree.read().exists(id)
    }

    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.tree.read().tag(id).map(str::to_string)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.read().parent(id)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.read().children(id).to_vec()
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.read().contains(ancestor, node)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.tree.read().is_attached(id)
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.tree.read().text_content(id)
    }

    /// Descendants of `root` (itself included) carrying `class`, in document
    /// order.
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let tree = self.tree.read();
        tree.descendants(root)
            .into_iter()
            .filter(|&id| tree.has_class(id, class))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.tree.read().has_class(id, class)
    }

    pub fn class_names(&self, id: NodeId) -> Vec<String> {
        self.tree.read().classes(id).to_vec()
    }

    /// Add every whitespace-separated class not already present.
    pub fn add_class(&self, id: NodeId, class_names: &str) {
        let mut tree = self.tree.write();
        if let Some(node) = tree.nodes.get_mut(id) {
            for class in class_names.split_whitespace() {
                if !node.classes.iter().any(|c| c == class) {
                    node.classes.push(class.to_string());
                }
            }
        }
    }

    /// Remove every whitespace-separated class.
    pub fn remove_class(&self, id: NodeId, class_names: &str) {
        let mut tree = self.tree.write();
        if let Some(node) = tree.nodes.get_mut(id) {
            for class in class_names.split_whitespace() {
                node.classes.retain(|c| c != class);
            }
        }
    }

    pub fn toggle_class(&self, id: NodeId, class_names: &str, present: bool) {
        if present {
            self.add_class(id, class_names);
        } else {
            self.remove_class(id, class_names);
        }
    }

    /// Replace the whole class list.
    pub fn set_class_name(&self, id: NodeId, class_names: &str) {
        let mut tree = self.tree.write();
        if let Some(node) = tree.nodes.get_mut(id) {
            node.classes = class_names.split_whitespace().map(str::to_string).collect();
        }
    }

    // -------------------------------------------------------------------------
    // Attributes and inline style
    // -------------------------------------------------------------------------

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.tree.read().attribute(id, name).map(str::to_string)
    }

    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.tree.write().nodes.get_mut(id) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&self, id: NodeId, name: &str) {
        if let Some(node) = self.tree.write().nodes.get_mut(id) {
            node.attributes.remove(name);
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.tree.read().style(id, property).map(str::to_string)
    }

    pub fn set_style(&self, id: NodeId, property: &str, value: &str) {
        if let Some(node) = self.tree.write().nodes.get_mut(id) {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    /// Set a length property in pixels.
    pub fn set_style_px(&self, id: NodeId, property: &str, value: f64) {
        self.set_style(id, property, &format!("{value}px"));
    }

    pub fn remove_style(&self, id: NodeId, property: &str) {
        if let Some(node) = self.tree.write().nodes.get_mut(id) {
            node.style.remove(property);
        }
    }

    /// Read a pixel length from the inline style, if one is set.
    pub fn style_px(&self, id: NodeId, property: &str) -> Option<f64> {
        let value = self.style(id, property)?;
        value.trim().trim_end_matches("px").trim().parse().ok()
    }

    // -------------------------------------------------------------------------
    // Form state and focus
    // -------------------------------------------------------------------------

    pub fn value(&self, id: NodeId) -> String {
        self.tree
            .read()
            .nodes
            .get(id)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    pub fn set_value(&self, id: NodeId, value: &str) {
        if let Some(node) = self.tree.write().nodes.get_mut(id) {
            node.value = value.to_string();
        }
    }

    pub fn checked(&self, id: NodeId) -> bool {
        self.tree.read().nodes.get(id).is_some_and(|n| n.checked)
    }

    /// Set the checked flag. Checking a named radio input unchecks the other
    /// radios with the same name in the same tree, as a browser does.
    pub fn set_checked(&self, id: NodeId, checked: bool) {
        let mut tree = self.tree.write();
        let Some(node) = tree.nodes.get_mut(id) else {
            return;
        };
        node.checked = checked;
        if !checked {
            return;
        }
        let Some(name) = tree.radio_name(id).map(str::to_string) else {
            return;
        };
        let root = tree.root(id);
        let siblings: Vec<NodeId> = tree
            .nodes
            .keys()
            .filter(|&other| {
                other != id && tree.radio_name(other) == Some(name.as_str()) && tree.root(other) == root
            })
            .collect();
        for other in siblings {
            if let Some(node) = tree.nodes.get_mut(other) {
                node.checked = false;
            }
        }
    }

    pub fn disabled(&self, id: NodeId) -> bool {
        self.tree.read().nodes.get(id).is_some_and(|n| n.disabled)
    }

    pub fn set_disabled(&self, id: NodeId, disabled: bool) {
        if let Some(node) = self.tree.write().nodes.get_mut(id) {
            node.disabled = disabled;
        }
    }

    pub fn focus(&self, id: NodeId) {
        let mut tree = self.tree.write();
        if tree.exists(id) {
            tree.focused = Some(id);
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.tree.read().focused
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Backend metrics for the node, if it is rendered.
    pub fn metrics(&self, id: NodeId) -> Option<NodeMetrics> {
        self.layout.metrics(id)
    }

    pub fn offset_width(&self, id: NodeId) -> f64 {
        match self.metrics(id) {
            Some(metrics) => metrics.offset.width,
            None => self.style_px(id, "width").unwrap_or(0.0),
        }
    }

    pub fn offset_height(&self, id: NodeId) -> f64 {
        match self.metrics(id) {
            Some(metrics) => metrics.offset.height,
            None => self.style_px(id, "height").unwrap_or(0.0),
        }
    }

    pub fn client_width(&self, id: NodeId) -> f64 {
        match self.metrics(id) {
            Some(metrics) => metrics.client.width,
            None => self.offset_width(id),
        }
    }

    pub fn client_height(&self, id: NodeId) -> f64 {
        match self.metrics(id) {
            Some(metrics) => metrics.client.height,
            None => self.offset_height(id),
        }
    }

    pub fn scroll_height(&self, id: NodeId) -> f64 {
        match self.metrics(id) {
            Some(metrics) => metrics.scroll_height,
            None => self.offset_height(id),
        }
    }

    pub fn box_model(&self, id: NodeId) -> BoxModel {
        self.metrics(id).map(|m| m.box_model).unwrap_or_default()
    }

    /// The page-relative border box of the node.
    pub fn bounding_client_rect(&self, id: NodeId) -> Rect {
        match self.metrics(id) {
            Some(metrics) => Rect::from_origin_size(metrics.position, metrics.offset),
            None => Rect::new(
                self.style_px(id, "left").unwrap_or(0.0),
                self.style_px(id, "top").unwrap_or(0.0),
                self.offset_width(id),
                self.offset_height(id),
            ),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::headless()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("node_count", &self.node_count())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Document: Send, Sync);

/// Owns one node and releases its subtree when dropped.
pub struct NodeGuard {
    document: Document,
    id: NodeId,
}

impl NodeGuard {
    /// Take ownership of an existing node.
    pub fn new(document: &Document, id: NodeId) -> Self {
        Self {
            document: document.clone(),
            id,
        }
    }

    /// Create an element and take ownership of it.
    pub fn element(document: &Document, tag: &str, class_names: &str) -> Self {
        let id = document.create_element_with_class(tag, class_names);
        Self::new(document, id)
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Drop for NodeGuard {
    fn drop(&mut self) {
        self.document.remove_node(self.id);
    }
}

impl fmt::Debug for NodeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeGuard").field(&self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_order() {
        let doc = Document::headless();
        let body = doc.body();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let c = doc.create_element("div");

        doc.append_child(body, a).unwrap();
        doc.append_child(body, c).unwrap();
        doc.insert_before(body, b, Some(c)).unwrap();

        assert_eq!(doc.children(body), vec![a, b, c]);
        assert_eq!(doc.parent(b), Some(body));
        assert!(doc.is_attached(b));
    }

    #[test]
    fn test_append_moves_node() {
        let doc = Document::headless();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let child = doc.create_element("span");

        doc.append_child(first, child).unwrap();
        doc.append_child(second, child).unwrap();

        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), vec![child]);
    }

    #[test]
    fn test_insert_before_requires_child_reference() {
        let doc = Document::headless();
        let parent = doc.create_element("div");
        let stranger = doc.create_element("div");
        let node = doc.create_element("div");

        let err = doc.insert_before(parent, node, Some(stranger)).unwrap_err();
        assert_eq!(
            err,
            Error::NotAChild {
                parent,
                child: stranger
            }
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let doc = Document::headless();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();

        assert!(matches!(
            doc.append_child(inner, outer),
            Err(Error::HierarchyCycle { .. })
        ));
        assert!(matches!(
            doc.append_child(outer, outer),
            Err(Error::HierarchyCycle { .. })
        ));
    }

    #[test]
    fn test_remove_child_validates_parent() {
        let doc = Document::headless();
        let parent = doc.create_element("div");
        let child = doc.create_element("div");

        assert!(doc.remove_child(parent, child).is_err());
        doc.append_child(parent, child).unwrap();
        doc.remove_child(parent, child).unwrap();
        assert_eq!(doc.parent(child), None);
        assert!(doc.exists(child));
    }

    #[test]
    fn test_remove_node_releases_subtree() {
        let doc = Document::headless();
        let root = doc.create_element("div");
        let child = doc.create_element("div");
        let grandchild = doc.create_text("hi");
        doc.append_child(doc.body(), root).unwrap();
        doc.append_child(root, child).unwrap();
        doc.append_child(child, grandchild).unwrap();

        assert!(doc.remove_node(root));
        assert!(!doc.remove_node(root));
        assert!(!doc.exists(child));
        assert!(!doc.exists(grandchild));
        assert!(doc.children(doc.body()).is_empty());
        assert!(matches!(doc.detach(child), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_body_can_not_be_released() {
        let doc = Document::headless();
        assert!(!doc.remove_node(doc.body()));
        assert!(doc.exists(doc.body()));
    }

    #[test]
    fn test_node_guard_releases_on_drop() {
        let doc = Document::headless();
        let id = {
            let guard = NodeGuard::element(&doc, "div", "panel");
            doc.append_child(doc.body(), guard.id()).unwrap();
            guard.id()
        };
        assert!(!doc.exists(id));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn test_node_guard_after_ancestor_release() {
        let doc = Document::headless();
        let outer = doc.create_element("div");
        let guard = NodeGuard::element(&doc, "div", "");
        doc.append_child(outer, guard.id()).unwrap();

        doc.remove_node(outer);
        assert!(!doc.exists(guard.id()));
        drop(guard);
    }

    #[test]
    fn test_classes() {
        let doc = Document::headless();
        let node = doc.create_element_with_class("div", "a  b");

        doc.add_class(node, "b c");
        assert_eq!(doc.class_names(node), vec!["a", "b", "c"]);

        doc.remove_class(node, "a c");
        assert_eq!(doc.class_names(node), vec!["b"]);

        doc.toggle_class(node, "disabled", true);
        assert!(doc.has_class(node, "disabled"));
        doc.toggle_class(node, "disabled", false);
        assert!(!doc.has_class(node, "disabled"));
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let doc = Document::headless();
        let node = doc.create_element("div");
        doc.remove_node(node);

        doc.add_class(node, "x");
        doc.set_style(node, "width", "10px");
        doc.set_value(node, "v");
        assert!(!doc.has_class(node, "x"));
        assert_eq!(doc.value(node), "");
    }

    #[test]
    fn test_text_content() {
        let doc = Document::headless();
        let node = doc.create_element("div");
        let a = doc.create_text("Hello, ");
        let b = doc.create_element("b");
        let c = doc.create_text("world");
        doc.append_child(node, a).unwrap();
        doc.append_child(node, b).unwrap();
        doc.append_child(b, c).unwrap();

        assert_eq!(doc.text_content(node), "Hello, world");

        doc.set_text_content(node, "replaced");
        assert_eq!(doc.text_content(node), "replaced");
        assert!(!doc.exists(c));
    }

    #[test]
    fn test_geometry_falls_back_to_inline_style() {
        let layout = Arc::new(StaticLayout::new());
        let doc = Document::new(layout.clone());
        let node = doc.create_element("div");

        doc.set_style_px(node, "width", 120.0);
        doc.set_style_px(node, "height", 40.5);
        assert_eq!(doc.offset_width(node), 120.0);
        assert_eq!(doc.offset_height(node), 40.5);

        layout.set_metrics(node, NodeMetrics::sized(300.0, 100.0).with_position(5.0, 6.0));
        assert_eq!(doc.offset_width(node), 300.0);
        assert_eq!(doc.bounding_client_rect(node), Rect::new(5.0, 6.0, 300.0, 100.0));
    }

    #[test]
    fn test_focus_cleared_on_release() {
        let doc = Document::headless();
        let node = doc.create_element("input");
        doc.focus(node);
        assert_eq!(doc.focused(), Some(node));
        doc.remove_node(node);
        assert_eq!(doc.focused(), None);
    }

    fn radio(doc: &Document, name: &str) -> NodeId {
        let input = doc.create_element("input");
        doc.set_attribute(input, "type", "radio");
        doc.set_attribute(input, "name", name);
        input
    }

    #[test]
    fn test_checking_radio_unchecks_same_name_in_tree() {
        let doc = Document::headless();
        let form = doc.create_element("form");
        doc.append_child(doc.body(), form).unwrap();
        let small = radio(&doc, "size");
        let large = radio(&doc, "size");
        let other = radio(&doc, "color");
        for node in [small, large, other] {
            doc.append_child(form, node).unwrap();
        }
        let detached = radio(&doc, "size");

        doc.set_checked(other, true);
        doc.set_checked(detached, true);
        doc.set_checked(small, true);
        doc.set_checked(large, true);

        assert!(!doc.checked(small));
        assert!(doc.checked(large));
        assert!(doc.checked(other));
        assert!(doc.checked(detached));
    }

    #[test]
    fn test_checkboxes_are_independent() {
        let doc = Document::headless();
        let a = doc.create_element("input");
        let b = doc.create_element("input");
        for node in [a, b] {
            doc.set_attribute(node, "type", "checkbox");
            doc.set_attribute(node, "name", "features");
            doc.append_child(doc.body(), node).unwrap();
        }
        doc.set_checked(a, true);
        doc.set_checked(b, true);
        assert!(doc.checked(a) && doc.checked(b));
    }
}
