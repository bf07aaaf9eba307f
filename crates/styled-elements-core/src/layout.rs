//! Geometry types and the measurement capability.
//!
//! Widgets never compute layout themselves. Whatever renders the node tree
//! (a browser bridge, a native renderer, a test harness) implements
//! [`LayoutBackend`] and reports the measured box of each node. Geometry
//! algorithms in the widget crate are pure functions over these values.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::dom::NodeId;

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, as returned by a bounding-box query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// Per-side lengths of one box-model layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Padding, border and margin of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxModel {
    pub padding: Edges,
    pub border: Edges,
    pub margin: Edges,
}

impl BoxModel {
    /// Horizontal space consumed by padding, border and margin together.
    pub fn horizontal_extra(&self) -> f64 {
        self.padding.horizontal() + self.border.horizontal() + self.margin.horizontal()
    }

    /// Vertical space consumed by padding, border and margin together.
    pub fn vertical_extra(&self) -> f64 {
        self.padding.vertical() + self.border.vertical() + self.margin.vertical()
    }
}

/// Everything a backend knows about one rendered node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeMetrics {
    /// Outer size including border.
    pub offset: Size,
    /// Inner size excluding border and scrollbars.
    pub client: Size,
    /// Height of the full scrollable content.
    pub scroll_height: f64,
    pub box_model: BoxModel,
    /// Page position of the border box.
    pub position: Point,
}

impl NodeMetrics {
    /// Metrics for a borderless box of the given size at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        let size = Size::new(width, height);
        Self {
            offset: size,
            client: size,
            scroll_height: height,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn with_box_model(mut self, box_model: BoxModel) -> Self {
        self.box_model = box_model;
        self
    }

    pub fn with_scroll_height(mut self, scroll_height: f64) -> Self {
        self.scroll_height = scroll_height;
        self
    }
}

/// The measurement capability a rendering backend provides.
///
/// Returning `None` means the node is not rendered (detached, hidden, or
/// unknown to the backend). Callers then fall back to the node's inline
/// style values.
pub trait LayoutBackend: Send + Sync {
    fn metrics(&self, node: NodeId) -> Option<NodeMetrics>;
}

/// A backend whose metrics are assigned explicitly.
///
/// Useful for headless hosts and for tests that need deterministic geometry.
#[derive(Debug, Default)]
pub struct StaticLayout {
    metrics: RwLock<HashMap<NodeId, NodeMetrics>>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_metrics(&self, node: NodeId, metrics: NodeMetrics) {
        self.metrics.write().insert(node, metrics);
    }

    /// Shorthand for [`NodeMetrics::sized`].
    pub fn set_size(&self, node: NodeId, width: f64, height: f64) {
        self.set_metrics(node, NodeMetrics::sized(width, height));
    }

    /// Update the metrics of a node in place, starting from defaults if it
    /// had none.
    pub fn update(&self, node: NodeId, f: impl FnOnce(&mut NodeMetrics)) {
        let mut metrics = self.metrics.write();
        f(metrics.entry(node).or_default());
    }

    pub fn forget(&self, node: NodeId) {
        self.metrics.write().remove(&node);
    }
}

impl LayoutBackend for StaticLayout {
    fn metrics(&self, node: NodeId) -> Option<NodeMetrics> {
        self.metrics.read().get(&node).copied()
    }
}

static_assertions::assert_impl_all!(StaticLayout: Send, Sync);
