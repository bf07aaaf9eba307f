//! Horizontally split pane implementation.
//!
//! This module provides [`StyledHPaned`], two side-by-side containers
//! separated by a draggable handle, and [`PanedGeometry`], the pure function
//! that turns a handle percentage into panel widths.
//!
//! # Example
//!
//! ```
//! use styled_elements::widget::widgets::{HPanedOptions, StyledHPaned};
//! use styled_elements::widget::{NativeEvent, StyledElement};
//! use styled_elements::{Document, NodeMetrics, StaticLayout};
//! use std::sync::Arc;
//!
//! let layout = Arc::new(StaticLayout::new());
//! let doc = Document::new(layout.clone());
//! layout.set_metrics(doc.body(), NodeMetrics::sized(405.0, 300.0));
//!
//! let mut paned = StyledHPaned::new(&doc, HPanedOptions::default());
//! layout.set_size(paned.handler(), 5.0, 300.0);
//! paned.insert_into(doc.body(), None).unwrap();
//! assert_eq!(doc.style_px(paned.left_panel().wrapper(), "width"), Some(200.0));
//!
//! // Drag the handle 40px to the right
//! paned.handle_event(&NativeEvent::mouse_down(paned.handler(), 100.0, 0.0));
//! paned.handle_event(&NativeEvent::mouse_move(doc.body(), 140.0, 0.0));
//! paned.handle_event(&NativeEvent::mouse_up(doc.body(), 140.0, 0.0));
//! assert_eq!(doc.style_px(paned.left_panel().wrapper(), "width"), Some(240.0));
//! ```

use serde::Deserialize;
use styled_elements_core::{Document, NodeGuard, NodeId, Result};

use super::container::{Container, ContainerOptions};
use crate::logging::targets;
use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, NativeEventKind, StyledElement};

/// Options for [`StyledHPaned`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HPanedOptions {
    pub class: String,
    /// Add the `full` class.
    pub full: bool,
    /// Initial handle position, in percent of the panel width.
    pub handler_position: f64,
    /// Minimum width of the left panel, in pixels.
    pub left_min_width: f64,
    /// Minimum width of the right panel, in pixels.
    pub right_min_width: f64,
    pub left_container_options: ContainerOptions,
    pub right_container_options: ContainerOptions,
    pub id: String,
}

impl Default for HPanedOptions {
    fn default() -> Self {
        Self {
            class: String::new(),
            full: true,
            handler_position: 50.0,
            left_min_width: 0.0,
            right_min_width: 0.0,
            left_container_options: ContainerOptions::default(),
            right_container_options: ContainerOptions::default(),
            id: String::new(),
        }
    }
}

impl HPanedOptions {
    pub fn with_handler_position(mut self, position: f64) -> Self {
        self.handler_position = position;
        self
    }

    pub fn with_min_widths(mut self, left: f64, right: f64) -> Self {
        self.left_min_width = left;
        self.right_min_width = right;
        self
    }

    pub fn with_full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Pixel layout of a split pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanedGeometry {
    pub left_width: f64,
    pub right_width: f64,
    /// Left offset of the handle.
    pub handler_left: f64,
    /// Explicit wrapper width, set when the available width cannot hold both
    /// minimum widths and the handle.
    pub wrapper_width: Option<f64>,
}

impl PanedGeometry {
    /// Lay out two panels in `usable_width` pixels.
    ///
    /// The handle sits at `position` percent of the width left for the
    /// panels. The left minimum is satisfied first by moving the handle
    /// right, then the right minimum by moving it back left. When the panels
    /// cannot fit their minimums, the pane grows to exactly both minimums
    /// plus the handle.
    pub fn compute(
        usable_width: f64,
        handler_width: f64,
        position: f64,
        left_min_width: f64,
        right_min_width: f64,
    ) -> Self {
        let min_panels = left_min_width + right_min_width;
        let mut panels = usable_width - handler_width;
        let mut wrapper_width = None;
        if panels < min_panels {
            panels = min_panels;
            wrapper_width = Some(min_panels + handler_width);
        }

        let mut middle = (panels * (position / 100.0)).floor();
        let mut left_width = middle;
        if left_width < left_min_width {
            middle += left_min_width - left_width;
            left_width = left_min_width;
        }

        let mut right_width = panels - middle;
        if right_width < right_min_width {
            middle -= right_min_width - right_width;
            right_width = right_min_width;
            left_width = middle;
        }

        Self {
            left_width,
            right_width,
            handler_left: middle,
            wrapper_width,
        }
    }
}

/// Translate the distance dragged since the drag started into a handle
/// percentage, clamped to `[0, 100]`. `position` is the percentage at the
/// start of the drag, so the clamp never feeds back into later moves.
fn dragged_position(position: f64, width: f64, delta: f64) -> f64 {
    let pixels = width * (position / 100.0) - delta;
    (pixels / width * 100.0).clamp(0.0, 100.0)
}

// ============================================================================
// Widget
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { x_start: f64, start_position: f64, width: f64 },
}

/// Two containers side by side with a draggable handle between them.
///
/// Both panels are full-height containers. Dragging repaints with
/// `temporal = true` on every move and once more with `temporal = false` when
/// the pointer is released. Insertion and window resizes repaint too.
pub struct StyledHPaned {
    base: ElementBase,
    left: Container,
    handler: NodeGuard,
    right: Container,
    handler_position: f64,
    left_min_width: f64,
    right_min_width: f64,
    drag: DragState,
}

impl StyledHPaned {
    pub fn new(document: &Document, options: HPanedOptions) -> Self {
        let mut class = join_classes("hpaned", &options.class);
        if options.full {
            class.push_str(" full");
        }
        let base = ElementBase::new(document, "div", &class);
        base.set_element_id(&options.id);

        let panel = |options: ContainerOptions, side: &str| {
            let class = join_classes(side, &options.class);
            Container::new(
                document,
                ContainerOptions {
                    class,
                    use_full_height: true,
                    ..options
                },
            )
        };
        let mut left = panel(options.left_container_options, "leftpanel");
        let handler = NodeGuard::element(document, "div", "handler");
        let mut right = panel(options.right_container_options, "rightpanel");

        let wrapper = base.wrapper();
        let _ = left.insert_into(wrapper, None);
        let _ = document.append_child(wrapper, handler.id());
        let _ = right.insert_into(wrapper, None);

        Self {
            base,
            left,
            handler,
            right,
            handler_position: options.handler_position.clamp(0.0, 100.0),
            left_min_width: options.left_min_width,
            right_min_width: options.right_min_width,
            drag: DragState::Idle,
        }
    }

    pub fn left_panel(&self) -> &Container {
        &self.left
    }

    pub fn left_panel_mut(&mut self) -> &mut Container {
        &mut self.left
    }

    pub fn right_panel(&self) -> &Container {
        &self.right
    }

    pub fn right_panel_mut(&mut self) -> &mut Container {
        &mut self.right
    }

    /// The handle node.
    pub fn handler(&self) -> NodeId {
        self.handler.id()
    }

    /// Handle position in percent.
    pub fn handler_position(&self) -> f64 {
        self.handler_position
    }

    pub fn set_handler_position(&mut self, position: f64) {
        self.handler_position = position.clamp(0.0, 100.0);
        self.repaint(false);
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    fn start_drag(&mut self, screen_x: f64) {
        let Some(parent) = self.base.parent() else {
            return;
        };
        let document = self.document();
        let width = document.offset_width(parent) - document.offset_width(self.handler());
        tracing::debug!(target: targets::WIDGET, screen_x, width, "hpaned drag started");
        self.drag = DragState::Dragging {
            x_start: screen_x,
            start_position: self.handler_position,
            width,
        };
    }

    fn drag_to(&mut self, screen_x: f64) {
        let DragState::Dragging { x_start, start_position, width } = self.drag else {
            return;
        };
        if width <= 0.0 {
            return;
        }
        self.handler_position = dragged_position(start_position, width, x_start - screen_x);
        self.repaint(true);
    }

    fn end_drag(&mut self) {
        if self.is_dragging() {
            self.drag = DragState::Idle;
            tracing::debug!(target: targets::WIDGET, position = self.handler_position, "hpaned drag ended");
            self.repaint(false);
        }
    }
}

impl StyledElement for StyledHPaned {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn insert_into(&mut self, parent: NodeId, before: Option<NodeId>) -> Result<()> {
        self.base.insert_into(parent, before)?;
        self.repaint(false);
        Ok(())
    }

    fn repaint(&mut self, temporal: bool) {
        let Some(height) = self.base.usable_height() else {
            return;
        };
        let Some(usable_width) = self.base.usable_width() else {
            return;
        };
        let document = self.document().clone();
        let wrapper = self.wrapper();

        document.set_style_px(wrapper, "height", height);
        document.remove_style(wrapper, "width");

        let geometry = PanedGeometry::compute(
            usable_width,
            document.offset_width(self.handler()),
            self.handler_position,
            self.left_min_width,
            self.right_min_width,
        );
        tracing::trace!(target: targets::LAYOUT, ?geometry, temporal, "hpaned layout");

        if let Some(width) = geometry.wrapper_width {
            document.set_style_px(wrapper, "width", width);
        }
        document.set_style_px(self.left.wrapper(), "width", geometry.left_width);
        document.set_style_px(self.right.wrapper(), "width", geometry.right_width);
        document.set_style_px(self.handler(), "left", geometry.handler_left);

        self.left.repaint(temporal);
        self.right.repaint(temporal);
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        match event.kind {
            NativeEventKind::MouseDown { screen_x, .. }
                if !self.is_dragging() && event.is_within(self.document(), self.handler()) =>
            {
                self.start_drag(screen_x);
                true
            }
            NativeEventKind::MouseMove { screen_x, .. } if self.is_dragging() => {
                self.drag_to(screen_x);
                true
            }
            NativeEventKind::MouseUp { .. } if self.is_dragging() => {
                self.end_drag();
                true
            }
            // While dragging, context menus are suppressed.
            NativeEventKind::ContextMenu if self.is_dragging() => true,
            NativeEventKind::Resize => {
                self.repaint(false);
                self.left.handle_event(event);
                self.right.handle_event(event);
                false
            }
            _ => self.left.handle_event(event) || self.right.handle_event(event),
        }
    }

    fn destroy(&mut self) {
        self.left.destroy();
        self.right.destroy();
        let _ = self.detach();
    }
}
