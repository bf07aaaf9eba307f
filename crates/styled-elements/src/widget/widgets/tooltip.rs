//! Hover tooltips.
//!
//! A [`Tooltip`] is bound to any number of nodes and shows its content next
//! to whichever of them the pointer enters. The side is the first of the
//! configured placements that keeps the tooltip inside the document body.

use serde::Deserialize;
use styled_elements_core::{Document, NodeGuard, NodeId, Point, Rect, Size};

use crate::logging::targets;
use crate::widget::{NativeEvent, NativeEventKind};

/// Side of the reference a tooltip opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipPlacement {
    Top,
    Right,
    Bottom,
    Left,
}

impl TooltipPlacement {
    pub fn class_name(self) -> &'static str {
        match self {
            TooltipPlacement::Top => "top",
            TooltipPlacement::Right => "right",
            TooltipPlacement::Bottom => "bottom",
            TooltipPlacement::Left => "left",
        }
    }

    /// Top-left corner of a tooltip of `size` centred on this side of
    /// `reference`.
    pub fn position(self, reference: Rect, size: Size) -> Point {
        let center_x = reference.left() + reference.width / 2.0;
        let center_y = reference.top() + reference.height / 2.0;
        match self {
            TooltipPlacement::Top => Point::new(center_x - size.width / 2.0, reference.top() - size.height),
            TooltipPlacement::Bottom => Point::new(center_x - size.width / 2.0, reference.bottom()),
            TooltipPlacement::Left => Point::new(reference.left() - size.width, center_y - size.height / 2.0),
            TooltipPlacement::Right => Point::new(reference.right(), center_y - size.height / 2.0),
        }
    }

    /// The first placement whose box stays inside `bounds`, or the first
    /// placement when none fits.
    pub fn choose(placements: &[TooltipPlacement], reference: Rect, size: Size, bounds: Rect) -> (TooltipPlacement, Point) {
        let fits = |corner: Point| {
            corner.x >= bounds.left()
                && corner.y >= bounds.top()
                && corner.x + size.width <= bounds.right()
                && corner.y + size.height <= bounds.bottom()
        };
        placements
            .iter()
            .map(|&placement| (placement, placement.position(reference, size)))
            .find(|&(_, corner)| fits(corner))
            .unwrap_or_else(|| {
                let first = placements.first().copied().unwrap_or(TooltipPlacement::Right);
                (first, first.position(reference, size))
            })
    }
}

/// Options for [`Tooltip`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    pub content: String,
    /// Placements tried in order.
    pub placement: Vec<TooltipPlacement>,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            content: String::new(),
            placement: vec![
                TooltipPlacement::Right,
                TooltipPlacement::Bottom,
                TooltipPlacement::Left,
                TooltipPlacement::Top,
            ],
        }
    }
}

impl TooltipOptions {
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_placement(mut self, placement: Vec<TooltipPlacement>) -> Self {
        self.placement = placement;
        self
    }
}

/// A tooltip shown while the pointer is over one of its bound nodes.
pub struct Tooltip {
    document: Document,
    element: NodeGuard,
    inner: NodeId,
    options: TooltipOptions,
    bound: Vec<NodeId>,
    placement: Option<TooltipPlacement>,
}

impl Tooltip {
    pub fn new(document: &Document, options: TooltipOptions) -> Self {
        let element = NodeGuard::element(document, "div", "tooltip fade");
        let arrow = document.create_element_with_class("div", "tooltip-arrow");
        let inner = document.create_element_with_class("div", "tooltip-inner");
        document.set_text_content(inner, &options.content);
        let _ = document.append_child(element.id(), arrow);
        let _ = document.append_child(element.id(), inner);
        Self {
            document: document.clone(),
            element,
            inner,
            options,
            bound: Vec::new(),
            placement: None,
        }
    }

    pub fn element(&self) -> NodeId {
        self.element.id()
    }

    pub fn content(&self) -> &str {
        &self.options.content
    }

    pub fn set_content(&mut self, content: &str) {
        self.options.content = content.to_string();
        self.document.set_text_content(self.inner, content);
    }

    /// Show the tooltip while the pointer is over `node`.
    pub fn bind(&mut self, node: NodeId) {
        if !self.bound.contains(&node) {
            self.bound.push(node);
        }
    }

    pub fn unbind(&mut self, node: NodeId) -> bool {
        let before = self.bound.len();
        self.bound.retain(|&bound| bound != node);
        before != self.bound.len()
    }

    pub fn is_bound(&self, node: NodeId) -> bool {
        self.bound.contains(&node)
    }

    pub fn is_visible(&self) -> bool {
        self.document.parent(self.element()).is_some()
    }

    /// The side chosen by the last [`show`](Self::show).
    pub fn placement(&self) -> Option<TooltipPlacement> {
        self.placement
    }

    /// Open next to `reference`.
    pub fn show(&mut self, reference: Rect) {
        let doc = &self.document;
        let element = self.element.id();
        if let Some(previous) = self.placement.take() {
            doc.remove_class(element, previous.class_name());
        }
        let _ = doc.append_child(doc.body(), element);

        let body = doc.body();
        let bounds = Rect::new(0.0, 0.0, doc.client_width(body), doc.client_height(body));
        let size = Size::new(doc.offset_width(element), doc.offset_height(element));
        let (placement, corner) = TooltipPlacement::choose(&self.options.placement, reference, size, bounds);

        doc.add_class(element, &format!("{} in", placement.class_name()));
        doc.set_style_px(element, "top", corner.y);
        doc.set_style_px(element, "left", corner.x);
        self.placement = Some(placement);
        tracing::trace!(target: targets::WIDGET, ?placement, ?corner, "tooltip shown");
    }

    /// Open next to a node.
    pub fn show_for(&mut self, node: NodeId) {
        let reference = self.document.bounding_client_rect(node);
        self.show(reference);
    }

    pub fn hide(&mut self) {
        self.document.remove_class(self.element(), "in");
        let _ = self.document.detach(self.element());
    }

    /// Follow the pointer over bound nodes. Tooltips never consume events;
    /// keep routing the event afterwards.
    pub fn handle_event(&mut self, event: &NativeEvent) {
        let hit = self
            .bound
            .iter()
            .copied()
            .find(|&node| event.is_within(&self.document, node));
        match (event.kind, hit) {
            (NativeEventKind::MouseOver, Some(node)) => self.show_for(node),
            (NativeEventKind::MouseOut, Some(_)) => self.hide(),
            _ => {}
        }
    }
}

impl std::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tooltip")
            .field("content", &self.options.content)
            .field("bound", &self.bound.len())
            .field("placement", &self.placement)
            .finish()
    }
}
