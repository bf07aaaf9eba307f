//! Native input events delivered to widgets.
//!
//! The rendering backend translates user input into [`NativeEvent`]s and
//! hands them to the top-level widget's
//! [`handle_event`](super::StyledElement::handle_event). Each widget checks
//! whether the event targets one of its own nodes, reacts, and forwards the
//! event to its children otherwise.

use styled_elements_core::{Document, NodeId, Point};

/// The kind of a native event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeEventKind {
    /// Primary button click.
    Click,
    /// Secondary button click requesting a context menu.
    ContextMenu,
    /// A pointer button went down, in screen coordinates.
    MouseDown { screen_x: f64, screen_y: f64 },
    /// The pointer moved, in screen coordinates.
    MouseMove { screen_x: f64, screen_y: f64 },
    /// A pointer button went up.
    MouseUp { screen_x: f64, screen_y: f64 },
    /// The pointer entered the target.
    MouseOver,
    /// The pointer left the target.
    MouseOut,
    /// A form control committed a new value.
    Change,
    /// The window was resized.
    Resize,
}

/// A native event and the node it was delivered to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeEvent {
    pub target: NodeId,
    pub kind: NativeEventKind,
}

impl NativeEvent {
    pub fn new(target: NodeId, kind: NativeEventKind) -> Self {
        Self { target, kind }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(target, NativeEventKind::Click)
    }

    pub fn context_menu(target: NodeId) -> Self {
        Self::new(target, NativeEventKind::ContextMenu)
    }

    pub fn mouse_down(target: NodeId, screen_x: f64, screen_y: f64) -> Self {
        Self::new(target, NativeEventKind::MouseDown { screen_x, screen_y })
    }

    pub fn mouse_move(target: NodeId, screen_x: f64, screen_y: f64) -> Self {
        Self::new(target, NativeEventKind::MouseMove { screen_x, screen_y })
    }

    pub fn mouse_up(target: NodeId, screen_x: f64, screen_y: f64) -> Self {
        Self::new(target, NativeEventKind::MouseUp { screen_x, screen_y })
    }

    pub fn mouse_over(target: NodeId) -> Self {
        Self::new(target, NativeEventKind::MouseOver)
    }

    pub fn mouse_out(target: NodeId) -> Self {
        Self::new(target, NativeEventKind::MouseOut)
    }

    pub fn change(target: NodeId) -> Self {
        Self::new(target, NativeEventKind::Change)
    }

    /// A window resize. Resize events are broadcast, so the target is
    /// usually the document body.
    pub fn resize(target: NodeId) -> Self {
        Self::new(target, NativeEventKind::Resize)
    }

    /// Whether the event was delivered to `node` or one of its descendants.
    pub fn is_within(&self, document: &Document, node: NodeId) -> bool {
        document.contains(node, self.target)
    }

    /// Screen position for pointer button and motion events.
    pub fn screen_position(&self) -> Option<Point> {
        match self.kind {
            NativeEventKind::MouseDown { screen_x, screen_y }
            | NativeEventKind::MouseMove { screen_x, screen_y }
            | NativeEventKind::MouseUp { screen_x, screen_y } => Some(Point::new(screen_x, screen_y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_within() {
        let doc = Document::headless();
        let row = doc.create_element("div");
        let text = doc.create_text("label");
        doc.append_child(row, text).unwrap();

        assert!(NativeEvent::click(text).is_within(&doc, row));
        assert!(NativeEvent::click(row).is_within(&doc, row));
        assert!(!NativeEvent::click(row).is_within(&doc, text));
    }

    #[test]
    fn test_screen_position() {
        let doc = Document::headless();
        let node = doc.create_element("div");
        assert_eq!(
            NativeEvent::mouse_move(node, 3.0, 4.0).screen_position(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(NativeEvent::click(node).screen_position(), None);
    }
}
