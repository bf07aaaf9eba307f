//! Error types for StyledElements.

use crate::dom::NodeId;

/// A specialized Result type for StyledElements operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for StyledElements operations.
///
/// Only programming errors are reported through this type: referencing an
/// event that was never declared, using an object after it was destroyed, or
/// asking the node tree for an impossible structure. Listener failures during
/// dispatch never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The event name was not declared when the object was constructed.
    #[error("Unhandled event \"{name}\"")]
    UnknownEvent { name: String },

    /// The object has been destroyed and its event table released.
    #[error("Object has already been destroyed")]
    Destroyed,

    /// The node id is invalid or its node has been released.
    #[error("Node {0:?} does not exist")]
    NodeNotFound(NodeId),

    /// The reference node is not a child of the given parent.
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Inserting the node would make it its own ancestor.
    #[error("Inserting {node:?} under {parent:?} would create a cycle")]
    HierarchyCycle { parent: NodeId, node: NodeId },

    /// The widget is not one of the tracked children of its container.
    #[error("Node {0:?} is not a tracked child widget")]
    UnknownChild(NodeId),
}

impl Error {
    /// Create an unknown-event error.
    pub fn unknown_event(name: impl Into<String>) -> Self {
        Self::UnknownEvent { name: name.into() }
    }
}
