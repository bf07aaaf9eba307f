//! Prelude module for StyledElements.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use styled_elements::prelude::*;
//! ```

// ============================================================================
// Document and Events
// ============================================================================

pub use crate::{Document, EventTable, ListenerId, NodeId, ObjectWithEvents, Rect, Result, Size};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{ElementBase, NativeEvent, NativeEventKind, StyledElement, StyledInputElement};

// ============================================================================
// Common Widgets
// ============================================================================

pub use crate::widget::widgets::{
    ButtonOptions, ButtonsGroup, Container, ContainerOptions, Panel, PanelOptions, StyledButton,
};

// Inputs
pub use crate::widget::widgets::{
    StyledCheckBox, StyledDateField, StyledHiddenField, StyledList, StyledNumericField, StyledRadioButton,
    StyledTextArea,
};

// Menus and overlays
pub use crate::widget::widgets::{MenuItem, PopupButton, PopupMenu, StyledAlert, Tooltip};
