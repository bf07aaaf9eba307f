//! Wiring editor building blocks.
//!
//! The editor sidebar lists the operators and widgets available for the
//! wiring. Each one is shown by a [`Component`] panel that follows the
//! state of the underlying [`WiringComponent`].

mod component;

pub use component::{
    Component, ComponentMeta, ComponentNotice, ComponentStatus, WIRING_COMPONENT_EVENTS, WiringComponent,
    wiring_component_events,
};
