//! Core systems for StyledElements.
//!
//! This crate provides the foundational pieces the widget toolkit is built on:
//!
//! - **Event bus**: ordered listener lists that survive a failing listener
//! - **Evented objects**: closed sets of named events per widget type
//! - **Document**: the retained node tree widgets render into
//! - **Layout**: geometry types and the measurement capability a renderer provides
//! - **Command queue**: sequential, deadline-driven command processing
//!
//! # Event Example
//!
//! ```
//! use styled_elements_core::{EventTable, ObjectWithEvents};
//!
//! struct Counter {
//!     events: EventTable<i32>,
//! }
//!
//! impl ObjectWithEvents for Counter {
//!     type Args = i32;
//!
//!     fn events(&self) -> &EventTable<i32> {
//!         &self.events
//!     }
//! }
//!
//! let counter = Counter { events: EventTable::new(&["change"]) };
//! counter.add_event_listener("change", |value| println!("now {value}")).unwrap();
//! assert!(counter.add_event_listener("changed", |_| {}).is_err());
//!
//! counter.events().dispatch("change", &42).unwrap();
//! ```
//!
//! # Document Example
//!
//! ```
//! use styled_elements_core::{Document, NodeGuard};
//!
//! let doc = Document::headless();
//! let wrapper = NodeGuard::element(&doc, "div", "styled_container");
//! doc.append_child(doc.body(), wrapper.id()).unwrap();
//! assert!(doc.is_attached(wrapper.id()));
//!
//! drop(wrapper);
//! assert!(doc.children(doc.body()).is_empty());
//! ```

mod command_queue;
pub mod dom;
mod error;
pub mod event;
pub mod layout;
pub mod logging;
pub mod object;

pub use command_queue::CommandQueue;
pub use dom::{Document, DomTree, NodeGuard, NodeId};
pub use error::{Error, Result};
pub use event::{Event, Listener, ListenerId};
pub use layout::{BoxModel, Edges, LayoutBackend, NodeMetrics, Point, Rect, Size, StaticLayout};
pub use logging::{DocumentTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use object::{EventTable, ObjectWithEvents};
