//! Widget system for StyledElements.
//!
//! This module provides the foundational widget architecture:
//!
//! - [`StyledElement`] trait: the base trait for every widget
//! - [`StyledInputElement`] trait: widgets holding a user-editable value
//! - [`AsAny`] trait: downcasting a `dyn StyledElement` to its widget type
//! - [`ElementBase`]: wrapper node, enablement and insertion shared by widgets
//! - [`NativeEvent`]: input events routed into widgets
//!
//! # Overview
//!
//! Each widget owns a wrapper node in a [`Document`](crate::Document) and
//! typically contains an [`ElementBase`] that handles the common state.
//! Widgets are inserted into any node of the document, repainted when the
//! space they are given changes, and receive [`NativeEvent`]s through
//! [`StyledElement::handle_event`].
//!
//! # Creating a Widget
//!
//! ```
//! use styled_elements::widget::{ElementBase, NativeEvent, NativeEventKind, StyledElement};
//! use styled_elements::Document;
//!
//! struct Badge {
//!     base: ElementBase,
//!     clicks: usize,
//! }
//!
//! impl Badge {
//!     fn new(doc: &Document) -> Self {
//!         Self { base: ElementBase::new(doc, "span", "badge"), clicks: 0 }
//!     }
//! }
//!
//! impl StyledElement for Badge {
//!     fn base(&self) -> &ElementBase { &self.base }
//!     fn base_mut(&mut self) -> &mut ElementBase { &mut self.base }
//!
//!     fn handle_event(&mut self, event: &NativeEvent) -> bool {
//!         if event.kind == NativeEventKind::Click && event.is_within(self.document(), self.wrapper()) {
//!             self.clicks += 1;
//!             return true;
//!         }
//!         false
//!     }
//! }
//!
//! let doc = Document::headless();
//! let mut badge = Badge::new(&doc);
//! badge.insert_into(doc.body(), None).unwrap();
//! assert!(badge.handle_event(&NativeEvent::click(badge.wrapper())));
//! assert_eq!(badge.clicks, 1);
//! ```

pub(crate) mod base;
mod events;
mod traits;
pub mod widgets;

pub use base::{DISABLED_CLASS, ElementBase, join_classes};
pub use events::{NativeEvent, NativeEventKind};
pub use traits::{AsAny, StyledElement, StyledInputElement};
