//! StyledElements - a widget toolkit rendering into a retained document tree.
//!
//! This is the main crate that re-exports the core APIs and adds the widgets.
//!
//! # Example
//!
//! ```
//! use styled_elements::prelude::*;
//!
//! let doc = Document::headless();
//! let mut container = Container::new(&doc, ContainerOptions::default().with_class("toolbar"));
//! container.insert_into(doc.body(), None).unwrap();
//!
//! let save = container.append_child(StyledButton::new(&doc, ButtonOptions::text("Save"))).unwrap();
//! assert_eq!(doc.text_content(save), "Save");
//! ```

pub use styled_elements_core::*;

pub mod prelude;
pub mod widget;
pub mod wiring_editor;
