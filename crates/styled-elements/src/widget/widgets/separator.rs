//! Separator widget implementation.
//!
//! This module provides [`Separator`], a horizontal rule dividing groups of
//! menu items.

use styled_elements_core::Document;

use crate::widget::StyledElement;
use crate::widget::base::ElementBase;

/// A horizontal rule.
pub struct Separator {
    base: ElementBase,
}

impl Separator {
    pub fn new(document: &Document) -> Self {
        Self {
            base: ElementBase::new(document, "hr", ""),
        }
    }
}

impl StyledElement for Separator {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}

impl std::fmt::Debug for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Separator").field("node", &self.base.wrapper()).finish()
    }
}
