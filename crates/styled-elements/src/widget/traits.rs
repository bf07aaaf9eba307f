//! Core widget trait definitions.
//!
//! # Key Types
//!
//! - [`StyledElement`] - Base trait for all widgets
//! - [`StyledInputElement`] - Widgets wrapping a native form control
//! - [`AsAny`] - Recovers the concrete widget behind a `dyn StyledElement`
//!
//! # Related Types
//!
//! - [`super::ElementBase`] - Common state embedded by every widget
//! - [`super::NativeEvent`] - Input delivered through [`StyledElement::handle_event`]

use std::any::Any;

use styled_elements_core::{Document, NodeId, Rect, Result};

use super::base::ElementBase;
use super::events::NativeEvent;

/// Access to a widget as [`Any`], so owners of `dyn StyledElement` can
/// downcast to the concrete widget.
///
/// Implemented for every `'static` type. Call it on the trait object
/// (`&dyn StyledElement`), not on a `Box` holding one: the box is itself
/// `Any` and would downcast as the box.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The base trait for all widgets.
///
/// A widget owns one root node (the wrapper) and everything below it. Only
/// [`base`](Self::base) and [`base_mut`](Self::base_mut) are required; the
/// other methods have defaults that operate on the wrapper.
///
/// Widgets that need extra work when their enabled state changes override
/// [`set_disabled`](Self::set_disabled); [`enable`](Self::enable) and
/// [`disable`](Self::disable) always route through it.
pub trait StyledElement: AsAny + Send {
    fn base(&self) -> &ElementBase;

    fn base_mut(&mut self) -> &mut ElementBase;

    /// The root node of this widget.
    fn wrapper(&self) -> NodeId {
        self.base().wrapper()
    }

    fn document(&self) -> &Document {
        self.base().document()
    }

    /// Attach the wrapper as the last child of `parent`, or before `before`.
    fn insert_into(&mut self, parent: NodeId, before: Option<NodeId>) -> Result<()> {
        self.base().insert_into(parent, before)
    }

    /// Attach the wrapper inside another widget's wrapper.
    fn insert_into_element(
        &mut self,
        parent: &dyn StyledElement,
        before: Option<&dyn StyledElement>,
    ) -> Result<()> {
        self.insert_into(parent.wrapper(), before.map(|b| b.wrapper()))
    }

    /// Detach the wrapper from its parent. The widget stays usable.
    fn detach(&mut self) -> Result<()> {
        self.base().detach()
    }

    /// Recompute layout-dependent state.
    ///
    /// `temporal` requests a cheap approximate pass during continuous
    /// interaction such as dragging; the final pass uses `false`.
    fn repaint(&mut self, _temporal: bool) {}

    fn has_class_name(&self, class_name: &str) -> bool {
        self.document().has_class(self.wrapper(), class_name)
    }

    fn add_class_name(&self, class_names: &str) {
        self.document().add_class(self.wrapper(), class_names);
    }

    fn remove_class_name(&self, class_names: &str) {
        self.document().remove_class(self.wrapper(), class_names);
    }

    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.base_mut().set_enabled(!disabled);
    }

    fn enable(&mut self) {
        self.set_disabled(false);
    }

    fn disable(&mut self) {
        self.set_disabled(true);
    }

    fn bounding_client_rect(&self) -> Rect {
        self.base().bounding_client_rect()
    }

    /// Handle a native event. Returns `true` when the event was consumed.
    fn handle_event(&mut self, _event: &NativeEvent) -> bool {
        false
    }

    /// Detach the widget and release its events. The widget must not be used
    /// afterwards; its nodes are released when it is dropped.
    fn destroy(&mut self) {
        let _ = self.detach();
    }
}

/// A widget wrapping a native form control.
pub trait StyledInputElement: StyledElement {
    type Value;

    fn value(&self) -> Self::Value;

    fn set_value(&mut self, value: Self::Value);

    /// The value [`reset`](Self::reset) restores.
    fn default_value(&self) -> Self::Value;

    fn reset(&mut self) {
        let value = self.default_value();
        self.set_value(value);
    }

    /// Give keyboard focus to the native control.
    fn focus(&self) {
        if let Some(input) = self.base().input() {
            self.document().focus(input);
        }
    }
}

impl<T: StyledElement + ?Sized + 'static> StyledElement for Box<T> {
    fn base(&self) -> &ElementBase {
        (**self).base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        (**self).base_mut()
    }

    fn insert_into(&mut self, parent: NodeId, before: Option<NodeId>) -> Result<()> {
        (**self).insert_into(parent, before)
    }

    fn detach(&mut self) -> Result<()> {
        (**self).detach()
    }

    fn repaint(&mut self, temporal: bool) {
        (**self).repaint(temporal)
    }

    fn set_disabled(&mut self, disabled: bool) {
        (**self).set_disabled(disabled)
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        (**self).handle_event(event)
    }

    fn destroy(&mut self) {
        (**self).destroy()
    }
}
