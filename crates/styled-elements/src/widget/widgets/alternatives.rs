//! Stacked alternatives, one shown at a time.
//!
//! [`StyledAlternatives`] owns a set of full-height [`Alternative`]
//! containers and shows exactly one of them, like a notebook without a tab
//! bar.

use styled_elements_core::{Document, Error, EventTable, NodeId, ObjectWithEvents, Result};

use super::container::{Container, ContainerOptions};
use crate::logging::targets;
use crate::widget::base::{ElementBase, join_classes};
use crate::widget::{NativeEvent, StyledElement};

/// Events declared by [`Alternative`].
pub const ALTERNATIVE_EVENTS: &[&str] = &["show", "hide"];

const HIDDEN_CLASS: &str = "hidden";

/// One alternative: a full-height container, hidden unless selected.
///
/// # Events
///
/// Both events carry the alternative id.
///
/// - `show`: fired before the alternative is revealed
/// - `hide`: fired after it is hidden
pub struct Alternative {
    container: Container,
    events: EventTable<NodeId>,
}

impl Alternative {
    fn new(document: &Document, options: ContainerOptions) -> Self {
        let container = Container::new(
            document,
            ContainerOptions {
                use_full_height: true,
                ..options
            },
        );
        container.add_class_name(HIDDEN_CLASS);
        Self {
            container,
            events: EventTable::new(ALTERNATIVE_EVENTS),
        }
    }

    /// The alternative id: the wrapper node of its container.
    pub fn id(&self) -> NodeId {
        self.container.wrapper()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.events.emit("show", &self.id());
            self.container.remove_class_name(HIDDEN_CLASS);
            self.container.repaint(false);
        } else {
            self.container.add_class_name(HIDDEN_CLASS);
            self.events.emit("hide", &self.id());
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.container.has_class_name(HIDDEN_CLASS)
    }
}

impl ObjectWithEvents for Alternative {
    type Args = NodeId;

    fn events(&self) -> &EventTable<NodeId> {
        &self.events
    }
}

impl StyledElement for Alternative {
    fn base(&self) -> &ElementBase {
        self.container.base()
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        self.container.base_mut()
    }

    fn repaint(&mut self, temporal: bool) {
        self.container.repaint(temporal);
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.container.set_disabled(disabled);
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        self.container.handle_event(event)
    }

    fn destroy(&mut self) {
        self.container.destroy();
        self.events.destroy();
    }
}

/// A stack of alternatives of which one is visible.
///
/// The first alternative created becomes visible.
pub struct StyledAlternatives {
    base: ElementBase,
    alternatives: Vec<Alternative>,
    visible: Option<NodeId>,
}

impl StyledAlternatives {
    pub fn new(document: &Document, options: ContainerOptions) -> Self {
        let base = ElementBase::new(document, "div", &join_classes("alternatives", &options.class));
        base.set_element_id(&options.id);
        Self {
            base,
            alternatives: Vec::new(),
            visible: None,
        }
    }

    /// Create an alternative and return its id.
    pub fn create_alternative(&mut self, options: ContainerOptions) -> NodeId {
        let mut alternative = Alternative::new(self.document(), options);
        let id = alternative.id();
        let _ = alternative.insert_into(self.wrapper(), None);
        self.alternatives.push(alternative);
        if self.visible.is_none() {
            self.switch_to(Some(id));
        }
        id
    }

    pub fn alternative(&self, id: NodeId) -> Option<&Alternative> {
        self.alternatives.iter().find(|alt| alt.id() == id)
    }

    pub fn alternative_mut(&mut self, id: NodeId) -> Option<&mut Alternative> {
        self.alternatives.iter_mut().find(|alt| alt.id() == id)
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn visible_alternative(&self) -> Option<NodeId> {
        self.visible
    }

    /// Hide the visible alternative and show `id`.
    pub fn show_alternative(&mut self, id: NodeId) -> Result<()> {
        if self.alternative(id).is_none() {
            return Err(Error::UnknownChild(id));
        }
        self.switch_to(Some(id));
        Ok(())
    }

    /// Remove an alternative. Removing the visible one shows the first
    /// remaining alternative.
    pub fn remove_alternative(&mut self, id: NodeId) -> Result<()> {
        let index = self
            .alternatives
            .iter()
            .position(|alt| alt.id() == id)
            .ok_or(Error::UnknownChild(id))?;
        let mut alternative = self.alternatives.remove(index);
        alternative.destroy();
        if self.visible == Some(id) {
            self.visible = None;
            let next = self.alternatives.first().map(Alternative::id);
            self.switch_to(next);
        }
        Ok(())
    }

    fn switch_to(&mut self, target: Option<NodeId>) {
        if self.visible == target {
            return;
        }
        if let Some(alt) = self.visible.and_then(|id| self.alternative_mut(id)) {
            alt.set_visible(false);
        }
        self.visible = target;
        if let Some(alt) = target.and_then(|id| self.alternative_mut(id)) {
            alt.set_visible(true);
        }
        tracing::trace!(target: targets::WIDGET, current = ?target, "alternative shown");
    }
}

impl StyledElement for StyledAlternatives {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn repaint(&mut self, temporal: bool) {
        if let Some(alt) = self.visible.and_then(|id| self.alternative_mut(id)) {
            alt.repaint(temporal);
        }
    }

    fn handle_event(&mut self, event: &NativeEvent) -> bool {
        match self.visible.and_then(|id| self.alternative_mut(id)) {
            Some(alt) => alt.handle_event(event),
            None => false,
        }
    }

    fn destroy(&mut self) {
        for alt in &mut self.alternatives {
            alt.destroy();
        }
        let _ = self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_first_alternative_visible() {
        let doc = Document::headless();
        let mut alternatives = StyledAlternatives::new(&doc, ContainerOptions::default());
        let a = alternatives.create_alternative(ContainerOptions::default());
        let b = alternatives.create_alternative(ContainerOptions::default().with_class("second"));

        assert_eq!(alternatives.visible_alternative(), Some(a));
        assert!(alternatives.alternative(a).unwrap().is_visible());
        assert!(!alternatives.alternative(b).unwrap().is_visible());
        assert!(alternatives.alternative(b).unwrap().container().uses_full_height());
    }

    #[test]
    fn test_show_fires_before_reveal() {
        let doc = Document::headless();
        let mut alternatives = StyledAlternatives::new(&doc, ContainerOptions::default());
        let _a = alternatives.create_alternative(ContainerOptions::default());
        let b = alternatives.create_alternative(ContainerOptions::default());

        let seen = Arc::new(Mutex::new(None));
        let s = seen.clone();
        let d = doc.clone();
        alternatives
            .alternative(b)
            .unwrap()
            .add_event_listener("show", move |&id| {
                *s.lock() = Some(d.has_class(id, HIDDEN_CLASS));
            })
            .unwrap();

        alternatives.show_alternative(b).unwrap();
        assert_eq!(*seen.lock(), Some(true));
        assert!(alternatives.alternative(b).unwrap().is_visible());
    }

    #[test]
    fn test_remove_visible_alternative() {
        let doc = Document::headless();
        let mut alternatives = StyledAlternatives::new(&doc, ContainerOptions::default());
        let a = alternatives.create_alternative(ContainerOptions::default());
        let b = alternatives.create_alternative(ContainerOptions::default());

        alternatives.remove_alternative(a).unwrap();
        assert_eq!(alternatives.visible_alternative(), Some(b));
        assert_eq!(alternatives.show_alternative(a), Err(Error::UnknownChild(a)));
    }
}
