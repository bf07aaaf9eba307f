//! Widget base implementation.
//!
//! This module provides [`ElementBase`], the state every widget embeds: the
//! document it renders into, the root node it owns, the optional native form
//! control it wraps, and the enabled flag.

use styled_elements_core::{Document, NodeGuard, NodeId, Rect, Result};

use crate::logging::targets;

/// Class toggled on the wrapper node of a disabled widget.
pub const DISABLED_CLASS: &str = "disabled";

/// Join a widget's own class with user-supplied extra classes.
///
/// `join_classes("container", "sidebar wide")` yields
/// `"container sidebar wide"`; an empty `extra` yields `base` alone.
pub fn join_classes(base: &str, extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        base.to_string()
    } else {
        format!("{base} {extra}")
    }
}

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate the common
/// operations of [`StyledElement`](super::StyledElement) to it.
///
/// # Example
///
/// ```
/// use styled_elements::widget::{ElementBase, StyledElement};
/// use styled_elements::Document;
///
/// struct Badge {
///     base: ElementBase,
/// }
///
/// impl StyledElement for Badge {
///     fn base(&self) -> &ElementBase { &self.base }
///     fn base_mut(&mut self) -> &mut ElementBase { &mut self.base }
/// }
///
/// let doc = Document::headless();
/// let mut badge = Badge { base: ElementBase::new(&doc, "span", "badge") };
/// badge.insert_into(doc.body(), None).unwrap();
/// badge.disable();
/// assert!(badge.has_class_name("disabled"));
/// ```
pub struct ElementBase {
    document: Document,
    wrapper: NodeGuard,
    input: Option<NodeId>,
    enabled: bool,
}

impl ElementBase {
    /// Create a base owning a fresh `tag` element with the given classes.
    pub fn new(document: &Document, tag: &str, class_names: &str) -> Self {
        Self::from_guard(NodeGuard::element(document, tag, class_names))
    }

    /// Create a base owning an existing node.
    pub fn from_guard(wrapper: NodeGuard) -> Self {
        Self {
            document: wrapper.document().clone(),
            wrapper,
            input: None,
            enabled: true,
        }
    }

    /// Mark `input` as the native form control of this widget.
    pub fn with_input(mut self, input: NodeId) -> Self {
        self.input = Some(input);
        self
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    pub fn wrapper(&self) -> NodeId {
        self.wrapper.id()
    }

    #[inline]
    pub fn input(&self) -> Option<NodeId> {
        self.input
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the enabled flag, toggling the `disabled` class on the wrapper and
    /// the native disabled flag of the input. Returns whether it changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        self.document
            .toggle_class(self.wrapper(), DISABLED_CLASS, !enabled);
        if let Some(input) = self.input {
            self.document.set_disabled(input, !enabled);
        }
        if changed {
            tracing::trace!(target: targets::WIDGET, wrapper = ?self.wrapper(), enabled, "enabled state changed");
        }
        changed
    }

    /// Set the `id` attribute of the wrapper when `id` is non-empty.
    pub fn set_element_id(&self, id: &str) {
        if !id.is_empty() {
            self.document.set_attribute(self.wrapper(), "id", id);
        }
    }

    pub fn insert_into(&self, parent: NodeId, before: Option<NodeId>) -> Result<()> {
        self.document.insert_before(parent, self.wrapper(), before)
    }

    /// Detach the wrapper from its parent, if any.
    pub fn detach(&self) -> Result<()> {
        self.document.detach(self.wrapper())
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.document.parent(self.wrapper())
    }

    pub fn bounding_client_rect(&self) -> Rect {
        self.document.bounding_client_rect(self.wrapper())
    }

    /// Height available to the wrapper inside its parent: the parent's outer
    /// height minus its vertical padding, and minus the wrapper's own
    /// vertical padding, border and margin.
    ///
    /// `None` when the wrapper has no parent.
    pub fn usable_height(&self) -> Option<f64> {
        let parent = self.parent()?;
        let parent_box = self.document.box_model(parent);
        let own_box = self.document.box_model(self.wrapper());
        Some(
            self.document.offset_height(parent)
                - parent_box.padding.vertical()
                - own_box.padding.vertical()
                - own_box.border.vertical()
                - own_box.margin.vertical(),
        )
    }

    /// Width available to the wrapper inside its parent: the parent's outer
    /// width minus both horizontal paddings.
    ///
    /// `None` when the wrapper has no parent.
    pub fn usable_width(&self) -> Option<f64> {
        let parent = self.parent()?;
        let parent_box = self.document.box_model(parent);
        let own_box = self.document.box_model(self.wrapper());
        Some(
            self.document.offset_width(parent)
                - parent_box.padding.horizontal()
                - own_box.padding.horizontal(),
        )
    }
}

impl std::fmt::Debug for ElementBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementBase")
            .field("wrapper", &self.wrapper())
            .field("input", &self.input)
            .field("enabled", &self.enabled)
            .finish()
    }
}

static_assertions::assert_impl_all!(ElementBase: Send, Sync);
