//! Logging and debugging facilities for StyledElements.
//!
//! This module provides:
//! - Target names for filtering `tracing` output by subsystem
//! - Debug visualization for document node trees
//! - A scoped span helper for timing repaint passes
//!
//! # Tracing Integration
//!
//! StyledElements uses the `tracing` crate for instrumentation. Install a
//! subscriber in the host application to see the logs:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("styled_elements=debug,styled_elements_core::event=warn")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use styled_elements_core::{Document, logging::DocumentTreeDebug};
//!
//! let doc = Document::headless();
//! let panel = doc.create_element_with_class("div", "panel");
//! doc.append_child(doc.body(), panel).unwrap();
//!
//! let output = DocumentTreeDebug::new(&doc).format_all();
//! assert!(output.contains("div.panel"));
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::dom::{Document, DomTree, NodeId, TEXT_TAG};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "styled_elements_core";
    /// Event dispatch, including swallowed listener failures.
    pub const EVENT: &str = "styled_elements_core::event";
    /// Evented object tables.
    pub const OBJECT: &str = "styled_elements_core::object";
    /// Node tree mutations.
    pub const DOM: &str = "styled_elements_core::dom";
    /// Deferred command queue.
    pub const COMMAND_QUEUE: &str = "styled_elements_core::command_queue";
    /// Widget lifecycle (insert, enable, destroy).
    pub const WIDGET: &str = "styled_elements::widget";
    /// Popup menu show/hide and item activation.
    pub const MENU: &str = "styled_elements::menu";
    /// Geometry passes (paned repaint, alert sizing).
    pub const LAYOUT: &str = "styled_elements::layout";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node ids.
    pub show_ids: bool,
    /// Whether to show class names after the tag.
    pub show_classes: bool,
    /// Whether to print text nodes.
    pub show_text: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_classes: true,
            show_text: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output: tags only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_classes: false,
            show_text: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing a document's node tree.
#[derive(Debug, Clone)]
pub struct DocumentTreeDebug {
    document: Document,
    options: TreeFormatOptions,
}

impl DocumentTreeDebug {
    /// Create a visualizer with default options.
    pub fn new(document: &Document) -> Self {
        Self::with_options(document, TreeFormatOptions::default())
    }

    /// Create a visualizer with custom options.
    pub fn with_options(document: &Document, options: TreeFormatOptions) -> Self {
        Self {
            document: document.clone(),
            options,
        }
    }

    /// Format the whole tree starting at the body.
    pub fn format_all(&self) -> String {
        let mut output = String::new();
        self.document.with_tree(|tree| {
            let _ = writeln!(output, "Document ({} nodes):", tree.node_count());
            self.format_into(tree, tree.body(), 0, true, &mut output);
        });
        output
    }

    /// Format the subtree rooted at `root`.
    pub fn format_subtree(&self, root: NodeId) -> String {
        let mut output = String::new();
        self.document
            .with_tree(|tree| self.format_into(tree, root, 0, true, &mut output));
        output
    }

    fn format_into(&self, tree: &DomTree, id: NodeId, depth: usize, is_last: bool, output: &mut String) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(tag) = tree.tag(id) else {
            return;
        };
        if tag == TEXT_TAG && !self.options.show_text {
            return;
        }

        output.push_str(&self.build_prefix(depth, is_last));
        if tag == TEXT_TAG {
            let _ = write!(output, "{:?}", tree.text_content(id));
        } else {
            output.push_str(tag);
            if self.options.show_classes {
                for class in tree.classes(id) {
                    output.push('.');
                    output.push_str(class);
                }
            }
        }
        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        output.push('\n');

        let children = tree.children(id);
        let child_count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_into(tree, child, depth + 1, i + 1 == child_count, output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

impl fmt::Display for DocumentTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_all())
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used around repaint passes to measure their duration.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "styled_elements::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
