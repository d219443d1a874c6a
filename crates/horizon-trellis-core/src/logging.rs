//! Logging and debugging facilities for Horizon Trellis.
//!
//! This module provides:
//! - Target names for filtering `tracing` output per subsystem
//! - Debug visualization for node trees
//!
//! # Tracing Integration
//!
//! Horizon Trellis uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application and filter by target:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_trellis::focus=debug,horizon_trellis::drag=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`TreeDebug`] to render an arena as text:
//!
//! ```
//! use horizon_trellis_core::NodeArena;
//! use horizon_trellis_core::logging::{DebugNode, TreeDebug, TreeFormatOptions};
//!
//! struct Named(&'static str);
//!
//! impl DebugNode for Named {
//!     fn debug_name(&self) -> &str {
//!         self.0
//!     }
//! }
//!
//! let mut arena = NodeArena::new();
//! let root = arena.insert(Named("root"));
//! let child = arena.insert(Named("child"));
//! arena.add_child(root, child).unwrap();
//!
//! let text = TreeDebug::with_options(TreeFormatOptions::minimal())
//!     .format_subtree(&arena, root)
//!     .unwrap();
//! assert_eq!(text, "root\n└── child\n");
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::TreeResult;
use crate::tree::{NodeArena, NodeId};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Tree structure mutations.
    pub const TREE: &str = "horizon_trellis::tree";
    /// Focus changes and tab traversal.
    pub const FOCUS: &str = "horizon_trellis::focus";
    /// Drag session lifecycle.
    pub const DRAG: &str = "horizon_trellis::drag";
    /// Frame traversal and clipping.
    pub const RENDER: &str = "horizon_trellis::render";
    /// Modal stack changes.
    pub const MODAL: &str = "horizon_trellis::modal";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact dash-prefixed representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Whether to show state flags (hidden, disabled, focused, ...).
    pub show_flags: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_flags: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_flags: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_flags: false,
            ..Default::default()
        }
    }
}

/// What a node contributes to a tree dump.
pub trait DebugNode {
    /// Display name of the node; empty names print as `(unnamed)`.
    fn debug_name(&self) -> &str;

    /// Type name of the node. Module paths are stripped when printed.
    fn debug_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Short state flags such as `hidden` or `focused`.
    fn debug_flags(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// Debug utility for visualizing node trees.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every tree in the arena, one root after another.
    pub fn format_all<W: DebugNode>(&self, arena: &NodeArena<W>) -> TreeResult<String> {
        let mut output = String::new();
        let _ = writeln!(output, "Node Tree ({} total nodes):", arena.len());

        let roots: Vec<NodeId> = arena.roots().collect();
        if roots.is_empty() {
            output.push_str("  (empty)\n");
        }
        for root in roots {
            self.format_into(arena, root, 0, &mut Vec::new(), &mut output)?;
        }
        Ok(output)
    }

    /// Format a subtree starting from a specific node.
    pub fn format_subtree<W: DebugNode>(
        &self,
        arena: &NodeArena<W>,
        root: NodeId,
    ) -> TreeResult<String> {
        let mut output = String::new();
        self.format_into(arena, root, 0, &mut Vec::new(), &mut output)?;
        Ok(output)
    }

    /// `open` holds, per ancestor level, whether more siblings follow.
    fn format_into<W: DebugNode>(
        &self,
        arena: &NodeArena<W>,
        id: NodeId,
        depth: usize,
        open: &mut Vec<bool>,
        output: &mut String,
    ) -> TreeResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let children = arena.children(id)?;
        let Some(node) = arena.get(id) else {
            return Ok(());
        };

        output.push_str(&self.build_prefix(open));

        let name = node.debug_name();
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });
        if self.options.show_ids {
            let _ = write!(output, " [{id:?}]");
        }
        if self.options.show_types {
            let type_name = node.debug_type();
            let short = type_name.rsplit("::").next().unwrap_or(type_name);
            let _ = write!(output, " ({short})");
        }
        if self.options.show_flags {
            let flags = node.debug_flags();
            if !flags.is_empty() {
                let _ = write!(output, " {{{}}}", flags.join(", "));
            }
        }
        output.push('\n');

        let count = children.len();
        for (index, &child) in children.iter().enumerate() {
            open.push(index + 1 < count);
            self.format_into(arena, child, depth + 1, open, output)?;
            open.pop();
        }
        Ok(())
    }

    fn build_prefix(&self, open: &[bool]) -> String {
        let Some((&has_next, parents)) = open.split_last() else {
            return String::new();
        };

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for &more in parents {
            if more {
                prefix.push_str(branch);
                prefix.push_str(&" ".repeat(self.options.indent_size + 1));
            } else {
                prefix.push_str(&" ".repeat(branch.chars().count() + self.options.indent_size + 1));
            }
        }
        prefix.push_str(if has_next { tee } else { corner });
        prefix.push(' ');
        prefix
    }
}
