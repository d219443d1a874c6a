//! Arena-backed composition tree.
//!
//! Provides the ownership model every widget tree is built on:
//! - Stable, generation-checked node identifiers via arena storage
//! - A single owning parent per node (a tree, never a DAG)
//! - Ordered children, where insertion order is bottom-to-top z-order
//! - Cascading destruction of whole subtrees
//!
//! # Key Types
//!
//! - [`NodeId`] - Unique stable identifier for each node
//! - [`NodeArena`] - Storage for node payloads and their parent/child links
//!
//! Nodes are inserted detached with [`NodeArena::insert`] and wired together
//! with [`NodeArena::add_child`]. A detached node stays addressable until
//! [`NodeArena::destroy`] removes it.

use slotmap::{SlotMap, new_key_type};

use crate::error::{TreeError, TreeResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a node in a [`NodeArena`].
    ///
    /// `NodeId`s are stable handles that remain valid as the tree is
    /// restructured. They become invalid once the node is destroyed; a
    /// destroyed ID is never confused with a node inserted later.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the NodeId to a raw u64 value.
    ///
    /// Useful for logging or interop with hosts that need a numeric handle.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Storage for one node: its payload and both tree edges.
#[derive(Debug)]
struct NodeSlot<W> {
    widget: W,
    /// Non-owning back-reference, maintained only by the arena.
    parent: Option<NodeId>,
    /// The owning edge, in z-order.
    children: Vec<NodeId>,
}

/// Arena owning every node of one or more trees.
///
/// The arena is generic over the node payload so the structural rules can be
/// tested without any widget machinery.
#[derive(Debug)]
pub struct NodeArena<W> {
    nodes: SlotMap<NodeId, NodeSlot<W>>,
}

impl<W> Default for NodeArena<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> NodeArena<W> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Create an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Insert a detached node and return its ID.
    pub fn insert(&mut self, widget: W) -> NodeId {
        let id = self.nodes.insert(NodeSlot {
            widget,
            parent: None,
            children: Vec::new(),
        });
        tracing::trace!(target: targets::TREE, ?id, "node inserted");
        id
    }

    /// Whether `id` refers to a live node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node's payload.
    pub fn get(&self, id: NodeId) -> Option<&W> {
        self.nodes.get(id).map(|slot| &slot.widget)
    }

    /// Mutably borrow a node's payload.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut W> {
        self.nodes.get_mut(id).map(|slot| &mut slot.widget)
    }

    /// Iterate over every live node in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &W)> {
        self.nodes.iter().map(|(id, slot)| (id, &slot.widget))
    }

    /// Iterate over nodes that have no parent.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, slot)| slot.parent.is_none())
            .map(|(id, _)| id)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append `child` to `parent`'s children.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidNode`] if either ID is not live
    /// - [`TreeError::AlreadyParented`] if `child` already has a parent
    /// - [`TreeError::CircularParentage`] if `child` is `parent` or one of its
    ///   ancestors
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if !self.contains(parent) {
            return Err(TreeError::InvalidNode(parent));
        }
        let current = self
            .nodes
            .get(child)
            .ok_or(TreeError::InvalidNode(child))?
            .parent;
        if let Some(existing) = current {
            tracing::debug!(target: targets::TREE, ?child, ?existing, "rejected add_child: already parented");
            return Err(TreeError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if self.is_ancestor_of(child, parent) {
            tracing::debug!(target: targets::TREE, ?child, ?parent, "rejected add_child: cycle");
            return Err(TreeError::CircularParentage { child, parent });
        }

        if let Some(slot) = self.nodes.get_mut(parent) {
            slot.children.push(child);
        }
        if let Some(slot) = self.nodes.get_mut(child) {
            slot.parent = Some(parent);
        }
        tracing::trace!(target: targets::TREE, ?parent, ?child, "child attached");
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// Returns whether `child` was found among `parent`'s children. The child
    /// stays alive in the arena as a detached node.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(slot) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = slot.children.iter().position(|&c| c == child) else {
            return false;
        };
        slot.children.remove(index);
        if let Some(child_slot) = self.nodes.get_mut(child) {
            child_slot.parent = None;
        }
        tracing::trace!(target: targets::TREE, ?parent, ?child, "child detached");
        true
    }

    /// Detach a node from whatever parent it has.
    ///
    /// Returns the former parent, if any.
    pub fn detach(&mut self, id: NodeId) -> TreeResult<Option<NodeId>> {
        let parent = self.parent(id)?;
        if let Some(parent) = parent {
            self.remove_child(parent, id);
        }
        Ok(parent)
    }

    /// Destroy a node and its whole subtree.
    ///
    /// The node is detached from its parent first. Returns the destroyed
    /// payloads in pre-order, so the caller decides when they are dropped.
    pub fn destroy(&mut self, id: NodeId) -> TreeResult<Vec<(NodeId, W)>> {
        let mut doomed = vec![id];
        doomed.extend(self.descendants(id)?);
        self.detach(id)?;

        let removed: Vec<(NodeId, W)> = doomed
            .into_iter()
            .filter_map(|node| self.nodes.remove(node).map(|slot| (node, slot.widget)))
            .collect();
        tracing::trace!(target: targets::TREE, ?id, count = removed.len(), "subtree destroyed");
        Ok(removed)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        self.nodes
            .get(id)
            .map(|slot| slot.parent)
            .ok_or(TreeError::InvalidNode(id))
    }

    /// Get the children of a node in z-order (bottom first).
    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        self.nodes
            .get(id)
            .map(|slot| slot.children.as_slice())
            .ok_or(TreeError::InvalidNode(id))
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut current = self.parent(id)?;
        while let Some(ancestor) = current {
            result.push(ancestor);
            current = self.nodes.get(ancestor).and_then(|slot| slot.parent);
        }
        Ok(result)
    }

    /// Every descendant of a node in pre-order, excluding the node itself.
    pub fn descendants(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut result = Vec::new();
        self.collect_descendants(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants(&self, id: NodeId, result: &mut Vec<NodeId>) -> TreeResult<()> {
        for &child in self.children(id)? {
            result.push(child);
            self.collect_descendants(child, result)?;
        }
        Ok(())
    }

    /// Check if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes.get(node).and_then(|slot| slot.parent);
        }
        false
    }

    /// The topmost ancestor of a node (the node itself when detached).
    pub fn root_of(&self, id: NodeId) -> TreeResult<NodeId> {
        Ok(self.ancestors(id)?.last().copied().unwrap_or(id))
    }

    /// Depth of a node below its root (a root has depth 0).
    pub fn depth(&self, id: NodeId) -> TreeResult<usize> {
        Ok(self.ancestors(id)?.len())
    }

    /// Find the first node in `root`'s subtree (pre-order, `root` included)
    /// whose payload matches `predicate`.
    pub fn find<F>(&self, root: NodeId, mut predicate: F) -> TreeResult<Option<NodeId>>
    where
        F: FnMut(&W) -> bool,
    {
        let slot = self.nodes.get(root).ok_or(TreeError::InvalidNode(root))?;
        if predicate(&slot.widget) {
            return Ok(Some(root));
        }
        Ok(self
            .descendants(root)?
            .into_iter()
            .find(|&id| self.get(id).is_some_and(&mut predicate)))
    }
}

static_assertions::assert_impl_all!(NodeId: Copy, Send, Sync);
static_assertions::assert_impl_all!(NodeArena<String>: Send, Sync);
