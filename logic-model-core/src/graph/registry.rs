//! Node Registry
//!
//! The registry owns every node in a logic model. It keeps one ordered
//! partition per [`NodeKind`] plus an id-indexed map for O(1) lookup.
//!
//! # Iteration Order
//!
//! [`NodeRegistry::all_nodes`] walks the partitions in the fixed order Input,
//! Activity, Output, Outcome, Impact, and each partition in registration
//! order. Validation and export depend on this order being deterministic.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use super::id::{IdAllocator, NodeId};
use super::node::{Node, NodeKind};
use crate::error::{ModelError, ModelResult};

/// Owner of all nodes in a model.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    /// Source of ids for nodes created through this registry.
    ids: IdAllocator,

    /// All nodes, indexed by ID.
    nodes: IndexMap<NodeId, Node>,

    /// Node ids per kind, indexed by `NodeKind::index`.
    partitions: [Vec<NodeId>; 5],
}

impl NodeRegistry {
    /// Create an empty registry with its own allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that allocates ids from `ids`.
    pub fn with_allocator(ids: IdAllocator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    /// Create a node with a fresh id. The node is not registered yet.
    pub fn create_node(
        &mut self,
        kind: NodeKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ModelResult<Node> {
        Node::create(&mut self.ids, kind, name, description)
    }

    /// Create a node and register it in one step.
    ///
    /// Fails with [`ModelError::IdSpaceExhausted`] once the allocator has
    /// handed out its last id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ModelResult<NodeId> {
        let node = self.create_node(kind, name, description)?;
        self.register(node)
    }

    /// Register a node.
    ///
    /// Fails with [`ModelError::DuplicateRegistration`] if a node with the
    /// same id is already present; the registry is left unchanged.
    pub fn register(&mut self, node: Node) -> ModelResult<NodeId> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(ModelError::DuplicateRegistration(id));
        }
        self.ids.reserve(id);
        self.insert(node);
        Ok(id)
    }

    fn insert(&mut self, node: Node) {
        let id = node.id();
        let kind = node.kind();
        debug!(node = %id, kind = %kind, name = node.name(), "registered node");
        self.partitions[kind.index()].push(id);
        self.nodes.insert(id, node);
    }

    /// Look up a node by id.
    pub fn lookup(&self, id: NodeId) -> ModelResult<&Node> {
        self.nodes.get(&id).ok_or(ModelError::NodeNotFound(id))
    }

    /// Look up a node by id for mutation (links, value).
    pub fn lookup_mut(&mut self, id: NodeId) -> ModelResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(ModelError::NodeNotFound(id))
    }

    /// Check whether an id is registered.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Add the edge `source -> target`.
    ///
    /// Both ends must be registered. Returns `false` if the edge already
    /// existed.
    pub fn link(&mut self, source: NodeId, target: NodeId) -> ModelResult<bool> {
        if !self.contains(target) {
            return Err(ModelError::NodeNotFound(target));
        }
        let added = self.lookup_mut(source)?.link_to_id(target);
        if added {
            debug!(source = %source, target = %target, "linked nodes");
        }
        Ok(added)
    }

    /// Iterate over every node in fixed kind order, then registration order.
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> + Clone + '_ {
        self.partitions
            .iter()
            .flatten()
            .filter_map(move |id| self.nodes.get(id))
    }

    /// Iterate over the nodes of one kind in registration order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + Clone + '_ {
        self.partitions[kind.index()]
            .iter()
            .filter_map(move |id| self.nodes.get(id))
    }

    /// Number of registered nodes of one kind.
    pub fn count_of(&self, kind: NodeKind) -> usize {
        self.partitions[kind.index()].len()
    }

    /// Get the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The id the next created node will receive, if ids remain.
    pub fn next_id(&self) -> Option<NodeId> {
        self.ids.peek()
    }

    /// Build the reverse adjacency: target id -> ids of registered nodes
    /// linking into it.
    ///
    /// Sources appear in [`all_nodes`](Self::all_nodes) order.
    pub fn upstream_index(&self) -> HashMap<NodeId, Vec<NodeId>> {
        let mut upstream: HashMap<NodeId, Vec<NodeId>> = HashMap::with_capacity(self.len());
        for node in self.all_nodes() {
            for &target in node.links() {
                upstream.entry(target).or_default().push(node.id());
            }
        }
        upstream
    }
}
