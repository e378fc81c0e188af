//! Graph Nodes
//!
//! This module defines the node type that lives in the logic-model graph and
//! the closed set of kinds a node can have.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::id::{IdAllocator, NodeId};
use crate::error::{ModelError, ModelResult};
use crate::export::ComponentRecord;

/// The kind of a node in the logic model.
///
/// The declaration order is the model's fixed iteration order and also the
/// stratum order used by propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    /// Resources used by the program (funding, staff).
    Input,

    /// Work performed using inputs.
    Activity,

    /// Direct products of activities.
    Output,

    /// Short- or medium-term results.
    Outcome,

    /// Long-term, fundamental changes.
    Impact,
}

impl NodeKind {
    /// All kinds, in fixed iteration order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Input,
        NodeKind::Activity,
        NodeKind::Output,
        NodeKind::Outcome,
        NodeKind::Impact,
    ];

    /// Position of this kind in [`NodeKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            NodeKind::Input => 0,
            NodeKind::Activity => 1,
            NodeKind::Output => 2,
            NodeKind::Outcome => 3,
            NodeKind::Impact => 4,
        }
    }

    /// The literal kind tag used in export records.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Input => "Input",
            NodeKind::Activity => "Activity",
            NodeKind::Output => "Output",
            NodeKind::Outcome => "Outcome",
            NodeKind::Impact => "Impact",
        }
    }

    /// Plural label used in summaries.
    pub fn plural(self) -> &'static str {
        match self {
            NodeKind::Input => "Inputs",
            NodeKind::Activity => "Activities",
            NodeKind::Output => "Outputs",
            NodeKind::Outcome => "Outcomes",
            NodeKind::Impact => "Impacts",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

/// A node in the logic-model graph.
///
/// Edges are stored on the source node: `u -> v` exists iff `v` is in
/// `u.links()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier for this node.
    id: NodeId,

    /// What kind of node this is. Fixed at creation.
    kind: NodeKind,

    name: String,

    description: String,

    /// Targets of outgoing edges, in the order they were added.
    links: SmallVec<[NodeId; 4]>,

    /// Fallback state used by propagation when nothing links into this node.
    value: Option<f64>,
}

impl Node {
    /// Create a node with a fresh id taken from `ids`.
    ///
    /// Fails only when the allocator is exhausted.
    pub fn create(
        ids: &mut IdAllocator,
        kind: NodeKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ModelResult<Self> {
        Ok(Self::with_id(ids.allocate()?, kind, name, description))
    }

    /// Create a node with a caller-chosen id.
    ///
    /// The caller is responsible for uniqueness; the registry rejects
    /// duplicates at registration time.
    pub fn with_id(
        id: NodeId,
        kind: NodeKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            description: description.into(),
            links: SmallVec::new(),
            value: None,
        }
    }

    /// Get the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Set or clear the fallback value.
    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
    }

    /// Builder-style variant of [`set_value`](Self::set_value).
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Outgoing link targets in insertion order.
    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// Check whether this node links to `target`.
    pub fn links_to(&self, target: NodeId) -> bool {
        self.links.contains(&target)
    }

    /// Link this node to `other`.
    ///
    /// Returns `false` if the link already existed.
    pub fn link_to(&mut self, other: &Node) -> bool {
        self.link_to_id(other.id)
    }

    /// Link this node to the node with id `target`.
    pub fn link_to_id(&mut self, target: NodeId) -> bool {
        if self.links.contains(&target) {
            return false;
        }
        self.links.push(target);
        true
    }

    /// Snapshot of this node for export.
    pub fn to_record(&self) -> ComponentRecord {
        ComponentRecord {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            links: self.links.to_vec(),
        }
    }
}
