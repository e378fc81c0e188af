//! Export Records
//!
//! In-memory snapshots of a model for the collaborators that persist or draw
//! it. Nothing here touches the filesystem.
//!
//! # Record Shape
//!
//! ```json
//! {
//!   "name": "Sample Program",
//!   "components": [
//!     {"id": 0, "name": "Funding", "description": "Allocated budget",
//!      "type": "Input", "links": [2]}
//!   ]
//! }
//! ```
//!
//! Components follow registry iteration order; `links` keep insertion order.

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::graph::{Node, NodeId, NodeKind, NodeRegistry};

/// Snapshot of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: NodeId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub links: Vec<NodeId>,
}

/// Snapshot of a whole model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub name: String,
    pub components: Vec<ComponentRecord>,
}

impl ModelRecord {
    /// Snapshot every node of `registry`.
    pub fn from_registry(name: impl Into<String>, registry: &NodeRegistry) -> Self {
        Self {
            name: name.into(),
            components: registry.all_nodes().map(Node::to_record).collect(),
        }
    }

    /// Rebuild a registry with the same ids, kinds, metadata and links.
    ///
    /// Fails if two components share an id or a link targets an id that is
    /// not in the record.
    pub fn to_registry(&self) -> ModelResult<NodeRegistry> {
        let mut registry = NodeRegistry::new();
        for component in &self.components {
            registry.register(Node::with_id(
                component.id,
                component.kind,
                component.name.clone(),
                component.description.clone(),
            ))?;
        }
        for component in &self.components {
            for &target in &component.links {
                registry.link(component.id, target)?;
            }
        }
        Ok(registry)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary encoding with named fields.
    pub fn to_msgpack(&self) -> ModelResult<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> ModelResult<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

/// What a renderer needs to know about a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Column of the node's kind, 0 (Input) through 4 (Impact).
    pub layer: usize,
}

/// Nodes and edges for a diagram. Layout and drawing are up to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphView {
    pub fn from_registry(registry: &NodeRegistry) -> Self {
        let mut view = GraphView::default();
        for node in registry.all_nodes() {
            view.nodes.push(NodeView {
                id: node.id(),
                name: node.name().to_string(),
                kind: node.kind(),
                layer: node.kind().index(),
            });
            view.edges.extend(
                node.links()
                    .iter()
                    .filter(|&&target| registry.contains(target))
                    .map(|&target| (node.id(), target)),
            );
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    fn sample() -> NodeRegistry {
        let mut reg = NodeRegistry::new();
        let funds = reg.add_node(NodeKind::Input, "Funding", "Allocated budget").unwrap();
        let health = reg.add_node(NodeKind::Impact, "Improved Health", "").unwrap();
        let train = reg.add_node(NodeKind::Activity, "Training", "Conduct staff training").unwrap();
        reg.link(funds, train).unwrap();
        reg.link(train, health).unwrap();
        reg
    }

    #[test]
    fn json_uses_literal_kind_tags() {
        let record = ModelRecord::from_registry("Sample", &sample());
        let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(json["name"], "Sample");
        let components = json["components"].as_array().unwrap();
        assert_eq!(components.len(), 3);
        assert_eq!(components[0]["type"], "Input");
        assert_eq!(components[0]["links"], serde_json::json!([2]));
        assert_eq!(components[1]["type"], "Activity");
        assert_eq!(components[2]["type"], "Impact");
        assert_eq!(components[2]["links"], serde_json::json!([]));
    }

    #[test]
    fn record_rebuilds_the_same_graph() {
        let original = sample();
        let record = ModelRecord::from_registry("Sample", &original);
        let rebuilt = record.to_registry().unwrap();

        assert_eq!(ModelRecord::from_registry("Sample", &rebuilt), record);
        for node in original.all_nodes() {
            let copy = rebuilt.lookup(node.id()).unwrap();
            assert_eq!(copy.kind(), node.kind());
            assert_eq!(copy.links(), node.links());
        }
        assert_eq!(rebuilt.next_id(), Some(NodeId::from(3)));
    }

    #[test]
    fn msgpack_decodes_to_the_same_record() {
        let record = ModelRecord::from_registry("Sample", &sample());
        let bytes = record.to_msgpack().unwrap();
        assert_eq!(ModelRecord::from_msgpack(&bytes).unwrap(), record);
    }

    #[test]
    fn unknown_kind_tag_fails_to_decode() {
        let json = r#"{"name": "x", "components": [
            {"id": 0, "name": "a", "description": "", "type": "Widget", "links": []}
        ]}"#;
        assert!(matches!(ModelRecord::from_json(json), Err(ModelError::Json(_))));
    }

    #[test]
    fn link_to_missing_component_fails() {
        let json = r#"{"name": "x", "components": [
            {"id": 0, "name": "a", "description": "", "type": "Input", "links": [5]}
        ]}"#;
        let record = ModelRecord::from_json(json).unwrap();
        assert!(matches!(
            record.to_registry(),
            Err(ModelError::NodeNotFound(id)) if id == NodeId::from(5)
        ));
    }

    #[test]
    fn duplicate_component_ids_fail() {
        let json = r#"{"name": "x", "components": [
            {"id": 1, "name": "a", "description": "", "type": "Input", "links": []},
            {"id": 1, "name": "b", "description": "", "type": "Output", "links": []}
        ]}"#;
        let record = ModelRecord::from_json(json).unwrap();
        assert!(matches!(
            record.to_registry(),
            Err(ModelError::DuplicateRegistration(_))
        ));
    }

    #[test]
    fn graph_view_lists_nodes_and_edges() {
        let view = GraphView::from_registry(&sample());
        let layers: Vec<usize> = view.nodes.iter().map(|n| n.layer).collect();
        assert_eq!(layers, vec![0, 1, 4]);
        assert_eq!(
            view.edges,
            vec![
                (NodeId::from(0), NodeId::from(2)),
                (NodeId::from(2), NodeId::from(1)),
            ]
        );
    }

    #[test]
    fn max_id_imports_without_overflow() {
        let json = r#"{"name": "x", "components": [
            {"id": 18446744073709551615, "name": "a", "description": "", "type": "Input", "links": [0]},
            {"id": 0, "name": "b", "description": "", "type": "Output", "links": []}
        ]}"#;
        let registry = ModelRecord::from_json(json).unwrap().to_registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry
            .lookup(NodeId::from(u64::MAX))
            .unwrap()
            .links_to(NodeId::from(0)));
        assert_eq!(registry.next_id(), None);
    }
}
