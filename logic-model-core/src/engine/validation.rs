//! Validation Engine
//!
//! Structural checks over the link graph:
//!
//! - isolated nodes (no incoming and no outgoing edges)
//! - one witness cycle, if the graph has any
//!
//! Neither check mutates the registry. A cycle is reported as data; whether
//! it is acceptable is up to the caller.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::graph::{Node, NodeId, NodeRegistry};

/// Findings of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Names of isolated nodes, in registry iteration order.
    pub isolated_components: Vec<String>,

    /// One cycle as (source, target) name pairs; empty if the graph is acyclic.
    pub circular_dependencies: Vec<(String, String)>,

    #[serde(skip)]
    pub isolated_ids: Vec<NodeId>,

    #[serde(skip)]
    pub cycle_ids: Vec<(NodeId, NodeId)>,
}

impl ValidationReport {
    pub fn has_cycle(&self) -> bool {
        !self.cycle_ids.is_empty()
    }

    pub fn has_isolated(&self) -> bool {
        !self.isolated_ids.is_empty()
    }

    /// True when neither check found anything.
    pub fn is_clean(&self) -> bool {
        !self.has_cycle() && !self.has_isolated()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// Read-only structural checker over a registry.
pub struct ValidationEngine<'a> {
    registry: &'a NodeRegistry,
}

impl<'a> ValidationEngine<'a> {
    pub fn new(registry: &'a NodeRegistry) -> Self {
        Self { registry }
    }

    /// Run both checks.
    pub fn validate(&self) -> ValidationReport {
        let isolated_ids = self.isolated();
        let cycle_ids = self.find_cycle();

        let isolated_components = isolated_ids.iter().map(|&id| self.name_of(id)).collect();
        let circular_dependencies = cycle_ids
            .iter()
            .map(|&(source, target)| (self.name_of(source), self.name_of(target)))
            .collect();

        debug!(
            isolated = isolated_ids.len(),
            cycle_len = cycle_ids.len(),
            "validation finished"
        );

        ValidationReport {
            isolated_components,
            circular_dependencies,
            isolated_ids,
            cycle_ids,
        }
    }

    /// Ids of nodes with total degree zero, in registry iteration order.
    ///
    /// A self-link counts as both an incoming and an outgoing edge.
    pub fn isolated(&self) -> Vec<NodeId> {
        let upstream = self.registry.upstream_index();
        self.registry
            .all_nodes()
            .filter(|node| node.links().is_empty() && !upstream.contains_key(&node.id()))
            .map(Node::id)
            .collect()
    }

    /// Find one directed cycle.
    ///
    /// Depth-first search rooted at each unvisited node in registry iteration
    /// order, following links in insertion order. The first back edge found
    /// closes the witness. Returns the cycle's edges in traversal order, or an
    /// empty vector for an acyclic graph. Links to unregistered ids are not
    /// part of the graph and are skipped.
    pub fn find_cycle(&self) -> Vec<(NodeId, NodeId)> {
        let mut marks: HashMap<NodeId, Mark> = HashMap::with_capacity(self.registry.len());

        for root in self.registry.all_nodes() {
            if marks.contains_key(&root.id()) {
                continue;
            }

            // (node, index of the next link to follow)
            let mut stack: Vec<(NodeId, usize)> = vec![(root.id(), 0)];
            marks.insert(root.id(), Mark::OnStack);

            while let Some(frame) = stack.last_mut() {
                let (current, cursor) = *frame;
                let links = self.registry.lookup(current).map(Node::links).unwrap_or(&[]);

                if cursor >= links.len() {
                    marks.insert(current, Mark::Done);
                    stack.pop();
                    continue;
                }
                frame.1 += 1;

                let target = links[cursor];
                if !self.registry.contains(target) {
                    continue;
                }

                match marks.get(&target).copied() {
                    None => {
                        marks.insert(target, Mark::OnStack);
                        stack.push((target, 0));
                    }
                    Some(Mark::OnStack) => {
                        if let Some(start) = stack.iter().position(|&(id, _)| id == target) {
                            let path: Vec<NodeId> = stack[start..].iter().map(|&(id, _)| id).collect();
                            let mut edges: Vec<(NodeId, NodeId)> =
                                path.windows(2).map(|pair| (pair[0], pair[1])).collect();
                            edges.push((current, target));
                            return edges;
                        }
                    }
                    Some(Mark::Done) => {}
                }
            }
        }

        Vec::new()
    }

    fn name_of(&self, id: NodeId) -> String {
        self.registry
            .lookup(id)
            .map(|node| node.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    }
}
