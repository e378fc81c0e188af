//! Propagation Engine
//!
//! Estimates a numeric state for every node from overridden Input values.
//!
//! # Algorithm
//!
//! 1. Each Input takes its override (matched by name), else its stored value,
//!    else the default state.
//! 2. The remaining kinds are processed one stratum at a time in the fixed
//!    order Activity, Output, Outcome, Impact.
//! 3. A node with at least one upstream node (any registered node linking
//!    into it) takes the sum of the upstream states. Upstream nodes without a
//!    state yet contribute the default. A node without upstream nodes takes
//!    its value, else the default.
//! 4. Only Outcome and Impact states are returned, keyed by name.
//!
//! The stratum order is not a topological sort of the link graph. A link
//! running against it (say Output -> Activity) is read before its source has
//! been computed in this run, so it contributes the default.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::SimulationConfig;
use crate::graph::{NodeId, NodeKind, NodeRegistry};

/// Strata processed after the inputs are seeded.
const STRATA: [NodeKind; 4] = [
    NodeKind::Activity,
    NodeKind::Output,
    NodeKind::Outcome,
    NodeKind::Impact,
];

/// Kinds whose states are reported by [`PropagationEngine::simulate`].
const REPORTED: [NodeKind; 2] = [NodeKind::Outcome, NodeKind::Impact];

/// Read-only simulator over a registry.
pub struct PropagationEngine<'a> {
    registry: &'a NodeRegistry,
    config: SimulationConfig,
}

impl<'a> PropagationEngine<'a> {
    pub fn new(registry: &'a NodeRegistry) -> Self {
        Self::with_config(registry, SimulationConfig::default())
    }

    pub fn with_config(registry: &'a NodeRegistry, config: SimulationConfig) -> Self {
        Self { registry, config }
    }

    /// Run a simulation and return Outcome and Impact states by name.
    ///
    /// If two reported nodes share a name, the later one (Outcomes before
    /// Impacts, then registration order) wins. Override keys that match no
    /// Input are ignored.
    pub fn simulate(&self, overrides: &HashMap<String, f64>) -> IndexMap<String, f64> {
        let states = self.simulate_states(overrides);

        let mut result = IndexMap::new();
        for kind in REPORTED {
            for node in self.registry.nodes_of_kind(kind) {
                let state = states
                    .get(&node.id())
                    .copied()
                    .unwrap_or(self.config.default_state);
                result.insert(node.name().to_string(), state);
            }
        }
        result
    }

    /// Run a simulation and return the state of every node by id.
    pub fn simulate_states(&self, overrides: &HashMap<String, f64>) -> HashMap<NodeId, f64> {
        let default = self.config.default_state;
        let mut states: HashMap<NodeId, f64> = HashMap::with_capacity(self.registry.len());

        for input in self.registry.nodes_of_kind(NodeKind::Input) {
            let state = overrides
                .get(input.name())
                .copied()
                .or(input.value())
                .unwrap_or(default);
            trace!(node = %input.id(), name = input.name(), state, "seeded input");
            states.insert(input.id(), state);
        }

        for key in overrides.keys() {
            let known = self
                .registry
                .nodes_of_kind(NodeKind::Input)
                .any(|input| input.name() == key);
            if !known {
                debug!(name = %key, "ignoring override with no matching input");
            }
        }

        let upstream = self.registry.upstream_index();

        for kind in STRATA {
            for node in self.registry.nodes_of_kind(kind) {
                let state = match upstream.get(&node.id()) {
                    Some(sources) if !sources.is_empty() => sources
                        .iter()
                        .map(|source| states.get(source).copied().unwrap_or(default))
                        .sum(),
                    _ => node.value().unwrap_or(default),
                };
                trace!(node = %node.id(), name = node.name(), state, "propagated");
                states.insert(node.id(), state);
            }
        }

        debug!(
            nodes = states.len(),
            overrides = overrides.len(),
            "simulation finished"
        );
        states
    }
}
