//! Logic Model
//!
//! A named container tying a [`NodeRegistry`] to the engines and export
//! records. [`SharedModel`] wraps it for callers on more than one thread.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::SimulationConfig;
use crate::engine::{PropagationEngine, ValidationEngine, ValidationReport};
use crate::error::ModelResult;
use crate::export::{GraphView, ModelRecord};
use crate::graph::{Node, NodeId, NodeKind, NodeRegistry};

/// A named logic model.
#[derive(Debug, Clone)]
pub struct LogicModel {
    name: String,
    registry: NodeRegistry,
    config: SimulationConfig,
}

impl Default for LogicModel {
    fn default() -> Self {
        Self::new("Logic Model")
    }
}

impl LogicModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, SimulationConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: SimulationConfig) -> Self {
        Self {
            name: name.into(),
            registry: NodeRegistry::new(),
            config,
        }
    }

    /// Rebuild a model from an export record.
    pub fn from_record(record: &ModelRecord) -> ModelResult<Self> {
        Ok(Self {
            name: record.name.clone(),
            registry: record.to_registry()?,
            config: SimulationConfig::default(),
        })
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        Self::from_record(&ModelRecord::from_json(json)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NodeRegistry {
        &mut self.registry
    }

    /// Create a node with a fresh id without registering it.
    pub fn create_component(
        &mut self,
        kind: NodeKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ModelResult<Node> {
        self.registry.create_node(kind, name, description)
    }

    /// Register a node created earlier.
    pub fn add_component(&mut self, node: Node) -> ModelResult<NodeId> {
        self.registry.register(node)
    }

    /// Create and register a node.
    pub fn add(
        &mut self,
        kind: NodeKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ModelResult<NodeId> {
        self.registry.add_node(kind, name, description)
    }

    pub fn component(&self, id: NodeId) -> ModelResult<&Node> {
        self.registry.lookup(id)
    }

    pub fn component_mut(&mut self, id: NodeId) -> ModelResult<&mut Node> {
        self.registry.lookup_mut(id)
    }

    /// Add the edge `source -> target`. Returns `false` if it already existed.
    pub fn link(&mut self, source: NodeId, target: NodeId) -> ModelResult<bool> {
        self.registry.link(source, target)
    }

    pub fn set_value(&mut self, id: NodeId, value: Option<f64>) -> ModelResult<()> {
        self.registry.lookup_mut(id)?.set_value(value);
        Ok(())
    }

    /// Outcome and Impact states given overrides for named inputs.
    pub fn simulate(&self, overrides: &HashMap<String, f64>) -> IndexMap<String, f64> {
        PropagationEngine::with_config(&self.registry, self.config).simulate(overrides)
    }

    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::new(&self.registry).validate()
    }

    pub fn export(&self) -> ModelRecord {
        ModelRecord::from_registry(self.name.clone(), &self.registry)
    }

    pub fn export_json(&self) -> ModelResult<String> {
        self.export().to_json()
    }

    pub fn view(&self) -> GraphView {
        GraphView::from_registry(&self.registry)
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            name: self.name.clone(),
            counts: NodeKind::ALL.map(|kind| (kind, self.registry.count_of(kind))),
            total: self.registry.len(),
        }
    }
}

/// Node counts per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub name: String,
    pub counts: [(NodeKind, usize); 5],
    pub total: usize,
}

impl ModelSummary {
    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts[kind.index()].1
    }
}

impl std::fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Logic Model: {}", self.name)?;
        for (kind, count) in &self.counts {
            writeln!(f, "  {}: {}", kind.plural(), count)?;
        }
        write!(f, "  Total components: {}", self.total)
    }
}

/// A [`LogicModel`] behind a reader-writer lock.
///
/// Any number of simulations, validations and exports may run at once;
/// mutations wait for them and run alone. Clones share the same model.
#[derive(Debug, Clone, Default)]
pub struct SharedModel {
    inner: Arc<RwLock<LogicModel>>,
}

impl SharedModel {
    pub fn new(model: LogicModel) -> Self {
        Self {
            inner: Arc::new(RwLock::new(model)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, LogicModel> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, LogicModel> {
        self.inner.write()
    }

    pub fn simulate(&self, overrides: &HashMap<String, f64>) -> IndexMap<String, f64> {
        self.read().simulate(overrides)
    }

    pub fn validate(&self) -> ValidationReport {
        self.read().validate()
    }

    pub fn export(&self) -> ModelRecord {
        self.read().export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_kind() {
        let mut model = LogicModel::new("Counts");
        model.add(NodeKind::Input, "Funding", "").unwrap();
        model.add(NodeKind::Input, "Staff", "").unwrap();
        model.add(NodeKind::Impact, "Health", "").unwrap();

        let summary = model.summary();
        assert_eq!(summary.count(NodeKind::Input), 2);
        assert_eq!(summary.count(NodeKind::Activity), 0);
        assert_eq!(summary.count(NodeKind::Impact), 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn summary_text() {
        let mut model = LogicModel::new("Sample Program");
        model.add(NodeKind::Activity, "Training", "").unwrap();

        let text = model.summary().to_string();
        assert_eq!(
            text,
            "Logic Model: Sample Program\n  Inputs: 0\n  Activities: 1\n  Outputs: 0\n  Outcomes: 0\n  Impacts: 0\n  Total components: 1"
        );
    }

    #[test]
    fn created_component_registers_later() {
        let mut model = LogicModel::default();
        let node = model
            .create_component(NodeKind::Output, "Sessions", "Workshops delivered")
            .unwrap();
        let id = node.id();
        assert!(model.component(id).is_err());

        model.add_component(node).unwrap();
        assert_eq!(model.component(id).unwrap().name(), "Sessions");
    }

    #[test]
    fn set_value_on_missing_node_fails() {
        let mut model = LogicModel::default();
        assert!(model.set_value(NodeId::from(3), Some(1.0)).is_err());
    }

    #[test]
    fn config_is_applied_to_simulation() {
        let mut model = LogicModel::with_config("Cfg", SimulationConfig { default_state: 2.0 });
        model.add(NodeKind::Outcome, "Out", "").unwrap();
        assert_eq!(model.simulate(&HashMap::new())["Out"], 2.0);
    }

    #[test]
    fn set_config_replaces_default_state() {
        let mut model = LogicModel::new("Cfg");
        model.add(NodeKind::Impact, "Health", "").unwrap();
        assert_eq!(model.simulate(&HashMap::new())["Health"], 1.0);

        model.set_config(SimulationConfig { default_state: 0.5 });
        assert_eq!(model.config().default_state, 0.5);
        assert_eq!(model.simulate(&HashMap::new())["Health"], 0.5);
    }

    #[test]
    fn registry_mut_edits_are_visible() {
        let mut model = LogicModel::new("Direct");
        let a = model.registry_mut().add_node(NodeKind::Input, "A", "").unwrap();
        let b = model.registry_mut().add_node(NodeKind::Outcome, "B", "").unwrap();
        model.registry_mut().link(a, b).unwrap();

        assert_eq!(model.summary().total, 2);
        assert!(model.component(a).unwrap().links_to(b));
        assert!(model.validate().is_clean());
    }

    #[test]
    fn component_mut_updates_value() {
        let mut model = LogicModel::new("Values");
        let out = model.add(NodeKind::Outcome, "Out", "").unwrap();
        model.component_mut(out).unwrap().set_value(Some(4.0));
        assert_eq!(model.simulate(&HashMap::new())["Out"], 4.0);

        assert!(matches!(
            model.component_mut(NodeId::from(99)),
            Err(crate::error::ModelError::NodeNotFound(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_name() {
        let mut model = LogicModel::new("Named");
        let a = model.add(NodeKind::Input, "A", "first").unwrap();
        let b = model.add(NodeKind::Outcome, "B", "second").unwrap();
        model.link(a, b).unwrap();

        let json = model.export_json().unwrap();
        let copy = LogicModel::from_json(&json).unwrap();
        assert_eq!(copy.name(), "Named");
        assert_eq!(copy.export(), model.export());
    }

    #[test]
    fn shared_model_clones_share_state() {
        let shared = SharedModel::new(LogicModel::new("Shared"));
        let other = shared.clone();
        other.write().add(NodeKind::Outcome, "Out", "").unwrap();
        assert_eq!(shared.read().registry().len(), 1);
    }
}
