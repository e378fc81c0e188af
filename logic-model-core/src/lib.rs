//! Logic Model Core
//!
//! This crate provides the graph engine behind logic models: directed graphs
//! of typed nodes (inputs, activities, outputs, outcomes, impacts) that
//! describe a program's causal chain.
//! It implements:
//!
//! - A typed node registry with stable, allocator-issued identity
//! - Link management between nodes
//! - Stratified value propagation ("what if funding doubled?")
//! - Structural validation (isolated nodes, cycles)
//! - Export records for persistence and rendering collaborators
//!
//! The crate is designed to be used both as a native Rust library and, with
//! the `python` feature, as a Python extension module via PyO3.
//!
//! # Architecture
//!
//! - `graph`: nodes, ids and the registry that owns them
//! - `engine`: read-only propagation and validation over a registry
//! - `export`: model records, JSON/MessagePack codecs and graph views
//! - `model`: the named model facade and its thread-shared wrapper
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use logic_model_core::{LogicModel, NodeKind};
//!
//! let mut model = LogicModel::new("Sample Program");
//! let funding = model.add(NodeKind::Input, "Funding", "Allocated budget").unwrap();
//! let training = model.add(NodeKind::Activity, "Training", "Conduct staff training").unwrap();
//! let awareness = model.add(NodeKind::Outcome, "Awareness", "Improved awareness").unwrap();
//! model.link(funding, training).unwrap();
//! model.link(training, awareness).unwrap();
//!
//! let overrides = HashMap::from([("Funding".to_string(), 2.0)]);
//! assert_eq!(model.simulate(&overrides)["Awareness"], 2.0);
//! assert!(model.validate().is_clean());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod graph;
pub mod model;
#[cfg(feature = "python")]
pub mod python;

pub use config::SimulationConfig;
pub use engine::{PropagationEngine, ValidationEngine, ValidationReport};
pub use error::{ModelError, ModelResult};
pub use export::{ComponentRecord, GraphView, ModelRecord, NodeView};
pub use graph::{IdAllocator, Node, NodeId, NodeKind, NodeRegistry};
pub use model::{LogicModel, ModelSummary, SharedModel};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyLogicModel>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
