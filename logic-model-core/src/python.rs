//! Python Bindings
//!
//! Exposes [`LogicModel`] to Python as `LogicModel`. Enabled with the
//! `python` feature.

use std::collections::HashMap;

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::error::ModelError;
use crate::graph::{NodeId, NodeKind};
use crate::model::LogicModel;

fn to_py_err(e: ModelError) -> PyErr {
    match e {
        ModelError::NodeNotFound(_) => PyKeyError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Python-exposed logic model.
#[pyclass(name = "LogicModel")]
pub struct PyLogicModel {
    model: LogicModel,
}

#[pymethods]
impl PyLogicModel {
    #[new]
    #[pyo3(signature = (name = "Logic Model".to_string()))]
    fn new(name: String) -> Self {
        Self {
            model: LogicModel::new(name),
        }
    }

    #[getter]
    fn name(&self) -> String {
        self.model.name().to_string()
    }

    /// Create and register a component. Returns its id.
    #[pyo3(signature = (kind, name, description = String::new(), value = None))]
    fn add_component(
        &mut self,
        kind: &str,
        name: String,
        description: String,
        value: Option<f64>,
    ) -> PyResult<u64> {
        let kind: NodeKind = kind.parse().map_err(to_py_err)?;
        let mut node = self
            .model
            .create_component(kind, name, description)
            .map_err(to_py_err)?;
        if let Some(value) = value {
            node = node.with_value(value);
        }
        let id = self.model.add_component(node).map_err(to_py_err)?;
        Ok(id.raw())
    }

    fn link(&mut self, from_id: u64, to_id: u64) -> PyResult<bool> {
        self.model
            .link(NodeId::from(from_id), NodeId::from(to_id))
            .map_err(to_py_err)
    }

    #[pyo3(signature = (node_id, value = None))]
    fn set_value(&mut self, node_id: u64, value: Option<f64>) -> PyResult<()> {
        self.model
            .set_value(NodeId::from(node_id), value)
            .map_err(to_py_err)
    }

    fn simulate<'py>(
        &self,
        py: Python<'py>,
        overrides: HashMap<String, f64>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        for (name, state) in self.model.simulate(&overrides) {
            dict.set_item(name, state)?;
        }
        Ok(dict)
    }

    fn validate<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let report = self.model.validate();
        let dict = PyDict::new_bound(py);
        dict.set_item("isolated_components", report.isolated_components)?;
        dict.set_item("circular_dependencies", report.circular_dependencies)?;
        Ok(dict)
    }

    fn export_json(&self) -> PyResult<String> {
        self.model.export_json().map_err(to_py_err)
    }

    fn summary(&self) -> String {
        self.model.summary().to_string()
    }

    fn __len__(&self) -> usize {
        self.model.registry().len()
    }
}
