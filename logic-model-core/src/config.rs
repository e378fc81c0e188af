//! Simulation Configuration

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;

/// Unit state used when a node has neither an override, a value, nor a
/// computed upstream.
pub const DEFAULT_STATE: f64 = 1.0;

/// Settings for [`PropagationEngine`](crate::engine::PropagationEngine).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// State assumed for nodes without a value and for upstream nodes that
    /// have not been computed yet.
    pub default_state: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_state: DEFAULT_STATE,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
