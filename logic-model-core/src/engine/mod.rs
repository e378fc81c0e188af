//! Read-only engines over a [`NodeRegistry`](crate::graph::NodeRegistry).
//!
//! Both engines borrow the registry immutably and return their results;
//! nothing is written back onto the nodes.

mod propagation;
mod validation;

pub use propagation::PropagationEngine;
pub use validation::{ValidationEngine, ValidationReport};
