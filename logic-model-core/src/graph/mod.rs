//! Logic-Model Graph
//!
//! This module holds the typed graph that every other part of the crate reads
//! from.
//!
//! # Overview
//!
//! The graph is directed, and may contain cycles:
//!
//! - Nodes are typed vertices (inputs, activities, outputs, outcomes, impacts)
//! - Edges are stored on their source: `u -> v` exists iff `v` is in `u.links()`
//!
//! # Design Decisions
//!
//! 1. Nodes are owned by a central [`NodeRegistry`] rather than linked by
//!    pointers. Links refer to targets by [`NodeId`].
//!
//! 2. Ids come from an [`IdAllocator`] owned by the registry, so identity is
//!    scoped to a model instead of the whole process.
//!
//! 3. Kind dispatch is a closed enum with a fixed index per kind, which also
//!    defines iteration order.

mod id;
mod node;
mod registry;

pub use id::{IdAllocator, NodeId};
pub use node::{Node, NodeKind};
pub use registry::NodeRegistry;
