//! Node Identity
//!
//! Ids are handed out by an [`IdAllocator`] owned by the registry rather than
//! by a process-wide counter, so every registry (and every test) starts from a
//! known state.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Unique identifier for a node in the logic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source. Never hands out the same id twice.
///
/// Once `u64::MAX` has been handed out (or reserved) the allocator is
/// exhausted and every further allocation fails.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    /// `None` once the id space is used up.
    next: Option<u64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl IdAllocator {
    /// Create an allocator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: Some(first) }
    }

    /// Allocate the next id.
    pub fn allocate(&mut self) -> ModelResult<NodeId> {
        let raw = self.next.ok_or(ModelError::IdSpaceExhausted)?;
        self.next = raw.checked_add(1);
        Ok(NodeId(raw))
    }

    /// The id the next call to [`allocate`](Self::allocate) will return, if
    /// any.
    pub fn peek(&self) -> Option<NodeId> {
        self.next.map(NodeId)
    }

    /// Make sure `id` is never allocated in the future.
    ///
    /// Used when nodes with externally chosen ids (e.g. imported ones) are
    /// registered.
    pub fn reserve(&mut self, id: NodeId) {
        if let Some(next) = self.next {
            if id.0 >= next {
                self.next = id.0.checked_add(1);
            }
        }
    }
}
