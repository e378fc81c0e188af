//! Error Types
//!
//! Every fallible operation in the crate returns [`ModelResult`]. Structural
//! findings such as cycles or isolated nodes are not errors; they are reported
//! as data by the validation engine.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by the registry, the model facade and the export codecs.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An id was looked up (or linked) that is not registered.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// A node was registered with an id that is already in use.
    #[error("node {0} is already registered")]
    DuplicateRegistration(NodeId),

    /// Every id has been handed out; no new node can be created.
    #[error("node id space exhausted")]
    IdSpaceExhausted,

    /// A kind tag did not name one of the five node kinds.
    #[error("unknown node kind '{0}'")]
    UnknownKind(String),

    #[error("json codec error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("msgpack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("msgpack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Convenience alias for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let e = ModelError::NodeNotFound(NodeId::from(7));
        assert_eq!(e.to_string(), "node #7 not found");
    }

    #[test]
    fn duplicate_display() {
        let e = ModelError::DuplicateRegistration(NodeId::from(3));
        assert!(e.to_string().contains("already registered"));
    }

    #[test]
    fn exhausted_display() {
        assert_eq!(ModelError::IdSpaceExhausted.to_string(), "node id space exhausted");
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: ModelError = err.into();
        assert!(matches!(e, ModelError::Json(_)));
    }
}
