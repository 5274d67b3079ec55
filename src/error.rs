//! Error types for courier-route operations.

use thiserror::Error;

/// Main error type for network construction and route planning.
#[derive(Debug, Error)]
pub enum Error {
    /// Edge rejected during network construction: bad weight, bad toll cost,
    /// unregistered endpoint, or a duplicate (from, to) pair.
    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        reason: String,
    },

    /// A condition would produce a negative or non-finite effective cost.
    /// Negative costs break the non-negative-weight assumption the search
    /// relies on, so they are rejected instead of silently clamped.
    #[error("invalid cost on edge {from} -> {to}: {reason}")]
    InvalidCost {
        from: String,
        to: String,
        reason: String,
    },

    /// The predecessor chain for a target did not terminate within the node
    /// count. Indicates a corrupted search result; aborts the request.
    #[error("corrupt predecessor chain: walk from '{target}' exceeded {limit} steps")]
    CorruptPredecessorChain { target: String, limit: usize },

    /// Node name not present in the network.
    #[error("unknown node '{0}'")]
    UnknownNode(String),
}

/// Convenience result type for courier-route operations.
pub type Result<T> = std::result::Result<T, Error>;
