use thiserror::Error;

use crate::graph::SystemId;

/// Convenient result alias for the wormnav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised by the fetch wrapper when downloading a whole feed failed.
    /// Fatal to that refresh cycle; the previously published snapshot stays
    /// in effect.
    #[error("failed to fetch the {feed} feed: {message}")]
    FeedTransport { feed: &'static str, message: String },

    /// Raised by the fetch wrapper when decoding a whole feed failed.
    #[error("failed to decode the {feed} feed: {source}")]
    FeedDecode {
        feed: &'static str,
        source: serde_json::Error,
    },

    /// Raised when a query arrives before the first snapshot was published.
    #[error("no graph snapshot has been published yet")]
    SnapshotUnavailable,

    /// Raised when a route request could not be parsed.
    #[error("invalid route request: {0}")]
    RequestFormat(#[from] serde_json::Error),

    /// Raised when path reconstruction references a system missing from the
    /// snapshot's node map. Indicates an internal inconsistency between the
    /// adjacency structure and the attribute maps.
    #[error("system {system} missing from snapshot during path reconstruction")]
    NodeNotFound { system: SystemId },

    /// Raised when path reconstruction references a directed connection
    /// missing from the snapshot's edge map.
    #[error("connection {from} -> {to} missing from snapshot during path reconstruction")]
    EdgeNotFound { from: SystemId, to: SystemId },
}
