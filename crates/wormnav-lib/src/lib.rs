//! Wormnav library entry points.
//!
//! This crate assembles a wormhole routing graph from three decoded data
//! feeds (system catalog + static topology, a player-reported connection
//! feed, and a public connection exchange), publishes immutable snapshots,
//! and answers filtered shortest-path queries over them. Host bridges and
//! feed transports should only depend on the types and functions exported
//! here.

#![deny(warnings)]

pub mod error;
pub mod feeds;
pub mod graph;
pub mod ingest;
pub mod path;
pub mod routing;
pub mod snapshot;

pub use error::{Error, Result};
pub use feeds::{FeedBundle, ReferenceData, TheraRecord, WormholeFeed};
pub use graph::{
    ConnectionEdge, EdgeKey, GraphStore, LifeStatus, MassStatus, SystemId, SystemNode, SystemRef,
};
pub use ingest::build_graph;
pub use path::find_route_bfs;
pub use routing::{find_path, PathEntry, RouteOptions};
pub use snapshot::{Snapshot, SnapshotStore};
