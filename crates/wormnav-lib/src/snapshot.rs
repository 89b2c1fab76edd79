//! Immutable published snapshots and the refresh coordinator.
//!
//! A refresh builds a [`GraphStore`] in isolation, converts it into a
//! [`Snapshot`], and publishes it with a single pointer replacement. Queries
//! capture the current snapshot once and keep it for their whole lifetime;
//! a refresh never blocks a query and a query never blocks a refresh.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Error, Result};
use crate::feeds::FeedBundle;
use crate::graph::{ConnectionEdge, EdgeKey, GraphStore, SystemId, SystemNode, SystemRef};
use crate::ingest::build_graph;
use crate::routing::{find_path, PathEntry, RouteOptions};

/// A fully assembled routing graph, immutable after publication.
///
/// All collections sit behind `Arc`s so request-scoped filtered copies share
/// attribute data without copying it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub nodes: Arc<HashMap<SystemId, SystemNode>>,
    pub edges: Arc<HashMap<EdgeKey, ConnectionEdge>>,
    pub adjacency: Arc<HashMap<SystemId, Vec<SystemId>>>,
    pub name_to_id: Arc<HashMap<String, SystemId>>,
    /// System listing for lookup UIs, sorted by identifier.
    pub systems: Arc<Vec<SystemRef>>,
}

impl Snapshot {
    /// Freeze a finalized build into a publishable snapshot.
    pub fn from_store(store: GraphStore) -> Self {
        let mut systems: Vec<SystemRef> = store
            .nodes
            .values()
            .map(|node| SystemRef {
                id: node.system_id,
                text: node.name.clone(),
            })
            .collect();
        systems.sort_unstable_by_key(|entry| entry.id);

        Self {
            nodes: Arc::new(store.nodes),
            edges: Arc::new(store.edges),
            adjacency: Arc::new(store.adjacency),
            name_to_id: Arc::new(store.name_to_id),
            systems: Arc::new(systems),
        }
    }

    /// Lookup a system identifier by its case-sensitive name.
    pub fn system_id_by_name(&self, name: &str) -> Option<SystemId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a system name by identifier.
    pub fn system_name(&self, id: SystemId) -> Option<&str> {
        self.nodes.get(&id).map(|node| node.name.as_str())
    }
}

/// Owner of the single "current published snapshot" reference.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh graph from one refresh cycle's decoded feeds and
    /// publish it. `now` is the reference instant for signature ageing.
    pub fn refresh(&self, bundle: &FeedBundle, now: DateTime<Utc>) -> Arc<Snapshot> {
        let store = build_graph(bundle, now);
        self.publish(Snapshot::from_store(store))
    }

    /// Atomically replace the published snapshot. In-flight queries keep the
    /// snapshot they captured.
    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        info!(
            systems = snapshot.systems.len(),
            connections = snapshot.edges.len(),
            "published graph snapshot"
        );

        let mut slot = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Capture the currently published snapshot, or `None` before the first
    /// refresh completes.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// System listing of the current snapshot, sorted by identifier.
    pub fn systems(&self) -> Result<Arc<Vec<SystemRef>>> {
        let snapshot = self.current().ok_or(Error::SnapshotUnavailable)?;
        Ok(Arc::clone(&snapshot.systems))
    }

    /// Run a filtered shortest-path query against the current snapshot.
    pub fn find_path(&self, options: &RouteOptions) -> Result<Vec<PathEntry>> {
        let snapshot = self.current().ok_or(Error::SnapshotUnavailable)?;
        find_path(&snapshot, options)
    }

    /// Parse a JSON route request and run it against the current snapshot.
    pub fn find_path_json(&self, raw: &str) -> Result<Vec<PathEntry>> {
        let options = RouteOptions::from_json(raw)?;
        self.find_path(&options)
    }
}
