//! Graph data model: systems, connections, and the mutable build-time store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Numeric identifier for a solar system.
pub type SystemId = i64;

/// Jump-mass sentinel meaning "unresolved"; also acts as "no practical
/// limit" when it survives into a published snapshot.
pub const UNRESOLVED_JUMP_MASS: i64 = 9999;

/// Placeholder signature code for sides whose signature was never scanned.
pub const UNKNOWN_SIGNATURE: &str = "???";

/// The static topology feed keys systems by an offset relative to this base.
pub const STATIC_MAP_ID_OFFSET: i64 = 30_000_000;

/// Class code assigned to the hub system after the merge so security-based
/// filters never exclude it.
pub const HUB_CLASS: &str = "99";

/// Display name of the hub system in the catalog feed.
pub const HUB_SYSTEM_NAME: &str = "Thera";

/// Lifetime classification of a dynamic connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeStatus {
    Stable,
    Critical,
}

impl LifeStatus {
    /// Lenient parse of a feed-reported decay state: anything other than
    /// `critical` counts as stable.
    pub fn from_feed(raw: &str) -> Self {
        if raw == "critical" {
            LifeStatus::Critical
        } else {
            LifeStatus::Stable
        }
    }

    pub fn is_critical(self) -> bool {
        self == LifeStatus::Critical
    }
}

/// Remaining-throughput classification of a dynamic connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassStatus {
    Stable,
    Critical,
}

impl MassStatus {
    /// Lenient parse mirroring [`LifeStatus::from_feed`].
    pub fn from_feed(raw: &str) -> Self {
        if raw == "critical" {
            MassStatus::Critical
        } else {
            MassStatus::Stable
        }
    }

    pub fn is_critical(self) -> bool {
        self == MassStatus::Critical
    }
}

/// A system in the routing graph.
///
/// `class` is empty for known space, `"1"`..`"6"` for graded wormhole
/// classes, and [`HUB_CLASS`] for the hub system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemNode {
    pub name: String,
    pub security: f64,
    pub class: String,
    pub system_id: SystemId,
}

/// Ordered endpoint pair identifying a directed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub src: SystemId,
    pub dst: SystemId,
}

impl EdgeKey {
    pub fn new(src: SystemId, dst: SystemId) -> Self {
        Self { src, dst }
    }
}

/// Attributes of a directed connection. The same physical wormhole is
/// normally represented by two edges carrying their own side's signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEdge {
    pub signature: String,
    pub jump_mass: i64,
    pub life_status: LifeStatus,
    pub mass_status: MassStatus,
}

/// Minimal `{id, text}` pair used for system listings and route requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRef {
    pub id: SystemId,
    pub text: String,
}

/// Mutable graph under assembly during a refresh cycle.
///
/// A refresh builds a fresh store in isolation, finalizes it, and converts
/// it into an immutable [`crate::snapshot::Snapshot`] for publication.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    pub nodes: HashMap<SystemId, SystemNode>,
    pub edges: HashMap<EdgeKey, ConnectionEdge>,
    pub adjacency: HashMap<SystemId, Vec<SystemId>>,
    pub name_to_id: HashMap<String, SystemId>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a system node and register its name for lookups.
    pub fn add_node(&mut self, node: SystemNode) {
        self.name_to_id.insert(node.name.clone(), node.system_id);
        self.adjacency.entry(node.system_id).or_default();
        self.nodes.insert(node.system_id, node);
    }

    /// Insert a directed edge. Duplicate ordered pairs are last-writer-wins
    /// on attributes; the adjacency list is deduplicated in [`finalize`].
    ///
    /// [`finalize`]: GraphStore::finalize
    pub fn add_edge(&mut self, key: EdgeKey, edge: ConnectionEdge) {
        self.adjacency.entry(key.src).or_default().push(key.dst);
        self.edges.insert(key, edge);
    }

    pub fn has_edge(&self, src: SystemId, dst: SystemId) -> bool {
        self.edges.contains_key(&EdgeKey::new(src, dst))
    }

    pub fn contains_system(&self, id: SystemId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Lookup a system identifier by its case-sensitive name.
    pub fn system_id_by_name(&self, name: &str) -> Option<SystemId> {
        self.name_to_id.get(name).copied()
    }

    /// Sort and dedup every adjacency list so traversal order is
    /// deterministic regardless of feed iteration order.
    pub fn finalize(&mut self) {
        for neighbours in self.adjacency.values_mut() {
            neighbours.sort_unstable();
            neighbours.dedup();
        }
    }
}
