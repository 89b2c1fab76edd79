//! Filtered shortest-path queries over a published snapshot.
//!
//! A query never mutates the snapshot it captured: the filter engine builds
//! an owned adjacency map that shares node and edge attributes with the
//! snapshot by reference, then breadth-first search runs over that copy.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{ConnectionEdge, EdgeKey, SystemId, SystemNode, SystemRef};
use crate::path::find_route_bfs;
use crate::snapshot::Snapshot;

/// Ungraded systems with a security rating strictly between zero and this
/// value count as low security.
const LOW_SECURITY_THRESHOLD: f64 = 0.45;

/// Per-request route filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOptions {
    pub from_system: SystemRef,
    pub to_system: SystemRef,
    #[serde(default)]
    pub avoid_systems: Vec<SystemRef>,
    #[serde(default)]
    pub ship_size: i64,
    #[serde(default)]
    pub exclude_unstable_connections: bool,
    #[serde(default)]
    pub exclude_unstable_mass_status: bool,
    #[serde(default)]
    pub exclude_low_security: bool,
    #[serde(default)]
    pub exclude_null_security: bool,
}

impl RouteOptions {
    /// Convenience constructor for an unfiltered query between two systems.
    pub fn direct(from: SystemRef, to: SystemRef) -> Self {
        Self {
            from_system: from,
            to_system: to,
            avoid_systems: Vec::new(),
            ship_size: 0,
            exclude_unstable_connections: false,
            exclude_unstable_mass_status: false,
            exclude_low_security: false,
            exclude_null_security: false,
        }
    }

    /// Parse a JSON route request produced by the host bridge.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(Error::RequestFormat)
    }
}

/// One step of a resolved route: the arrived-at system plus the connection
/// used to reach it. The origin system itself is never included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEntry {
    pub node: SystemNode,
    pub edge: ConnectionEdge,
}

/// Compute the minimum-hop route satisfying the request's filters.
///
/// Returns an empty sequence when the origin equals the destination or when
/// the destination is unreachable under the filters; neither is an error.
/// Fails only when the adjacency structure references a node or edge missing
/// from the snapshot's attribute maps.
pub fn find_path(snapshot: &Snapshot, options: &RouteOptions) -> Result<Vec<PathEntry>> {
    let adjacency = filtered_adjacency(snapshot, options);

    let Some(steps) = find_route_bfs(&adjacency, options.from_system.id, options.to_system.id)
    else {
        return Ok(Vec::new());
    };

    let mut entries = Vec::with_capacity(steps.len().saturating_sub(1));
    for pair in steps.windows(2) {
        let node = snapshot
            .nodes
            .get(&pair[1])
            .cloned()
            .ok_or(Error::NodeNotFound { system: pair[1] })?;
        let edge = snapshot
            .edges
            .get(&EdgeKey::new(pair[0], pair[1]))
            .cloned()
            .ok_or(Error::EdgeNotFound {
                from: pair[0],
                to: pair[1],
            })?;
        entries.push(PathEntry { node, edge });
    }

    Ok(entries)
}

/// Build the request-scoped adjacency copy, dropping disqualified edges and
/// every edge touching an excluded system. Filtering never errors; adjacency
/// entries without edge attributes are dropped silently.
fn filtered_adjacency(
    snapshot: &Snapshot,
    options: &RouteOptions,
) -> HashMap<SystemId, Vec<SystemId>> {
    let avoided: HashSet<SystemId> = options.avoid_systems.iter().map(|entry| entry.id).collect();

    let mut filtered = HashMap::with_capacity(snapshot.adjacency.len());
    for (&src, targets) in snapshot.adjacency.iter() {
        let Some(src_node) = snapshot.nodes.get(&src) else {
            continue;
        };
        if system_excluded(src_node, options, &avoided) {
            continue;
        }

        let mut out = Vec::new();
        for &dst in targets {
            let Some(dst_node) = snapshot.nodes.get(&dst) else {
                continue;
            };
            if system_excluded(dst_node, options, &avoided) {
                continue;
            }
            let Some(edge) = snapshot.edges.get(&EdgeKey::new(src, dst)) else {
                continue;
            };
            if !edge_allowed(edge, options) {
                continue;
            }
            out.push(dst);
        }
        filtered.insert(src, out);
    }

    filtered
}

fn edge_allowed(edge: &ConnectionEdge, options: &RouteOptions) -> bool {
    if options.ship_size > edge.jump_mass {
        return false;
    }
    if options.exclude_unstable_connections && edge.life_status.is_critical() {
        return false;
    }
    if options.exclude_unstable_mass_status && edge.mass_status.is_critical() {
        return false;
    }
    true
}

/// Graded-class systems carry no conventional security rating, so the
/// security flags only ever exclude ungraded systems.
fn system_excluded(node: &SystemNode, options: &RouteOptions, avoided: &HashSet<SystemId>) -> bool {
    if avoided.contains(&node.system_id) {
        return true;
    }
    if !node.class.is_empty() {
        return false;
    }

    (options.exclude_low_security && node.security > 0.0 && node.security < LOW_SECURITY_THRESHOLD)
        || (options.exclude_null_security && node.security <= 0.0)
}
