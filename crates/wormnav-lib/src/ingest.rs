//! Feed ingestion and graph assembly.
//!
//! A refresh cycle runs the catalog, static topology, wormhole, and Thera
//! ingesters in order into a fresh [`GraphStore`], resolves leftover jump
//! masses from endpoint classes, flags the hub system, and finalizes the
//! adjacency lists. Per-record failures are skipped and logged; they never
//! abort the refresh.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::feeds::{
    CatalogRecord, FeedBundle, StaticMap, TheraRecord, WormholeFeed, WormholeTypeRef,
};
use crate::graph::{
    ConnectionEdge, EdgeKey, GraphStore, LifeStatus, MassStatus, SystemId, SystemNode, HUB_CLASS,
    HUB_SYSTEM_NAME, STATIC_MAP_ID_OFFSET, UNKNOWN_SIGNATURE, UNRESOLVED_JUMP_MASS,
};

/// Jump mass for connections whose type designates the small class.
pub const SMALL_TYPE_JUMP_MASS: i64 = 5;

/// Jump mass for connections whose type designates the medium class.
pub const MEDIUM_TYPE_JUMP_MASS: i64 = 62;

/// Default jump mass when either endpoint is a class-1 system.
const CLASS_ONE_JUMP_MASS: i64 = 62;

/// Default jump mass when both endpoints sit in class 5 or 6.
const DEEP_CLASS_JUMP_MASS: i64 = 2_000;

/// Default jump mass when either endpoint sits in class 2, 3, or 4.
const MID_CLASS_JUMP_MASS: i64 = 375;

/// Default jump mass for connections between ungraded systems. Known
/// approximation: some low-sec and null-sec statics are tighter in practice.
const KSPACE_JUMP_MASS: i64 = 2_000;

/// Signature age beyond which the connection's life is forced to critical.
const SIGNATURE_CRITICAL_HOURS: f64 = 20.0;

/// Signature age beyond which the connection is too stale to trust at all.
const SIGNATURE_EXPIRY_HOURS: f64 = 24.0;

/// Thera feed connections at or under this many remaining hours are critical.
const THERA_CRITICAL_HOURS: i64 = 4;

const SIGNATURE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Assemble a fresh graph from one refresh cycle's decoded feeds.
///
/// `now` is the reference instant for signature-age classification; callers
/// outside tests pass `Utc::now()`.
pub fn build_graph(bundle: &FeedBundle, now: DateTime<Utc>) -> GraphStore {
    let mut store = GraphStore::new();

    add_catalog_nodes(&mut store, &bundle.reference.systems);
    add_static_edges(&mut store, &bundle.reference.map);
    add_wormhole_edges(
        &mut store,
        &bundle.wormholes,
        &bundle.reference.wormholes,
        now,
    );
    add_thera_edges(&mut store, &bundle.thera);
    resolve_jump_masses(&mut store);
    flag_hub_system(&mut store);
    store.finalize();

    debug!(
        systems = store.nodes.len(),
        connections = store.edges.len(),
        "graph assembled"
    );
    store
}

fn add_catalog_nodes(store: &mut GraphStore, systems: &HashMap<String, CatalogRecord>) {
    let mut skipped = 0usize;
    for (raw_id, record) in systems {
        let Ok(system_id) = raw_id.parse::<SystemId>() else {
            skipped += 1;
            continue;
        };
        let Ok(security) = record.security.parse::<f64>() else {
            skipped += 1;
            continue;
        };

        store.add_node(SystemNode {
            name: record.name.clone(),
            security,
            class: record.class.clone(),
            system_id,
        });
    }

    if skipped > 0 {
        warn!(skipped, "ignored catalog records with unparseable fields");
    }
}

fn add_static_edges(store: &mut GraphStore, map: &StaticMap) {
    let mut skipped = 0usize;
    for (raw_from, targets) in &map.shortest {
        let Ok(from_offset) = raw_from.parse::<i64>() else {
            skipped += 1;
            continue;
        };
        let from = from_offset + STATIC_MAP_ID_OFFSET;

        for raw_to in targets.keys() {
            let Ok(to_offset) = raw_to.parse::<i64>() else {
                skipped += 1;
                continue;
            };
            let to = to_offset + STATIC_MAP_ID_OFFSET;

            if !store.contains_system(from) || !store.contains_system(to) {
                skipped += 1;
                continue;
            }
            if store.has_edge(from, to) {
                continue;
            }

            store.add_edge(
                EdgeKey::new(from, to),
                ConnectionEdge {
                    signature: String::new(),
                    jump_mass: UNRESOLVED_JUMP_MASS,
                    life_status: LifeStatus::Stable,
                    mass_status: MassStatus::Stable,
                },
            );
        }
    }

    if skipped > 0 {
        debug!(skipped, "ignored static topology entries");
    }
}

fn add_wormhole_edges(
    store: &mut GraphStore,
    feed: &WormholeFeed,
    types: &HashMap<String, WormholeTypeRef>,
    now: DateTime<Utc>,
) {
    let mut skipped = 0usize;
    let mut stale = 0usize;

    for record in feed.wormholes.values() {
        let (Some(initial), Some(secondary)) = (
            feed.signatures.get(&record.initial_id),
            feed.signatures.get(&record.secondary_id),
        ) else {
            skipped += 1;
            continue;
        };

        let from_signature = short_signature(&initial.signature_id);
        let to_signature = short_signature(&secondary.signature_id);

        // Unknown on both sides means an auto-created fake wormhole record.
        if from_signature == UNKNOWN_SIGNATURE && to_signature == UNKNOWN_SIGNATURE {
            skipped += 1;
            continue;
        }

        let Ok(from_system) = initial.system_id.parse::<SystemId>() else {
            skipped += 1;
            continue;
        };
        let Ok(to_system) = secondary.system_id.parse::<SystemId>() else {
            skipped += 1;
            continue;
        };
        if !store.contains_system(from_system) || !store.contains_system(to_system) {
            skipped += 1;
            continue;
        }

        let Ok(created) = NaiveDateTime::parse_from_str(&initial.life_time, SIGNATURE_TIME_FORMAT)
        else {
            skipped += 1;
            continue;
        };
        let age_hours = (now - created.and_utc()).num_seconds() as f64 / 3600.0;
        if age_hours > SIGNATURE_EXPIRY_HOURS {
            stale += 1;
            continue;
        }

        let mut life_status = LifeStatus::from_feed(&record.life);
        if age_hours > SIGNATURE_CRITICAL_HOURS {
            life_status = LifeStatus::Critical;
        }

        let jump_mass = type_jump_mass(&record.wh_type, types);
        let mass_status = MassStatus::from_feed(&record.mass);

        store.add_edge(
            EdgeKey::new(from_system, to_system),
            ConnectionEdge {
                signature: from_signature,
                jump_mass,
                life_status,
                mass_status,
            },
        );
        store.add_edge(
            EdgeKey::new(to_system, from_system),
            ConnectionEdge {
                signature: to_signature,
                jump_mass,
                life_status,
                mass_status,
            },
        );
    }

    if skipped > 0 || stale > 0 {
        debug!(skipped, stale, "ignored wormhole feed records");
    }
}

fn add_thera_edges(store: &mut GraphStore, records: &[TheraRecord]) {
    let mut skipped = 0usize;

    for record in records {
        if !store.contains_system(record.in_system_id) || !store.contains_system(record.out_system_id)
        {
            skipped += 1;
            continue;
        }

        let life_status = if record.remaining_hours <= THERA_CRITICAL_HOURS {
            LifeStatus::Critical
        } else {
            LifeStatus::Stable
        };

        store.add_edge(
            EdgeKey::new(record.in_system_id, record.out_system_id),
            ConnectionEdge {
                signature: truncate_signature(&record.in_signature),
                jump_mass: UNRESOLVED_JUMP_MASS,
                life_status,
                mass_status: MassStatus::Stable,
            },
        );
        store.add_edge(
            EdgeKey::new(record.out_system_id, record.in_system_id),
            ConnectionEdge {
                signature: truncate_signature(&record.out_signature),
                jump_mass: UNRESOLVED_JUMP_MASS,
                life_status,
                mass_status: MassStatus::Stable,
            },
        );
    }

    if skipped > 0 {
        debug!(skipped, "ignored Thera feed records referencing unknown systems");
    }
}

/// Assign a class-derived jump mass to every edge still carrying the
/// unresolved sentinel. Never touches an already-resolved mass.
fn resolve_jump_masses(store: &mut GraphStore) {
    let GraphStore { nodes, edges, .. } = store;
    for (key, edge) in edges.iter_mut() {
        if edge.jump_mass != UNRESOLVED_JUMP_MASS {
            continue;
        }
        let (Some(src), Some(dst)) = (nodes.get(&key.src), nodes.get(&key.dst)) else {
            continue;
        };
        edge.jump_mass = default_jump_mass(&src.class, &dst.class);
    }
}

fn default_jump_mass(src_class: &str, dst_class: &str) -> i64 {
    let deep = |class: &str| matches!(class, "5" | "6");
    let mid = |class: &str| matches!(class, "2" | "3" | "4");

    if src_class == "1" || dst_class == "1" {
        CLASS_ONE_JUMP_MASS
    } else if deep(src_class) && deep(dst_class) {
        DEEP_CLASS_JUMP_MASS
    } else if mid(src_class) || mid(dst_class) {
        MID_CLASS_JUMP_MASS
    } else {
        KSPACE_JUMP_MASS
    }
}

/// Override the hub system's class so security-based filters never drop it.
fn flag_hub_system(store: &mut GraphStore) {
    let Some(id) = store.system_id_by_name(HUB_SYSTEM_NAME) else {
        return;
    };
    if let Some(node) = store.nodes.get_mut(&id) {
        node.class = HUB_CLASS.to_string();
    }
}

/// Normalize a signature to its three-character uppercase short code, or the
/// unknown sentinel when the side was never scanned.
fn short_signature(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_SIGNATURE.to_string();
    }
    truncate_signature(raw).to_uppercase()
}

fn truncate_signature(raw: &str) -> String {
    raw.chars().take(3).collect()
}

fn type_jump_mass(wh_type: &str, types: &HashMap<String, WormholeTypeRef>) -> i64 {
    match wh_type {
        "SML" => SMALL_TYPE_JUMP_MASS,
        "MED" => MEDIUM_TYPE_JUMP_MASS,
        _ => types
            .get(wh_type)
            .map(|reference| reference.jump / 1_000_000)
            .unwrap_or(UNRESOLVED_JUMP_MASS),
    }
}
