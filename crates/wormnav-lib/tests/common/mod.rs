// Shared fixture builders for `wormnav-lib` integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};

use wormnav_lib::feeds::{
    CatalogRecord, FeedBundle, ReferenceData, SignatureRecord, StaticMap, TheraRecord,
    WormholeFeed, WormholeRecord, WormholeTypeRef,
};
use wormnav_lib::graph::{SystemId, SystemRef, STATIC_MAP_ID_OFFSET};
use wormnav_lib::routing::RouteOptions;

/// Deterministic "current time" for signature-age calculations.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
}

/// Catalog entry keyed the way the reference feed keys it.
pub fn system(id: SystemId, name: &str, security: f64, class: &str) -> (String, CatalogRecord) {
    (
        id.to_string(),
        CatalogRecord {
            name: name.to_string(),
            security: security.to_string(),
            class: class.to_string(),
        },
    )
}

/// Reference feed from catalog entries, static routes (absolute system ids),
/// and type-table entries (raw jump mass in kilograms).
pub fn reference(
    systems: Vec<(String, CatalogRecord)>,
    routes: &[(SystemId, SystemId)],
    types: &[(&str, i64)],
) -> ReferenceData {
    let mut shortest: HashMap<String, HashMap<String, i64>> = HashMap::new();
    for &(from, to) in routes {
        shortest
            .entry((from - STATIC_MAP_ID_OFFSET).to_string())
            .or_default()
            .insert((to - STATIC_MAP_ID_OFFSET).to_string(), 1);
    }

    ReferenceData {
        systems: systems.into_iter().collect(),
        map: StaticMap { shortest },
        wormholes: types
            .iter()
            .map(|&(code, jump)| (code.to_string(), WormholeTypeRef { jump }))
            .collect(),
    }
}

/// Signature record whose creation timestamp lies `age_hours` before `now`.
pub fn signature(
    record_id: &str,
    system: SystemId,
    code: &str,
    age_hours: f64,
    now: DateTime<Utc>,
) -> (String, SignatureRecord) {
    let created = now - Duration::seconds((age_hours * 3600.0) as i64);
    (
        record_id.to_string(),
        SignatureRecord {
            signature_id: code.to_string(),
            system_id: system.to_string(),
            life_time: created.format("%Y-%m-%d %H:%M:%S").to_string(),
        },
    )
}

pub fn wormhole(
    record_id: &str,
    wh_type: &str,
    life: &str,
    mass: &str,
    initial: &str,
    secondary: &str,
) -> (String, WormholeRecord) {
    (
        record_id.to_string(),
        WormholeRecord {
            life: life.to_string(),
            mass: mass.to_string(),
            wh_type: wh_type.to_string(),
            initial_id: initial.to_string(),
            secondary_id: secondary.to_string(),
        },
    )
}

pub fn wormhole_feed(
    wormholes: Vec<(String, WormholeRecord)>,
    signatures: Vec<(String, SignatureRecord)>,
) -> WormholeFeed {
    WormholeFeed {
        wormholes: wormholes.into_iter().collect(),
        signatures: signatures.into_iter().collect(),
    }
}

pub fn thera(
    in_system: SystemId,
    in_signature: &str,
    out_system: SystemId,
    out_signature: &str,
    remaining_hours: i64,
) -> TheraRecord {
    TheraRecord {
        out_system_id: out_system,
        out_signature: out_signature.to_string(),
        in_system_id: in_system,
        in_signature: in_signature.to_string(),
        remaining_hours,
    }
}

pub fn bundle(reference: ReferenceData) -> FeedBundle {
    FeedBundle {
        reference,
        ..FeedBundle::default()
    }
}

pub fn sys_ref(id: SystemId) -> SystemRef {
    SystemRef {
        id,
        text: String::new(),
    }
}

/// Unfiltered route request between two system ids.
pub fn options(from: SystemId, to: SystemId) -> RouteOptions {
    RouteOptions::direct(sys_ref(from), sys_ref(to))
}
