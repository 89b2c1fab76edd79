//! Decoded feed record types.
//!
//! Transport and wire-format handling live outside this crate; the fetch
//! wrapper hands the core already-decoded values of these shapes. The serde
//! renames document the upstream field names for that wrapper.

use std::collections::HashMap;

use serde::Deserialize;

/// Raw catalog record for a single system, keyed by its string identifier.
///
/// Security arrives as a string and is parsed during ingestion; records with
/// an unparseable identifier or security value are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub name: String,
    pub security: String,
    pub class: String,
}

/// Precomputed all-pairs shortest-hop table for known space.
///
/// Keys are system-id offsets relative to the catalog numbering scheme; the
/// hop counts in the inner map are unused, presence alone implies a route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticMap {
    pub shortest: HashMap<String, HashMap<String, i64>>,
}

/// Reference entry mapping a wormhole type code to its raw jump mass in
/// kilograms.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WormholeTypeRef {
    pub jump: i64,
}

/// The static reference feed: system catalog, known-space topology, and the
/// wormhole type table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceData {
    pub systems: HashMap<String, CatalogRecord>,
    pub map: StaticMap,
    pub wormholes: HashMap<String, WormholeTypeRef>,
}

/// Player-reported wormhole connection referencing two signature records.
#[derive(Debug, Clone, Deserialize)]
pub struct WormholeRecord {
    pub life: String,
    pub mass: String,
    #[serde(rename = "type")]
    pub wh_type: String,
    #[serde(rename = "initialID")]
    pub initial_id: String,
    #[serde(rename = "secondaryID")]
    pub secondary_id: String,
}

/// Player-reported signature record for one side of a connection.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureRecord {
    #[serde(rename = "signatureID")]
    pub signature_id: String,
    #[serde(rename = "systemID")]
    pub system_id: String,
    /// Creation timestamp, `YYYY-MM-DD HH:MM:SS`, UTC.
    #[serde(rename = "lifeTime")]
    pub life_time: String,
}

/// The player-reported dynamic connection feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WormholeFeed {
    pub wormholes: HashMap<String, WormholeRecord>,
    pub signatures: HashMap<String, SignatureRecord>,
}

/// One record of the public connection-exchange feed.
#[derive(Debug, Clone, Deserialize)]
pub struct TheraRecord {
    pub out_system_id: i64,
    pub out_signature: String,
    pub in_system_id: i64,
    pub in_signature: String,
    pub remaining_hours: i64,
}

/// Everything one refresh cycle consumes, decoded.
#[derive(Debug, Clone, Default)]
pub struct FeedBundle {
    pub reference: ReferenceData,
    pub wormholes: WormholeFeed,
    pub thera: Vec<TheraRecord>,
}
