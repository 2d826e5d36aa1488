//! CSV way loader.
//!
//! # CSV format
//!
//! Two files.  Nodes, one row per node:
//!
//! ```csv
//! node_id,lat,lon
//! 1,48.7800,9.1800
//! 2,48.7810,9.1800
//! 3,48.7810,9.1815
//! ```
//!
//! Ways, one row per way.  `nodes` is a space-separated node list in
//! traversal order; `tags` is a `;`-separated list of `key=value` pairs and
//! may be empty:
//!
//! ```csv
//! way_id,nodes,tags
//! 100,1 2 3,highway=residential;oneway=yes
//! 101,3 1,
//! ```
//!
//! Every node a way references must appear in the nodes file.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wm_core::{GeoPoint, NodeId, WayId};

use crate::way::{Tags, Way, WayDef};
use crate::{SpatialError, SpatialResult};

#[cfg(feature = "fx-hash")]
type NodeMap = rustc_hash::FxHashMap<NodeId, GeoPoint>;
#[cfg(not(feature = "fx-hash"))]
type NodeMap = std::collections::HashMap<NodeId, GeoPoint>;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id: i64,
    lat:     f64,
    lon:     f64,
}

#[derive(Deserialize)]
struct WayRow {
    way_id: i64,
    nodes:  String,
    #[serde(default)]
    tags:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load ways from a nodes CSV and a ways CSV on disk.
pub fn load_ways_csv(nodes_path: &Path, ways_path: &Path) -> SpatialResult<Vec<Way>> {
    let nodes = std::fs::File::open(nodes_path)?;
    let ways = std::fs::File::open(ways_path)?;
    load_ways_reader(nodes, ways)
}

/// Like [`load_ways_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
///
/// # Errors
///
/// [`SpatialError::Parse`] on malformed rows, node lists, or tags;
/// [`SpatialError::NodeNotFound`] / [`SpatialError::EmptyGeometry`] from way
/// construction.
pub fn load_ways_reader<N: Read, W: Read>(nodes: N, ways: W) -> SpatialResult<Vec<Way>> {
    // ── Nodes ─────────────────────────────────────────────────────────────
    let mut node_map = NodeMap::default();
    for result in csv::Reader::from_reader(nodes).deserialize::<NodeRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        node_map.insert(NodeId(row.node_id), GeoPoint::new(row.lat, row.lon));
    }

    // ── Ways ──────────────────────────────────────────────────────────────
    let mut out = Vec::new();
    for result in csv::Reader::from_reader(ways).deserialize::<WayRow>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let id = WayId(row.way_id);
        let def = WayDef {
            nodes: parse_nodes(&row.nodes)?,
            tags:  parse_tags(&row.tags)?,
        };
        out.push(Way::new(id, &def, &node_map)?);
    }

    Ok(out)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_nodes(s: &str) -> SpatialResult<Vec<NodeId>> {
    s.split_whitespace()
        .map(|n| {
            n.parse::<NodeId>()
                .map_err(|_| SpatialError::Parse(format!("invalid node reference {n:?}")))
        })
        .collect()
}

/// Parse `key=value;key=value`.  Empty entries are ignored.
pub(crate) fn parse_tags(s: &str) -> SpatialResult<Tags> {
    s.split(';')
        .map(str::trim)
        .filter(|kv| !kv.is_empty())
        .map(|kv| match kv.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_owned(), v.trim().to_owned())),
            _ => Err(SpatialError::Parse(format!(
                "invalid tag {kv:?}: expected \"key=value\""
            ))),
        })
        .collect()
}
