//! OSM PBF loader, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use wm_spatial::{osm::load_ways_from_pbf, WayContainer};
//!
//! let ways = load_ways_from_pbf(Path::new("stuttgart.osm.pbf"))?;
//! let index = WayContainer::bulk_load(ways, 20.0);
//! ```
//!
//! # What is loaded
//!
//! Every `highway=*` way, with all of its tags.  Cycleways and footways are
//! kept: observations may come from bicycles.  Other features (buildings,
//! POIs, relations) are ignored.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a hash map for the first pass (ways
//! reference node IDs by OSM integer ID).  For a large city this is several
//! million entries.  The map is freed before the ways are returned.

use std::path::Path;

use osmpbf::{Element, ElementReader};
use tracing::{debug, warn};

use wm_core::{GeoPoint, NodeId, WayId};

use crate::way::{NodeLookup, Tags, Way, WayDef};
use crate::{SpatialError, SpatialResult};

#[cfg(feature = "fx-hash")]
type NodeMap = rustc_hash::FxHashMap<NodeId, GeoPoint>;
#[cfg(not(feature = "fx-hash"))]
type NodeMap = std::collections::HashMap<NodeId, GeoPoint>;

/// Load all highway ways from an OSM PBF file.
///
/// Ways that reference nodes missing from the file (common in clipped
/// extracts) are dropped with a warning.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] on parse errors.
pub fn load_ways_from_pbf(path: &Path) -> SpatialResult<Vec<Way>> {
    // ── Phase 1: collect all OSM nodes + highway ways in one sequential pass
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut all_nodes = NodeMap::default();
    let mut road_ways: Vec<(WayId, WayDef)> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(NodeId(n.id()), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(NodeId(n.id()), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Tags = w
                    .tags()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                if is_road(&tags) {
                    let nodes = w.refs().map(NodeId).collect();
                    road_ways.push((WayId(w.id()), WayDef { nodes, tags }));
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    debug!(nodes = all_nodes.len(), ways = road_ways.len(), "read OSM file");

    // ── Phase 2: build ways ───────────────────────────────────────────────
    Ok(build_ways(&road_ways, &all_nodes))
}

/// Whether a way with these tags is part of the road network.
pub(crate) fn is_road(tags: &Tags) -> bool {
    tags.contains_key("highway")
}

/// Resolve node references; ways with unresolvable nodes are dropped.
pub(crate) fn build_ways<L: NodeLookup>(defs: &[(WayId, WayDef)], nodes: &L) -> Vec<Way> {
    defs.iter()
        .filter_map(|(id, def)| match Way::new(*id, def, nodes) {
            Ok(way) => Some(way),
            Err(e) => {
                warn!(error = %e, "dropping way");
                None
            }
        })
        .collect()
}
