//! Bounding-box index over ways.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) keyed by each way's `[lat, lon]` bounding box.
//! A query expands the observation into a box of `± radius` metres, converted
//! to degrees with the local scale *at the observation*, and returns every
//! way whose box intersects it.  The result is a superset of the ways within
//! `radius`: use [`Way::distance_of_point`] to get exact distances.
//!
//! The container is write-then-read.  Once loaded it is `Send + Sync` and can
//! be queried from any number of threads.

use std::sync::Arc;

use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

use wm_core::{GeoBox, GeoPoint, LocalMap, WayId};

use crate::way::Way;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: the way's bounding box corners and a shared
/// reference to the way itself.
struct WayEntry {
    min: [f64; 2], // [lat, lon]
    max: [f64; 2],
    way: Arc<Way>,
}

impl WayEntry {
    fn new(way: Arc<Way>) -> Self {
        let bbox = way.bbox();
        Self {
            min: bbox.min.to_array(),
            max: bbox.max.to_array(),
            way,
        }
    }
}

impl RTreeObject for WayEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ── WayContainer ──────────────────────────────────────────────────────────────

/// Spatial index of [`Way`]s by bounding box.
pub struct WayContainer {
    /// Default search radius for [`find_near`](Self::find_near), metres.
    d_max: f64,
    tree:  RTree<WayEntry>,
}

impl WayContainer {
    /// Empty container with default search radius `d_max` metres.
    pub fn new(d_max: f64) -> Self {
        Self { d_max, tree: RTree::new() }
    }

    /// Build a container from all `ways` at once.
    ///
    /// O(N log N) bulk load; produces a better-balanced tree than N inserts.
    pub fn bulk_load<I>(ways: I, d_max: f64) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<Way>>,
    {
        let entries: Vec<WayEntry> = ways
            .into_iter()
            .map(|w| WayEntry::new(w.into()))
            .collect();
        debug!(ways = entries.len(), "bulk-loading way index");
        Self { d_max, tree: RTree::bulk_load(entries) }
    }

    /// Add a way.  Degenerate (single-point) bounding boxes are fine.
    pub fn insert(&mut self, way: impl Into<Arc<Way>>) {
        self.tree.insert(WayEntry::new(way.into()));
    }

    #[inline]
    pub fn d_max(&self) -> f64 {
        self.d_max
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// All indexed ways, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Way>> + '_ {
        self.tree.iter().map(|e| &e.way)
    }

    /// Look up a way by id.  Linear scan; intended for diagnostics and tests.
    pub fn get(&self, id: WayId) -> Option<&Arc<Way>> {
        self.iter().find(|w| w.id() == id)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The lat/lon box of `± d_max` metres around `point`.
    ///
    /// Negative or NaN radii are treated as zero.  Near the poles, where the
    /// longitude scale blows up, the box spans all longitudes.
    pub fn query_box(point: GeoPoint, d_max: f64) -> GeoBox {
        let d_max = d_max.max(0.0);
        let (d_lat_per_m, d_lon_per_m) = LocalMap::degrees_per_meter(point);
        let d_lat = d_lat_per_m * d_max;
        let mut d_lon = d_lon_per_m * d_max;
        if !d_lon.is_finite() {
            d_lon = 360.0;
        }
        GeoBox::around(point, d_lat, d_lon)
    }

    /// Ways whose bounding box intersects the `± d_max` metre box around
    /// `point`.
    ///
    /// Returns an empty list if `point` has a non-finite coordinate.
    pub fn find_near_candidates(&self, point: GeoPoint, d_max: f64) -> Vec<&Arc<Way>> {
        if !point.is_finite() {
            return Vec::new();
        }
        let bb = Self::query_box(point, d_max);
        let envelope = AABB::from_corners(bb.min.to_array(), bb.max.to_array());

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|e| &e.way)
            .collect()
    }

    /// [`find_near_candidates`](Self::find_near_candidates) with the
    /// container's default radius.
    pub fn find_near(&self, point: GeoPoint) -> Vec<&Arc<Way>> {
        self.find_near_candidates(point, self.d_max)
    }
}

impl Default for WayContainer {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<W: Into<Arc<Way>>> FromIterator<W> for WayContainer {
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        Self::bulk_load(iter, 0.0)
    }
}
