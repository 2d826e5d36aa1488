//! Tile-based way sources.
//!
//! Upstream road geometry is usually served in slippy-map tiles (`z/x/y`,
//! Web Mercator).  A [`TileSource`] hands out the raw records of one tile;
//! [`load_tile`] turns them into [`Way`]s ready for a
//! [`WayContainer`](crate::WayContainer).

use std::f64::consts::PI;

use tracing::{debug, warn};

use wm_core::{GeoBox, GeoPoint, WayId};

use crate::way::{Tags, Way};
use crate::{SpatialError, SpatialResult};

/// Deepest zoom level accepted by [`tile_bounds`].
pub const MAX_ZOOM: u8 = 30;

/// Raw way geometry as delivered by a tile source: points in lat/lon, in
/// traversal order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayRecord {
    pub id:     WayId,
    pub tags:   Tags,
    pub points: Vec<GeoPoint>,
}

/// Anything that can produce the ways intersecting a map tile.
pub trait TileSource {
    fn get_tile(&self, z: u8, x: u32, y: u32) -> SpatialResult<Vec<WayRecord>>;
}

/// Geographic bounds of slippy-map tile `(z, x, y)`.
///
/// # Errors
///
/// [`SpatialError::InvalidTile`] if `z > MAX_ZOOM` or `x`/`y` fall outside
/// the `2^z × 2^z` grid.
pub fn tile_bounds(z: u8, x: u32, y: u32) -> SpatialResult<GeoBox> {
    if z > MAX_ZOOM {
        return Err(SpatialError::InvalidTile { z, x, y });
    }
    let n = 1u64 << z;
    if u64::from(x) >= n || u64::from(y) >= n {
        return Err(SpatialError::InvalidTile { z, x, y });
    }

    let n = n as f64;
    let lon = |x: u32| f64::from(x) / n * 360.0 - 180.0;
    let lat = |y: u32| (PI * (1.0 - 2.0 * f64::from(y) / n)).sinh().atan().to_degrees();

    // Tile rows grow southwards.
    Ok(GeoBox::new(
        GeoPoint::new(lat(y + 1), lon(x)),
        GeoPoint::new(lat(y), lon(x + 1)),
    ))
}

/// Fetch tile `(z, x, y)` from `source` and build its ways.
///
/// Records without points are dropped with a warning.
pub fn load_tile<S: TileSource + ?Sized>(source: &S, z: u8, x: u32, y: u32) -> SpatialResult<Vec<Way>> {
    let records = source.get_tile(z, x, y)?;
    debug!(count = records.len(), z, x, y, "found ways in tile");

    let ways = records
        .into_iter()
        .filter_map(|r| match Way::from_coordinates(r.id, r.tags, r.points) {
            Ok(way) => Some(way),
            Err(e) => {
                warn!(error = %e, "dropping way");
                None
            }
        })
        .collect();
    Ok(ways)
}

// ── MemoryTileSource ──────────────────────────────────────────────────────────

/// A [`TileSource`] over records held in memory.
///
/// A record belongs to every tile its bounding box touches.
#[derive(Default)]
pub struct MemoryTileSource {
    records: Vec<(GeoBox, WayRecord)>,
}

impl MemoryTileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record.  Records with no points can never intersect a tile and
    /// are ignored.
    pub fn add(&mut self, record: WayRecord) {
        if let Some(bbox) = GeoBox::from_points(&record.points) {
            self.records.push((bbox, record));
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<WayRecord> for MemoryTileSource {
    fn from_iter<I: IntoIterator<Item = WayRecord>>(iter: I) -> Self {
        let mut source = Self::new();
        for record in iter {
            source.add(record);
        }
        source
    }
}

impl TileSource for MemoryTileSource {
    fn get_tile(&self, z: u8, x: u32, y: u32) -> SpatialResult<Vec<WayRecord>> {
        let bounds = tile_bounds(z, x, y)?;
        Ok(self
            .records
            .iter()
            .filter(|(bbox, _)| bbox.intersects(&bounds))
            .map(|(_, r)| r.clone())
            .collect())
    }
}
