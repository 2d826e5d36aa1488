//! `wm-spatial`: road ways, bounding-box indexing, and observation matching.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`way`]       | `Way`, `WayMatch`, `Directionality`, segment projection     |
//! | [`container`] | `WayContainer` (R-tree over way bounding boxes)             |
//! | [`matcher`]   | `WayMatcher`, `Observation`                                 |
//! | [`source`]    | `TileSource`, `MemoryTileSource`, tile bounds               |
//! | [`loader`]    | `load_ways_csv`, `load_ways_reader`                         |
//! | [`osm`]       | `load_ways_from_pbf` (feature = `"osm"` only)               |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `osm`      | Enables OSM PBF loading via the `osmpbf` crate.           |
//! | `parallel` | Rayon batch matching in `WayMatcher::match_batch`.        |
//! | `fx-hash`  | FxHash node tables in the loaders.                        |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod container;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod source;
pub mod way;

#[cfg(feature = "osm")]
pub mod osm;


pub use container::WayContainer;
pub use error::{SpatialError, SpatialResult};
pub use loader::{load_ways_csv, load_ways_reader};
pub use matcher::{Observation, WayMatcher};
pub use source::{load_tile, tile_bounds, MemoryTileSource, TileSource, WayRecord};
pub use way::{
    nearest_on_segment, Directionality, NodeLookup, Orientation, Tags, Way, WayDef, WayMatch,
};
