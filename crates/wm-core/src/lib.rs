//! `wm-core`: foundational types for the way-matching workspace.
//!
//! This crate is a dependency of every other `wm-*` crate.  It has no `wm-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `WayId`, `NodeId`                                     |
//! | [`geo`]         | `GeoPoint`, `GeoBox`, haversine distance              |
//! | [`local_map`]   | `LocalMap` equirectangular projection                 |
//! | [`angle`]       | periodic bearing distance                             |
//! | [`config`]      | `MatchConfig`                                         |
//! | [`error`]       | `WmError`, `WmResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod angle;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod local_map;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use angle::periodic_distance;
pub use config::MatchConfig;
pub use error::{WmError, WmResult};
pub use geo::{GeoBox, GeoPoint};
pub use ids::{NodeId, WayId};
pub use local_map::LocalMap;
