//! Spatial-subsystem error type.

use thiserror::Error;

use wm_core::{NodeId, WayId, WmError};

/// Errors produced by `wm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("way {0} has no nodes")]
    EmptyGeometry(WayId),

    #[error("way {way} references unknown node {node}")]
    NodeNotFound { way: WayId, node: NodeId },

    #[error("way {0} is a single point and has no segments to match against")]
    NoSegments(WayId),

    #[error("tile ({z}, {x}, {y}) is outside the tile grid")]
    InvalidTile { z: u8, x: u32, y: u32 },

    #[error("way data parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] WmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
