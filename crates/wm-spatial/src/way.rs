//! Road way geometry and point-to-way matching.
//!
//! # Local frames
//!
//! Every [`Way`] carries its own [`LocalMap`] centred at the midpoint of its
//! bounding box.  All planar work (segment bearings, nearest-point search,
//! lateral offsets) happens in that frame, so no projection has to stay
//! accurate across a whole region.
//!
//! # Bearings
//!
//! Segment `k` joins point `k` to point `k + 1`; its bearing is
//! `atan2(Δy, Δx)` in the local plane (0 = east, counter-clockwise).  For a
//! way tagged one-way *against* its node order, every bearing is rotated by
//! `π` so that `directions` always describes the legal travel direction.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use wm_core::angle::{self, bearing_distance};
use wm_core::{GeoBox, GeoPoint, LocalMap, NodeId, WayId};

use crate::{SpatialError, SpatialResult};

/// Way metadata as key/value pairs (OSM tags).
pub type Tags = BTreeMap<String, String>;

// ── Node lookup ───────────────────────────────────────────────────────────────

/// Resolves node references to coordinates during way construction.
pub trait NodeLookup {
    fn node_pos(&self, id: NodeId) -> Option<GeoPoint>;
}

impl<S: BuildHasher> NodeLookup for HashMap<NodeId, GeoPoint, S> {
    #[inline]
    fn node_pos(&self, id: NodeId) -> Option<GeoPoint> {
        self.get(&id).copied()
    }
}

impl NodeLookup for BTreeMap<NodeId, GeoPoint> {
    #[inline]
    fn node_pos(&self, id: NodeId) -> Option<GeoPoint> {
        self.get(&id).copied()
    }
}

/// Raw way definition: ordered node references plus tags.
#[derive(Clone, Debug, Default)]
pub struct WayDef {
    pub nodes: Vec<NodeId>,
    pub tags:  Tags,
}

// ── Directionality ────────────────────────────────────────────────────────────

/// Legal travel direction(s) of a way relative to its node order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directionality {
    /// One-way in node order.
    Forward,
    /// One-way against node order.
    Backward,
    /// Travel allowed both ways.
    Both,
}

impl Directionality {
    /// Classify from the `oneway` tag.
    ///
    /// Unknown values (`alternating`, `reversible`, typos) are treated as no
    /// restriction.
    pub fn from_tags(tags: &Tags) -> Self {
        match tags.get("oneway").map(|v| v.trim()) {
            Some("yes" | "true" | "1") => Directionality::Forward,
            Some("-1" | "reverse")     => Directionality::Backward,
            _                          => Directionality::Both,
        }
    }

    #[inline]
    pub fn is_directional(self) -> bool {
        self != Directionality::Both
    }
}

// ── Match result ──────────────────────────────────────────────────────────────

/// Which traversal of the way a match assumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Travelling along the way's legal (or node-order) direction.
    Forward,
    /// Travelling against it; only reported for two-way roads.
    Backward,
}

impl Orientation {
    /// `+1` or `-1`.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Forward  => 1,
            Orientation::Backward => -1,
        }
    }
}

/// Result of matching one observation against one way.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayMatch {
    pub way_id: WayId,
    /// Distance from the observation to the nearest point on the way, metres.
    pub distance_m: f64,
    /// Nearest point on the way.
    pub projected: GeoPoint,
    /// Angle between travel direction and way bearing, radians in `[0, π]`.
    pub direction_deviation: f64,
    pub orientation: Orientation,
    /// Index of the winning segment (joins point `segment` to `segment + 1`).
    pub segment: usize,
}

// ── Way ───────────────────────────────────────────────────────────────────────

/// One road polyline in geographic and local-plane coordinates.
///
/// Immutable after construction; share across threads behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Way {
    id:             WayId,
    tags:           Tags,
    points:         Vec<GeoPoint>,
    points_xy:      Vec<[f64; 2]>,
    bbox:           GeoBox,
    local_map:      LocalMap,
    directions:     Vec<f64>,
    directionality: Directionality,
}

impl Way {
    /// Build a way by resolving `def.nodes` through `nodes`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::EmptyGeometry`] if the node list is empty,
    /// [`SpatialError::NodeNotFound`] if a reference cannot be resolved.
    pub fn new<L: NodeLookup + ?Sized>(id: WayId, def: &WayDef, nodes: &L) -> SpatialResult<Self> {
        let points = def
            .nodes
            .iter()
            .map(|&node| {
                nodes
                    .node_pos(node)
                    .ok_or(SpatialError::NodeNotFound { way: id, node })
            })
            .collect::<SpatialResult<Vec<_>>>()?;
        Self::from_coordinates(id, def.tags.clone(), points)
    }

    /// Build a way from already-resolved coordinates, in traversal order.
    pub fn from_coordinates(id: WayId, tags: Tags, points: Vec<GeoPoint>) -> SpatialResult<Self> {
        let bbox = GeoBox::from_points(&points).ok_or(SpatialError::EmptyGeometry(id))?;

        let local_map = LocalMap::new(bbox.center());
        let points_xy: Vec<[f64; 2]> = points.iter().map(|&p| local_map.transfer_to(p)).collect();

        let directionality = Directionality::from_tags(&tags);
        let directions = points_xy
            .windows(2)
            .map(|w| {
                let bearing = (w[1][1] - w[0][1]).atan2(w[1][0] - w[0][0]);
                match directionality {
                    Directionality::Backward => angle::reverse(bearing),
                    _ => bearing,
                }
            })
            .collect();

        Ok(Self {
            id,
            tags,
            points,
            points_xy,
            bbox,
            local_map,
            directions,
            directionality,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> WayId {
        self.id
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Geographic points in traversal order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Local-plane points, same order as [`points`](Self::points).
    pub fn points_xy(&self) -> &[[f64; 2]] {
        &self.points_xy
    }

    #[inline]
    pub fn bbox(&self) -> GeoBox {
        self.bbox
    }

    pub fn local_map(&self) -> &LocalMap {
        &self.local_map
    }

    /// Per-segment bearings (radians), one fewer than there are points.
    pub fn directions(&self) -> &[f64] {
        &self.directions
    }

    #[inline]
    pub fn directionality(&self) -> Directionality {
        self.directionality
    }

    #[inline]
    pub fn is_directional(&self) -> bool {
        self.directionality.is_directional()
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.directions.len()
    }

    // ── Matching ──────────────────────────────────────────────────────────

    /// Match an observation at `point`, travelling with bearing `direction`
    /// (radians, same convention as [`directions`](Self::directions)).
    ///
    /// Among all segments, the first one at minimal distance wins.  For a
    /// one-way road the deviation is measured against the legal bearing and
    /// the orientation is always [`Orientation::Forward`]; for a two-way road
    /// the reversed travel direction is tried as well and the closer of the
    /// two is reported (ties go to `Forward`).
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoSegments`] for a single-point way.
    pub fn distance_of_point(&self, point: GeoPoint, direction: f64) -> SpatialResult<WayMatch> {
        let xy = self.local_map.transfer_to(point);

        let mut best: Option<(f64, usize, [f64; 2])> = None;
        for (k, w) in self.points_xy.windows(2).enumerate() {
            let d = [w[1][0] - w[0][0], w[1][1] - w[0][1]];
            let (dist, projected) = nearest_on_segment(w[0], d, xy);
            if best.is_none_or(|(b, _, _)| dist < b) {
                best = Some((dist, k, projected));
            }
        }
        let (distance_m, segment, projected_xy) = best.ok_or(SpatialError::NoSegments(self.id))?;

        let bearing = self.directions[segment];
        let d0 = bearing_distance(direction, bearing);
        let (direction_deviation, orientation) = if self.is_directional() {
            (d0, Orientation::Forward)
        } else {
            let d180 = bearing_distance(direction + std::f64::consts::PI, bearing);
            if d0 <= d180 {
                (d0, Orientation::Forward)
            } else {
                (d180, Orientation::Backward)
            }
        };

        Ok(WayMatch {
            way_id: self.id,
            distance_m,
            projected: self.local_map.transfer_from(projected_xy),
            direction_deviation,
            orientation,
            segment,
        })
    }

    // ── Geometry export ───────────────────────────────────────────────────

    /// The way's polyline, optionally reversed and shifted sideways.
    ///
    /// `lateral_offset_m > 0` moves every node to the left of the node-order
    /// direction, along the average of the unit normals of its adjacent
    /// segments.  `reverse` only flips the output order; the side is always
    /// taken relative to node order.  Nodes whose only adjacent segments have
    /// zero length stay in place, and single-point ways are returned as-is.
    pub fn coordinates(&self, reverse: bool, lateral_offset_m: f64) -> Vec<GeoPoint> {
        let mut out = if lateral_offset_m == 0.0 || self.points_xy.len() < 2 {
            self.points.clone()
        } else {
            self.offset_points(lateral_offset_m)
        };
        if reverse {
            out.reverse();
        }
        out
    }

    fn offset_points(&self, offset: f64) -> Vec<GeoPoint> {
        let c = &self.points_xy;

        // Left-pointing unit normal of each segment; `None` for zero length.
        let normals: Vec<Option<[f64; 2]>> = c
            .windows(2)
            .map(|w| {
                let (dx, dy) = (w[1][0] - w[0][0], w[1][1] - w[0][1]);
                let len = dx.hypot(dy);
                (len > 0.0).then(|| [-dy / len, dx / len])
            })
            .collect();

        let last = normals.len() - 1;
        (0..c.len())
            .map(|i| {
                let prev = normals[i.saturating_sub(1)];
                let next = normals[i.min(last)];
                let sum = [prev, next]
                    .into_iter()
                    .flatten()
                    .fold([0.0, 0.0], |a, n| [a[0] + n[0], a[1] + n[1]]);
                let len = sum[0].hypot(sum[1]);
                let moved = if len > 0.0 {
                    [c[i][0] + sum[0] / len * offset, c[i][1] + sum[1] / len * offset]
                } else {
                    c[i]
                };
                self.local_map.transfer_from(moved)
            })
            .collect()
    }
}

// ── Segment projection ────────────────────────────────────────────────────────

/// Closest point to `x` on the segment from `p0` to `p0 + d`, and the
/// distance to it.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end snap to that endpoint.  A zero-length segment degenerates to `p0`.
pub fn nearest_on_segment(p0: [f64; 2], d: [f64; 2], x: [f64; 2]) -> (f64, [f64; 2]) {
    let c = [x[0] - p0[0], x[1] - p0[1]];
    let dd = d[0] * d[0] + d[1] * d[1];

    let x_star = if dd > 0.0 {
        let lambda = ((d[0] * c[0] + d[1] * c[1]) / dd).clamp(0.0, 1.0);
        [p0[0] + lambda * d[0], p0[1] + lambda * d[1]]
    } else {
        p0
    };

    let dist = (x_star[0] - x[0]).hypot(x_star[1] - x[1]);
    (dist, x_star)
}
