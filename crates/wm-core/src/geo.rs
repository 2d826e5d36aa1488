//! Geographic coordinate and bounding-box types.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Matching reports lateral
//! distances at sub-metre resolution, which single precision cannot hold at
//! typical latitudes and longitudes.

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both coordinates are finite (no NaN, no infinity).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Independent of any [`LocalMap`](crate::LocalMap); useful as a
    /// cross-check of planar distances over short ranges.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// `[lat, lon]` array form, the key layout used by the spatial index.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl From<(f64, f64)> for GeoPoint {
    #[inline]
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat, self.lon)
    }
}

// ── GeoBox ────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in lat/lon.  `min` holds the componentwise
/// minimum, `max` the componentwise maximum.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl GeoBox {
    #[inline]
    pub fn new(min: GeoPoint, max: GeoPoint) -> Self {
        Self { min, max }
    }

    /// Tight envelope of `points`.  Returns `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = *points.first()?;
        let bbox = points[1..].iter().fold(
            GeoBox { min: first, max: first },
            |b, p| GeoBox {
                min: GeoPoint::new(b.min.lat.min(p.lat), b.min.lon.min(p.lon)),
                max: GeoPoint::new(b.max.lat.max(p.lat), b.max.lon.max(p.lon)),
            },
        );
        Some(bbox)
    }

    /// A box of half-widths `(d_lat, d_lon)` degrees around `center`.
    #[inline]
    pub fn around(center: GeoPoint, d_lat: f64, d_lon: f64) -> Self {
        Self {
            min: GeoPoint::new(center.lat - d_lat, center.lon - d_lon),
            max: GeoPoint::new(center.lat + d_lat, center.lon + d_lon),
        }
    }

    /// Midpoint of the box.
    #[inline]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min.lat + self.max.lat) * 0.5,
            (self.min.lon + self.max.lon) * 0.5,
        )
    }

    /// `true` if the boxes share at least one point (touching counts).
    #[inline]
    pub fn intersects(&self, other: &GeoBox) -> bool {
        self.min.lat <= other.max.lat
            && other.min.lat <= self.max.lat
            && self.min.lon <= other.max.lon
            && other.min.lon <= self.max.lon
    }

    /// `true` if the interiors overlap on both axes (touching does not count).
    #[inline]
    pub fn overlaps_strict(&self, other: &GeoBox) -> bool {
        self.min.lat < other.max.lat
            && other.min.lat < self.max.lat
            && self.min.lon < other.max.lon
            && other.min.lon < self.max.lon
    }

    /// `true` if `p` lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.min.lat <= p.lat && p.lat <= self.max.lat
            && self.min.lon <= p.lon && p.lon <= self.max.lon
    }
}
