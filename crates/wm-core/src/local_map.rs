//! Local tangent-plane projection.
//!
//! # Model
//!
//! A flat-earth (equirectangular) approximation around a reference point
//! `origin`, on a sphere of radius [`EARTH_RADIUS_M`]:
//!
//! ```text
//! x = (lon − lon₀) · m_lon(lat₀)      // east, metres
//! y = (lat − lat₀) · m_lat            // north, metres
//! ```
//!
//! with `m_lat = R·π/180` and `m_lon(φ) = m_lat · cos φ`.  Over the extent of
//! one road (a few kilometres) the error is far below GPS noise.  Not valid
//! across the antimeridian or at the poles.

use crate::GeoPoint;

/// Equatorial radius used for the degree-to-metre scale, metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Metres per degree of latitude (constant on a sphere).
pub const METERS_PER_DEGREE_LAT: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Equirectangular projection centred at a fixed origin.
///
/// Cheap to copy; every `Way` in `wm-spatial` owns its own.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalMap {
    origin: GeoPoint,
    m_lat: f64,
    m_lon: f64,
}

impl LocalMap {
    pub fn new(origin: GeoPoint) -> Self {
        let (m_lat, m_lon) = Self::meters_per_degree(origin);
        Self { origin, m_lat, m_lon }
    }

    #[inline]
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Project a geographic point into the local plane, `[x, y]` in metres.
    #[inline]
    pub fn transfer_to(&self, p: GeoPoint) -> [f64; 2] {
        [
            (p.lon - self.origin.lon) * self.m_lon,
            (p.lat - self.origin.lat) * self.m_lat,
        ]
    }

    /// Inverse of [`transfer_to`](Self::transfer_to).
    ///
    /// At the poles `m_lon` is zero and the longitude is not recoverable; the
    /// origin longitude is returned instead.
    #[inline]
    pub fn transfer_from(&self, xy: [f64; 2]) -> GeoPoint {
        let lon = if self.m_lon == 0.0 {
            self.origin.lon
        } else {
            self.origin.lon + xy[0] / self.m_lon
        };
        GeoPoint::new(self.origin.lat + xy[1] / self.m_lat, lon)
    }

    /// Local scale at `p`: `(metres per degree lat, metres per degree lon)`.
    #[inline]
    pub fn meters_per_degree(p: GeoPoint) -> (f64, f64) {
        let m_lon = METERS_PER_DEGREE_LAT * p.lat.to_radians().cos();
        // cos(90°) is ~6e-17 in floating point, never exactly zero.
        (METERS_PER_DEGREE_LAT, m_lon.max(0.0))
    }

    /// Local scale at `p`: `(degrees lat per metre, degrees lon per metre)`.
    ///
    /// The longitude factor grows without bound towards the poles.
    #[inline]
    pub fn degrees_per_meter(p: GeoPoint) -> (f64, f64) {
        let (m_lat, m_lon) = Self::meters_per_degree(p);
        (1.0 / m_lat, 1.0 / m_lon)
    }
}
