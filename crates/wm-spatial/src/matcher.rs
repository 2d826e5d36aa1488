//! Observation-to-way matching over a [`WayContainer`].
//!
//! The container narrows the search to ways whose bounding box is near the
//! observation; each candidate is then scored with
//! [`Way::distance_of_point`].  Single-point ways cannot be scored and are
//! skipped.

use tracing::trace;

use wm_core::{GeoPoint, MatchConfig};

use crate::container::WayContainer;
use crate::way::{Way, WayMatch};
use crate::{SpatialError, SpatialResult};

/// A single geo-located, direction-bearing observation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub point: GeoPoint,
    /// Travel bearing, radians counter-clockwise from east.
    pub direction: f64,
}

impl Observation {
    #[inline]
    pub fn new(point: GeoPoint, direction: f64) -> Self {
        Self { point, direction }
    }
}

/// Matches observations against the ways of one container.
///
/// Holds only a shared borrow of the container, so several matchers (or one
/// matcher across threads) can query the same index concurrently.
pub struct WayMatcher<'a> {
    container: &'a WayContainer,
    config:    MatchConfig,
    #[cfg(feature = "parallel")]
    pool:      Option<rayon::ThreadPool>,
}

impl<'a> WayMatcher<'a> {
    /// # Errors
    ///
    /// [`SpatialError::Core`] if `config` fails validation, or (feature
    /// `parallel`) the dedicated thread pool cannot be created.
    pub fn new(container: &'a WayContainer, config: MatchConfig) -> SpatialResult<Self> {
        config.validate()?;

        #[cfg(feature = "parallel")]
        let pool = match config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| wm_core::WmError::Config(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            container,
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Score one candidate; `None` if it cannot be scored or is rejected by
    /// the direction limit.
    fn evaluate(&self, way: &Way, obs: Observation) -> Option<WayMatch> {
        let m = match way.distance_of_point(obs.point, obs.direction) {
            Ok(m) => m,
            Err(SpatialError::NoSegments(id)) => {
                trace!(way = %id, "skipping single-point way");
                return None;
            }
            Err(e) => {
                trace!(way = %way.id(), error = %e, "skipping way");
                return None;
            }
        };
        // A NaN deviation (NaN travel direction) never satisfies a limit.
        match self.config.max_direction_deviation {
            Some(limit) if !(m.direction_deviation <= limit) => {
                trace!(way = %m.way_id, deviation = m.direction_deviation, "direction mismatch");
                None
            }
            _ => Some(m),
        }
    }

    /// Every acceptable match within the search radius, nearest first.
    ///
    /// Candidates at equal distance keep the order the index returned them.
    pub fn all_matches(&self, point: GeoPoint, direction: f64) -> Vec<WayMatch> {
        let obs = Observation::new(point, direction);
        let mut matches: Vec<WayMatch> = self
            .container
            .find_near_candidates(point, self.config.search_radius_m)
            .into_iter()
            .filter_map(|way| self.evaluate(way, obs))
            .collect();
        matches.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        matches
    }

    /// The nearest acceptable match within the search radius.
    ///
    /// The radius only bounds the bounding-box search; a returned match may
    /// lie slightly further away than `search_radius_m`.
    pub fn best_match(&self, point: GeoPoint, direction: f64) -> Option<WayMatch> {
        let obs = Observation::new(point, direction);
        self.container
            .find_near_candidates(point, self.config.search_radius_m)
            .into_iter()
            .filter_map(|way| self.evaluate(way, obs))
            .fold(None, |best: Option<WayMatch>, m| match best {
                Some(b) if b.distance_m <= m.distance_m => Some(b),
                _ => Some(m),
            })
    }

    /// [`best_match`](Self::best_match) for every observation.  Output order
    /// matches input order.
    pub fn match_batch(&self, observations: &[Observation]) -> Vec<Option<WayMatch>> {
        #[cfg(not(feature = "parallel"))]
        {
            observations
                .iter()
                .map(|o| self.best_match(o.point, o.direction))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let run = || -> Vec<Option<WayMatch>> {
                observations
                    .par_iter()
                    .map(|o| self.best_match(o.point, o.direction))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }
}
