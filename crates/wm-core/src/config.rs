//! Matching configuration.

use std::f64::consts::PI;

use crate::{WmError, WmResult};

/// Parameters for matching observations against a way index.
///
/// Typically loaded from a TOML/JSON file by the application crate (feature
/// `serde`) and passed to the matcher.  Call [`validate`](Self::validate)
/// after loading.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Half-width of the candidate search box around each observation,
    /// metres.  Default: 20.
    pub search_radius_m: f64,

    /// Reject matches whose direction deviation exceeds this many radians.
    /// `None` accepts any deviation.
    pub max_direction_deviation: Option<f64>,

    /// Worker thread count for batch matching.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            search_radius_m: 20.0,
            max_direction_deviation: None,
            num_threads: None,
        }
    }
}

impl MatchConfig {
    /// Check value ranges.  Deviation is compared against `π`, the largest
    /// value a periodic bearing distance can take.
    pub fn validate(&self) -> WmResult<()> {
        if !self.search_radius_m.is_finite() || self.search_radius_m < 0.0 {
            return Err(WmError::Config(format!(
                "search_radius_m must be finite and >= 0, got {}",
                self.search_radius_m
            )));
        }
        if let Some(dev) = self.max_direction_deviation {
            if !dev.is_finite() || !(0.0..=PI).contains(&dev) {
                return Err(WmError::Config(format!(
                    "max_direction_deviation must lie in [0, π], got {dev}"
                )));
            }
        }
        if self.num_threads == Some(0) {
            return Err(WmError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
