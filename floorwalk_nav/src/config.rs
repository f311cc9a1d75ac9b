// Data-driven navigation configuration.
//
// The tunable parameters of graph construction live in `NavConfig`, loaded
// from JSON at startup and never mutated afterwards. Every field has a
// serde default, so a config file only needs to name what it overrides and
// an empty object `{}` yields the stock behavior.
//
// Both values must be non-negative: the Dijkstra search stops as soon as
// the goal is popped, which is only correct without negative edge weights.
// `from_json()` rejects such configs before any graph is built.
//
// See also: `nav.rs`, which reads both values while building the graph.

use crate::error::{NavError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Graph construction parameters. Loaded from JSON, never mutated at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Corridor nodes on the same floor this close to each other (inclusive)
    /// are joined, which is how separately drawn corridors meet at
    /// intersections.
    #[serde(default = "default_corridor_snap_distance")]
    pub corridor_snap_distance: f64,

    /// Weight given to any edge whose endpoints are on different floors,
    /// regardless of its geometric length. With the default of 1, a floor
    /// change is nearly free compared to pixel distances on a floor.
    #[serde(default = "default_floor_change_cost")]
    pub floor_change_cost: f64,
}

fn default_corridor_snap_distance() -> f64 {
    18.0
}

fn default_floor_change_cost() -> f64 {
    1.0
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            corridor_snap_distance: default_corridor_snap_distance(),
            floor_change_cost: default_floor_change_cost(),
        }
    }
}

impl NavConfig {
    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make edge weights negative or undefined.
    pub fn validate(&self) -> Result<()> {
        if !(self.floor_change_cost.is_finite() && self.floor_change_cost >= 0.0) {
            return Err(NavError::InvalidConfig(format!(
                "floor_change_cost must be a finite non-negative number, got {}",
                self.floor_change_cost
            )));
        }
        // Infinity is allowed here: it joins every corridor node on a floor.
        if self.corridor_snap_distance.is_nan() || self.corridor_snap_distance < 0.0 {
            return Err(NavError::InvalidConfig(format!(
                "corridor_snap_distance must be non-negative, got {}",
                self.corridor_snap_distance
            )));
        }
        Ok(())
    }
}
