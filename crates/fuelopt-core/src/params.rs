//! Operating parameters for projection and planning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Vehicle range and search parameters for the fuel stop planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerParams {
    /// Full-tank driving range in miles
    pub tank_range_miles: f64,
    /// Route mile offset at which the window search begins looking for the
    /// next stop; must stay below the tank range
    pub search_trigger_miles: f64,
    /// Width of the window search's lookahead, miles
    pub safety_buffer_miles: f64,
    /// Fuel economy used for cost accounting
    pub miles_per_gallon: f64,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            tank_range_miles: 500.0,
            search_trigger_miles: 350.0,
            safety_buffer_miles: 150.0,
            miles_per_gallon: 10.0,
        }
    }
}

impl PlannerParams {
    /// Check that every parameter is a positive, finite number and that the
    /// search trigger leaves range to work with.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("tank_range_miles", self.tank_range_miles),
            ("search_trigger_miles", self.search_trigger_miles),
            ("safety_buffer_miles", self.safety_buffer_miles),
            ("miles_per_gallon", self.miles_per_gallon),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParamsError::NonPositive { name, value });
            }
        }
        if self.search_trigger_miles >= self.tank_range_miles {
            return Err(ParamsError::TriggerBeyondRange {
                trigger: self.search_trigger_miles,
                range: self.tank_range_miles,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("{name} must be a positive number, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("search trigger ({trigger} mi) must be below tank range ({range} mi)")]
    TriggerBeyondRange { trigger: f64, range: f64 },
}

/// Stop-selection strategy.
///
/// `FurthestReachable` is the canonical mode. `PriceFirstWindow` is the older
/// window-scan heuristic, kept selectable because the two disagree on sparse
/// catalogs; the modes are never mixed within one plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerStrategy {
    #[default]
    FurthestReachable,
    PriceFirstWindow,
}

/// Route projection tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Subsampling target; the stride is chosen so roughly this many route
    /// points are examined
    pub target_samples: usize,
    /// Station discovery radius around each sample, miles
    pub discovery_radius_miles: f64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            target_samples: 1500,
            discovery_radius_miles: 7.0,
        }
    }
}
