//! Server configuration from environment.

use fuelopt_core::PlannerParams;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub stations_csv: String,
    pub ors_url: String,
    pub ors_api_key: String,
    pub tank_range_miles: f64,
    pub search_trigger_miles: f64,
    pub safety_buffer_miles: f64,
    pub miles_per_gallon: f64,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = PlannerParams::default();
        Self {
            server_port: env::var("FUELOPT_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            stations_csv: env::var("FUELOPT_STATIONS_CSV")
                .unwrap_or_else(|_| "fuel_prices_with_coords.csv".to_string()),
            ors_url: env::var("ORS_URL")
                .unwrap_or_else(|_| "https://api.openrouteservice.org".to_string()),
            ors_api_key: env::var("ORS_API_KEY").unwrap_or_default(),
            tank_range_miles: env_f64("FUELOPT_TANK_RANGE_MILES", defaults.tank_range_miles),
            search_trigger_miles: env_f64(
                "FUELOPT_SEARCH_TRIGGER_MILES",
                defaults.search_trigger_miles,
            ),
            safety_buffer_miles: env_f64(
                "FUELOPT_SAFETY_BUFFER_MILES",
                defaults.safety_buffer_miles,
            ),
            miles_per_gallon: env_f64("FUELOPT_MPG", defaults.miles_per_gallon),
        }
    }

    /// Planner defaults for requests that do not override them.
    pub fn planner_params(&self) -> PlannerParams {
        PlannerParams {
            tank_range_miles: self.tank_range_miles,
            search_trigger_miles: self.search_trigger_miles,
            safety_buffer_miles: self.safety_buffer_miles,
            miles_per_gallon: self.miles_per_gallon,
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}
