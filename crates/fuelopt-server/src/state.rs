//! Shared application state.

use fuelopt_core::{Station, StationIndex};
use fuelopt_ors::OrsClient;

use crate::config::Config;

/// Application state: the indexed catalog, the routing client, and config.
///
/// Built once at startup. Nothing here mutates after construction, so
/// concurrent requests share it behind an `Arc` without locking.
pub struct AppState {
    index: StationIndex,
    ors: OrsClient,
    config: Config,
}

impl AppState {
    pub fn new(stations: Vec<Station>, config: Config) -> Self {
        let ors = OrsClient::new(config.ors_url.clone(), config.ors_api_key.clone());
        Self {
            index: StationIndex::build(stations),
            ors,
            config,
        }
    }

    pub fn index(&self) -> &StationIndex {
        &self.index
    }

    pub fn ors(&self) -> &OrsClient {
        &self.ors
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
