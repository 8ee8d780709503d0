//! Station catalog loading from the OPIS price sheet.
//!
//! Rows with missing or unparseable coordinates or a non-positive price are a
//! data-quality problem, not a runtime error: they are dropped here and never
//! reach the spatial index.

use anyhow::{Context, Result};
use fuelopt_core::Station;
use serde::Deserialize;
use std::path::Path;

/// Raw CSV row; coordinates and price may be blank in the source data.
#[derive(Debug, Deserialize)]
struct CsvStation {
    #[serde(rename = "OPIS Truckstop ID")]
    id: u64,
    #[serde(rename = "Truckstop Name")]
    name: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Retail Price")]
    price: Option<f64>,
    #[serde(rename = "latitude")]
    latitude: Option<f64>,
    #[serde(rename = "longitude")]
    longitude: Option<f64>,
}

/// Load the station catalog, dropping rows that cannot be indexed.
pub fn load_stations(path: impl AsRef<Path>) -> Result<Vec<Station>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open station catalog {}", path.display()))?;

    let mut stations = Vec::new();
    let mut dropped = 0usize;

    for row in reader.deserialize::<CsvStation>() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::debug!("Skipping unreadable catalog row: {}", err);
                dropped += 1;
                continue;
            }
        };

        let (Some(lat), Some(lon), Some(price)) = (row.latitude, row.longitude, row.price) else {
            dropped += 1;
            continue;
        };
        if !lat.is_finite() || !lon.is_finite() || !(price > 0.0) {
            dropped += 1;
            continue;
        }

        stations.push(Station {
            id: row.id,
            name: row.name,
            city: row.city,
            state: row.state,
            price,
            lat,
            lon,
        });
    }

    tracing::info!(
        "Loaded {} stations with coordinates ({} rows dropped)",
        stations.len(),
        dropped
    );
    Ok(stations)
}
