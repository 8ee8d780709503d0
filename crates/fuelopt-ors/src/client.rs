//! OpenRouteService HTTP client.

use anyhow::{bail, Context, Result};
use fuelopt_core::Route;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::polyline;

const METERS_PER_MILE: f64 = 1609.34;

/// HTTP client for the OpenRouteService geocoding and directions APIs.
pub struct OrsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    /// `[lon, lat]`, GeoJSON order
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    /// Encoded polyline
    geometry: String,
    summary: DirectionsSummary,
}

#[derive(Debug, Deserialize)]
struct DirectionsSummary {
    /// Meters
    distance: f64,
}

impl OrsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Resolve a free-text place name to `(lon, lat)`. The first feature of
    /// the response wins; zero features is an error naming the query.
    pub async fn geocode(&self, text: &str) -> Result<(f64, f64)> {
        let response = self
            .client
            .get(format!("{}/geocode/search", self.base_url))
            .query(&[("text", text)])
            .header("Authorization", &self.api_key)
            .send()
            .await
            .with_context(|| format!("geocode request for '{text}' failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("geocode for '{text}' returned {status}: {body}");
        }

        let parsed: GeocodeResponse = response
            .json()
            .await
            .with_context(|| format!("geocode response for '{text}' was not valid JSON"))?;
        let feature = parsed
            .features
            .into_iter()
            .next()
            .with_context(|| format!("no geocode results for '{text}'"))?;
        let [lon, lat] = feature.geometry.coordinates;
        Ok((lon, lat))
    }

    /// Driving route between two already-geocoded `(lon, lat)` pairs.
    pub async fn directions(&self, start: (f64, f64), end: (f64, f64)) -> Result<Route> {
        let response = self
            .client
            .post(format!("{}/v2/directions/driving-car/json", self.base_url))
            .header("Authorization", &self.api_key)
            .json(&serde_json::json!({
                "coordinates": [[start.0, start.1], [end.0, end.1]]
            }))
            .send()
            .await
            .context("directions request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("directions request returned {status}: {body}");
        }

        let parsed: DirectionsResponse = response
            .json()
            .await
            .context("directions response was not valid JSON")?;
        let route = parsed
            .routes
            .into_iter()
            .next()
            .context("directions response contained no routes")?;

        let points = polyline::decode(&route.geometry).context("failed to decode route geometry")?;
        let total_distance = route.summary.distance / METERS_PER_MILE;
        tracing::debug!(
            "Fetched route: {} points, {:.1} miles",
            points.len(),
            total_distance
        );

        Ok(Route {
            points,
            total_distance,
        })
    }

    /// Geocode both endpoints and fetch the driving route between them.
    pub async fn route(&self, start_text: &str, end_text: &str) -> Result<Route> {
        let start = self.geocode(start_text).await?;
        let end = self.geocode(end_text).await?;
        self.directions(start, end).await
    }
}
