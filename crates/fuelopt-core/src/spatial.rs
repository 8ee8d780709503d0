//! Half-degree grid index over the station catalog.
//!
//! Cells are ~34-55 miles on a side depending on latitude, so a 3x3
//! neighborhood scan covers every practical query radius while keeping each
//! query proportional to the neighborhood's station count, not the catalog.

use crate::geo::distance_miles;
use crate::models::{RoutePoint, Station};
use std::collections::HashMap;

/// Grid cell key: coordinates quantized to half-degree cells.
///
/// Stored as `floor(2 * degrees)` so the key is hashable without comparing
/// floats. Many stations share one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketKey {
    lat2: i32,
    lon2: i32,
}

impl BucketKey {
    pub fn for_coords(lat: f64, lon: f64) -> Self {
        Self {
            lat2: (2.0 * lat).floor() as i32,
            lon2: (2.0 * lon).floor() as i32,
        }
    }

    /// The 3x3 block of cells centered on this one. Covers stations that sit
    /// just across a cell boundary from the query point.
    fn neighborhood(self) -> impl Iterator<Item = BucketKey> {
        (-1..=1).flat_map(move |dlat| {
            (-1..=1).map(move |dlon| BucketKey {
                lat2: self.lat2 + dlat,
                lon2: self.lon2 + dlon,
            })
        })
    }
}

/// Build-once spatial hash answering "which stations are within r miles of a
/// point" without scanning the full catalog.
pub struct StationIndex {
    stations: Vec<Station>,
    buckets: HashMap<BucketKey, Vec<usize>>,
}

impl StationIndex {
    /// Bucket every station by its half-degree cell. O(n), done once per
    /// catalog load. Stations with non-finite coordinates are never indexed.
    pub fn build(stations: Vec<Station>) -> Self {
        let mut buckets: HashMap<BucketKey, Vec<usize>> = HashMap::new();
        for (idx, station) in stations.iter().enumerate() {
            if !station.lat.is_finite() || !station.lon.is_finite() {
                continue;
            }
            buckets
                .entry(BucketKey::for_coords(station.lat, station.lon))
                .or_default()
                .push(idx);
        }
        Self { stations, buckets }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations within `max_distance` miles of a point.
    ///
    /// Returns `(catalog index, exact distance)` pairs in bucket insertion
    /// order. Each station has exactly one cell, so a single query never
    /// reports duplicates.
    pub fn nearby(&self, lat: f64, lon: f64, max_distance: f64) -> Vec<(usize, f64)> {
        let mut hits = Vec::new();
        for key in BucketKey::for_coords(lat, lon).neighborhood() {
            let Some(bucket) = self.buckets.get(&key) else {
                continue;
            };
            for &idx in bucket {
                let station = &self.stations[idx];
                let distance = distance_miles(lat, lon, station.lat, station.lon);
                if distance <= max_distance {
                    hits.push((idx, distance));
                }
            }
        }
        hits
    }

    /// Stations within `max_distance` miles of any of the given points.
    ///
    /// A station seen from several points is reported once, with the smallest
    /// distance retained; output order is first-discovery order.
    pub fn near_route_points(
        &self,
        points: &[RoutePoint],
        max_distance: f64,
    ) -> Vec<(usize, f64)> {
        let mut hits: Vec<(usize, f64)> = Vec::new();
        let mut positions: HashMap<usize, usize> = HashMap::new();

        for point in points {
            for (idx, distance) in self.nearby(point.lat, point.lon, max_distance) {
                match positions.get(&idx) {
                    Some(&pos) => {
                        if distance < hits[pos].1 {
                            hits[pos].1 = distance;
                        }
                    }
                    None => {
                        positions.insert(idx, hits.len());
                        hits.push((idx, distance));
                    }
                }
            }
        }
        hits
    }
}
