//! Projects the station catalog onto a route's one-dimensional mileage axis.
//!
//! Sampled-proximity projection: the route is subsampled with a deterministic
//! stride, mileage is accumulated sample to sample, and each sample pulls its
//! neighborhood from the grid index. The first sample that sees a station
//! fixes its `route_distance`; later sightings never overwrite it.

use crate::geo::distance_miles;
use crate::models::{Route, RoutePoint, RouteStation};
use crate::params::ProjectorConfig;
use crate::spatial::StationIndex;
use std::collections::HashSet;

/// Find every station near the route and annotate it with the cumulative
/// route mileage at which it is first encountered.
///
/// Output contains each station at most once and is sorted ascending by
/// `route_distance` (stable, so equal keys keep discovery order). Stations
/// farther than the discovery radius from every sample are excluded. An empty
/// catalog or an empty route yields an empty list.
pub fn project_route_stations(
    index: &StationIndex,
    route: &Route,
    config: &ProjectorConfig,
) -> Vec<RouteStation> {
    let stride = (route.points.len() / config.target_samples.max(1)).max(1);

    let mut projected: Vec<RouteStation> = Vec::new();
    let mut seen: HashSet<u64> = HashSet::new();
    let mut travelled = 0.0;
    let mut last: Option<&RoutePoint> = None;

    for point in route.points.iter().step_by(stride) {
        if let Some(prev) = last {
            travelled += distance_miles(prev.lat, prev.lon, point.lat, point.lon);
        }

        for (idx, distance) in index.nearby(point.lat, point.lon, config.discovery_radius_miles) {
            let station = &index.stations()[idx];
            if seen.insert(station.id) {
                projected.push(RouteStation {
                    station: station.clone(),
                    route_distance: travelled,
                    off_route_distance: distance,
                });
            }
        }

        last = Some(point);
    }

    projected.sort_by(|a, b| a.route_distance.total_cmp(&b.route_distance));
    projected
}
