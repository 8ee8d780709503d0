//! Trip cost accounting over a chosen stop sequence.

use crate::models::{FuelStop, RouteStation, TripSummary};

/// Compute gallons and dollars for a stop sequence.
///
/// Each stop fuels the leg to the next stop; the last stop fuels the leg to
/// the destination. The leg from the trip start to the first stop rides on
/// the starting tank and is not billed. Averages are `None` rather than a
/// division by zero when the corresponding set is empty.
pub fn summarize_trip(
    route_stations: &[RouteStation],
    stops: &[FuelStop],
    total_distance: f64,
    miles_per_gallon: f64,
) -> TripSummary {
    let mut total_gallons = 0.0;
    let mut total_cost = 0.0;

    for (i, stop) in stops.iter().enumerate() {
        let next_mile = stops
            .get(i + 1)
            .map(|next| next.route_distance)
            .unwrap_or(total_distance);
        let leg = (next_mile - stop.route_distance).max(0.0);
        let gallons = leg / miles_per_gallon;
        total_gallons += gallons;
        total_cost += gallons * stop.price;
    }

    let average_price_along_route = mean(route_stations.iter().map(|s| s.station.price));
    let average_price_at_stops = mean(stops.iter().map(|s| s.price));
    let estimated_savings =
        average_price_along_route.map(|avg| avg * total_gallons - total_cost);

    TripSummary {
        total_distance,
        total_cost,
        total_gallons,
        average_price_along_route,
        average_price_at_stops,
        estimated_savings,
        stop_count: stops.len(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}
