//! Fuel stop selection along a projected route.
//!
//! Two selection modes exist. Furthest-reachable greedy is the canonical one:
//! it maximizes distance covered per stop and can always report the exact
//! mile at which a route becomes infeasible. The price-first window mode is
//! the older heuristic, kept selectable for sparse-catalog comparisons.

use crate::costing::summarize_trip;
use crate::models::{Feasibility, FuelStop, RouteStation, TripPlan};
use crate::params::{ParamsError, PlannerParams, PlannerStrategy};
use std::cmp::Ordering;

/// Result of a planning run: the chosen stops plus whether the destination is
/// reachable under the range assumptions. When infeasible, `stops` holds the
/// partial sequence chosen before the planner ran out of reachable stations.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub stops: Vec<FuelStop>,
    pub feasibility: Feasibility,
}

/// Plan fuel stops over stations sorted ascending by `route_distance`.
///
/// Pure and deterministic: the same inputs always produce the same stop
/// sequence. Fails only on invalid parameters; an unreachable destination is
/// reported through [`Feasibility`], not as an error.
pub fn plan_stops(
    stations: &[RouteStation],
    total_distance: f64,
    params: &PlannerParams,
    strategy: PlannerStrategy,
) -> Result<PlanOutcome, ParamsError> {
    params.validate()?;
    Ok(match strategy {
        PlannerStrategy::FurthestReachable => furthest_reachable(stations, total_distance, params),
        PlannerStrategy::PriceFirstWindow => price_first_window(stations, total_distance, params),
    })
}

/// Plan stops and cost the result in one call.
pub fn plan_trip(
    route_stations: &[RouteStation],
    total_distance: f64,
    params: &PlannerParams,
    strategy: PlannerStrategy,
) -> Result<TripPlan, ParamsError> {
    let outcome = plan_stops(route_stations, total_distance, params, strategy)?;
    let summary = summarize_trip(
        route_stations,
        &outcome.stops,
        total_distance,
        params.miles_per_gallon,
    );
    Ok(TripPlan {
        stops: outcome.stops,
        summary,
        feasibility: outcome.feasibility,
    })
}

/// Greedy over a single scalar position: at each step take the farthest
/// station reachable on a full tank, so every stop buys the most distance
/// possible. Price only breaks ties at equal distance.
fn furthest_reachable(
    stations: &[RouteStation],
    total_distance: f64,
    params: &PlannerParams,
) -> PlanOutcome {
    let range = params.tank_range_miles;
    let mut stops: Vec<FuelStop> = Vec::new();
    let mut position = 0.0;

    while total_distance - position > range {
        let mut best: Option<&RouteStation> = None;
        for candidate in stations {
            let mile = candidate.route_distance;
            if mile <= position || mile > position + range {
                continue;
            }
            let replaces = match best {
                None => true,
                Some(current) => beats_furthest(candidate, current),
            };
            if replaces {
                best = Some(candidate);
            }
        }

        let Some(choice) = best else {
            return PlanOutcome {
                stops,
                feasibility: Feasibility::Unreachable {
                    stranded_at_mile: position,
                },
            };
        };
        position = choice.route_distance;
        stops.push(FuelStop::from(choice));
    }

    PlanOutcome {
        stops,
        feasibility: Feasibility::Feasible,
    }
}

/// `candidate` wins when it reaches farther, or reaches equally far at a lower
/// price. Equal distance and price keeps the earlier catalog entry.
fn beats_furthest(candidate: &RouteStation, current: &RouteStation) -> bool {
    match candidate.route_distance.total_cmp(&current.route_distance) {
        Ordering::Greater => true,
        Ordering::Equal => candidate.price() < current.price(),
        Ordering::Less => false,
    }
}

/// Window-scan mode: look for the cheapest station in a fixed-width window
/// ahead of the search trigger, falling back to a gap fill when the window is
/// empty. Legs are validated afterwards; this mode can produce an infeasible
/// sequence on sparse catalogs, which is downgraded rather than returned as a
/// silently broken plan.
fn price_first_window(
    stations: &[RouteStation],
    total_distance: f64,
    params: &PlannerParams,
) -> PlanOutcome {
    let range = params.tank_range_miles;
    let trigger = params.search_trigger_miles;
    let buffer = params.safety_buffer_miles;

    let mut chosen: Vec<&RouteStation> = Vec::new();
    let mut next_search_at = trigger;

    while next_search_at < total_distance {
        if let Some(last) = chosen.last() {
            if total_distance - last.route_distance <= range {
                break;
            }
        }

        let window = stations.iter().filter(|s| {
            s.route_distance >= next_search_at && s.route_distance <= next_search_at + buffer
        });
        if let Some(cheapest) = cheapest_of(window) {
            next_search_at = cheapest.route_distance + trigger;
            chosen.push(cheapest);
            continue;
        }

        // Empty window. Anchor on the nearest station beyond it from which
        // the trip can still continue, then fill the gap behind the window
        // with the cheapest station that can reach the anchor.
        let anchor = stations.iter().find(|s| {
            s.route_distance > next_search_at + buffer
                && can_continue_from(s, stations, total_distance, range)
        });
        let Some(anchor) = anchor else {
            next_search_at += buffer;
            continue;
        };

        let last_stop_mile = chosen.last().map(|s| s.route_distance).unwrap_or(0.0);
        let gap = stations.iter().filter(|s| {
            s.route_distance > last_stop_mile
                && s.route_distance < next_search_at
                && anchor.route_distance - s.route_distance <= range
        });
        match cheapest_of(gap) {
            Some(filler) => {
                next_search_at = filler.route_distance + trigger;
                chosen.push(filler);
            }
            None => next_search_at += buffer,
        }
    }

    let feasibility = validate_legs(&chosen, total_distance, range);
    PlanOutcome {
        stops: chosen.into_iter().map(FuelStop::from).collect(),
        feasibility,
    }
}

/// A station can continue the trip when the destination, or some further
/// station, lies within a full tank of it.
fn can_continue_from(
    from: &RouteStation,
    stations: &[RouteStation],
    total_distance: f64,
    range: f64,
) -> bool {
    if total_distance - from.route_distance <= range {
        return true;
    }
    stations.iter().any(|s| {
        s.route_distance > from.route_distance && s.route_distance - from.route_distance <= range
    })
}

/// Lowest price wins; ties keep the earlier entry.
fn cheapest_of<'a>(
    candidates: impl Iterator<Item = &'a RouteStation>,
) -> Option<&'a RouteStation> {
    let mut best: Option<&RouteStation> = None;
    for candidate in candidates {
        let replaces = match best {
            None => true,
            Some(current) => candidate.price() < current.price(),
        };
        if replaces {
            best = Some(candidate);
        }
    }
    best
}

/// Walk the legs (start -> stops -> destination) and flag the first one longer
/// than a full tank.
fn validate_legs(stops: &[&RouteStation], total_distance: f64, range: f64) -> Feasibility {
    let mut position = 0.0;
    for stop in stops {
        if stop.route_distance - position > range {
            return Feasibility::Unreachable {
                stranded_at_mile: position,
            };
        }
        position = stop.route_distance;
    }
    if total_distance - position > range {
        return Feasibility::Unreachable {
            stranded_at_mile: position,
        };
    }
    Feasibility::Feasible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Station;

    fn at_mile(id: u64, price: f64, route_distance: f64) -> RouteStation {
        RouteStation {
            station: Station {
                id,
                name: format!("Station {id}"),
                city: "Testville".to_string(),
                state: "KS".to_string(),
                price,
                lat: 39.0,
                lon: -98.0,
            },
            route_distance,
            off_route_distance: 1.0,
        }
    }

    fn stop_miles(outcome: &PlanOutcome) -> Vec<f64> {
        outcome.stops.iter().map(|s| s.route_distance).collect()
    }

    #[test]
    fn short_trip_needs_no_stops() {
        let stations = vec![at_mile(1, 3.50, 0.0)];
        let outcome = plan_stops(&stations, 100.0, &PlannerParams::default(), PlannerStrategy::FurthestReachable).unwrap();
        assert!(outcome.stops.is_empty());
        assert_eq!(outcome.feasibility, Feasibility::Feasible);
    }

    #[test]
    fn furthest_reachable_takes_the_farthest_station() {
        let stations = vec![
            at_mile(1, 3.20, 100.0),
            at_mile(2, 4.00, 450.0),
            at_mile(3, 3.50, 700.0),
        ];
        let outcome = plan_stops(&stations, 1200.0, &PlannerParams::default(), PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(stop_miles(&outcome), vec![450.0, 700.0]);
        assert_eq!(outcome.feasibility, Feasibility::Feasible);
    }

    #[test]
    fn furthest_reachable_breaks_distance_ties_by_price() {
        let stations = vec![
            at_mile(1, 3.90, 400.0),
            at_mile(2, 3.40, 400.0),
            at_mile(3, 3.90, 400.0),
        ];
        let outcome = plan_stops(&stations, 800.0, &PlannerParams::default(), PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(outcome.stops.len(), 1);
        assert_eq!(outcome.stops[0].station_id, 2);
    }

    #[test]
    fn equal_distance_and_price_keeps_catalog_order() {
        let stations = vec![at_mile(10, 3.50, 400.0), at_mile(11, 3.50, 400.0)];
        let outcome = plan_stops(&stations, 800.0, &PlannerParams::default(), PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(outcome.stops[0].station_id, 10);
    }

    #[test]
    fn reports_unreachable_with_stranded_mile() {
        // Only station is beyond a full tank from the start.
        let stations = vec![at_mile(1, 3.80, 600.0)];
        let outcome = plan_stops(&stations, 1000.0, &PlannerParams::default(), PlannerStrategy::FurthestReachable).unwrap();
        assert!(outcome.stops.is_empty());
        assert_eq!(
            outcome.feasibility,
            Feasibility::Unreachable { stranded_at_mile: 0.0 }
        );
    }

    #[test]
    fn reports_unreachable_mid_route() {
        let stations = vec![at_mile(1, 3.80, 400.0)];
        let outcome = plan_stops(&stations, 1500.0, &PlannerParams::default(), PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(stop_miles(&outcome), vec![400.0]);
        assert_eq!(
            outcome.feasibility,
            Feasibility::Unreachable { stranded_at_mile: 400.0 }
        );
    }

    #[test]
    fn feasible_plans_never_exceed_range_between_stops() {
        let stations: Vec<RouteStation> = [
            (1, 3.10, 180.0),
            (2, 3.90, 420.0),
            (3, 3.55, 610.0),
            (4, 3.40, 800.0),
            (5, 3.75, 1150.0),
            (6, 3.30, 1400.0),
        ]
        .iter()
        .map(|&(id, price, mile)| at_mile(id, price, mile))
        .collect();
        let params = PlannerParams::default();

        let outcome = plan_stops(&stations, 1700.0, &params, PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(outcome.feasibility, Feasibility::Feasible);

        let mut position = 0.0;
        for stop in &outcome.stops {
            assert!(stop.route_distance - position <= params.tank_range_miles);
            assert!(stop.route_distance > position);
            position = stop.route_distance;
        }
        assert!(1700.0 - position <= params.tank_range_miles);
    }

    #[test]
    fn planning_is_idempotent() {
        let stations = vec![
            at_mile(1, 3.20, 200.0),
            at_mile(2, 3.80, 600.0),
            at_mile(3, 3.50, 900.0),
        ];
        let params = PlannerParams::default();
        let first = plan_stops(&stations, 1200.0, &params, PlannerStrategy::FurthestReachable).unwrap();
        let second = plan_stops(&stations, 1200.0, &params, PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn never_selects_the_same_station_twice() {
        let stations = vec![at_mile(1, 3.20, 450.0), at_mile(2, 3.80, 900.0)];
        let outcome = plan_stops(&stations, 1300.0, &PlannerParams::default(), PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(stop_miles(&outcome), vec![450.0, 900.0]);
        let mut ids: Vec<u64> = outcome.stops.iter().map(|s| s.station_id).collect();
        ids.dedup();
        assert_eq!(ids.len(), outcome.stops.len());
    }

    /// The two modes are designed to diverge on sparse catalogs: with
    /// stations only at miles 200 and 600 on a 1000-mile route, the furthest
    /// greedy picks mile 200 directly (the only station within range), while
    /// the window mode finds [350, 500] empty and must recover mile 200
    /// through its gap fallback.
    #[test]
    fn sparse_catalog_divergence_between_modes() {
        let stations = vec![at_mile(1, 4.00, 200.0), at_mile(2, 3.80, 600.0)];
        let params = PlannerParams::default();

        let greedy = plan_stops(&stations, 1000.0, &params, PlannerStrategy::FurthestReachable).unwrap();
        assert_eq!(stop_miles(&greedy), vec![200.0, 600.0]);
        assert_eq!(greedy.feasibility, Feasibility::Feasible);

        let windowed = plan_stops(&stations, 1000.0, &params, PlannerStrategy::PriceFirstWindow).unwrap();
        assert_eq!(stop_miles(&windowed), vec![200.0, 600.0]);
        assert_eq!(windowed.feasibility, Feasibility::Feasible);
    }

    #[test]
    fn window_mode_picks_cheapest_in_window() {
        let stations = vec![
            at_mile(1, 3.90, 360.0),
            at_mile(2, 3.20, 420.0),
            at_mile(3, 3.60, 480.0),
        ];
        let outcome = plan_stops(&stations, 900.0, &PlannerParams::default(), PlannerStrategy::PriceFirstWindow).unwrap();
        assert_eq!(outcome.stops[0].station_id, 2);
        assert_eq!(outcome.feasibility, Feasibility::Feasible);
    }

    #[test]
    fn window_mode_downgrades_infeasible_sequences() {
        // The only stations sit beyond a full tank from the start; the window
        // mode would happily pick one, so leg validation must flag the plan.
        let stations = vec![at_mile(1, 3.80, 600.0)];
        let outcome = plan_stops(&stations, 1000.0, &PlannerParams::default(), PlannerStrategy::PriceFirstWindow).unwrap();
        assert_eq!(
            outcome.feasibility,
            Feasibility::Unreachable { stranded_at_mile: 0.0 }
        );
    }

    #[test]
    fn plan_trip_combines_stops_and_costs() {
        let stations = vec![at_mile(1, 4.00, 200.0), at_mile(2, 3.80, 600.0)];
        let params = PlannerParams::default();
        let trip = plan_trip(&stations, 1000.0, &params, PlannerStrategy::FurthestReachable).unwrap();

        assert_eq!(trip.feasibility, Feasibility::Feasible);
        assert_eq!(trip.summary.stop_count, 2);
        // 40 gallons at $4.00 (miles 200-600) + 40 gallons at $3.80.
        assert!((trip.summary.total_gallons - 80.0).abs() < 1e-9);
        assert!((trip.summary.total_cost - 312.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let stations = vec![at_mile(1, 3.50, 100.0)];
        let params = PlannerParams {
            search_trigger_miles: 600.0,
            ..PlannerParams::default()
        };
        assert!(plan_stops(&stations, 900.0, &params, PlannerStrategy::FurthestReachable).is_err());
    }
}
