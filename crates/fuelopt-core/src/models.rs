//! Core data models for route fuel optimization.

use serde::{Deserialize, Serialize};

/// A fuel station from the price catalog.
///
/// Loaded once at startup and never mutated afterwards; per-request
/// annotations live on [`RouteStation`], not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Catalog identifier (OPIS truckstop ID)
    pub id: u64,
    pub name: String,
    pub city: String,
    pub state: String,
    /// Retail price per gallon, dollars
    pub price: f64,
    pub lat: f64,
    pub lon: f64,
}

/// A single sample of the driving path, in travel order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lon: f64,
}

/// A driving route as supplied by the routing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Path samples in travel order; may contain thousands of points
    pub points: Vec<RoutePoint>,
    /// Total driving distance in miles
    pub total_distance: f64,
}

/// A station projected onto the route's one-dimensional mileage axis.
///
/// Owns a copy of the station rather than annotating the shared catalog in
/// place, so concurrent requests never alias each other's projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStation {
    pub station: Station,
    /// Miles from the trip start to the route sample nearest this station
    pub route_distance: f64,
    /// Miles from the station to that route sample
    pub off_route_distance: f64,
}

impl RouteStation {
    pub fn price(&self) -> f64 {
        self.station.price
    }
}

/// A chosen refueling stop, flattened to the API output shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelStop {
    pub station_id: u64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub price: f64,
    pub route_distance: f64,
    pub off_route_distance: f64,
}

impl From<&RouteStation> for FuelStop {
    fn from(projected: &RouteStation) -> Self {
        Self {
            station_id: projected.station.id,
            name: projected.station.name.clone(),
            city: projected.station.city.clone(),
            state: projected.station.state.clone(),
            price: projected.station.price,
            route_distance: projected.route_distance,
            off_route_distance: projected.off_route_distance,
        }
    }
}

/// Whether the destination can be reached under the range assumptions.
///
/// Distinguishes "no further stops needed" from "no reachable station";
/// callers must not treat a partial stop list as a complete plan when the
/// result is `Unreachable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Feasibility {
    Feasible,
    Unreachable {
        /// Route mile of the last position fuel could carry the vehicle to
        stranded_at_mile: f64,
    },
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

/// Aggregate cost figures for a planned trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub total_distance: f64,
    pub total_cost: f64,
    pub total_gallons: f64,
    /// Mean price over every station projected onto the route; `None` when
    /// nothing is near the route
    pub average_price_along_route: Option<f64>,
    /// Mean price over the chosen stops; `None` when the plan has no stops
    pub average_price_at_stops: Option<f64>,
    /// Cost delta vs. buying every gallon at the route-average price
    pub estimated_savings: Option<f64>,
    pub stop_count: usize,
}

/// A complete plan: the stop sequence, its cost summary, and feasibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub stops: Vec<FuelStop>,
    pub summary: TripSummary,
    pub feasibility: Feasibility,
}
