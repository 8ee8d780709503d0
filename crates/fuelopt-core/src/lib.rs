pub mod costing;
pub mod geo;
pub mod models;
pub mod params;
pub mod planner;
pub mod projector;
pub mod spatial;

pub use costing::summarize_trip;
pub use geo::distance_miles;
pub use models::{
    Feasibility, FuelStop, Route, RoutePoint, RouteStation, Station, TripPlan, TripSummary,
};
pub use params::{ParamsError, PlannerParams, PlannerStrategy, ProjectorConfig};
pub use planner::{plan_stops, plan_trip, PlanOutcome};
pub use projector::project_route_stations;
pub use spatial::{BucketKey, StationIndex};
