use anyhow::Result;
use clap::Parser;
use fuelopt_core::{Feasibility, FuelStop, PlannerParams, TripSummary};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optimizer server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Trip origin, free text (e.g. "Denver, CO")
    #[arg(long)]
    start: String,

    /// Trip destination
    #[arg(long)]
    end: String,

    /// Full-tank range in miles
    #[arg(long)]
    tank_range: Option<f64>,

    /// Search trigger in miles
    #[arg(long)]
    search_trigger: Option<f64>,

    /// Safety buffer in miles
    #[arg(long)]
    safety_buffer: Option<f64>,

    /// Fuel economy in miles per gallon
    #[arg(long)]
    mpg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TripResponse {
    route: RouteSummary,
    fuel_stops: Vec<FuelStop>,
    summary: TripSummary,
    feasibility: Feasibility,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    total_distance: f64,
}

fn build_params(args: &Args) -> PlannerParams {
    let mut params = PlannerParams::default();
    if let Some(value) = args.tank_range {
        params.tank_range_miles = value;
    }
    if let Some(value) = args.search_trigger {
        params.search_trigger_miles = value;
    }
    if let Some(value) = args.safety_buffer {
        params.safety_buffer_miles = value;
    }
    if let Some(value) = args.mpg {
        params.miles_per_gallon = value;
    }
    params
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "start": args.start,
        "end": args.end,
        "params": build_params(&args),
        "include_points": false,
    });

    println!("Planning {} -> {}...", args.start, args.end);
    let response = client
        .post(format!("{}/v1/trips/optimize", args.url))
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("server returned {status}: {body}");
    }
    let trip: TripResponse = response.json().await?;

    println!(
        "Route: {:.1} miles, {} stop(s)",
        trip.route.total_distance, trip.summary.stop_count
    );
    for (i, stop) in trip.fuel_stops.iter().enumerate() {
        println!(
            "  {}. mile {:>7.1}  ${:.3}  {} ({}, {})",
            i + 1,
            stop.route_distance,
            stop.price,
            stop.name,
            stop.city,
            stop.state
        );
    }

    println!(
        "Total: {:.1} gallons, ${:.2}",
        trip.summary.total_gallons, trip.summary.total_cost
    );
    if let Some(avg) = trip.summary.average_price_at_stops {
        println!("Average price at stops: ${:.3}/gal", avg);
    }
    if let Some(savings) = trip.summary.estimated_savings {
        println!("Estimated savings vs route average: ${:.2}", savings);
    }

    if let Feasibility::Unreachable { stranded_at_mile } = trip.feasibility {
        eprintln!(
            "WARNING: destination unreachable from mile {:.1} with the current range assumptions",
            stranded_at_mile
        );
        std::process::exit(1);
    }

    Ok(())
}
