//! End-to-end optimize test.
//!
//! Exercises the full geocode -> route -> plan pipeline through a live
//! server.
//!
//! Run with: cargo test --test optimize_test -- --ignored
//! Requires a running fuelopt-server with a loaded catalog and a valid
//! ORS_API_KEY.

use reqwest::Client;

fn base_url() -> String {
    std::env::var("FUELOPT_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

#[tokio::test]
#[ignore]
async fn optimize_cross_country_trip() {
    let client = Client::new();
    let base = base_url();

    let response = client
        .post(format!("{}/v1/trips/optimize", base))
        .json(&serde_json::json!({
            "start": "Denver, CO",
            "end": "Chicago, IL",
            "include_points": false
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success(), "status {}", response.status());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], serde_json::Value::Bool(true));

    let total = body["route"]["total_distance"].as_f64().unwrap();
    assert!(total > 800.0 && total < 1300.0, "unexpected distance {total}");

    // A ~1000-mile trip on a 500-mile tank needs at least one stop.
    let stops = body["fuel_stops"].as_array().unwrap();
    if body["feasibility"]["status"] == "feasible" {
        assert!(!stops.is_empty());
    }

    // Stops must be strictly increasing along the route.
    let miles: Vec<f64> = stops
        .iter()
        .map(|s| s["route_distance"].as_f64().unwrap())
        .collect();
    for pair in miles.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[tokio::test]
#[ignore]
async fn optimize_rejects_missing_locations() {
    let client = Client::new();
    let base = base_url();

    let response = client
        .post(format!("{}/v1/trips/optimize", base))
        .json(&serde_json::json!({ "start": "", "end": "Chicago, IL" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}
