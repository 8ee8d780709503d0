//! Fuel route optimizer - REST service entry point

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fuelopt_server::config::Config;
use fuelopt_server::state::AppState;
use fuelopt_server::{api, catalog};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fuelopt_server=debug".parse()?),
        )
        .init();

    let config = Config::from_env();
    let port = config.server_port;

    let stations = catalog::load_stations(&config.stations_csv)?;
    let state = Arc::new(AppState::new(stations, config));

    // Build the app
    let app = api::routes()
        .with_state(state)
        .layer(axum::middleware::from_fn(api::request_id::ensure_request_id))
        .layer(CorsLayer::permissive());

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
