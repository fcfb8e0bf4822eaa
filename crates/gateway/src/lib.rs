//! API Gateway Library
//!
//! This crate provides the HTTP REST API over the user service.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use common::StoreConfig;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Wire the in-memory persistence stack into app state.
pub fn build_state(config: GatewayConfig, store_config: &StoreConfig) -> AppState {
    let components = user_service_lib::build_in_memory(store_config);
    AppState::new(components.service, components.store, config)
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(
    config: GatewayConfig,
    store_config: StoreConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    if config.api_token.is_none() {
        tracing::warn!("API_TOKEN is not set; every /users request will be rejected");
    }

    // Build router
    let state = build_state(config, &store_config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
