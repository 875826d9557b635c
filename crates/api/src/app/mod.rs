//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the aggregation service over both upstreams
//! - `schema.rs`: GraphQL query/mutation roots
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: GraphQL output types and argument mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::GatewayConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod schema;
pub mod services;

/// Build the full HTTP router around an already-wired service.
pub fn build_app(services: Arc<services::ProductService>, graphiql: bool) -> Router {
    let schema = schema::build_schema(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(graphiql))
        .layer(ServiceBuilder::new().layer(Extension(schema)))
}

/// Build the router with HTTP upstream clients (public entrypoint used by `main.rs`).
pub fn build_app_from_config(config: &GatewayConfig) -> Result<Router, reqwest::Error> {
    let services = Arc::new(services::ProductService::from_config(config)?);
    Ok(build_app(services, config.graphiql))
}
