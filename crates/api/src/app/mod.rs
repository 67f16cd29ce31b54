//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the movie service
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response envelopes and query strings
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

use marquee_infra::config::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config).await?);
    Ok(router_with_services(services))
}

/// Router over already-built services; tests use this to share a store.
pub fn router_with_services(services: Arc<services::AppServices>) -> Router {
    middleware::apply(routes::router().layer(Extension(services)))
}
