use axum::{Router, routing::get};

pub mod movies;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/movies", movies::router())
}
