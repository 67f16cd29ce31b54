//! Infrastructure layer: document store adapters, application services, config.

pub mod config;
pub mod movie_service;
pub mod movie_store;

pub use movie_service::{MovieService, ServiceError};
pub use movie_store::{InMemoryMovieStore, MovieFilter, MovieStore, StoreError, StoreResult};
#[cfg(feature = "postgres")]
pub use movie_store::PostgresMovieStore;
