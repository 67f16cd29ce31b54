//! Movie document store boundary.
//!
//! This module defines the storage abstraction consumed by the movie service
//! (find / find-by-id / insert / update-by-id / delete-by-id) and the adapters
//! behind it. Identifiers reach the store as raw strings; the store owns their
//! format and rejects malformed ones with [`StoreError::Format`].

pub mod filter;
pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod r#trait;

pub use filter::MovieFilter;
pub use in_memory::InMemoryMovieStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresMovieStore;
pub use r#trait::{MovieStore, StoreError, StoreResult};
