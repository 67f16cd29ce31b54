use std::sync::Arc;

use thiserror::Error;

use marquee_catalog::{Movie, MoviePatch, NewMovie};
use marquee_core::{DomainError, MovieId};

use super::filter::MovieFilter;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
///
/// These are **infrastructure errors** as opposed to domain errors
/// (field rules). The set is closed: callers match it exhaustively.
///
/// ## Error Categories
///
/// - **Format**: the identifier does not have the store's identifier shape
/// - **Validation**: the store's own schema rejected a write
/// - **Unavailable**: the store could not be reached or failed internally
/// - **Other**: anything unclassified; the message is surfaced as-is
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("malformed identifier: {0}")]
    Format(String),

    #[error("schema violation: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Parse a raw identifier, mapping failures to [`StoreError::Format`].
    pub fn parse_id(raw: &str) -> StoreResult<MovieId> {
        raw.parse::<MovieId>().map_err(|e| match e {
            DomainError::InvalidId(msg) => StoreError::Format(msg),
            other => StoreError::Format(other.to_string()),
        })
    }
}

/// Document collection of movies keyed by an opaque identifier.
///
/// ## Semantics
///
/// - `find` returns every record matching the filter (empty filter = all), in
///   a stable order
/// - `find_by_id`, `update_by_id` and `delete_by_id` return `Ok(None)` for a
///   well-formed identifier that names no record, and
///   `Err(StoreError::Format)` for a malformed one
/// - `insert` assigns a fresh identifier exactly once
/// - `update_by_id` merges only the fields present in the patch and returns
///   the post-update record
/// - `delete_by_id` returns the removed record
///
/// Concurrent writes to the same identifier are last-write-wins.
#[async_trait::async_trait]
pub trait MovieStore: Send + Sync {
    async fn find(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Movie>>;

    async fn insert(&self, movie: NewMovie) -> StoreResult<Movie>;

    async fn update_by_id(&self, id: &str, patch: MoviePatch) -> StoreResult<Option<Movie>>;

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Movie>>;
}

#[async_trait::async_trait]
impl<S> MovieStore for Arc<S>
where
    S: MovieStore + ?Sized,
{
    async fn find(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>> {
        (**self).find(filter).await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Movie>> {
        (**self).find_by_id(id).await
    }

    async fn insert(&self, movie: NewMovie) -> StoreResult<Movie> {
        (**self).insert(movie).await
    }

    async fn update_by_id(&self, id: &str, patch: MoviePatch) -> StoreResult<Option<Movie>> {
        (**self).update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Movie>> {
        (**self).delete_by_id(id).await
    }
}
