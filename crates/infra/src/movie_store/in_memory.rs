use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::instrument;

use marquee_catalog::{Movie, MoviePatch, NewMovie};
use marquee_core::{Entity, MovieId};

use super::filter::MovieFilter;
use super::r#trait::{MovieStore, StoreError, StoreResult};

/// In-memory movie collection.
///
/// Intended for tests/dev. Records are kept ordered by identifier, and since
/// identifiers are time-ordered that is also insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<BTreeMap<MovieId, Movie>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl MovieStore for InMemoryMovieStore {
    #[instrument(skip(self), level = "debug")]
    async fn find(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>> {
        let movies = self.movies.read().map_err(|_| poisoned())?;
        Ok(movies.values().filter(|m| filter.matches(m)).cloned().collect())
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Movie>> {
        let id = StoreError::parse_id(id)?;
        let movies = self.movies.read().map_err(|_| poisoned())?;
        Ok(movies.get(&id).cloned())
    }

    #[instrument(skip(self, movie), level = "debug")]
    async fn insert(&self, movie: NewMovie) -> StoreResult<Movie> {
        let mut movies = self.movies.write().map_err(|_| poisoned())?;

        let mut id = MovieId::new();
        while movies.contains_key(&id) {
            id = MovieId::new();
        }

        let stored = movie.with_id(id);
        movies.insert(*stored.id(), stored.clone());
        Ok(stored)
    }

    #[instrument(skip(self, patch), level = "debug")]
    async fn update_by_id(&self, id: &str, patch: MoviePatch) -> StoreResult<Option<Movie>> {
        let id = StoreError::parse_id(id)?;
        let mut movies = self.movies.write().map_err(|_| poisoned())?;
        Ok(movies.get_mut(&id).map(|m| {
            m.apply(&patch);
            m.clone()
        }))
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Movie>> {
        let id = StoreError::parse_id(id)?;
        let mut movies = self.movies.write().map_err(|_| poisoned())?;
        Ok(movies.remove(&id))
    }
}
