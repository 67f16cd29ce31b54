//! Movie use cases (application-level orchestration).
//!
//! The service composes the catalog's field rules with an injected
//! [`MovieStore`]. Each operation is at most one validation pass plus one
//! store call (update also reads the current record first so the merged
//! result can be checked). It holds no state of its own; concurrent requests
//! only meet inside the store.

use thiserror::Error;
use tracing::instrument;

use marquee_catalog::{Movie, MoviePatch, NewMovie, Payload};
use marquee_core::DomainError;

use crate::movie_store::{MovieFilter, MovieStore, StoreError};

/// Failure of a movie use case.
///
/// Closed set: the HTTP layer maps every variant explicitly.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    /// The payload broke one or more field rules; nothing was written.
    #[error("{}", .0.join(", "))]
    ValidationFailure(Vec<String>),

    /// The store failed; surfaced unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(errors) => ServiceError::ValidationFailure(errors),
            DomainError::InvalidId(msg) => ServiceError::Store(StoreError::Format(msg)),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Movie catalog operations over an injected store.
///
/// `S` is usually `Arc<dyn MovieStore>` in the binary and an
/// `InMemoryMovieStore` in tests.
#[derive(Debug, Clone)]
pub struct MovieService<S> {
    store: S,
}

impl<S> MovieService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> MovieService<S>
where
    S: MovieStore,
{
    /// All movies, or only those with a genre equal to `genre` ignoring case.
    #[instrument(skip(self))]
    pub async fn list_movies(&self, genre: Option<&str>) -> ServiceResult<Vec<Movie>> {
        let filter = match genre {
            Some(g) => MovieFilter::by_genre(g),
            None => MovieFilter::all(),
        };
        Ok(self.store.find(&filter).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_movie_by_id(&self, id: &str) -> ServiceResult<Option<Movie>> {
        Ok(self.store.find_by_id(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_movies_by_director(&self, director: &str) -> ServiceResult<Vec<Movie>> {
        Ok(self.store.find(&MovieFilter::by_director(director)).await?)
    }

    /// Validate then persist. The store is not touched when validation fails.
    #[instrument(skip(self, payload))]
    pub async fn create_movie(&self, payload: &Payload) -> ServiceResult<Movie> {
        let movie = NewMovie::from_payload(payload)?;
        let stored = self.store.insert(movie).await?;
        tracing::info!(movie_id = %stored.id, title = %stored.title, "movie created");
        Ok(stored)
    }

    #[instrument(skip(self))]
    pub async fn delete_movie(&self, id: &str) -> ServiceResult<Option<Movie>> {
        let deleted = self.store.delete_by_id(id).await?;
        if let Some(m) = &deleted {
            tracing::info!(movie_id = %m.id, "movie deleted");
        }
        Ok(deleted)
    }

    /// Merge the supplied fields onto the stored record.
    ///
    /// The merged record must pass the same rules as a create; otherwise the
    /// update fails with [`ServiceError::ValidationFailure`] and nothing is
    /// written. Returns `None` when no record has this identifier.
    #[instrument(skip(self, partial))]
    pub async fn update_movie(&self, id: &str, partial: &Payload) -> ServiceResult<Option<Movie>> {
        let Some(existing) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };

        let patch = MoviePatch::from_payload(&existing, partial)?;
        if patch.is_empty() {
            return Ok(Some(existing));
        }

        let updated = self.store.update_by_id(id, patch).await?;
        if let Some(m) = &updated {
            tracing::info!(movie_id = %m.id, "movie updated");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use serde_json::{Value, json};

    use marquee_core::MovieId;

    use super::*;
    use crate::movie_store::InMemoryMovieStore;

    fn payload(v: Value) -> Payload {
        match v {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    fn inception() -> Payload {
        payload(json!({
            "title": "Inception",
            "year": 2010,
            "director": "Christopher Nolan",
            "duration": 148,
            "poster": "http://x/p.jpg",
            "genre": ["Sci-Fi"],
            "rate": 8.8
        }))
    }

    fn movie(title: &str, director: &str, genre: Value) -> Payload {
        let mut p = inception();
        p.insert("title".into(), json!(title));
        p.insert("director".into(), json!(director));
        p.insert("genre".into(), genre);
        p
    }

    fn setup() -> (MovieService<Arc<InMemoryMovieStore>>, Arc<InMemoryMovieStore>) {
        let store = Arc::new(InMemoryMovieStore::new());
        (MovieService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_returns_all_fields_and_fresh_ids() {
        let (svc, _) = setup();
        let mut seen = HashSet::new();
        for _ in 0..20 {
            let m = svc.create_movie(&inception()).await.unwrap();
            assert_eq!(m.title, "Inception");
            assert_eq!(m.year, 2010);
            assert_eq!(m.director, "Christopher Nolan");
            assert_eq!(m.duration, 148);
            assert_eq!(m.poster, "http://x/p.jpg");
            assert_eq!(m.genre, vec!["Sci-Fi"]);
            assert_eq!(m.rate, 8.8);
            assert!(seen.insert(m.id), "identifier reused");
        }
    }

    #[tokio::test]
    async fn invalid_create_lists_each_problem_and_persists_nothing() {
        let (svc, store) = setup();
        let mut p = inception();
        p.remove("title");
        p.remove("rate");

        let err = svc.create_movie(&p).await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::ValidationFailure(vec!["missing title".into(), "invalid rating".into()])
        );
        assert_eq!(err.to_string(), "missing title, invalid rating");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn list_filters_by_genre_ignoring_case() {
        let (svc, _) = setup();
        let a = svc.create_movie(&movie("A", "X", json!(["Sci-Fi", "Drama"]))).await.unwrap();
        let b = svc.create_movie(&movie("B", "Y", json!("sci-fi"))).await.unwrap();
        let _c = svc.create_movie(&movie("C", "Z", json!(["Science"]))).await.unwrap();

        assert_eq!(svc.list_movies(Some("SCI-FI")).await.unwrap(), vec![a.clone(), b]);
        assert_eq!(svc.list_movies(Some("drama")).await.unwrap(), vec![a]);
        assert!(svc.list_movies(Some("sci")).await.unwrap().is_empty());
        assert_eq!(svc.list_movies(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn director_lookup_is_exact() {
        let (svc, _) = setup();
        let nolan = svc.create_movie(&movie("A", "Christopher Nolan", json!("Drama"))).await.unwrap();
        svc.create_movie(&movie("B", "Denis Villeneuve", json!("Drama"))).await.unwrap();

        assert_eq!(svc.get_movies_by_director("Christopher Nolan").await.unwrap(), vec![nolan]);
        assert!(svc.get_movies_by_director("Nolan").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_id_absent_vs_malformed() {
        let (svc, _) = setup();
        assert_eq!(svc.get_movie_by_id(&MovieId::new().to_string()).await.unwrap(), None);

        let err = svc.get_movie_by_id("123").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Format(_))));
    }

    #[tokio::test]
    async fn delete_twice() {
        let (svc, _) = setup();
        let m = svc.create_movie(&inception()).await.unwrap();
        let id = m.id.to_string();
        assert_eq!(svc.delete_movie(&id).await.unwrap(), Some(m));
        assert_eq!(svc.delete_movie(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_rate_only_changes_rate() {
        let (svc, _) = setup();
        let m = svc.create_movie(&inception()).await.unwrap();

        let updated = svc
            .update_movie(&m.id.to_string(), &payload(json!({ "rate": 9.5 })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, Movie { rate: 9.5, ..m.clone() });
        assert_eq!(svc.get_movie_by_id(&m.id.to_string()).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_unknown_id_is_absent_and_store_unchanged() {
        let (svc, _) = setup();
        let m = svc.create_movie(&inception()).await.unwrap();

        let res = svc
            .update_movie(&MovieId::new().to_string(), &payload(json!({ "title": "Other" })))
            .await
            .unwrap();
        assert_eq!(res, None);
        assert_eq!(svc.list_movies(None).await.unwrap(), vec![m]);
    }

    #[tokio::test]
    async fn update_that_breaks_a_rule_is_rejected_and_not_written() {
        let (svc, _) = setup();
        let m = svc.create_movie(&inception()).await.unwrap();

        let err = svc
            .update_movie(&m.id.to_string(), &payload(json!({ "duration": -1 })))
            .await
            .unwrap_err();
        assert_eq!(err, ServiceError::ValidationFailure(vec!["invalid duration".into()]));
        assert_eq!(svc.get_movie_by_id(&m.id.to_string()).await.unwrap(), Some(m));
    }

    #[tokio::test]
    async fn update_with_malformed_id_is_a_format_error() {
        let (svc, _) = setup();
        let err = svc
            .update_movie("nope", &payload(json!({ "rate": 5 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Format(_))));
    }
}
