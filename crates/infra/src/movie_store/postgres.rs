//! Postgres-backed movie document store.
//!
//! Each movie is one row: the identifier in a `uuid` primary key column and
//! the remaining fields as a JSONB document. Filters and partial updates are
//! expressed with JSONB operators so the store keeps document semantics.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (not-null / check violation) | `23502` / `23514` | `Validation` |
//! | Database (other) | any other | `Other` |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Unavailable` |
//! | Decode / ColumnDecode | N/A | `Other` |
//! | Other | N/A | `Other` |

use std::sync::Arc;

use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;

use marquee_catalog::{Movie, MoviePatch, NewMovie};
use marquee_core::MovieId;

use super::filter::MovieFilter;
use super::r#trait::{MovieStore, StoreError, StoreResult};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    id  UUID PRIMARY KEY,
    doc JSONB NOT NULL CHECK (jsonb_typeof(doc) = 'object')
)
"#;

/// Postgres-backed movie store.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; the store can be
/// shared across request handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PostgresMovieStore {
    pool: Arc<PgPool>,
}

impl PostgresMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect once at startup and make sure the `movies` table exists.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.ensure_table().await?;
        tracing::info!("connected to movie database");
        Ok(store)
    }

    pub async fn ensure_table(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_table", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MovieStore for PostgresMovieStore {
    #[instrument(skip(self))]
    async fn find(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>> {
        let rows = sqlx::query(
            r#"
            SELECT id, doc
            FROM movies
            WHERE ($1::text IS NULL OR EXISTS (
                    SELECT 1 FROM jsonb_array_elements_text(doc->'genre') AS g
                    WHERE lower(g) = lower($1)))
                AND ($2::text IS NULL OR doc->>'director' = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.genre.as_deref())
        .bind(filter.director.as_deref())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find", e))?;

        rows.iter().map(movie_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Movie>> {
        let id = StoreError::parse_id(id)?;
        let row = sqlx::query("SELECT id, doc FROM movies WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(movie_from_row).transpose()
    }

    #[instrument(skip(self, movie))]
    async fn insert(&self, movie: NewMovie) -> StoreResult<Movie> {
        let id = MovieId::new();
        let row = sqlx::query("INSERT INTO movies (id, doc) VALUES ($1, $2) RETURNING id, doc")
            .bind(id.as_uuid())
            .bind(Json(&movie))
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;

        movie_from_row(&row)
    }

    #[instrument(skip(self, patch))]
    async fn update_by_id(&self, id: &str, patch: MoviePatch) -> StoreResult<Option<Movie>> {
        let id = StoreError::parse_id(id)?;
        // `||` merges top-level keys; absent patch fields are not serialized.
        let row = sqlx::query("UPDATE movies SET doc = doc || $2 WHERE id = $1 RETURNING id, doc")
            .bind(id.as_uuid())
            .bind(Json(&patch))
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_by_id", e))?;

        row.as_ref().map(movie_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> StoreResult<Option<Movie>> {
        let id = StoreError::parse_id(id)?;
        let row = sqlx::query("DELETE FROM movies WHERE id = $1 RETURNING id, doc")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        row.as_ref().map(movie_from_row).transpose()
    }
}

fn movie_from_row(row: &PgRow) -> StoreResult<Movie> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| map_sqlx_error("decode id", e))?;
    let Json(doc): Json<NewMovie> = row
        .try_get("doc")
        .map_err(|e| map_sqlx_error("decode doc", e))?;
    Ok(doc.with_id(MovieId::from_uuid(id)))
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23502") | Some("23514") => StoreError::Validation(msg),
                _ => StoreError::Other(msg),
            }
        }
        sqlx::Error::PoolClosed
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => {
            StoreError::Unavailable(format!("{} failed: {}", operation, err))
        }
        _ => StoreError::Other(format!("sqlx error in {}: {}", operation, err)),
    }
}
