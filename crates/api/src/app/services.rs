use std::sync::Arc;

use marquee_infra::config::{AppConfig, StoreBackend};
use marquee_infra::{InMemoryMovieStore, MovieService, MovieStore};

#[cfg(feature = "postgres")]
use marquee_infra::PostgresMovieStore;

/// Type-erased store so one handler set serves every backend.
pub type DynMovieStore = Arc<dyn MovieStore>;

#[derive(Clone)]
pub struct AppServices {
    pub movies: MovieService<DynMovieStore>,
}

impl AppServices {
    pub fn new(store: DynMovieStore) -> Self {
        Self {
            movies: MovieService::new(store),
        }
    }

    /// Dev/test wiring: a fresh, empty in-process store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryMovieStore::new()))
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match &config.store {
        StoreBackend::InMemory => Ok(AppServices::in_memory()),
        StoreBackend::Postgres { url } => build_persistent_services(url).await,
    }
}

#[cfg(feature = "postgres")]
async fn build_persistent_services(url: &str) -> anyhow::Result<AppServices> {
    let store = PostgresMovieStore::connect(url).await?;
    Ok(AppServices::new(Arc::new(store)))
}

#[cfg(not(feature = "postgres"))]
async fn build_persistent_services(_url: &str) -> anyhow::Result<AppServices> {
    tracing::warn!(
        "USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory"
    );
    Ok(AppServices::in_memory())
}
