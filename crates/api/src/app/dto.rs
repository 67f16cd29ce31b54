use serde::{Deserialize, Serialize};

use marquee_catalog::Movie;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct GenreQuery {
    pub genre: Option<String>,
}

impl GenreQuery {
    /// An empty `?genre=` is treated as no filter.
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMovieResponse {
    pub message: &'static str,
    pub deleted_movie: Option<Movie>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedMovieResponse {
    pub message: &'static str,
    pub updated_movie: Movie,
}
