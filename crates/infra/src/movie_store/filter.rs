use marquee_catalog::Movie;

/// Query filter for [`MovieStore::find`](super::MovieStore::find).
///
/// Every `None` field matches anything; set fields are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Case-insensitive whole-value match against any entry of the genre list.
    pub genre: Option<String>,
    /// Exact (case-sensitive) match on the director.
    pub director: Option<String>,
}

impl MovieFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_genre(genre: impl Into<String>) -> Self {
        Self {
            genre: Some(genre.into()),
            ..Self::default()
        }
    }

    pub fn by_director(director: impl Into<String>) -> Self {
        Self {
            director: Some(director.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        let genre_ok = self.genre.as_deref().is_none_or(|g| movie.has_genre(g));
        let director_ok = self.director.as_deref().is_none_or(|d| movie.director == d);
        genre_ok && director_ok
    }
}
