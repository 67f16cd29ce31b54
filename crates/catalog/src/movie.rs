use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use marquee_core::{DomainError, DomainResult, Entity, MovieId};

use crate::validation;

/// Untyped JSON object as received from a client.
pub type Payload = Map<String, Value>;

/// Field names a client may set. Anything else in a payload is ignored.
pub const MOVIE_FIELDS: [&str; 7] = [
    "title", "year", "director", "duration", "poster", "genre", "rate",
];

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub director: String,
    /// Running time in minutes.
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<String>,
    pub rate: f64,
}

impl Entity for Movie {
    type Id = MovieId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Movie {
    /// Case-insensitive, whole-value genre match ("sci-fi" matches "Sci-Fi",
    /// "sci" does not).
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genre.iter().any(|g| g.to_lowercase() == wanted)
    }

    /// The client-settable fields as an untyped payload.
    pub fn to_payload(&self) -> Payload {
        let mut p = Payload::new();
        p.insert("title".into(), Value::from(self.title.clone()));
        p.insert("year".into(), Value::from(self.year));
        p.insert("director".into(), Value::from(self.director.clone()));
        p.insert("duration".into(), Value::from(self.duration));
        p.insert("poster".into(), Value::from(self.poster.clone()));
        p.insert("genre".into(), Value::from(self.genre.clone()));
        p.insert("rate".into(), Value::from(self.rate));
        p
    }

    /// Overlay the recognised fields of `patch` on this record's payload.
    pub fn merge_payload(&self, patch: &Payload) -> Payload {
        let mut merged = self.to_payload();
        for (k, v) in patch {
            if MOVIE_FIELDS.contains(&k.as_str()) {
                merged.insert(k.clone(), v.clone());
            }
        }
        merged
    }

    /// Apply a (previously validated) patch in place. The identifier is never touched.
    pub fn apply(&mut self, patch: &MoviePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = &patch.director {
            self.director = director.clone();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(poster) = &patch.poster {
            self.poster = poster.clone();
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
    }
}

/// A validated movie that has not been assigned an identifier yet.
///
/// This is also the document shape persisted by stores (the id lives beside it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<String>,
    pub rate: f64,
}

impl NewMovie {
    /// Validate a create payload and convert it to a typed record.
    ///
    /// Fails with [`DomainError::Validation`] listing every failing field.
    pub fn from_payload(payload: &Payload) -> DomainResult<Self> {
        let fields = (
            validation::title(payload),
            validation::year(payload),
            validation::director(payload),
            validation::duration(payload),
            validation::poster(payload),
            validation::genre(payload),
            validation::rate(payload),
        );

        match fields {
            (
                Some(title),
                Some(year),
                Some(director),
                Some(duration),
                Some(poster),
                Some(genre),
                Some(rate),
            ) => Ok(Self {
                title,
                year,
                director,
                duration,
                poster,
                genre,
                rate,
            }),
            _ => Err(DomainError::validation(validation::validate(payload))),
        }
    }

    pub fn with_id(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            year: self.year,
            director: self.director,
            duration: self.duration,
            poster: self.poster,
            genre: self.genre,
            rate: self.rate,
        }
    }
}

/// The subset of fields supplied by a partial update.
///
/// Serializes without the absent fields, so it can be merged straight into a
/// stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoviePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl MoviePatch {
    /// Build a patch for `existing` from a partial payload.
    ///
    /// The merged result (existing record overlaid with the supplied fields)
    /// must pass the full rule set, so an update can never persist a record
    /// that a create would have rejected. Unknown keys, including `id`, are
    /// ignored.
    pub fn from_payload(existing: &Movie, patch: &Payload) -> DomainResult<Self> {
        let errors = validation::validate(&existing.merge_payload(patch));
        if !errors.is_empty() {
            return Err(DomainError::validation(errors));
        }

        let supplied = |field: &str| patch.contains_key(field);
        Ok(Self {
            title: validation::title(patch).filter(|_| supplied("title")),
            year: validation::year(patch).filter(|_| supplied("year")),
            director: validation::director(patch).filter(|_| supplied("director")),
            duration: validation::duration(patch).filter(|_| supplied("duration")),
            poster: validation::poster(patch).filter(|_| supplied("poster")),
            genre: validation::genre(patch).filter(|_| supplied("genre")),
            rate: validation::rate(patch).filter(|_| supplied("rate")),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Payload {
        match v {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    fn inception_payload() -> Payload {
        payload(json!({
            "title": "Inception",
            "year": 2010,
            "director": "Christopher Nolan",
            "duration": 148,
            "poster": "http://x/p.jpg",
            "genre": ["Sci-Fi", "Thriller"],
            "rate": 8.8
        }))
    }

    fn inception() -> Movie {
        NewMovie::from_payload(&inception_payload())
            .unwrap()
            .with_id(MovieId::new())
    }

    #[test]
    fn from_payload_keeps_every_field() {
        let m = NewMovie::from_payload(&inception_payload()).unwrap();
        assert_eq!(m.title, "Inception");
        assert_eq!(m.year, 2010);
        assert_eq!(m.director, "Christopher Nolan");
        assert_eq!(m.duration, 148);
        assert_eq!(m.poster, "http://x/p.jpg");
        assert_eq!(m.genre, vec!["Sci-Fi", "Thriller"]);
        assert_eq!(m.rate, 8.8);
    }

    #[test]
    fn from_payload_normalizes_string_genre() {
        let mut p = inception_payload();
        p.insert("genre".into(), json!("Drama"));
        let m = NewMovie::from_payload(&p).unwrap();
        assert_eq!(m.genre, vec!["Drama"]);
    }

    #[test]
    fn from_payload_reports_all_failures() {
        let p = payload(json!({ "title": "Only a title" }));
        let err = NewMovie::from_payload(&p).unwrap_err();
        assert_eq!(err.messages().len(), 6);
        assert!(!err.messages().iter().any(|m| m == "missing title"));
    }

    #[test]
    fn has_genre_is_case_insensitive_and_anchored() {
        let m = inception();
        assert!(m.has_genre("sci-fi"));
        assert!(m.has_genre("THRILLER"));
        assert!(!m.has_genre("sci"));
        assert!(!m.has_genre("Sci-Fi Thriller"));
    }

    #[test]
    fn serializes_with_id_and_genre_list() {
        let m = inception();
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["id"], json!(m.id.to_string()));
        assert_eq!(v["genre"], json!(["Sci-Fi", "Thriller"]));
        assert_eq!(v["rate"], json!(8.8));
    }

    #[test]
    fn patch_with_only_rate_changes_only_rate() {
        let mut m = inception();
        let before = m.clone();
        let patch = MoviePatch::from_payload(&m, &payload(json!({ "rate": 9.5 }))).unwrap();
        assert_eq!(
            patch,
            MoviePatch {
                rate: Some(9.5),
                ..MoviePatch::default()
            }
        );

        m.apply(&patch);
        assert_eq!(m.rate, 9.5);
        assert_eq!(Movie { rate: before.rate, ..m }, before);
    }

    #[test]
    fn patch_that_breaks_a_rule_is_rejected() {
        let m = inception();
        let err = MoviePatch::from_payload(&m, &payload(json!({ "duration": -3, "title": "" })))
            .unwrap_err();
        assert_eq!(err.messages(), ["missing title", "invalid duration"]);
    }

    #[test]
    fn patch_ignores_id_and_unknown_keys() {
        let m = inception();
        let patch = MoviePatch::from_payload(
            &m,
            &payload(json!({ "id": "something-else", "_id": "x", "studio": "WB" })),
        )
        .unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_serializes_only_supplied_fields() {
        let patch = MoviePatch {
            genre: Some(vec!["Drama".into()]),
            ..MoviePatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "genre": ["Drama"] }));
    }
}
