//! Field rules for candidate movie payloads.
//!
//! Payloads arrive as untyped JSON objects so every rule can check presence
//! *and* type independently; all rules run, so a single call reports every
//! problem at once.

use serde_json::Value;

use crate::movie::Payload;

pub const MISSING_TITLE: &str = "missing title";
pub const INVALID_YEAR: &str = "invalid year";
pub const MISSING_DIRECTOR: &str = "missing director";
pub const INVALID_DURATION: &str = "invalid duration";
pub const MISSING_IMAGE: &str = "missing image";
pub const MISSING_GENRE: &str = "missing genre";
pub const INVALID_RATING: &str = "invalid rating";

/// Check a candidate payload against every field rule.
///
/// Returns one message per failing field, in field order. An empty vector
/// means the payload is a valid movie.
pub fn validate(candidate: &Payload) -> Vec<String> {
    let checks: [(bool, &str); 7] = [
        (title(candidate).is_some(), MISSING_TITLE),
        (year(candidate).is_some(), INVALID_YEAR),
        (director(candidate).is_some(), MISSING_DIRECTOR),
        (duration(candidate).is_some(), INVALID_DURATION),
        (poster(candidate).is_some(), MISSING_IMAGE),
        (genre(candidate).is_some(), MISSING_GENRE),
        (rate(candidate).is_some(), INVALID_RATING),
    ];

    checks
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, msg)| msg.to_string())
        .collect()
}

pub(crate) fn title(c: &Payload) -> Option<String> {
    non_blank(c.get("title"))
}

pub(crate) fn year(c: &Payload) -> Option<i32> {
    c.get("year")
        .and_then(whole_number)
        .filter(|y| *y > 1800 && *y < 3000)
        .and_then(|y| i32::try_from(y).ok())
}

/// Integers, or floats with no fractional part (`2010.0`).
fn whole_number(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

pub(crate) fn director(c: &Payload) -> Option<String> {
    non_blank(c.get("director"))
}

pub(crate) fn duration(c: &Payload) -> Option<u32> {
    c.get("duration")
        .and_then(whole_number)
        .and_then(|d| u32::try_from(d).ok())
        .filter(|d| *d > 0)
}

pub(crate) fn poster(c: &Payload) -> Option<String> {
    non_blank(c.get("poster"))
}

/// A single string is normalized to a one-element list; a list must be
/// non-empty with every entry a non-blank string.
pub(crate) fn genre(c: &Payload) -> Option<Vec<String>> {
    match c.get("genre")? {
        Value::String(s) if !s.trim().is_empty() => Some(vec![s.clone()]),
        Value::Array(items) if !items.is_empty() => {
            items.iter().map(|v| non_blank(Some(v))).collect()
        }
        _ => None,
    }
}

pub(crate) fn rate(c: &Payload) -> Option<f64> {
    c.get("rate")
        .and_then(Value::as_f64)
        .filter(|r| *r > 0.0 && *r < 10.0)
}

fn non_blank(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
