//! Canned catalogue payloads.
//!
//! Bodies mirror what the backend actually emits, including its quirks:
//! genres keyed by numeric id, RFC 3339 release timestamps and the
//! `{ "error": { "message": ... } }` failure envelope.

use serde_json::{Value, json};

/// A single movie object as returned under `movie`/`movies`.
#[must_use]
pub fn movie_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} is a film about testing."),
        "year": 1999,
        "releaseDate": "1999-03-31T00:00:00Z",
        "runtime": 136,
        "rating": 5,
        "mpaaRating": "R",
        "genres": { "1": "Drama", "5": "Sci-Fi" }
    })
}

/// `{ "movie": {...} }` envelope for the single item endpoint.
#[must_use]
pub fn movie_envelope(id: i64, title: &str) -> Value {
    json!({ "movie": movie_json(id, title) })
}

/// `{ "movies": [...] }` envelope built from `(id, title)` pairs.
#[must_use]
pub fn movies_envelope(entries: &[(i64, &str)]) -> Value {
    let movies: Vec<Value> = entries
        .iter()
        .map(|(id, title)| movie_json(*id, title))
        .collect();
    json!({ "movies": movies })
}

/// `{ "genres": [...] }` envelope built from `(id, name)` pairs.
#[must_use]
pub fn genres_envelope(entries: &[(i64, &str)]) -> Value {
    let genres: Vec<Value> = entries
        .iter()
        .map(|(id, name)| json!({ "id": id, "genreName": name }))
        .collect();
    json!({ "genres": genres })
}

/// Failure envelope the backend writes for every handled error.
#[must_use]
pub fn error_envelope(message: &str) -> Value {
    json!({ "error": { "message": message } })
}

/// Graph endpoint success body wrapping `field` in `data`.
#[must_use]
pub fn graph_data(field: &str, value: Value) -> Value {
    json!({ "data": { field: value } })
}
