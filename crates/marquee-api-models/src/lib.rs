#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Marquee catalogue API.
//!
//! These types describe both transports the client speaks: the REST
//! endpoints under `/v1` and the single graph-query endpoint. Decoding is
//! deliberately lenient where the backend is: list envelopes tolerate a
//! `null` or missing array and movie genres accept either a list of names
//! or the id-keyed object the backend serialises from its genre map.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Base URL prepended to a movie's poster path.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w200";

/// MPAA ratings accepted by the edit form, in display order.
pub const MPAA_RATINGS: [&str; 5] = ["G", "PG", "PG13", "R", "NC17"];

/// Structured failure payload written by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// Nested error description.
    pub error: ErrorBody,
}

/// Human-readable failure description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Message suitable for display.
    pub message: String,
}

/// Catalogue item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Backend identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Free-form synopsis.
    #[serde(default)]
    pub description: String,
    /// Release year, when the query selected it.
    #[serde(default)]
    pub year: Option<i32>,
    /// Release timestamp as sent by the backend (RFC 3339).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: i32,
    /// Audience rating.
    #[serde(default)]
    pub rating: i32,
    /// MPAA classification label.
    #[serde(default)]
    pub mpaa_rating: String,
    /// Poster path relative to [`POSTER_BASE_URL`].
    #[serde(default)]
    pub poster: Option<String>,
    /// Genre names.
    #[serde(default, deserialize_with = "genre_names")]
    pub genres: Vec<String>,
}

impl Movie {
    /// Absolute poster URL, if the movie has a poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }

    /// Description truncated to `limit` characters, suffixed with `...`.
    #[must_use]
    pub fn excerpt(&self, limit: usize) -> String {
        let mut excerpt: String = self.description.chars().take(limit).collect();
        excerpt.push_str("...");
        excerpt
    }
}

/// Catalogue genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    pub genre_name: String,
}

/// `GET /v1/movie/{id}` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieEnvelope {
    /// The requested movie.
    pub movie: Movie,
}

/// `GET /v1/movies` and `GET /v1/movies/{genreId}` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoviesEnvelope {
    /// Movies; `null` or missing decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub movies: Vec<Movie>,
}

/// `GET /v1/genres` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenresEnvelope {
    /// Genres; `null` or missing decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<Genre>,
}

/// `POST /v1/signin` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SigninRequest {
    /// Account e-mail.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// `POST /v1/admin/editmovie` request body.
///
/// The backend parses every field from a string, so the client never
/// converts them itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePayload {
    /// `0` creates a new movie, anything else updates.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Free-form synopsis.
    pub description: String,
    /// Release date as `YYYY-MM-DD`.
    pub release_date: String,
    /// Runtime in minutes.
    pub runtime: String,
    /// Audience rating.
    pub rating: String,
    /// MPAA classification label.
    pub mpaa_rating: String,
}

/// `GET /status` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppStatus {
    /// Availability label.
    pub status: String,
    /// Deployment environment name.
    pub environment: String,
    /// Backend version string.
    pub version: String,
}

/// Body posted to the graph-query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQlRequest {
    /// Query document; never contains user input.
    pub query: String,
    /// Values bound to the document's `$variables`.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
}

impl GraphQlRequest {
    /// Request with no bound variables.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }

    /// Bind a named variable.
    #[must_use]
    pub fn variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }
}

/// Graph-query response envelope.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphQlResponse<T> {
    /// Selected data, absent when the query failed.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Query-level errors reported alongside a 200 status.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<GraphQlError>,
}

/// Single query-level error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphQlError {
    /// Human-readable message.
    pub message: String,
}

/// `data` of the `list` query.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ListData {
    /// Every movie in the catalogue.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub list: Vec<Movie>,
}

/// `data` of the `search` query.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SearchData {
    /// Movies whose title contains the filter.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub search: Vec<Movie>,
}

/// `data` of the `movie` query.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MovieData {
    /// The requested movie, `null` when the id is unknown.
    #[serde(default)]
    pub movie: Option<Movie>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenreNames {
    List(Vec<String>),
    ById(BTreeMap<String, String>),
}

fn genre_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = match Option::<GenreNames>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(GenreNames::List(names)) => names,
        Some(GenreNames::ById(by_id)) => {
            // Keys are numeric ids; order them numerically, not lexically.
            let mut entries: Vec<(String, String)> = by_id.into_iter().collect();
            entries.sort_by_key(|(key, _)| (key.parse::<i64>().ok(), key.clone()));
            entries.into_iter().map(|(_, name)| name).collect()
        }
    };
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_test_support::fixtures::{genres_envelope, movie_envelope, movies_envelope};
    use serde_json::json;

    #[test]
    fn movie_genres_accept_id_keyed_object_in_numeric_order() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 1,
            "title": "Example",
            "genres": { "10": "Western", "2": "Comedy", "1": "Drama" }
        }))
        .expect("movie decodes");
        assert_eq!(movie.genres, vec!["Drama", "Comedy", "Western"]);
    }

    #[test]
    fn movie_genres_default_to_empty_when_absent_or_null() {
        let absent: Movie =
            serde_json::from_value(json!({ "id": 1, "title": "A" })).expect("absent decodes");
        assert!(absent.genres.is_empty());

        let null: Movie = serde_json::from_value(json!({ "id": 1, "title": "A", "genres": null }))
            .expect("null decodes");
        assert!(null.genres.is_empty());
    }

    #[test]
    fn movie_genres_accept_plain_list() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 3,
            "title": "Listed",
            "genres": ["Horror", "Thriller"]
        }))
        .expect("movie decodes");
        assert_eq!(movie.genres, vec!["Horror", "Thriller"]);
    }

    #[test]
    fn fixture_envelopes_decode() {
        let single: MovieEnvelope =
            serde_json::from_value(movie_envelope(7, "Seven")).expect("movie envelope");
        assert_eq!(single.movie.id, 7);
        assert_eq!(single.movie.mpaa_rating, "R");
        assert_eq!(
            single.movie.release_date.as_deref(),
            Some("1999-03-31T00:00:00Z")
        );

        let list: MoviesEnvelope =
            serde_json::from_value(movies_envelope(&[(1, "One"), (2, "Two")])).expect("list");
        assert_eq!(list.movies.len(), 2);

        let genres: GenresEnvelope =
            serde_json::from_value(genres_envelope(&[(1, "Drama")])).expect("genres");
        assert_eq!(genres.genres[0].genre_name, "Drama");
    }

    #[test]
    fn movies_envelope_tolerates_null_and_missing_list() {
        let null: MoviesEnvelope =
            serde_json::from_value(json!({ "movies": null })).expect("null decodes");
        assert!(null.movies.is_empty());
        let missing: MoviesEnvelope = serde_json::from_value(json!({})).expect("missing decodes");
        assert!(missing.movies.is_empty());
    }

    #[test]
    fn graph_request_omits_empty_variables() {
        let plain = serde_json::to_value(GraphQlRequest::new("{ list { id } }")).expect("encode");
        assert_eq!(plain, json!({ "query": "{ list { id } }" }));

        let bound = serde_json::to_value(
            GraphQlRequest::new("query($t: String!) { search(titleContains: $t) { id } }")
                .variable("t", "\"quoted\""),
        )
        .expect("encode");
        assert_eq!(bound["variables"]["t"], "\"quoted\"");
    }

    #[test]
    fn graph_response_reads_errors_without_data() {
        let response: GraphQlResponse<ListData> =
            serde_json::from_value(json!({ "errors": [{ "message": "bad query" }] }))
                .expect("decodes");
        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "bad query");
    }

    #[test]
    fn poster_url_and_excerpt_helpers() {
        let mut movie: Movie =
            serde_json::from_value(json!({ "id": 1, "title": "A", "description": "abcdef" }))
                .expect("decodes");
        assert_eq!(movie.poster_url(), None);
        movie.poster = Some("/p.jpg".to_string());
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w200/p.jpg")
        );
        assert_eq!(movie.excerpt(3), "abc...");
    }
}
