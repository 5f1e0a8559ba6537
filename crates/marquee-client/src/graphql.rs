//! Graph-query transport: fixed documents with bound variables.
//!
//! User input is only ever passed through `variables`, never spliced into
//! a document.

use marquee_api_models::{GraphQlRequest, GraphQlResponse, ListData, Movie, MovieData, SearchData};
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::fetch::{FetchSpec, decode_json};
use crate::transport::ApiRequest;

/// Path of the graph-query endpoint.
pub const GRAPHQL_PATH: &str = "/v1/graphql";

/// Every movie, summary fields only.
pub const LIST_QUERY: &str = "query List { list { id title runtime year description } }";

/// Movies whose title contains `$titleContains`.
pub const SEARCH_QUERY: &str = "query Search($titleContains: String!) { \
     search(titleContains: $titleContains) { id title description runtime year } }";

/// One movie with every field.
pub const MOVIE_QUERY: &str = "query Movie($id: Int!) { movie(id: $id) { \
     id title runtime year description releaseDate rating mpaaRating poster genres } }";

/// Which catalogue query the search view issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueQuery {
    /// No filter: list every movie.
    ListAll,
    /// Filter by title substring.
    TitleContains(String),
}

impl CatalogueQuery {
    /// Pick the query for the current filter text. Only the empty string
    /// lists everything; whitespace is a real filter.
    #[must_use]
    pub fn select(text: &str) -> Self {
        if text.is_empty() {
            Self::ListAll
        } else {
            Self::TitleContains(text.to_string())
        }
    }

    /// Spec for this query.
    #[must_use]
    pub fn spec(&self) -> FetchSpec<Vec<Movie>> {
        match self {
            Self::ListAll => list_all(),
            Self::TitleContains(text) => search(text),
        }
    }
}

/// `list` query.
#[must_use]
pub fn list_all() -> FetchSpec<Vec<Movie>> {
    FetchSpec::new(graph_request(GraphQlRequest::new(LIST_QUERY)), 200, decode_list)
}

/// `search(titleContains:)` query.
#[must_use]
pub fn search(title_contains: &str) -> FetchSpec<Vec<Movie>> {
    let request = GraphQlRequest::new(SEARCH_QUERY).variable("titleContains", title_contains);
    FetchSpec::new(graph_request(request), 200, decode_search)
}

/// `movie(id:)` query.
#[must_use]
pub fn movie(id: i64) -> FetchSpec<Movie> {
    let request = GraphQlRequest::new(MOVIE_QUERY).variable("id", id);
    FetchSpec::new(graph_request(request), 200, decode_movie)
}

fn graph_request(request: GraphQlRequest) -> ApiRequest {
    let body = serde_json::json!({
        "query": request.query,
        "variables": request.variables,
    });
    ApiRequest::post(GRAPHQL_PATH, body)
}

/// Unwrap a graph response, turning reported errors into failures.
///
/// # Errors
///
/// Returns [`FetchError::Application`] when `errors` is non-empty and
/// [`FetchError::Decode`] when the body is malformed or carries no `data`.
pub fn decode_graph<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    let response = decode_json::<GraphQlResponse<T>>(body)?;
    if !response.errors.is_empty() {
        let message = response
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FetchError::Application {
            status: 200,
            message,
        });
    }
    response
        .data
        .ok_or_else(|| FetchError::Decode("graph response carried no data".to_string()))
}

fn decode_list(body: &[u8]) -> Result<Vec<Movie>, FetchError> {
    decode_graph::<ListData>(body).map(|data| data.list)
}

fn decode_search(body: &[u8]) -> Result<Vec<Movie>, FetchError> {
    decode_graph::<SearchData>(body).map(|data| data.search)
}

fn decode_movie(body: &[u8]) -> Result<Movie, FetchError> {
    decode_graph::<MovieData>(body)?
        .movie
        .ok_or_else(|| FetchError::Application {
            status: 200,
            message: "movie not found".to_string(),
        })
}
