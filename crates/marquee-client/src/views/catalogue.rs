//! Public catalogue screens backed by the REST endpoints.

use marquee_api_models::Movie;

use crate::fetch::{FetchOrchestrator, FetchState};
use crate::requests;
use crate::transport::Transport;

/// `/movies`: every movie.
#[derive(Debug, Default)]
pub struct MoviesView {
    fetch: FetchOrchestrator<Vec<Movie>>,
}

impl MoviesView {
    /// Controller in the `Pending` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the list.
    pub async fn mount(&self, transport: &dyn Transport) -> FetchState<Vec<Movie>> {
        self.fetch.run(transport, requests::list_movies()).await;
        self.state()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState<Vec<Movie>> {
        self.fetch.state()
    }
}

/// `/movies/{id}`: one movie.
#[derive(Debug, Default)]
pub struct MovieView {
    fetch: FetchOrchestrator<Movie>,
}

impl MovieView {
    /// Controller in the `Pending` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load movie `id`; calling again with another id supersedes the
    /// earlier load.
    pub async fn mount(&self, transport: &dyn Transport, id: i64) -> FetchState<Movie> {
        self.fetch.run(transport, requests::get_movie(id)).await;
        self.state()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState<Movie> {
        self.fetch.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpTransport;
    use anyhow::Result;
    use httpmock::prelude::*;
    use marquee_test_support::fixtures::{error_envelope, movie_envelope, movies_envelope};

    fn transport(server: &MockServer) -> Result<HttpTransport> {
        Ok(HttpTransport::new(
            reqwest::Client::new(),
            server.base_url().parse()?,
        ))
    }

    #[tokio::test]
    async fn movies_view_renders_the_list() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1/movies");
            then.status(200)
                .json_body(movies_envelope(&[(1, "Alien"), (2, "Brazil")]));
        });

        let view = MoviesView::new();
        assert!(view.state().is_pending());
        let state = view.mount(&transport(&server)?).await;

        mock.assert();
        let titles: Vec<String> = state
            .ready()
            .map(|movies| movies.iter().map(|m| m.title.clone()).collect())
            .unwrap_or_default();
        assert_eq!(titles, vec!["Alien".to_string(), "Brazil".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn movie_view_renders_item_or_backend_error() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/movie/1");
            then.status(200).json_body(movie_envelope(1, "Alien"));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/movie/99");
            then.status(404).json_body(error_envelope("movie not found"));
        });
        let transport = transport(&server)?;
        let view = MovieView::new();

        let found = view.mount(&transport, 1).await;
        assert_eq!(found.ready().map(|m| m.id), Some(1));

        let missing = view.mount(&transport, 99).await;
        assert_eq!(missing, FetchState::Failed("movie not found".to_string()));
        Ok(())
    }
}
