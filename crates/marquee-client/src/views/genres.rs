//! Genre list and per-genre movie list.

use marquee_api_models::{Genre, Movie};

use crate::fetch::{FetchOrchestrator, FetchState};
use crate::requests;
use crate::routes::Route;
use crate::transport::Transport;

/// `/genres`.
#[derive(Debug, Default)]
pub struct GenresView {
    fetch: FetchOrchestrator<Vec<Genre>>,
}

impl GenresView {
    /// Controller in the `Pending` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every genre.
    pub async fn mount(&self, transport: &dyn Transport) -> FetchState<Vec<Genre>> {
        self.fetch.run(transport, requests::list_genres()).await;
        self.state()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState<Vec<Genre>> {
        self.fetch.state()
    }

    /// Route for a genre link, carrying its name along.
    #[must_use]
    pub fn link(genre: &Genre) -> Route {
        Route::Genre {
            id: genre.id,
            name: Some(genre.genre_name.clone()),
        }
    }
}

/// `/genres/{id}`: movies in one genre.
#[derive(Debug, Default)]
pub struct GenreView {
    fetch: FetchOrchestrator<Vec<Movie>>,
}

impl GenreView {
    /// Controller in the `Pending` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load movies for `genre_id`. A genre without movies renders an empty
    /// list.
    pub async fn mount(&self, transport: &dyn Transport, genre_id: i64) -> FetchState<Vec<Movie>> {
        self.fetch
            .run(transport, requests::movies_by_genre(genre_id))
            .await;
        self.state()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState<Vec<Movie>> {
        self.fetch.state()
    }
}
