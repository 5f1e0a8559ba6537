//! Graph-query screens: live title search and single movie.
//!
//! # Design
//! - Every text change issues a fresh query; the newest one wins even when
//!   older responses arrive later.
//! - Handlers take `&self` so overlapping changes can run concurrently.

use std::sync::{Mutex, PoisonError};

use marquee_api_models::Movie;

use crate::fetch::{FetchOrchestrator, FetchState};
use crate::graphql::{self, CatalogueQuery};
use crate::transport::Transport;

/// `/graphql`: search-as-you-type over the catalogue.
#[derive(Debug, Default)]
pub struct SearchView {
    fetch: FetchOrchestrator<Vec<Movie>>,
    text: Mutex<String>,
}

impl SearchView {
    /// Controller with empty filter text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial load: list every movie.
    pub async fn mount(&self, transport: &dyn Transport) -> FetchState<Vec<Movie>> {
        self.on_search_text(transport, "").await;
        self.state()
    }

    /// Record new filter text and issue its query.
    ///
    /// Returns the applied state, or `None` when a later change superseded
    /// this one before it resolved.
    pub async fn on_search_text(
        &self,
        transport: &dyn Transport,
        text: &str,
    ) -> Option<FetchState<Vec<Movie>>> {
        text.clone_into(&mut self.text.lock().unwrap_or_else(PoisonError::into_inner));
        let query = CatalogueQuery::select(text);
        tracing::debug!(?query, "search text changed");
        self.fetch.run(transport, query.spec()).await
    }

    /// Filter text of the latest change.
    #[must_use]
    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState<Vec<Movie>> {
        self.fetch.state()
    }
}

/// `/moviesgraphql/{id}`: one movie via the graph endpoint.
#[derive(Debug, Default)]
pub struct GraphMovieView {
    fetch: FetchOrchestrator<Movie>,
}

impl GraphMovieView {
    /// Controller in the `Pending` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load movie `id`.
    pub async fn mount(&self, transport: &dyn Transport, id: i64) -> FetchState<Movie> {
        self.fetch.run(transport, graphql::movie(id)).await;
        self.state()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState<Movie> {
        self.fetch.state()
    }
}
