//! `/admin`: the manage-catalogue list, gated on a session.

use marquee_api_models::Movie;

use crate::fetch::{FetchOrchestrator, FetchState};
use crate::requests;
use crate::routes::Route;
use crate::session::SessionStore;
use crate::transport::Transport;
use crate::views::{ViewOutcome, gate};

/// Admin movie list.
#[derive(Debug, Default)]
pub struct AdminView {
    fetch: FetchOrchestrator<Vec<Movie>>,
}

impl AdminView {
    /// Controller in the `Pending` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect to login without a session; otherwise load the list.
    pub async fn mount(
        &self,
        session: &SessionStore,
        transport: &dyn Transport,
    ) -> ViewOutcome<Vec<Movie>> {
        if let Err(route) = gate(session) {
            return ViewOutcome::Redirect(route);
        }
        self.fetch.run(transport, requests::list_movies()).await;
        ViewOutcome::Render(self.fetch.state())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FetchState<Vec<Movie>> {
        self.fetch.state()
    }

    /// Edit link for a listed movie.
    #[must_use]
    pub const fn edit_link(movie: &Movie) -> Route {
        Route::EditMovie { id: movie.id }
    }
}
