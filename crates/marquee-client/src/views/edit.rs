//! `/admin/movie/{id}`: create, edit or delete one movie.
//!
//! # Design
//! - Gated like the admin list; the backend still enforces authorization.
//! - Submit validates locally first and sends nothing when blocked.
//! - Delete asks for confirmation and sends nothing on "no".

use crate::confirm::{Confirm, ConfirmPrompt};
use crate::fetch::{FetchOrchestrator, FetchState, execute};
use crate::forms::{MovieDraft, SubmitOutcome, SubmitPhase};
use crate::requests;
use crate::routes::Route;
use crate::session::SessionStore;
use crate::transport::Transport;
use crate::views::{ViewOutcome, gate};

/// Edit form controller.
#[derive(Debug, Default)]
pub struct EditMovieView {
    draft: MovieDraft,
    phase: SubmitPhase,
    load: FetchOrchestrator<MovieDraft>,
}

impl EditMovieView {
    /// Controller holding an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect to login without a session. Otherwise load movie `id` into
    /// the draft, or start an empty draft when `id` is `0`.
    pub async fn mount(
        &mut self,
        session: &SessionStore,
        transport: &dyn Transport,
        id: i64,
    ) -> ViewOutcome<MovieDraft> {
        if let Err(route) = gate(session) {
            return ViewOutcome::Redirect(route);
        }
        self.phase = SubmitPhase::Idle;
        let ticket = self.load.begin();
        let outcome = if id > 0 {
            execute(transport, requests::get_movie(id))
                .await
                .map(|movie| MovieDraft::from_movie(&movie))
        } else {
            Ok(MovieDraft::new())
        };
        if let Some(FetchState::Ready(draft)) = self.load.settle(ticket, outcome) {
            self.draft = draft;
        }
        ViewOutcome::Render(self.load.state())
    }

    /// Draft as currently edited.
    #[must_use]
    pub const fn draft(&self) -> &MovieDraft {
        &self.draft
    }

    /// Mutable access for field edits.
    pub const fn draft_mut(&mut self) -> &mut MovieDraft {
        &mut self.draft
    }

    /// Submit lifecycle position.
    #[must_use]
    pub const fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// Validate and upsert the draft.
    pub async fn submit(
        &mut self,
        session: &SessionStore,
        transport: &dyn Transport,
    ) -> SubmitOutcome {
        self.phase = SubmitPhase::Validating;
        if let Err(errors) = self.draft.validate() {
            tracing::debug!(fields = errors.len(), "edit form blocked by validation");
            self.phase = SubmitPhase::Blocked(errors.clone());
            return SubmitOutcome::Blocked(errors);
        }
        let Ok(token) = gate(session) else {
            self.phase = SubmitPhase::Idle;
            return SubmitOutcome::Navigate(Route::Login);
        };

        self.phase = SubmitPhase::Submitting;
        let spec = requests::upsert_movie(token, &self.draft.to_payload());
        match execute(transport, spec).await {
            Ok(()) => {
                tracing::info!(movie_id = self.draft.id, created = self.draft.is_new(), "movie saved");
                self.finish(Route::Admin)
            }
            Err(err) => self.fail(err.message()),
        }
    }

    /// Confirm, then delete the draft's movie.
    pub async fn delete(
        &mut self,
        session: &SessionStore,
        transport: &dyn Transport,
        confirm: &dyn Confirm,
    ) -> SubmitOutcome {
        if !self.draft.can_delete() {
            return SubmitOutcome::Failed("only saved movies can be deleted".to_string());
        }
        let Ok(token) = gate(session) else {
            return SubmitOutcome::Navigate(Route::Login);
        };
        if !confirm.confirm(&ConfirmPrompt::delete_movie()).await {
            tracing::debug!(movie_id = self.draft.id, "delete declined");
            return SubmitOutcome::Cancelled;
        }

        self.phase = SubmitPhase::Submitting;
        match execute(transport, requests::delete_movie(token, self.draft.id)).await {
            Ok(()) => {
                tracing::info!(movie_id = self.draft.id, "movie deleted");
                self.finish(Route::Admin)
            }
            Err(err) => self.fail(err.message()),
        }
    }

    fn finish(&mut self, route: Route) -> SubmitOutcome {
        self.phase = SubmitPhase::Succeeded(route.clone());
        SubmitOutcome::Navigate(route)
    }

    fn fail(&mut self, message: String) -> SubmitOutcome {
        tracing::warn!(movie_id = self.draft.id, error = %message, "movie mutation failed");
        self.phase = SubmitPhase::Failed(message.clone());
        SubmitOutcome::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::Preset;
    use crate::fetch::testing::RecordingTransport;
    use crate::session::MemoryStorage;
    use crate::transport::{HttpTransport, RawResponse};
    use anyhow::Result;
    use httpmock::prelude::*;
    use marquee_test_support::fixtures::{error_envelope, movie_envelope};
    use serde_json::json;

    fn signed_in() -> Result<SessionStore> {
        let mut session = SessionStore::new(MemoryStorage::new());
        session.set("tok")?;
        Ok(session)
    }

    fn transport(server: &MockServer) -> Result<HttpTransport> {
        Ok(HttpTransport::new(
            reqwest::Client::new(),
            server.base_url().parse()?,
        ))
    }

    #[tokio::test]
    async fn unauthenticated_mount_redirects_without_fetching() {
        let transport = RecordingTransport::default();
        let session = SessionStore::new(MemoryStorage::new());

        let outcome = EditMovieView::new().mount(&session, &transport, 3).await;

        assert_eq!(outcome.redirect(), Some(&Route::Login));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn mount_loads_existing_movie_into_draft() -> Result<()> {
        let transport = RecordingTransport::replying(vec![Ok(RawResponse::json(
            200,
            &movie_envelope(3, "Ikiru"),
        ))]);
        let mut view = EditMovieView::new();

        let outcome = view.mount(&signed_in()?, &transport, 3).await;

        assert!(outcome.state().is_some_and(|state| state.ready().is_some()));
        assert_eq!(view.draft().title, "Ikiru");
        assert_eq!(view.draft().release_date, "1999-03-31");
        assert!(view.draft().can_delete());
        Ok(())
    }

    #[tokio::test]
    async fn mount_with_zero_starts_empty_without_fetching() -> Result<()> {
        let transport = RecordingTransport::default();
        let mut view = EditMovieView::new();

        let outcome = view.mount(&signed_in()?, &transport, 0).await;

        assert_eq!(outcome, ViewOutcome::Render(FetchState::Ready(MovieDraft::new())));
        assert!(transport.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn empty_title_blocks_submit_without_network() -> Result<()> {
        let transport = RecordingTransport::default();
        let mut view = EditMovieView::new();
        view.draft_mut().set_field("runtime", "90");
        let before = view.draft().clone();

        let outcome = view.submit(&signed_in()?, &transport).await;

        let SubmitOutcome::Blocked(errors) = outcome else {
            panic!("expected validation block, got {outcome:?}");
        };
        assert!(errors.contains("title"));
        assert!(matches!(view.phase(), SubmitPhase::Blocked(_)));
        assert_eq!(view.draft(), &before);
        assert!(transport.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn submit_posts_draft_and_navigates_to_admin() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/admin/editmovie")
                .header("authorization", "Bearer tok")
                .json_body(json!({
                    "id": "0",
                    "title": "Stalker",
                    "description": "",
                    "releaseDate": "1979-05-25",
                    "runtime": "",
                    "rating": "",
                    "mpaaRating": ""
                }));
            then.status(200).json_body(json!({ "ok": true }));
        });
        let mut view = EditMovieView::new();
        view.draft_mut().set_field("title", "Stalker");
        view.draft_mut().set_field("releaseDate", "1979-05-25");

        let outcome = view.submit(&signed_in()?, &transport(&server)?).await;

        mock.assert();
        assert_eq!(outcome, SubmitOutcome::Navigate(Route::Admin));
        assert_eq!(view.phase(), &SubmitPhase::Succeeded(Route::Admin));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_submit_stays_with_backend_message() -> Result<()> {
        let transport = RecordingTransport::replying(vec![Ok(RawResponse::json(
            400,
            &error_envelope("title taken"),
        ))]);
        let mut view = EditMovieView::new();
        view.draft_mut().set_field("title", "Dup");

        let outcome = view.submit(&signed_in()?, &transport).await;

        assert_eq!(outcome, SubmitOutcome::Failed("title taken".to_string()));
        assert_eq!(view.phase(), &SubmitPhase::Failed("title taken".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() -> Result<()> {
        let transport = RecordingTransport::default();
        let mut view = EditMovieView::new();
        view.draft_mut().id = 4;

        let outcome = view.delete(&signed_in()?, &transport, &Preset(false)).await;

        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert_eq!(view.phase(), &SubmitPhase::Idle);
        assert!(transport.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn confirmed_delete_sends_one_request_and_navigates() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/v1/admin/deletemovie/4")
                .header("authorization", "Bearer tok");
            then.status(204);
        });
        let mut view = EditMovieView::new();
        view.draft_mut().id = 4;

        let outcome = view
            .delete(&signed_in()?, &transport(&server)?, &Preset(true))
            .await;

        mock.assert();
        assert_eq!(outcome, SubmitOutcome::Navigate(Route::Admin));
        Ok(())
    }

    #[tokio::test]
    async fn failed_delete_reports_error_message() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/v1/admin/deletemovie/4");
            then.status(403).json_body(error_envelope("not allowed"));
        });
        let mut view = EditMovieView::new();
        view.draft_mut().id = 4;

        let outcome = view
            .delete(&signed_in()?, &transport(&server)?, &Preset(true))
            .await;

        mock.assert();
        assert_eq!(outcome, SubmitOutcome::Failed("not allowed".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn new_drafts_cannot_be_deleted() -> Result<()> {
        let transport = RecordingTransport::default();
        let mut view = EditMovieView::new();

        let outcome = view.delete(&signed_in()?, &transport, &Preset(true)).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(transport.requests().is_empty());
        Ok(())
    }
}
