//! `/login` and `/logout`.

use marquee_api_models::SigninRequest;

pub use crate::forms::Credentials;
use crate::fetch::execute;
use crate::forms::{SubmitOutcome, SubmitPhase};
use crate::requests;
use crate::routes::Route;
use crate::session::{SessionError, SessionStore};
use crate::transport::Transport;

/// Sign-in form controller.
#[derive(Debug, Default)]
pub struct LoginView {
    credentials: Credentials,
    phase: SubmitPhase,
}

impl LoginView {
    /// Controller with `credentials` filled in.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            phase: SubmitPhase::Idle,
        }
    }

    /// Form input.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Mutable form input.
    pub const fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    /// Submit lifecycle position.
    #[must_use]
    pub const fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    /// Validate, sign in and store the issued token.
    pub async fn submit(
        &mut self,
        session: &mut SessionStore,
        transport: &dyn Transport,
    ) -> SubmitOutcome {
        self.phase = SubmitPhase::Validating;
        if let Err(errors) = self.credentials.validate() {
            self.phase = SubmitPhase::Blocked(errors.clone());
            return SubmitOutcome::Blocked(errors);
        }

        self.phase = SubmitPhase::Submitting;
        let request = SigninRequest {
            email: self.credentials.email.trim().to_string(),
            password: self.credentials.password.clone(),
        };
        let token = match execute(transport, requests::sign_in(&request)).await {
            Ok(token) => token,
            Err(err) => return self.fail(err.message()),
        };
        if let Err(err) = session.set(token) {
            return self.fail(err.to_string());
        }
        tracing::info!(email = %request.email, "signed in");
        self.phase = SubmitPhase::Succeeded(Route::Admin);
        SubmitOutcome::Navigate(Route::Admin)
    }

    fn fail(&mut self, message: String) -> SubmitOutcome {
        tracing::warn!(error = %message, "sign-in failed");
        self.phase = SubmitPhase::Failed(message.clone());
        SubmitOutcome::Failed(message)
    }
}

/// Forget the session and go home.
///
/// # Errors
///
/// Returns the storage error when the persisted token cannot be removed;
/// the session then stays signed in.
pub fn logout(session: &mut SessionStore) -> Result<Route, SessionError> {
    session.clear().inspect_err(|err| {
        tracing::warn!(error = %err, "failed to remove persisted session");
    })?;
    Ok(Route::Home)
}
