//! View controllers: one per screen.
//!
//! # Design
//! - A controller mounts, optionally checks the session, runs its fetch and
//!   exposes the resulting [`FetchState`].
//! - Gated controllers redirect to login without issuing any request.
//! - Controllers own no rendering; callers read their state.

pub mod admin;
pub mod catalogue;
pub mod edit;
pub mod genres;
pub mod login;
pub mod search;

use crate::fetch::FetchState;
use crate::routes::Route;
use crate::session::SessionStore;

/// What mounting a controller produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome<T> {
    /// Render this state.
    Render(FetchState<T>),
    /// Leave the screen for `Route`.
    Redirect(Route),
}

impl<T> ViewOutcome<T> {
    /// State to render, if the view did not redirect.
    #[must_use]
    pub const fn state(&self) -> Option<&FetchState<T>> {
        match self {
            Self::Render(state) => Some(state),
            Self::Redirect(_) => None,
        }
    }

    /// Redirect target, if any.
    #[must_use]
    pub const fn redirect(&self) -> Option<&Route> {
        match self {
            Self::Redirect(route) => Some(route),
            Self::Render(_) => None,
        }
    }
}

/// Token for a gated screen, or the login redirect.
///
/// # Errors
///
/// Returns [`Route::Login`] when the session holds no token.
pub fn gate(session: &SessionStore) -> Result<&str, Route> {
    session.read().ok_or_else(|| {
        tracing::debug!("unauthenticated access to gated view; redirecting to login");
        Route::Login
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStorage;

    #[test]
    fn gate_redirects_without_token() -> anyhow::Result<()> {
        let mut session = SessionStore::new(MemoryStorage::new());
        assert_eq!(gate(&session), Err(Route::Login));
        session.set("tok")?;
        assert_eq!(gate(&session), Ok("tok"));
        Ok(())
    }
}
