//! Failure taxonomy for fetch attempts.

use marquee_api_models::ErrorEnvelope;
use thiserror::Error;

/// Why a fetch attempt did not produce a value.
///
/// Every variant collapses into [`crate::fetch::FetchState::Failed`]; the
/// distinction only matters for logging and tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The call could not complete (connect, timeout, body read).
    #[error("{0}")]
    Network(String),
    /// The backend answered with a failure status or a query-level error.
    #[error("{message}")]
    Application {
        /// HTTP status of the response.
        status: u16,
        /// Message extracted from the backend payload, or a raw description.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("{0}")]
    Decode(String),
}

impl FetchError {
    /// Classify a response whose status was not the expected success code.
    ///
    /// Prefers the backend's `{ "error": { "message" } }` payload, then the raw
    /// body text, then the bare status.
    #[must_use]
    pub fn from_failure(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorEnvelope>(body).map_or_else(
            |_| {
                let text = String::from_utf8_lossy(body);
                let text = text.trim();
                if text.is_empty() {
                    format!("request failed with status {status}")
                } else {
                    format!("{text} (status {status})")
                }
            },
            |envelope| envelope.error.message,
        );
        Self::Application { status, message }
    }

    /// Message shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
