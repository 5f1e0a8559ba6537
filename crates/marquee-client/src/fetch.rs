//! Fetch orchestration: one call, three states, last request wins.
//!
//! # Design
//! - A [`FetchSpec`] pairs a request with the status that means success and
//!   a decoder; controllers are configurations of specs.
//! - [`FetchOrchestrator`] hands out monotonically increasing tickets and
//!   only applies the outcome of the newest one.
//! - No retries and no timers here; the transport owns timeouts.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::error::FetchError;
use crate::transport::{ApiRequest, Transport};

/// View-facing state of a fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    /// Attempt in flight (or not yet started).
    Pending,
    /// Attempt succeeded.
    Ready(T),
    /// Attempt failed with a displayable message.
    Failed(String),
}

impl<T> FetchState<T> {
    /// Whether no terminal state has been reached.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Successful value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Failure message, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Transform the ready value, keeping other states.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Pending => FetchState::Pending,
            Self::Ready(value) => FetchState::Ready(f(value)),
            Self::Failed(message) => FetchState::Failed(message),
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchState<T> {
    fn from(outcome: Result<T, FetchError>) -> Self {
        match outcome {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.message()),
        }
    }
}

/// Body decoder for a successful response.
pub type Decoder<T> = fn(&[u8]) -> Result<T, FetchError>;

/// A request together with how to recognise and decode success.
#[derive(Debug, Clone)]
pub struct FetchSpec<T> {
    /// Outbound request.
    pub request: ApiRequest,
    /// Status code that means success.
    pub success: u16,
    /// Decoder applied to a successful body.
    pub decode: Decoder<T>,
}

impl<T> FetchSpec<T> {
    /// Spec expecting `success` and decoding with `decode`.
    #[must_use]
    pub const fn new(request: ApiRequest, success: u16, decode: Decoder<T>) -> Self {
        Self {
            request,
            success,
            decode,
        }
    }
}

/// Decode a JSON body into `T`.
///
/// # Errors
///
/// Returns [`FetchError::Decode`] when the body does not match `T`.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|err| FetchError::Decode(format!("malformed response body: {err}")))
}

/// Ignore the body of a successful response.
///
/// # Errors
///
/// Never fails; the signature matches [`Decoder`].
pub const fn decode_nothing(_body: &[u8]) -> Result<(), FetchError> {
    Ok(())
}

/// Run one attempt without state tracking.
///
/// # Errors
///
/// Returns the transport error, an application error for any status other
/// than `spec.success`, or the decoder's error.
pub async fn execute<T>(transport: &dyn Transport, spec: FetchSpec<T>) -> Result<T, FetchError> {
    let FetchSpec {
        request,
        success,
        decode,
    } = spec;
    let response = transport.send(request).await?;
    if response.status != success {
        return Err(FetchError::from_failure(response.status, &response.body));
    }
    decode(&response.body)
}

/// Identity of one attempt; newer tickets supersede older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Tracks the state of the latest fetch attempt for one view.
#[derive(Debug)]
pub struct FetchOrchestrator<T> {
    generation: AtomicU64,
    state: watch::Sender<FetchState<T>>,
}

impl<T> Default for FetchOrchestrator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchOrchestrator<T> {
    /// Orchestrator in the `Pending` state with no attempt issued.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(FetchState::Pending);
        Self {
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Start a new attempt: supersede every earlier ticket and reset to `Pending`.
    pub fn begin(&self) -> FetchTicket {
        let ticket = FetchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.state.send_replace(FetchState::Pending);
        ticket
    }

    /// Whether `ticket` belongs to the newest attempt.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone> FetchOrchestrator<T> {
    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Apply `outcome` if `ticket` is still current.
    ///
    /// Returns the applied state, or `None` when a newer attempt has begun
    /// and the outcome was discarded.
    pub fn settle(
        &self,
        ticket: FetchTicket,
        outcome: Result<T, FetchError>,
    ) -> Option<FetchState<T>> {
        let next = FetchState::from(outcome);
        let mut applied = None;
        self.state.send_if_modified(|state| {
            if !self.is_current(ticket) {
                return false;
            }
            *state = next.clone();
            applied = Some(next.clone());
            true
        });
        match &applied {
            None => tracing::debug!(ticket = ticket.0, "discarding superseded fetch result"),
            Some(FetchState::Failed(message)) => {
                tracing::warn!(ticket = ticket.0, error = %message, "fetch failed");
            }
            Some(_) => tracing::debug!(ticket = ticket.0, "fetch settled"),
        }
        applied
    }

    /// Begin an attempt, execute `spec`, and settle it.
    pub async fn run(&self, transport: &dyn Transport, spec: FetchSpec<T>) -> Option<FetchState<T>> {
        let ticket = self.begin();
        tracing::debug!(
            ticket = ticket.0,
            method = %spec.request.method,
            path = %spec.request.path,
            "fetch started"
        );
        let outcome = execute(transport, spec).await;
        self.settle(ticket, outcome)
    }
}
