#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Client core for the Marquee movie catalogue.
//!
//! Layout:
//! - `session`: the authentication token and its durable copy.
//! - `transport`/`fetch`: request descriptions, the network seam and the
//!   three-state, last-request-wins fetch orchestrator.
//! - `requests`/`graphql`: endpoint specs for the REST and graph transports.
//! - `forms`/`confirm`: local validation, submit lifecycle, confirmations.
//! - `views`: one controller per screen, navigating via `routes`.

pub mod config;
pub mod confirm;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod graphql;
pub mod requests;
pub mod routes;
pub mod session;
pub mod transport;
pub mod views;

pub use config::{ClientConfig, ConfigError};
pub use confirm::{Confirm, ConfirmPrompt, Preset};
pub use error::FetchError;
pub use fetch::{FetchOrchestrator, FetchSpec, FetchState, FetchTicket};
pub use forms::{Credentials, MovieDraft, SubmitOutcome, SubmitPhase, ValidationErrors};
pub use graphql::CatalogueQuery;
pub use routes::Route;
pub use session::{FileStorage, MemoryStorage, SessionError, SessionStorage, SessionStore};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
pub use views::ViewOutcome;
