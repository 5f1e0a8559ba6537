//! Local validation and the submit lifecycle shared by form controllers.
//!
//! # Design
//! - Validation is synchronous and never touches the network.
//! - Empty optional inputs are unset values; only non-empty ones are
//!   format-checked.
//! - Drafts hold raw strings; the backend parses the payload itself.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use marquee_api_models::{MPAA_RATINGS, Movie, MoviePayload};

use crate::routes::Route;

/// Field-keyed validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    /// No errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any earlier message.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Whether validation passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Failing fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Where a form is in its submit lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Local checks running.
    Validating,
    /// Local checks failed; nothing was sent.
    Blocked(ValidationErrors),
    /// Mutation in flight.
    Submitting,
    /// Mutation accepted; the form navigates away.
    Succeeded(Route),
    /// Mutation rejected; the form stays put.
    Failed(String),
}

/// Result of a submit or delete action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed.
    Blocked(ValidationErrors),
    /// Navigate to the route.
    Navigate(Route),
    /// The backend rejected the mutation.
    Failed(String),
    /// The user declined the confirmation.
    Cancelled,
}

/// Editable copy of a movie.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieDraft {
    /// `0` for a new movie.
    pub id: i64,
    /// Display title; required.
    pub title: String,
    /// `YYYY-MM-DD`.
    pub release_date: String,
    /// Minutes.
    pub runtime: String,
    /// One of [`MPAA_RATINGS`].
    pub mpaa_rating: String,
    /// Audience rating.
    pub rating: String,
    /// Synopsis.
    pub description: String,
}

impl MovieDraft {
    /// Empty draft for a new movie.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft pre-filled from an existing movie.
    #[must_use]
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie
                .release_date
                .as_deref()
                .map(release_day)
                .unwrap_or_default(),
            runtime: movie.runtime.to_string(),
            mpaa_rating: movie.mpaa_rating.clone(),
            rating: movie.rating.to_string(),
            description: movie.description.clone(),
        }
    }

    /// Whether submitting creates a movie.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Delete is only offered for persisted movies.
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        self.id > 0
    }

    /// Update a field by its wire name; unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "releaseDate" | "release_date" => &mut self.release_date,
            "runtime" => &mut self.runtime,
            "mpaaRating" | "mpaa_rating" => &mut self.mpaa_rating,
            "rating" => &mut self.rating,
            "description" => &mut self.description,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Check the draft locally.
    ///
    /// # Errors
    ///
    /// Returns every failing field, keyed by wire name.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "Please enter a title");
        }
        if let Err(message) = parse_optional_i32("Runtime", &self.runtime) {
            errors.add("runtime", message);
        }
        if let Err(message) = parse_optional_i32("Rating", &self.rating) {
            errors.add("rating", message);
        }
        let release_date = self.release_date.trim();
        if !release_date.is_empty() && NaiveDate::parse_from_str(release_date, "%Y-%m-%d").is_err() {
            errors.add("releaseDate", "Release date must be YYYY-MM-DD");
        }
        let mpaa = self.mpaa_rating.trim();
        if !mpaa.is_empty() && !MPAA_RATINGS.contains(&mpaa) {
            errors.add("mpaaRating", "Choose a listed MPAA rating");
        }
        errors.into_result()
    }

    /// Wire body for the upsert endpoint.
    #[must_use]
    pub fn to_payload(&self) -> MoviePayload {
        MoviePayload {
            id: self.id.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            release_date: self.release_date.clone(),
            runtime: self.runtime.clone(),
            rating: self.rating.clone(),
            mpaa_rating: self.mpaa_rating.clone(),
        }
    }
}

/// Sign-in form input.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    /// Account e-mail.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Build from raw input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are required.
    ///
    /// # Errors
    ///
    /// Returns the failing fields.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.email.trim().is_empty() {
            errors.add("email", "Please enter a valid email address");
        }
        if self.password.trim().is_empty() {
            errors.add("password", "Please enter a password");
        }
        errors.into_result()
    }
}

// RFC 3339 timestamps become their calendar day; anything else keeps its
// leading `YYYY-MM-DD` if it has one.
fn release_day(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.get(..10).unwrap_or(raw).to_string(),
        |timestamp| timestamp.date_naive().format("%Y-%m-%d").to_string(),
    )
}

fn parse_optional_i32(field: &str, value: &str) -> Result<Option<i32>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed = trimmed
        .parse::<i32>()
        .map_err(|_| format!("{field} must be an integer"))?;
    if parsed < 0 {
        return Err(format!("{field} must be zero or a positive integer"));
    }
    Ok(Some(parsed))
}
