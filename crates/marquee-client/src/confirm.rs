//! Awaited yes/no confirmation for destructive actions.

use async_trait::async_trait;

/// Text shown when asking the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Short heading.
    pub title: String,
    /// Question body.
    pub message: String,
}

impl ConfirmPrompt {
    /// Prompt shown before deleting a movie.
    #[must_use]
    pub fn delete_movie() -> Self {
        Self {
            title: "Delete Movie?".to_string(),
            message: "Are you sure?".to_string(),
        }
    }
}

/// Asks the user a yes/no question.
#[async_trait]
pub trait Confirm: Send + Sync {
    /// `true` when the user answered yes.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Fixed answer, for non-interactive callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset(pub bool);

#[async_trait]
impl Confirm for Preset {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        tracing::debug!(title = %prompt.title, answer = self.0, "preset confirmation");
        self.0
    }
}
