//! Shared context, error types and terminal helpers for the CLI.

use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::anyhow;
use async_trait::async_trait;
use marquee_client::config::STATE_DIR_NAME;
use marquee_client::{
    ClientConfig, Confirm, ConfirmPrompt, FetchState, FileStorage, HttpTransport, Route,
    SessionStore, ViewOutcome,
};

use crate::cli::Cli;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) transport: HttpTransport,
    pub(crate) state_dir: PathBuf,
}

impl AppContext {
    /// Validate flags and build the HTTP transport, tagging every request
    /// with `trace_id`.
    pub(crate) fn from_cli(cli: &Cli, trace_id: &str) -> CliResult<Self> {
        let state_dir = cli.state_dir.clone().unwrap_or_else(default_state_dir);
        let config = ClientConfig::new(cli.api_url.clone(), cli.timeout, state_dir)
            .map_err(|err| CliError::validation(err.to_string()))?;
        let transport = HttpTransport::from_config(&config, Some(trace_id))
            .map_err(CliError::failure)?;
        Ok(Self {
            transport,
            state_dir: config.state_dir,
        })
    }

    /// Session restored from the state directory.
    pub(crate) fn session(&self) -> SessionStore {
        SessionStore::restored(FileStorage::new(self.state_dir.clone()))
    }
}

/// `<config dir>/marquee`, or `./.marquee` when the platform has none.
pub(crate) fn default_state_dir() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(format!(".{STATE_DIR_NAME}")),
        |dir| dir.join(STATE_DIR_NAME),
    )
}

/// Unwrap a settled fetch for rendering.
pub(crate) fn settled<T>(state: FetchState<T>) -> CliResult<T> {
    match state {
        FetchState::Ready(value) => Ok(value),
        FetchState::Failed(message) => Err(CliError::failure(anyhow!(message))),
        FetchState::Pending => Err(CliError::failure(anyhow!("request did not complete"))),
    }
}

/// Unwrap a gated view, turning redirects into actionable errors.
pub(crate) fn rendered<T>(outcome: ViewOutcome<T>) -> CliResult<T> {
    match outcome {
        ViewOutcome::Render(state) => settled(state),
        ViewOutcome::Redirect(route) => Err(redirect_error(&route)),
    }
}

pub(crate) fn redirect_error(route: &Route) -> CliError {
    match route {
        Route::Login => CliError::validation("not signed in; run `marquee login --email <email>` first"),
        other => CliError::validation(format!("redirected to {other}")),
    }
}

/// Confirms on the terminal, reading one line from stdin.
pub(crate) struct TerminalConfirm;

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        let question = format!("{} {} [y/N] ", prompt.title, prompt.message);
        let answer = tokio::task::spawn_blocking(move || read_answer(&question)).await;
        match answer {
            Ok(Ok(line)) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "failed to read confirmation; treating as no");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "confirmation prompt aborted; treating as no");
                false
            }
        }
    }
}

fn read_answer(question: &str) -> io::Result<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut stderr = io::stderr();
    stderr.write_all(question.as_bytes())?;
    stderr.flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line)
}

/// Read a password without echo, or one line from piped stdin.
pub(crate) fn prompt_password() -> CliResult<String> {
    if io::stdin().is_terminal() {
        return rpassword::prompt_password("Password: ")
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")));
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| CliError::failure(anyhow!("failed to read password from stdin: {err}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
pub(crate) fn test_context(base_url: &str, state_dir: &std::path::Path) -> AppContext {
    AppContext {
        transport: HttpTransport::new(
            reqwest::Client::new(),
            base_url.parse().expect("valid URL"),
        ),
        state_dir: state_dir.to_path_buf(),
    }
}
