//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use marquee_client::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, parse_api_url};
use marquee_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use url::Url;
use uuid::Uuid;

use crate::client::{AppContext, CliResult};
use crate::commands::{admin, auth, catalogue, genres, search};

/// Parses CLI arguments, executes the requested command and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
        client_version: env!("CARGO_PKG_VERSION"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let trace_id = Uuid::new_v4().to_string();
    let command = command_label(&cli.command);
    tracing::debug!(%trace_id, command, "starting command");

    let ctx = match AppContext::from_cli(&cli, &trace_id) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };

    match dispatch(cli.command, &ctx, cli.output).await {
        Ok(()) => 0,
        Err(err) => {
            let message = err.display_message();
            tracing::debug!(%trace_id, command, error = %message, "command failed");
            eprintln!("error: {message}");
            err.exit_code()
        }
    }
}

pub(crate) async fn dispatch(
    command: Command,
    ctx: &AppContext,
    output: OutputFormat,
) -> CliResult<()> {
    match command {
        Command::Movies => catalogue::handle_movies(ctx, output).await,
        Command::Movie(args) => catalogue::handle_movie(ctx, args, output).await,
        Command::Status => catalogue::handle_status(ctx, output).await,
        Command::Genres => genres::handle_genres(ctx, output).await,
        Command::Genre(args) => genres::handle_genre(ctx, args, output).await,
        Command::Search(args) => search::handle_search(ctx, args, output).await,
        Command::GraphMovie(args) => search::handle_graph_movie(ctx, args, output).await,
        Command::Login(args) => auth::handle_login(ctx, args).await,
        Command::Logout => auth::handle_logout(ctx),
        Command::Admin => admin::handle_admin(ctx, output).await,
        Command::Edit(args) => admin::handle_edit(ctx, args).await,
        Command::Delete(args) => admin::handle_delete(ctx, args).await,
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Movies => "movies",
        Command::Movie(_) => "movie",
        Command::Status => "status",
        Command::Genres => "genres",
        Command::Genre(_) => "genre",
        Command::Search(_) => "search",
        Command::GraphMovie(_) => "graph-movie",
        Command::Login(_) => "login",
        Command::Logout => "logout",
        Command::Admin => "admin",
        Command::Edit(_) => "edit",
        Command::Delete(_) => "delete",
    }
}

#[derive(Parser)]
#[command(name = "marquee", version, about = "Browse and manage the Marquee movie catalogue")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "MARQUEE_API_URL",
        value_parser = parse_api_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "MARQUEE_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "MARQUEE_STATE_DIR",
        help = "Directory holding the persisted session (defaults to the user config dir)"
    )]
    pub(crate) state_dir: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "MARQUEE_LOG_FORMAT", default_value = "auto")]
    pub(crate) log_format: LogFormat,
    #[arg(long, global = true, env = "MARQUEE_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// List every movie.
    Movies,
    /// Show one movie.
    Movie(MovieArgs),
    /// Probe the backend status endpoint.
    Status,
    /// List genres.
    Genres,
    /// List movies in a genre.
    Genre(GenreArgs),
    /// Search titles through the graph endpoint; no text lists everything.
    Search(SearchArgs),
    /// Show one movie through the graph endpoint.
    GraphMovie(MovieArgs),
    /// Sign in and persist the session.
    Login(LoginArgs),
    /// Forget the persisted session.
    Logout,
    /// List movies for management (requires sign-in).
    Admin,
    /// Create (id 0) or update a movie (requires sign-in).
    Edit(EditArgs),
    /// Delete a movie (requires sign-in).
    Delete(DeleteArgs),
}

#[derive(Args)]
pub(crate) struct MovieArgs {
    #[arg(help = "Movie identifier")]
    pub(crate) id: i64,
}

#[derive(Args)]
pub(crate) struct GenreArgs {
    #[arg(help = "Genre identifier")]
    pub(crate) id: i64,
    #[arg(long, help = "Genre name shown as the heading")]
    pub(crate) name: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct SearchArgs {
    #[arg(help = "Title filter; omit to list every movie")]
    pub(crate) text: Option<String>,
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long, env = "MARQUEE_EMAIL")]
    pub(crate) email: String,
    #[arg(long, env = "MARQUEE_PASSWORD", help = "Prompted for when omitted")]
    pub(crate) password: Option<String>,
}

#[derive(Args, Default)]
pub(crate) struct EditArgs {
    #[arg(help = "Movie identifier; 0 creates a new movie")]
    pub(crate) id: i64,
    #[arg(long)]
    pub(crate) title: Option<String>,
    #[arg(long, help = "Release date as YYYY-MM-DD")]
    pub(crate) release_date: Option<String>,
    #[arg(long, help = "Runtime in minutes")]
    pub(crate) runtime: Option<String>,
    #[arg(long, help = "One of G, PG, PG13, R, NC17")]
    pub(crate) mpaa_rating: Option<String>,
    #[arg(long)]
    pub(crate) rating: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
}

#[derive(Args)]
pub(crate) struct DeleteArgs {
    #[arg(help = "Movie identifier")]
    pub(crate) id: i64,
    #[arg(long, help = "Skip the interactive confirmation")]
    pub(crate) yes: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}
