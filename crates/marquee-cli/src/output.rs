//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use marquee_api_models::{AppStatus, Genre, Movie};
use marquee_client::ValidationErrors;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const EXCERPT_CHARS: usize = 100;

/// Print `value` as pretty JSON or through the `table` formatter.
pub(crate) fn render<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> String,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(value)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            println!("{text}");
        }
        OutputFormat::Table => print!("{}", table(value)),
    }
    Ok(())
}

pub(crate) fn format_movie_list(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "no movies\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{:>6} {:<40} {:>4} {:>7} SUMMARY", "ID", "TITLE", "YEAR", "RUNTIME");
    for movie in movies {
        let year = movie.year.map_or_else(|| "-".to_string(), |year| year.to_string());
        let _ = writeln!(
            out,
            "{:>6} {:<40} {:>4} {:>6}m {}",
            movie.id,
            truncate(&movie.title, 40),
            year,
            movie.runtime,
            movie.excerpt(EXCERPT_CHARS)
        );
    }
    out
}

pub(crate) fn format_movie_detail(movie: &Movie) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id: {}", movie.id);
    let _ = writeln!(out, "title: {}", movie.title);
    if let Some(date) = &movie.release_date {
        let _ = writeln!(out, "released: {date}");
    }
    let _ = writeln!(out, "runtime: {} minutes", movie.runtime);
    if !movie.mpaa_rating.is_empty() {
        let _ = writeln!(out, "mpaa rating: {}", movie.mpaa_rating);
    }
    let _ = writeln!(out, "rating: {}", movie.rating);
    if !movie.genres.is_empty() {
        let _ = writeln!(out, "genres: {}", movie.genres.join(", "));
    }
    if let Some(url) = movie.poster_url() {
        let _ = writeln!(out, "poster: {url}");
    }
    if !movie.description.is_empty() {
        let _ = writeln!(out, "\n{}", movie.description);
    }
    out
}

pub(crate) fn format_genre_list(genres: &[Genre]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>6} NAME", "ID");
    for genre in genres {
        let _ = writeln!(out, "{:>6} {}", genre.id, genre.genre_name);
    }
    out
}

pub(crate) fn format_status(status: &AppStatus) -> String {
    format!(
        "status: {}\nenvironment: {}\nversion: {}\n",
        status.status, status.environment, status.version
    )
}

pub(crate) fn format_validation(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
