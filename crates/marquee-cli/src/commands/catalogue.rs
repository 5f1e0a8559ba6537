//! Public catalogue commands over the REST endpoints.

use marquee_client::fetch::execute;
use marquee_client::requests;
use marquee_client::views::catalogue::{MovieView, MoviesView};

use crate::cli::{MovieArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, settled};
use crate::output::{format_movie_detail, format_movie_list, format_status, render};

pub(crate) async fn handle_movies(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let movies = settled(MoviesView::new().mount(&ctx.transport).await)?;
    render(movies.as_slice(), output, format_movie_list)
}

pub(crate) async fn handle_movie(
    ctx: &AppContext,
    args: MovieArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let movie = settled(MovieView::new().mount(&ctx.transport, args.id).await)?;
    render(&movie, output, format_movie_detail)
}

pub(crate) async fn handle_status(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let status = execute(&ctx.transport, requests::status())
        .await
        .map_err(CliError::failure)?;
    render(&status, output, format_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_context;
    use httpmock::prelude::*;
    use marquee_test_support::fixtures::{error_envelope, movie_envelope, movies_envelope};
    use serde_json::json;

    #[tokio::test]
    async fn movies_renders_table() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1/movies");
            then.status(200).json_body(movies_envelope(&[(1, "Alien")]));
        });

        handle_movies(&test_context(&server.base_url(), dir.path()), OutputFormat::Table)
            .await
            .expect("movies should render");
        mock.assert();
    }

    #[tokio::test]
    async fn movie_failure_surfaces_backend_message() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        server.mock(|when, then| {
            when.method(GET).path("/v1/movie/2");
            then.status(404).json_body(error_envelope("movie not found"));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/movie/1");
            then.status(200).json_body(movie_envelope(1, "Alien"));
        });
        let ctx = test_context(&server.base_url(), dir.path());

        handle_movie(&ctx, MovieArgs { id: 1 }, OutputFormat::Json)
            .await
            .expect("movie should render");
        let err = handle_movie(&ctx, MovieArgs { id: 2 }, OutputFormat::Table)
            .await
            .expect_err("missing movie");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.display_message(), "movie not found");
    }

    #[tokio::test]
    async fn status_probe_renders() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let mock = server.mock(|when, then| {
            when.method(GET).path("/status");
            then.status(200)
                .json_body(json!({ "status": "Available", "environment": "development", "version": "1.0.0" }));
        });

        handle_status(&test_context(&server.base_url(), dir.path()), OutputFormat::Table)
            .await
            .expect("status should render");
        mock.assert();
    }
}
