//! Graph-query commands.

use marquee_client::views::search::{GraphMovieView, SearchView};

use crate::cli::{MovieArgs, OutputFormat, SearchArgs};
use crate::client::{AppContext, CliResult, settled};
use crate::output::{format_movie_detail, format_movie_list, render};

pub(crate) async fn handle_search(
    ctx: &AppContext,
    args: SearchArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let view = SearchView::new();
    let text = args.text.unwrap_or_default();
    view.on_search_text(&ctx.transport, &text).await;
    let movies = settled(view.state())?;
    render(movies.as_slice(), output, format_movie_list)
}

pub(crate) async fn handle_graph_movie(
    ctx: &AppContext,
    args: MovieArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let movie = settled(GraphMovieView::new().mount(&ctx.transport, args.id).await)?;
    render(&movie, output, format_movie_detail)
}
