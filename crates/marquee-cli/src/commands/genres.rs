//! Genre commands.

use marquee_client::views::genres::{GenreView, GenresView};

use crate::cli::{GenreArgs, OutputFormat};
use crate::client::{AppContext, CliResult, settled};
use crate::output::{format_genre_list, format_movie_list, render};

pub(crate) async fn handle_genres(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let genres = settled(GenresView::new().mount(&ctx.transport).await)?;
    render(genres.as_slice(), output, format_genre_list)
}

pub(crate) async fn handle_genre(
    ctx: &AppContext,
    args: GenreArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let movies = settled(GenreView::new().mount(&ctx.transport, args.id).await)?;
    render(movies.as_slice(), output, |movies| {
        let heading = args
            .name
            .as_deref()
            .map_or_else(|| format!("Genre {}", args.id), str::to_string);
        format!("{heading}\n{}", format_movie_list(movies))
    })
}
