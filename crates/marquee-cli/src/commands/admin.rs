//! Session-gated management commands.

use anyhow::anyhow;
use marquee_client::views::admin::AdminView;
use marquee_client::views::edit::EditMovieView;
use marquee_client::{Confirm, Preset, SessionStore, SubmitOutcome};

use crate::cli::{DeleteArgs, EditArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, TerminalConfirm, rendered};
use crate::output::{format_movie_list, format_validation, render};

pub(crate) async fn handle_admin(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let session = ctx.session();
    let movies = rendered(AdminView::new().mount(&session, &ctx.transport).await)?;
    render(movies.as_slice(), output, format_movie_list)
}

pub(crate) async fn handle_edit(ctx: &AppContext, args: EditArgs) -> CliResult<()> {
    let session = ctx.session();
    let mut view = open_editor(ctx, &session, args.id).await?;

    let fields = [
        ("title", args.title),
        ("releaseDate", args.release_date),
        ("runtime", args.runtime),
        ("mpaaRating", args.mpaa_rating),
        ("rating", args.rating),
        ("description", args.description),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            view.draft_mut().set_field(name, value);
        }
    }

    let created = view.draft().is_new();
    let outcome = view.submit(&session, &ctx.transport).await;
    finish(outcome, if created { "movie created" } else { "movie updated" })
}

pub(crate) async fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> CliResult<()> {
    if args.id <= 0 {
        return Err(CliError::validation("movie id must be positive"));
    }
    let session = ctx.session();
    let mut view = open_editor(ctx, &session, args.id).await?;
    let preset = Preset(true);
    let confirm: &dyn Confirm = if args.yes { &preset } else { &TerminalConfirm };

    let outcome = view.delete(&session, &ctx.transport, confirm).await;
    finish(outcome, "movie deleted")
}

async fn open_editor(ctx: &AppContext, session: &SessionStore, id: i64) -> CliResult<EditMovieView> {
    let mut view = EditMovieView::new();
    rendered(view.mount(session, &ctx.transport, id).await)?;
    Ok(view)
}

fn finish(outcome: SubmitOutcome, done: &str) -> CliResult<()> {
    match outcome {
        SubmitOutcome::Navigate(route) => {
            tracing::debug!(%route, "mutation complete");
            println!("{done}");
            Ok(())
        }
        SubmitOutcome::Blocked(errors) => Err(CliError::validation(format_validation(&errors))),
        SubmitOutcome::Failed(message) => Err(CliError::failure(anyhow!(message))),
        SubmitOutcome::Cancelled => {
            println!("cancelled");
            Ok(())
        }
    }
}
