//! Implementation of `paperfeed show`.

use std::process::ExitCode;

use paperfeed_highlight::FeedView;

use super::shared::load_session;
use crate::cli::{args::ShowCommand, context::CommandContext, output::print_feed};

/// Prints ranked cards for the selected dates.
pub async fn run(ctx: &CommandContext, cmd: &ShowCommand) -> ExitCode {
    let loaded = match load_session(ctx, &cmd.selection, &cmd.filter).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    if let Err(code) = loaded.check_failed() {
        return code;
    }

    let session = &loaded.session;
    let ranking = session.ranking();
    let view = FeedView::new(session.state(), &ranking, session.filter());
    print_feed(
        &loaded.label,
        &session.papers().summary(),
        &ranking,
        &view,
        cmd.output.mode(),
    )
}
