//! Implementations of `paperfeed detail` and `paperfeed random`.

use std::process::ExitCode;

use paperfeed_highlight::EMPTY_MESSAGE;

use super::shared::{Loaded, load_session, open_detail};
use crate::cli::{
    args::{DetailCommand, OutputMode, RandomCommand},
    context::CommandContext,
    output::print_detail,
};

/// Shows the paper at a 1-based position of the ranked list.
pub async fn run(ctx: &CommandContext, cmd: &DetailCommand) -> ExitCode {
    let mut loaded = match load_ready(ctx, cmd).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let total = loaded.session.ranking().len();
    let index = cmd.index as usize;
    if loaded.session.open(index - 1).is_none() {
        eprintln!("error: no paper at position {index} (the list has {total})");
        return ExitCode::FAILURE;
    }
    print_open(&loaded, cmd.output.mode())
}

/// Shows a random paper from the ranked list.
pub async fn run_random(ctx: &CommandContext, cmd: &RandomCommand) -> ExitCode {
    let mut loaded = match load_session(ctx, &cmd.selection, &cmd.filter).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    if let Err(code) = loaded.check_failed() {
        return code;
    }
    if loaded.session.open_random(&mut rand::thread_rng()).is_none() {
        println!("{EMPTY_MESSAGE}");
        return ExitCode::SUCCESS;
    }
    print_open(&loaded, cmd.output.mode())
}

/// Loads the selection for `detail`, treating an empty list as a message.
async fn load_ready(ctx: &CommandContext, cmd: &DetailCommand) -> Result<Loaded, ExitCode> {
    let loaded = load_session(ctx, &cmd.selection, &cmd.filter).await?;
    loaded.check_failed()?;
    if loaded.session.ranking().is_empty() {
        println!("{EMPTY_MESSAGE}");
        return Err(ExitCode::SUCCESS);
    }
    Ok(loaded)
}

/// Prints the paper open in the session.
fn print_open(loaded: &Loaded, mode: OutputMode) -> ExitCode {
    match open_detail(&loaded.session) {
        Some((detail, paper, reason)) => print_detail(&detail, &paper, &reason, mode),
        None => ExitCode::FAILURE,
    }
}
