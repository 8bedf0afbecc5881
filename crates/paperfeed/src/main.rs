//! Command-line interface for paperfeed.

use std::process::ExitCode;

use clap::Parser;
use paperfeed::cli::{CommandContext, args::Cli, commands, logging};
use tokio::runtime::Builder;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = if cli.command.needs_config() {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    runtime.block_on(commands::run(cli.command, &ctx))
}
