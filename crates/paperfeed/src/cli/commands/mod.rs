//! Command implementations and dispatch.

pub mod browse;
pub mod config;
pub mod dates;
pub mod detail;
pub mod init;
pub mod prefs;
pub mod related;
mod shared;
pub mod show;
pub mod stats;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub async fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Dates(cmd) => dates::run(ctx, &cmd).await,
        Commands::Show(cmd) => show::run(ctx, &cmd).await,
        Commands::Detail(cmd) => detail::run(ctx, &cmd).await,
        Commands::Random(cmd) => detail::run_random(ctx, &cmd).await,
        Commands::Stats(cmd) => stats::run(ctx, &cmd).await,
        Commands::Related(cmd) => related::run(ctx, &cmd).await,
        Commands::Prefs(cmd) => prefs::run(ctx, &cmd),
        Commands::Browse(cmd) => browse::run(ctx, &cmd).await,
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
