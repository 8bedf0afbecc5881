//! Implementation of `paperfeed config`.

use std::process::ExitCode;

use paperfeed_highlight::TomlHighlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let highlighter = TomlHighlighter::new();
    print!("{}", highlighter.highlight(&ctx.config.settings_to_toml()));
    ExitCode::SUCCESS
}
