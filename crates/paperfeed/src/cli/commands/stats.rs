//! Implementation of `paperfeed stats`.

use std::process::ExitCode;

use paperfeed_highlight::EMPTY_MESSAGE;
use paperfeed_stats::{StatsEngine, titles_from};

use super::shared::load_session;
use crate::cli::{
    args::{FilterArgs, StatsCommand},
    context::CommandContext,
    output::{cloud_table, dim, header, print_json, subheader, trend_table},
};

/// Prints the keyword cloud and, across several dates, keyword trends.
pub async fn run(ctx: &CommandContext, cmd: &StatsCommand) -> ExitCode {
    let loaded = match load_session(ctx, &cmd.selection, &FilterArgs::default()).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    if let Err(code) = loaded.check_failed() {
        return code;
    }

    let titles = titles_from(loaded.session.papers());
    let report = StatsEngine::new(&ctx.config.stats).compute(&titles, &loaded.dates);
    if cmd.json {
        return print_json(&report);
    }

    println!("{}", header(&format!("Popular keywords · {}", loaded.label)));
    if titles.is_empty() {
        println!("{EMPTY_MESSAGE}");
        return ExitCode::SUCCESS;
    }
    println!(
        "{}",
        dim(&format!(
            "{} titles across {} dates",
            report.titles,
            report.dates.len()
        ))
    );
    println!();
    if report.cloud.is_empty() {
        println!(
            "{}",
            dim(&format!(
                "No keyword appears in at least {} titles.",
                ctx.config.stats.min_count
            ))
        );
        return ExitCode::SUCCESS;
    }
    println!("{}", cloud_table(&report));

    if report.dates.len() > 1 && !report.trends.is_empty() {
        println!();
        println!("{}", subheader("Keyword trends:"));
        println!("{}", trend_table(&report));
    }
    ExitCode::SUCCESS
}
