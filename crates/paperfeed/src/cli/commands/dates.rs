//! Implementation of `paperfeed dates`.

use std::process::ExitCode;

use chrono::NaiveDate;
use paperfeed_feed::Language;
use serde::Serialize;

use super::shared::load_index;
use crate::cli::{
    args::DatesCommand,
    context::CommandContext,
    output::{dates_table, dim, print_json},
};

/// One indexed date in JSON output.
#[derive(Serialize)]
struct JsonDate<'a> {
    /// The date.
    date: NaiveDate,
    /// Languages published for it.
    languages: &'a [Language],
}

/// Lists available dates, most recent first.
pub async fn run(ctx: &CommandContext, cmd: &DatesCommand) -> ExitCode {
    let loader = match ctx.loader() {
        Ok(loader) => loader,
        Err(code) => return code,
    };
    let index = match load_index(&loader).await {
        Ok(index) => index,
        Err(code) => return code,
    };

    if cmd.json {
        let dates: Vec<JsonDate<'_>> = index
            .dates()
            .into_iter()
            .map(|date| JsonDate {
                date,
                languages: index.languages(date),
            })
            .collect();
        return print_json(&dates);
    }

    if index.is_empty() {
        println!("{}", dim("No dates available."));
        return ExitCode::SUCCESS;
    }
    println!("{}", dates_table(&index));
    ExitCode::SUCCESS
}
