//! Implementation of `paperfeed prefs`.

use std::process::ExitCode;

use paperfeed_rank::{JsonFileStore, PreferenceStore, PrefsError};

use crate::cli::{
    args::{PrefsAction, PrefsCommand},
    context::CommandContext,
    output::{dim, print_json, subheader, success},
};

/// Lists or edits saved keywords and authors.
pub fn run(ctx: &CommandContext, cmd: &PrefsCommand) -> ExitCode {
    let mut store = match ctx.preferences() {
        Ok(store) => store,
        Err(code) => return code,
    };

    let result = match &cmd.action {
        PrefsAction::List { json } => return list(&store, *json),
        PrefsAction::AddKeyword { keyword } => store
            .add_keyword(keyword)
            .map(|()| format!("Saved keyword \"{}\"", keyword.trim())),
        PrefsAction::RemoveKeyword { keyword } => store
            .remove_keyword(keyword)
            .map(|()| format!("Removed keyword \"{}\"", keyword.trim())),
        PrefsAction::AddAuthor { author } => store
            .add_author(author)
            .map(|()| format!("Saved author \"{}\"", author.trim())),
        PrefsAction::RemoveAuthor { author } => store
            .remove_author(author)
            .map(|()| format!("Removed author \"{}\"", author.trim())),
        PrefsAction::Reset => store
            .reset()
            .map(|()| "Cleared saved keywords and authors".to_string()),
    };
    report(result)
}

/// Prints saved preferences.
fn list(store: &PreferenceStore<JsonFileStore>, json: bool) -> ExitCode {
    if json {
        return print_json(store.preferences());
    }
    for (label, terms) in [("Keywords:", store.keywords()), ("Authors:", store.authors())] {
        println!("{}", subheader(label));
        if terms.is_empty() {
            println!("   {}", dim("(none)"));
        }
        for term in terms {
            println!("   {term}");
        }
    }
    ExitCode::SUCCESS
}

/// Prints the outcome of an edit.
fn report(result: Result<String, PrefsError>) -> ExitCode {
    match result {
        Ok(message) => {
            println!("{}", success(&message));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
