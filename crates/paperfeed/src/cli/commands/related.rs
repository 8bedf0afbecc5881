//! Implementation of `paperfeed related`.

use std::process::ExitCode;

use paperfeed_feed::Paper;
use paperfeed_highlight::{AnsiRenderer, HighlightKind, Highlighted, Render};
use paperfeed_rank::related_papers;

use super::shared::load_session;
use crate::cli::{
    args::{FilterArgs, RelatedCommand},
    context::CommandContext,
    output::{dim, header, print_json},
};

/// Lists papers whose title or summary mentions a keyword.
pub async fn run(ctx: &CommandContext, cmd: &RelatedCommand) -> ExitCode {
    let loaded = match load_session(ctx, &cmd.selection, &FilterArgs::default()).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    if let Err(code) = loaded.check_failed() {
        return code;
    }

    let papers = related_papers(loaded.session.papers(), &cmd.keyword);
    if cmd.json {
        let papers: Vec<&Paper> = papers.iter().map(AsRef::as_ref).collect();
        return print_json(&papers);
    }

    println!(
        "{}",
        header(&format!(
            "Papers mentioning \"{}\" · {} · {}",
            cmd.keyword.trim(),
            loaded.label,
            papers.len()
        ))
    );
    println!();
    if papers.is_empty() {
        println!("{}", dim("No related papers found."));
        return ExitCode::SUCCESS;
    }

    let renderer = AnsiRenderer::new(true);
    let terms = [cmd.keyword.trim().to_string()];
    for (i, paper) in papers.iter().enumerate() {
        let title = Highlighted::new(&paper.title, &terms, HighlightKind::Keyword);
        println!("{:>4} {}", i + 1, renderer.highlighted(&title));
        println!(
            "     {}",
            dim(&format!("{} · {}", paper.primary_category(), paper.url))
        );
    }
    ExitCode::SUCCESS
}
