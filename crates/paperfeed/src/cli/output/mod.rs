//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use paperfeed_feed::{CategorySummary, DateLanguageIndex, Paper};
use paperfeed_highlight::{AnsiRenderer, Card, DetailView, FeedView, HtmlRenderer, Render};
pub use paperfeed_highlight::terminal::{dim, error, header, subheader, success, warning};
use paperfeed_rank::{MatchReason, Ranking};
use paperfeed_stats::KeywordReport;
use serde::Serialize;

use crate::cli::args::OutputMode;

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// One ranked paper in JSON output.
#[derive(Serialize)]
pub struct JsonPaper<'a> {
    /// 1-based position in the ranking.
    pub index: usize,
    /// Whether the paper matched the filter.
    pub matched: bool,
    /// What it matched on.
    pub reason: &'a MatchReason,
    /// The paper itself.
    pub paper: &'a Paper,
}

/// JSON output for `show`.
#[derive(Serialize)]
struct JsonFeed<'a> {
    /// Date or range shown.
    selection: &'a str,
    /// Per-category counts.
    categories: &'a CategorySummary,
    /// Papers that matched the filter.
    matched: usize,
    /// Ranked papers.
    papers: Vec<JsonPaper<'a>>,
}

/// Ranked papers as JSON records.
pub fn json_papers(ranking: &Ranking) -> Vec<JsonPaper<'_>> {
    ranking
        .papers()
        .iter()
        .enumerate()
        .map(|(i, ranked)| JsonPaper {
            index: i + 1,
            matched: ranked.matched,
            reason: &ranked.reason,
            paper: &ranked.paper,
        })
        .collect()
}

/// Prints the feed in the selected mode.
pub fn print_feed(
    selection: &str,
    summary: &CategorySummary,
    ranking: &Ranking,
    view: &FeedView,
    mode: OutputMode,
) -> ExitCode {
    match mode {
        OutputMode::Json => {
            return print_json(&JsonFeed {
                selection,
                categories: summary,
                matched: ranking.matched(),
                papers: json_papers(ranking),
            });
        }
        OutputMode::Html => {
            print!("{}", HtmlRenderer.feed(view));
            return ExitCode::SUCCESS;
        }
        OutputMode::Cards | OutputMode::List => {}
    }

    println!("{}", header(&feed_heading(selection, summary, ranking)));
    if !summary.counts.is_empty() {
        println!("{}", dim(&category_line(summary)));
    }
    println!();
    match (mode, view) {
        (OutputMode::List, FeedView::Papers(cards)) => {
            for card in cards {
                println!("{}", list_line(card));
            }
        }
        _ => print!("{}", AnsiRenderer::new(true).feed(view)),
    }
    ExitCode::SUCCESS
}

/// Heading such as `2025-03-01 · 42 papers · 3 matched`.
fn feed_heading(selection: &str, summary: &CategorySummary, ranking: &Ranking) -> String {
    let mut heading = format!("{selection} · {} papers", summary.total);
    if ranking.matched() > 0 {
        heading.push_str(&format!(" · {} matched", ranking.matched()));
    }
    heading
}

/// Category tabs as one line, e.g. `All 42 | cs.AI 10 | cs.CL 32`.
pub fn category_line(summary: &CategorySummary) -> String {
    let mut tabs = vec![format!("All {}", summary.total)];
    tabs.extend(
        summary
            .counts
            .iter()
            .map(|(category, count)| format!("{category} {count}")),
    );
    tabs.join(" | ")
}

/// A card as a single line.
pub fn list_line(card: &Card) -> String {
    let marker = if card.matched { "★" } else { " " };
    let title = AnsiRenderer::new(true).highlighted(&card.title);
    let category = card.categories.first().map_or("", String::as_str);
    format!(
        "{:>4} {marker} {title} {}",
        card.index,
        dim(&format!("[{category}]"))
    )
}

/// Prints a detail view in the selected mode.
pub fn print_detail(
    detail: &DetailView,
    paper: &Paper,
    reason: &MatchReason,
    mode: OutputMode,
) -> ExitCode {
    match mode {
        OutputMode::Json => print_json(&JsonPaper {
            index: detail.position.map_or(0, |(pos, _)| pos),
            matched: detail.matched,
            reason,
            paper,
        }),
        OutputMode::Html => {
            print!("{}", HtmlRenderer.detail(detail));
            ExitCode::SUCCESS
        }
        OutputMode::Cards | OutputMode::List => {
            print!("{}", AnsiRenderer::new(true).detail(detail));
            ExitCode::SUCCESS
        }
    }
}

/// Table of indexed dates and their languages.
pub fn dates_table(index: &DateLanguageIndex) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Date", "Languages"]);
    for date in index.dates() {
        let languages: Vec<&str> = index.languages(date).iter().map(|l| l.name()).collect();
        table.add_row(vec![
            Cell::new(date.format("%Y-%m-%d")),
            Cell::new(languages.join(", ")),
        ]);
    }
    table
}

/// Table of the keyword cloud.
pub fn cloud_table(report: &KeywordReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Keyword", "Count", "Size"]);
    for (i, entry) in report.cloud.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.term),
            Cell::new(entry.count),
            Cell::new(entry.size),
        ]);
    }
    table
}

/// Table of trend series, one column per date.
pub fn trend_table(report: &KeywordReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    let mut heading = vec![report.axis.title.clone().unwrap_or_default()];
    heading.extend(report.axis.labels.iter().cloned());
    table.set_header(heading);
    for series in &report.trends {
        let mut row = vec![Cell::new(&series.term)];
        row.extend(series.points.iter().map(|p| Cell::new(p.count)));
        table.add_row(row);
    }
    table
}
