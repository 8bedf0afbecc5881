//! Clap argument definitions for the `paperfeed` CLI.

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use paperfeed_feed::{Language, UnknownLanguage};

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// Parses a language name or code.
fn parse_language(s: &str) -> Result<Language, String> {
    s.parse().map_err(|e: UnknownLanguage| e.to_string())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "paperfeed")]
#[command(about = "Read a daily feed of AI-summarized papers")]
pub struct Cli {
    /// Log more (-v for info, -vv for debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Which dates to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    /// The most recent indexed date.
    Latest,
    /// One date.
    Day(NaiveDate),
    /// Every indexed date in an inclusive range.
    Range(NaiveDate, NaiveDate),
}

/// Date and language selection flags.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Date to load (YYYY-MM-DD) [default: most recent]
    #[arg(short = 'd', long, value_parser = parse_date, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,

    /// First date of a range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Last date of a range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Data language (English, Chinese, en, zh)
    #[arg(short = 'l', long = "lang", value_parser = parse_language)]
    pub language: Option<Language>,
}

impl SelectionArgs {
    /// The dates these flags select.
    pub fn dates(&self) -> DateSelection {
        match (self.date, self.from, self.to) {
            (Some(date), _, _) => DateSelection::Day(date),
            (None, Some(from), Some(to)) if from == to => DateSelection::Day(from),
            (None, Some(from), Some(to)) => DateSelection::Range(from, to),
            _ => DateSelection::Latest,
        }
    }
}

/// Filter flags applied on top of saved preferences.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only papers whose primary category is this one
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Activate a keyword (repeatable)
    #[arg(short = 'k', long = "keyword")]
    pub keywords: Vec<String>,

    /// Activate an author (repeatable)
    #[arg(short = 'a', long = "author")]
    pub authors: Vec<String>,

    /// Free-text search; replaces keyword and author matching
    #[arg(short = 'q', long)]
    pub query: Option<String>,
}

/// Output format for paper lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Full cards.
    Cards,
    /// One line per paper.
    List,
    /// JSON.
    Json,
    /// HTML fragments.
    Html,
}

/// Output format flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// One line per paper
    #[arg(long, conflicts_with_all = ["json", "html"])]
    pub list: bool,

    /// Output in JSON format
    #[arg(long, conflicts_with = "html")]
    pub json: bool,

    /// Output HTML fragments
    #[arg(long)]
    pub html: bool,
}

impl OutputArgs {
    /// The selected mode.
    pub fn mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.html {
            OutputMode::Html
        } else if self.list {
            OutputMode::List
        } else {
            OutputMode::Cards
        }
    }
}

/// Output flags for a single paper.
#[derive(Args, Debug, Clone, Default)]
pub struct DetailOutputArgs {
    /// Output in JSON format
    #[arg(long, conflicts_with = "html")]
    pub json: bool,

    /// Output an HTML fragment
    #[arg(long)]
    pub html: bool,
}

impl DetailOutputArgs {
    /// The selected mode; lists do not apply to a single paper.
    pub fn mode(&self) -> OutputMode {
        OutputArgs {
            list: false,
            json: self.json,
            html: self.html,
        }
        .mode()
    }
}

/// Arguments for `paperfeed dates`.
#[derive(Args, Debug, Clone)]
pub struct DatesCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `paperfeed show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    #[command(flatten)]
    /// Date and language selection.
    pub selection: SelectionArgs,

    #[command(flatten)]
    /// Filter flags.
    pub filter: FilterArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `paperfeed detail`.
#[derive(Args, Debug, Clone)]
pub struct DetailCommand {
    /// Position in the ranked list, starting at 1
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub index: u32,

    #[command(flatten)]
    /// Date and language selection.
    pub selection: SelectionArgs,

    #[command(flatten)]
    /// Filter flags.
    pub filter: FilterArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: DetailOutputArgs,
}

/// Arguments for `paperfeed random`.
#[derive(Args, Debug, Clone)]
pub struct RandomCommand {
    #[command(flatten)]
    /// Date and language selection.
    pub selection: SelectionArgs,

    #[command(flatten)]
    /// Filter flags.
    pub filter: FilterArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: DetailOutputArgs,
}

/// Arguments for `paperfeed stats`.
#[derive(Args, Debug, Clone)]
pub struct StatsCommand {
    #[command(flatten)]
    /// Date and language selection.
    pub selection: SelectionArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `paperfeed related`.
#[derive(Args, Debug, Clone)]
pub struct RelatedCommand {
    /// Keyword to look for in titles and summaries
    pub keyword: String,

    #[command(flatten)]
    /// Date and language selection.
    pub selection: SelectionArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `paperfeed prefs`.
#[derive(Args, Debug, Clone)]
pub struct PrefsCommand {
    /// Preference action.
    #[command(subcommand)]
    pub action: PrefsAction,
}

/// Preference actions.
#[derive(Subcommand, Debug, Clone)]
pub enum PrefsAction {
    /// Show saved keywords and authors
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Save a keyword
    AddKeyword {
        /// Keyword to save
        keyword: String,
    },
    /// Remove a saved keyword
    RemoveKeyword {
        /// Keyword to remove
        keyword: String,
    },
    /// Save an author
    AddAuthor {
        /// Author name to save
        author: String,
    },
    /// Remove a saved author
    RemoveAuthor {
        /// Author name to remove
        author: String,
    },
    /// Remove every saved keyword and author
    Reset,
}

/// Arguments for `paperfeed browse`.
#[derive(Args, Debug, Clone)]
pub struct BrowseCommand {
    #[command(flatten)]
    /// Date and language selection.
    pub selection: SelectionArgs,

    #[command(flatten)]
    /// Filter flags.
    pub filter: FilterArgs,
}

/// Arguments for `paperfeed init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.paperfeed.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `paperfeed` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List dates with published papers
    Dates(DatesCommand),

    /// Show ranked paper cards for a date or range
    Show(ShowCommand),

    /// Show one paper from the ranked list in full
    Detail(DetailCommand),

    /// Show a random paper from the ranked list
    Random(RandomCommand),

    /// Show the keyword cloud and keyword trends
    Stats(StatsCommand),

    /// List papers mentioning a keyword
    Related(RelatedCommand),

    /// Manage saved keywords and authors
    Prefs(PrefsCommand),

    /// Browse papers interactively
    Browse(BrowseCommand),

    /// Initialize paperfeed configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

impl Commands {
    /// Whether the command reads the merged configuration.
    ///
    /// `init` must work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}
