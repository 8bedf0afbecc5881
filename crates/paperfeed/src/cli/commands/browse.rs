//! Implementation of `paperfeed browse`, a line-driven reading session.

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use chrono::NaiveDate;
use paperfeed_feed::{Language, Loader};
use paperfeed_highlight::{AnsiRenderer, EMPTY_MESSAGE, FeedView, Render};
use paperfeed_rank::Category;
use tracing::warn;

use super::shared::{Loaded, fetch, load_session, open_detail};
use crate::cli::{
    args::{BrowseCommand, DateSelection, OutputMode, parse_date},
    context::CommandContext,
    output::{dim, error, print_feed, success, warning},
};

/// Help text listing the browse commands.
const HELP: &str = "\
Commands:
  l             list the feed (also an empty line)
  <n>           open the paper at position n
  n / p         next / previous paper
  r             random paper
  /TEXT         search titles, summaries and authors; `/` alone clears
  k WORD        toggle a keyword
  a NAME        toggle an author
  +k WORD       save a keyword to preferences and activate it
  +a NAME       save an author to preferences and activate it
  c CATEGORY    show one category (`c all` for every category)
  d YYYY-MM-DD  load another date
  h             this help
  q             quit";

/// One parsed line of browse input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// Show the ranked list.
    List,
    /// Open a 1-based position.
    Open(usize),
    /// Move to the next paper.
    Next,
    /// Move to the previous paper.
    Previous,
    /// Jump to a random paper.
    Random,
    /// Set the free-text query; empty clears it.
    Search(String),
    /// Toggle a keyword.
    Keyword(String),
    /// Toggle an author.
    Author(String),
    /// Save a keyword and activate it.
    SaveKeyword(String),
    /// Save an author and activate it.
    SaveAuthor(String),
    /// Restrict to a category.
    Category(String),
    /// Load another date.
    Date(NaiveDate),
    /// Print help.
    Help,
    /// Leave the session.
    Quit,
    /// Anything unrecognized, with a message.
    Invalid(String),
}

impl Input {
    /// Parses a line of user input.
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            return Self::Search(query.trim().to_string());
        }
        if let Ok(position) = line.parse::<usize>() {
            return if position == 0 {
                Self::Invalid("positions start at 1".to_string())
            } else {
                Self::Open(position)
            };
        }
        let (command, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, a)| (c, a.trim()));
        match (command, arg) {
            ("" | "l" | "list", _) => Self::List,
            ("n" | "next", _) => Self::Next,
            ("p" | "prev", _) => Self::Previous,
            ("r" | "random", _) => Self::Random,
            ("h" | "help" | "?", _) => Self::Help,
            ("q" | "quit" | "exit", _) => Self::Quit,
            ("k" | "a" | "+k" | "+a" | "c" | "d", "") => Self::Invalid(format!("`{command}` needs an argument")),
            ("k", word) => Self::Keyword(word.to_string()),
            ("a", name) => Self::Author(name.to_string()),
            ("+k", word) => Self::SaveKeyword(word.to_string()),
            ("+a", name) => Self::SaveAuthor(name.to_string()),
            ("c", category) => Self::Category(category.to_string()),
            ("d", date) => match parse_date(date) {
                Ok(date) => Self::Date(date),
                Err(e) => Self::Invalid(e),
            },
            _ => Self::Invalid(format!("unknown command `{line}` (h for help)")),
        }
    }
}

/// Interactive browsing state.
struct Browser {
    /// Loader for date reloads.
    loader: Loader,
    /// Preferred data language.
    language: Option<Language>,
    /// The loaded session.
    loaded: Loaded,
    /// Renderer for cards and details.
    renderer: AnsiRenderer,
}

impl Browser {
    /// Prints the feed for the current filter.
    fn list(&self) {
        let session = &self.loaded.session;
        let ranking = session.ranking();
        let view = FeedView::new(session.state(), &ranking, session.filter());
        print_feed(
            &self.loaded.label,
            &session.papers().summary(),
            &ranking,
            &view,
            OutputMode::Cards,
        );
    }

    /// Prints the open paper, or a hint when nothing is open.
    fn show_open(&self) {
        match open_detail(&self.loaded.session) {
            Some((detail, _, _)) => print!("{}", self.renderer.detail(&detail)),
            None => print!("{}", self.renderer.message(&[EMPTY_MESSAGE])),
        }
    }

    /// Loads another date into the session.
    async fn load_date(&mut self, date: NaiveDate) {
        let session = &mut self.loaded.session;
        let ticket = session.begin_load();
        let (label, result) =
            fetch(&self.loader, &self.loaded.index, DateSelection::Day(date), self.language).await;
        if let Ok(feed) = &result {
            for skipped in &feed.report.errors {
                warn!("skipped record: {skipped}");
            }
        }
        self.loaded.dates = result
            .as_ref()
            .map(|feed| feed.days.iter().map(|day| day.date).collect())
            .unwrap_or_default();
        session.finish_load(ticket, result.map(|feed| feed.papers));
        session.close();
        self.loaded.label = label;
        self.list();
    }

    /// Applies one input. Returns false when the session should end.
    async fn apply(&mut self, input: Input) -> bool {
        let session = &mut self.loaded.session;
        match input {
            Input::Quit => return false,
            Input::Help => println!("{HELP}"),
            Input::Invalid(message) => eprintln!("{}", warning(&message)),
            Input::List => self.list(),
            Input::Open(position) => {
                if session.open(position - 1).is_some() {
                    self.show_open();
                } else {
                    let total = session.ranking().len();
                    eprintln!(
                        "{}",
                        error(&format!("no paper at position {position} (the list has {total})"))
                    );
                }
            }
            Input::Next | Input::Previous | Input::Random => {
                if let Some(nav) = session.navigator_mut() {
                    match input {
                        Input::Next => nav.next_paper(),
                        Input::Previous => nav.previous_paper(),
                        _ => nav.random_paper(&mut rand::thread_rng()),
                    };
                } else if input == Input::Random {
                    session.open_random(&mut rand::thread_rng());
                } else {
                    session.open(0);
                }
                self.show_open();
            }
            Input::Search(query) => {
                session.filter_mut().set_query(&query);
                self.list();
            }
            Input::Keyword(word) => {
                let on = session.filter_mut().toggle_keyword(&word);
                println!("{}", dim(&toggle_message("keyword", &word, on)));
                self.list();
            }
            Input::Author(name) => {
                let on = session.filter_mut().toggle_author(&name);
                println!("{}", dim(&toggle_message("author", &name, on)));
                self.list();
            }
            Input::SaveKeyword(word) => {
                match session.prefs_mut().add_keyword(&word) {
                    Ok(()) => {
                        session.filter_mut().activate_keyword(&word);
                        println!("{}", success(&format!("Saved keyword \"{}\"", word.trim())));
                        self.list();
                    }
                    Err(e) => eprintln!("{}", warning(&e.to_string())),
                }
            }
            Input::SaveAuthor(name) => {
                match session.prefs_mut().add_author(&name) {
                    Ok(()) => {
                        session.filter_mut().activate_author(&name);
                        println!("{}", success(&format!("Saved author \"{}\"", name.trim())));
                        self.list();
                    }
                    Err(e) => eprintln!("{}", warning(&e.to_string())),
                }
            }
            Input::Category(name) => {
                session.filter_mut().set_category(Category::from_name(&name));
                self.list();
            }
            Input::Date(date) => self.load_date(date).await,
        }
        true
    }
}

/// Describes a toggle outcome.
fn toggle_message(kind: &str, term: &str, on: bool) -> String {
    let state = if on { "on" } else { "off" };
    format!("{kind} \"{}\" {state}", term.trim())
}

/// Runs an interactive session reading commands from stdin.
pub async fn run(ctx: &CommandContext, cmd: &BrowseCommand) -> ExitCode {
    let loader = match ctx.loader() {
        Ok(loader) => loader,
        Err(code) => return code,
    };
    let language = match ctx.preferred_language(cmd.selection.language) {
        Ok(language) => language,
        Err(code) => return code,
    };
    let loaded = match load_session(ctx, &cmd.selection, &cmd.filter).await {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let mut browser = Browser {
        loader,
        language,
        loaded,
        renderer: AnsiRenderer::new(true),
    };
    browser.list();
    println!("{}", dim("h for help, q to quit"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: failed to read input: {e}");
                return ExitCode::FAILURE;
            }
            None => break,
        };
        if !browser.apply(Input::parse(&line)).await {
            break;
        }
    }
    println!();
    ExitCode::SUCCESS
}
