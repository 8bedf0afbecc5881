//! Loading and filtering shared by paper commands.

use std::{process::ExitCode, sync::Arc};

use chrono::NaiveDate;
use paperfeed_feed::{DateLanguageIndex, Feed, Language, LoadError, Loader, Paper};
use paperfeed_highlight::{AnsiRenderer, DetailView, FAILED_MESSAGE, HighlightTerms, Render};
use paperfeed_rank::{
    Category, FilterState, JsonFileStore, LoadState, MatchReason, Session, match_reason,
};
use tracing::warn;

use crate::cli::{
    args::{DateSelection, FilterArgs, SelectionArgs},
    context::CommandContext,
};

/// A session after a load, with what was loaded.
pub struct Loaded {
    /// Session holding the papers, filter and preferences.
    pub session: Session<JsonFileStore>,
    /// Human-readable description of the selection.
    pub label: String,
    /// Dates that contributed papers, ascending.
    pub dates: Vec<NaiveDate>,
    /// File index the selection was resolved against.
    pub index: DateLanguageIndex,
}

impl Loaded {
    /// Prints the failure message if the load failed, returning the exit code to use.
    pub fn check_failed(&self) -> Result<(), ExitCode> {
        if let LoadState::Failed(error) = self.session.state() {
            let error = format!("Error: {error}");
            print!("{}", AnsiRenderer::new(true).message(&[FAILED_MESSAGE, &error]));
            return Err(ExitCode::FAILURE);
        }
        Ok(())
    }
}

/// Applies filter flags on top of the preference-seeded filter.
pub fn apply_filter(state: &mut FilterState, args: &FilterArgs) {
    if let Some(category) = &args.category {
        state.set_category(Category::from_name(category));
    }
    for keyword in &args.keywords {
        state.activate_keyword(keyword);
    }
    for author in &args.authors {
        state.activate_author(author);
    }
    if let Some(query) = &args.query {
        state.set_query(query);
    }
}

/// The paper open in the session's navigator, with its detail view and match reason.
pub fn open_detail(
    session: &Session<JsonFileStore>,
) -> Option<(DetailView, Arc<Paper>, MatchReason)> {
    let navigator = session.navigator()?;
    let paper = Arc::clone(navigator.current());
    let reason = match_reason(&paper, session.filter());
    let terms = HighlightTerms::from_filter(session.filter());
    let detail = DetailView::new(&paper, !reason.is_empty(), &terms)
        .at(navigator.position(), navigator.len());
    Some((detail, paper, reason))
}

/// Fetches the file index, printing a failure message on error.
pub async fn load_index(loader: &Loader) -> Result<DateLanguageIndex, ExitCode> {
    loader.load_index().await.map_err(|e| {
        println!("{FAILED_MESSAGE}");
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

/// Loads the selected dates into a new session with the filter applied.
///
/// A date without data yields an empty ready session. An invalid or empty range is
/// reported and aborts before anything is fetched.
pub async fn load_session(
    ctx: &CommandContext,
    selection: &SelectionArgs,
    filter: &FilterArgs,
) -> Result<Loaded, ExitCode> {
    let loader = ctx.loader()?;
    let language = ctx.preferred_language(selection.language)?;
    let mut session = Session::new(ctx.preferences()?);
    apply_filter(session.filter_mut(), filter);

    let index = load_index(&loader).await?;
    let ticket = session.begin_load();
    let (label, result) = fetch(&loader, &index, selection.dates(), language).await;

    let result = match result {
        Err(e @ (LoadError::EmptyRange { .. } | LoadError::InvalidDate { .. })) => {
            eprintln!("error: {e}");
            return Err(ExitCode::FAILURE);
        }
        other => other,
    };
    let dates = result
        .as_ref()
        .map(|feed| feed.days.iter().map(|day| day.date).collect())
        .unwrap_or_default();
    if let Ok(feed) = &result {
        for error in &feed.report.errors {
            warn!("skipped record: {error}");
        }
    }
    session.finish_load(ticket, result.map(|feed| feed.papers));

    Ok(Loaded {
        session,
        label,
        dates,
        index,
    })
}

/// Loads a selection, returning its label and the load result.
pub async fn fetch(
    loader: &Loader,
    index: &DateLanguageIndex,
    dates: DateSelection,
    language: Option<Language>,
) -> (String, Result<Feed, LoadError>) {
    match dates {
        DateSelection::Latest => match index.latest() {
            Some(date) => (
                date.to_string(),
                loader.load_papers_for_date(index, date, language).await,
            ),
            None => ("latest".to_string(), Ok(Feed::default())),
        },
        DateSelection::Day(date) => (
            date.to_string(),
            loader.load_papers_for_date(index, date, language).await,
        ),
        DateSelection::Range(start, end) => (
            format!("{start} to {end}"),
            loader.load_papers_for_range(index, start, end, language).await,
        ),
    }
}
