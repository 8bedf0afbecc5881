//! Highlighting and rendering for paperfeed.
//!
//! Search terms are located in paper text and turned into declarative [`Highlighted`]
//! values. Cards and detail views are built from a ranking and then serialized by a
//! [`Render`] implementation, either HTML fragments or terminal text.

#![warn(missing_docs)]

mod cards;
mod render;
mod segments;
pub mod terminal;
mod view;

pub use cards::{
    AuthorItem, Card, DetailView, HighlightTerms, Links, Section, assistant_link, author_line,
    cards,
};
pub use render::{AnsiRenderer, HtmlRenderer, Render};
pub use segments::{HighlightKind, Highlighted, Segment, match_ranges};
pub use terminal::TomlHighlighter;
pub use view::{EMPTY_MESSAGE, FAILED_MESSAGE, FeedView, LOADING_MESSAGE, reason_text};
