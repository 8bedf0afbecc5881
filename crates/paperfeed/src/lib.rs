//! paperfeed: a terminal reader for a daily feed of AI-summarized papers.
//!
//! The feed is a static site that publishes one JSONL file per date and language. paperfeed
//! loads a date or a range of dates, ranks papers against saved keywords and authors, shows
//! highlighted cards and details, and reports keyword statistics across dates.

#![warn(missing_docs)]

pub mod cli;
