//! Parsing of JSONL data files into papers.
//!
//! Each non-blank line is one JSON record. Bad lines are reported and skipped; they never
//! abort the rest of the file.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{DisplayFromStr, OneOrMany, PickFirst, formats::PreferOne, serde_as};
use tracing::{debug, warn};

use crate::{CategoryMap, Paper, ParseError};

/// A record as published by the generation pipeline.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    /// arXiv identifier.
    id: Option<String>,
    /// Paper title.
    title: Option<String>,
    /// Authors as a list or a comma-joined string.
    authors: Option<RawAuthors>,
    /// Categories as a list or a single string.
    #[serde_as(as = "Option<OneOrMany<_, PreferOne>>")]
    categories: Option<Vec<String>>,
    /// Original abstract.
    summary: Option<String>,
    /// AI-generated fields.
    #[serde(rename = "AI")]
    ai: Option<RawAi>,
    /// Abstract page URL.
    abs: Option<String>,
    /// PDF URL.
    pdf: Option<String>,
    /// Code repository URL.
    code_url: Option<String>,
    /// Star count, as a number or a numeric string.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    code_stars: Option<u64>,
    /// Repository last update.
    code_last_update: Option<String>,
}

/// Author list in either published shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAuthors {
    /// Already split.
    List(Vec<String>),
    /// Comma-joined.
    Joined(String),
}

impl RawAuthors {
    /// Normalizes to trimmed, non-empty names.
    fn into_names(self) -> Vec<String> {
        let names = match self {
            Self::List(list) => list,
            Self::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// The `AI` object of a record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAi {
    /// One-line summary.
    tldr: Option<String>,
    /// Motivation.
    motivation: Option<String>,
    /// Method.
    method: Option<String>,
    /// Result.
    result: Option<String>,
    /// Conclusion.
    conclusion: Option<String>,
}

/// Outcome of parsing one data file, apart from the papers themselves.
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Papers accepted.
    pub accepted: usize,
    /// Records silently dropped for having no category.
    pub uncategorized: usize,
    /// Lines that could not be parsed.
    pub errors: Vec<ParseError>,
}

impl ParseReport {
    /// Folds another report into this one.
    pub fn absorb(&mut self, other: Self) {
        self.accepted += other.accepted;
        self.uncategorized += other.uncategorized;
        self.errors.extend(other.errors);
    }
}

/// Parses a JSONL data file published for `date`.
///
/// Empty input yields an empty map.
pub fn parse_data_file(text: &str, date: NaiveDate) -> (CategoryMap, ParseReport) {
    let mut papers = CategoryMap::new();
    let mut report = ParseReport::default();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line, idx + 1, date) {
            Ok(Some(paper)) => {
                report.accepted += 1;
                papers.insert(Arc::new(paper));
            }
            Ok(None) => {
                debug!(line = idx + 1, %date, "dropping record without categories");
                report.uncategorized += 1;
            }
            Err(err) => {
                warn!(%date, "skipping malformed record: {err}");
                report.errors.push(err);
            }
        }
    }

    (papers, report)
}

/// Parses one record. `Ok(None)` means the record has no category and is dropped.
fn parse_record(line: &str, line_no: usize, date: NaiveDate) -> Result<Option<Paper>, ParseError> {
    let raw: RawRecord = serde_json::from_str(line).map_err(|source| ParseError::Json {
        line: line_no,
        source,
    })?;

    let categories: Vec<String> = raw
        .categories
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if categories.is_empty() {
        return Ok(None);
    }

    let id = raw.id.unwrap_or_default();
    let url = non_empty(raw.abs)
        .or_else(|| non_empty(raw.pdf))
        .or_else(|| (!id.is_empty()).then(|| format!("https://arxiv.org/abs/{id}")))
        .ok_or(ParseError::MissingUrl { line: line_no })?;

    let ai = raw.ai.unwrap_or_default();
    let long_abstract = raw.summary.unwrap_or_default();
    let summary = non_empty(ai.tldr).unwrap_or_else(|| long_abstract.clone());

    Ok(Some(Paper {
        id,
        title: raw.title.unwrap_or_default().trim().to_string(),
        authors: raw.authors.map(RawAuthors::into_names).unwrap_or_default(),
        categories,
        summary,
        long_abstract,
        motivation: non_empty(ai.motivation),
        method: non_empty(ai.method),
        result: non_empty(ai.result),
        conclusion: non_empty(ai.conclusion),
        date,
        url,
        code_url: non_empty(raw.code_url),
        code_stars: raw.code_stars,
        code_last_update: non_empty(raw.code_last_update),
    }))
}

/// Treats blank strings as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_full_record() {
        let line = r#"{"id":"2503.00001","title":"Sparse Mixtures","authors":["A. One","B. Two"],"categories":["cs.LG","cs.AI"],"summary":"Long abstract.","AI":{"tldr":"Short.","method":"Routing."},"abs":"https://arxiv.org/abs/2503.00001","code_url":"https://github.com/x/y","code_stars":"42"}"#;
        let (map, report) = parse_data_file(line, date());
        assert_eq!(report.accepted, 1);
        let paper = &map.get("cs.LG").unwrap()[0];
        assert_eq!(paper.summary, "Short.");
        assert_eq!(paper.long_abstract, "Long abstract.");
        assert_eq!(paper.method.as_deref(), Some("Routing."));
        assert!(paper.motivation.is_none());
        assert_eq!(paper.code_stars, Some(42));
        assert_eq!(paper.date, date());
        assert_eq!(paper.categories, ["cs.LG", "cs.AI"]);
    }

    #[test]
    fn test_string_shapes() {
        let line = r#"{"id":"1","title":"T","authors":"Ada, Grace ,Edsger","categories":"cs.CL","summary":"S"}"#;
        let (map, _) = parse_data_file(line, date());
        let paper = &map.get("cs.CL").unwrap()[0];
        assert_eq!(paper.authors, ["Ada", "Grace", "Edsger"]);
        assert_eq!(paper.summary, "S");
        assert_eq!(paper.url, "https://arxiv.org/abs/1");
    }

    #[test]
    fn test_url_precedence() {
        let line = r#"{"id":"1","categories":["cs.AI"],"pdf":"https://arxiv.org/pdf/1"}"#;
        let (map, _) = parse_data_file(line, date());
        assert_eq!(map.get("cs.AI").unwrap()[0].url, "https://arxiv.org/pdf/1");
    }

    #[test]
    fn test_uncategorized_dropped_silently() {
        let text = [
            r#"{"id":"1","title":"none"}"#,
            r#"{"id":"2","categories":null}"#,
            r#"{"id":"3","categories":""}"#,
            r#"{"id":"4","categories":[]}"#,
        ]
        .join("\n");
        let (map, report) = parse_data_file(&text, date());
        assert!(map.is_empty());
        assert_eq!(report.uncategorized, 4);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_bad_lines_skipped() {
        let text = [
            r#"{"id":"1","categories":["cs.AI"]}"#,
            "{not json",
            r#"{"categories":["cs.AI"]}"#,
            "",
            r#"{"id":"4","categories":["cs.AI"]}"#,
        ]
        .join("\n");
        let (map, report) = parse_data_file(&text, date());
        assert_eq!(map.len(), 2);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].line(), 2);
        assert!(matches!(report.errors[1], ParseError::MissingUrl { line: 3 }));
    }

    #[test]
    fn test_empty_file() {
        let (map, report) = parse_data_file("", date());
        assert!(map.is_empty());
        assert_eq!(report.accepted, 0);
    }
}
