//! Serializers for the render models.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    AuthorItem, Card, DetailView, FeedView, HighlightKind, Highlighted,
    terminal::{colors, dim, header, rule, subheader, warning},
    view::{EMPTY_MESSAGE, FAILED_MESSAGE, LOADING_MESSAGE, reason_text},
};

/// Turns render models into output text.
pub trait Render {
    /// Renders highlighted text.
    fn highlighted(&self, text: &Highlighted) -> String;

    /// Renders a card author line.
    fn author_line(&self, line: &[AuthorItem]) -> String;

    /// Renders one card.
    fn card(&self, card: &Card) -> String;

    /// Renders a detail view.
    fn detail(&self, detail: &DetailView) -> String;

    /// Renders a status message in place of the feed.
    fn message(&self, lines: &[&str]) -> String;

    /// Renders the whole feed area.
    fn feed(&self, view: &FeedView) -> String {
        match view {
            FeedView::Loading => self.message(&[LOADING_MESSAGE]),
            FeedView::Failed(error) => {
                self.message(&[FAILED_MESSAGE, &format!("Error: {error}")])
            }
            FeedView::Empty => self.message(&[EMPTY_MESSAGE]),
            FeedView::Papers(cards) => cards
                .iter()
                .map(|card| self.card(card))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Joins lines, ending with a newline.
fn block(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// HTML fragments using the feed's CSS classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Render for HtmlRenderer {
    fn highlighted(&self, text: &Highlighted) -> String {
        text.segments
            .iter()
            .map(|segment| {
                let escaped = encode_text(&segment.text);
                if segment.highlighted {
                    format!(
                        "<span class=\"{}\">{escaped}</span>",
                        text.kind.css_class()
                    )
                } else {
                    escaped.into_owned()
                }
            })
            .collect()
    }

    fn author_line(&self, line: &[AuthorItem]) -> String {
        line.iter()
            .map(|item| match item {
                AuthorItem::Name(name) => {
                    format!("<span class=\"author-item\">{}</span>", self.highlighted(name))
                }
                AuthorItem::Ellipsis => "<span class=\"author-ellipsis\">...</span>".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn card(&self, card: &Card) -> String {
        let mut lines = Vec::new();
        if card.matched {
            lines.push(format!(
                "<div class=\"paper-card matched-paper\" title=\"Matched: {}\">",
                encode_double_quoted_attribute(&reason_text(&card.reason))
            ));
            lines.push("  <div class=\"match-badge\"></div>".to_string());
        } else {
            lines.push("<div class=\"paper-card\">".to_string());
        }
        let tags: String = card
            .categories
            .iter()
            .map(|c| format!("<span class=\"category-tag\">{}</span>", encode_text(c)))
            .collect();
        lines.extend([
            format!("  <div class=\"paper-card-index\">{}</div>", card.index),
            format!(
                "  <h3 class=\"paper-card-title\">{}</h3>",
                self.highlighted(&card.title)
            ),
            format!(
                "  <p class=\"paper-card-authors\">{}</p>",
                self.author_line(&card.authors)
            ),
            format!("  <div class=\"paper-card-categories\">{tags}</div>"),
            format!(
                "  <p class=\"paper-card-summary\">{}</p>",
                self.highlighted(&card.summary)
            ),
            format!(
                "  <span class=\"paper-card-date\">{}</span>",
                card.date.format("%Y-%m-%d")
            ),
            format!(
                "  <a class=\"paper-card-link\" href=\"{}\">Details</a>",
                encode_double_quoted_attribute(&card.url)
            ),
            "</div>".to_string(),
        ]);
        block(&lines)
    }

    fn detail(&self, detail: &DetailView) -> String {
        let class = if detail.matched {
            "paper-details matched-paper-details"
        } else {
            "paper-details"
        };
        let badge = detail
            .position
            .map(|(pos, _)| format!("<span class=\"paper-index-badge\">{pos}</span> "))
            .unwrap_or_default();

        let mut lines = vec![
            format!("<div class=\"{class}\">"),
            format!("  <h2>{badge}{}</h2>", self.highlighted(&detail.title)),
            format!(
                "  <p><strong>Authors: </strong>{}</p>",
                self.highlighted(&detail.authors)
            ),
            format!(
                "  <p><strong>Categories: </strong>{}</p>",
                encode_text(&detail.categories)
            ),
            format!(
                "  <p><strong>Date: </strong>{}</p>",
                detail.date.format("%Y-%m-%d")
            ),
            "  <h3>TL;DR</h3>".to_string(),
            format!("  <p>{}</p>", self.highlighted(&detail.tldr)),
        ];
        for section in &detail.sections {
            lines.push(format!(
                "  <div class=\"paper-section\"><h4>{}</h4><p>{}</p></div>",
                section.label,
                self.highlighted(&section.body)
            ));
        }
        if let Some(abstract_text) = &detail.abstract_text {
            lines.push("  <h3>Abstract</h3>".to_string());
            lines.push(format!(
                "  <p class=\"original-abstract\">{}</p>",
                self.highlighted(abstract_text)
            ));
        }

        let links = &detail.links;
        let mut anchors = vec![
            ("Abstract", links.abs.as_str()),
            ("PDF", links.pdf.as_str()),
            ("HTML", links.html.as_str()),
        ];
        if let Some(code) = &links.code {
            anchors.push(("Code", code));
        }
        anchors.push(("Ask assistant", links.assistant.as_str()));
        let anchors: Vec<String> = anchors
            .into_iter()
            .map(|(label, href)| {
                format!(
                    "<a href=\"{}\" target=\"_blank\">{label}</a>",
                    encode_double_quoted_attribute(href)
                )
            })
            .collect();
        lines.push(format!("  <p class=\"paper-links\">{}</p>", anchors.join(" ")));
        lines.push("</div>".to_string());
        block(&lines)
    }

    fn message(&self, lines: &[&str]) -> String {
        let body: String = lines
            .iter()
            .map(|line| format!("<p>{}</p>", encode_text(line)))
            .collect();
        format!("<div class=\"loading-container\">{body}</div>\n")
    }
}

/// Terminal output, optionally colored.
#[derive(Debug, Clone, Copy)]
pub struct AnsiRenderer {
    /// Emit escape codes.
    color: bool,
}

impl AnsiRenderer {
    /// Creates a renderer; with `color` off the output is plain text.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Applies `style` only when coloring.
    fn styled(&self, text: &str, style: fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}

impl Render for AnsiRenderer {
    fn highlighted(&self, text: &Highlighted) -> String {
        let mark = match text.kind {
            HighlightKind::Keyword => colors::YELLOW,
            HighlightKind::Author => colors::GREEN,
        };
        text.segments
            .iter()
            .map(|segment| {
                if segment.highlighted && self.color {
                    format!("{}{mark}{}{}", colors::BOLD, segment.text, colors::RESET)
                } else {
                    segment.text.clone()
                }
            })
            .collect()
    }

    fn author_line(&self, line: &[AuthorItem]) -> String {
        line.iter()
            .map(|item| match item {
                AuthorItem::Name(name) => self.highlighted(name),
                AuthorItem::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn card(&self, card: &Card) -> String {
        let marker = if card.matched { "★ " } else { "" };
        let meta = format!(
            "{} · {}",
            card.categories.join(", "),
            card.date.format("%Y-%m-%d")
        );
        let mut lines = vec![
            format!(
                "{} {marker}{}",
                self.styled(&format!("[{}]", card.index), subheader),
                self.highlighted(&card.title)
            ),
            format!("    {}", self.author_line(&card.authors)),
            format!("    {}", self.styled(&meta, dim)),
        ];
        if !card.summary.is_empty() {
            lines.push(format!("    {}", self.highlighted(&card.summary)));
        }
        if card.matched {
            let reason = format!("matched {}", reason_text(&card.reason));
            lines.push(format!("    {}", self.styled(&reason, warning)));
        }
        lines.push(format!("    {}", self.styled(&card.url, dim)));
        block(&lines)
    }

    fn detail(&self, detail: &DetailView) -> String {
        let mut lines = Vec::new();
        if let Some((pos, total)) = detail.position {
            lines.push(self.styled(&format!("{pos} / {total}"), dim));
        }
        lines.push(self.highlighted(&detail.title));
        if self.color {
            lines.push(rule(60));
        }
        lines.extend([
            format!("Authors: {}", self.highlighted(&detail.authors)),
            format!("Categories: {}", detail.categories),
            format!("Date: {}", detail.date.format("%Y-%m-%d")),
            String::new(),
            self.styled("TL;DR", header),
            self.highlighted(&detail.tldr),
        ]);
        for section in &detail.sections {
            lines.push(String::new());
            lines.push(self.styled(section.label, header));
            lines.push(self.highlighted(&section.body));
        }
        if let Some(abstract_text) = &detail.abstract_text {
            lines.push(String::new());
            lines.push(self.styled("Abstract", header));
            lines.push(self.highlighted(abstract_text));
        }

        let links = &detail.links;
        lines.extend([
            String::new(),
            self.styled("Links", header),
            format!("Abstract: {}", links.abs),
            format!("PDF:      {}", links.pdf),
            format!("HTML:     {}", links.html),
        ]);
        if let Some(code) = &links.code {
            let stars = links
                .code_stars
                .map(|s| format!(" (★ {s})"))
                .unwrap_or_default();
            lines.push(format!("Code:     {code}{stars}"));
        }
        lines.push(format!("Ask:      {}", links.assistant));
        block(&lines)
    }

    fn message(&self, lines: &[&str]) -> String {
        let owned: Vec<String> = lines.iter().map(|l| (*l).to_string()).collect();
        block(&owned)
    }
}
