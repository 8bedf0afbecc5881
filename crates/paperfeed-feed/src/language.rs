//! Data languages and how one is chosen for a date.

use std::{env, fmt, str::FromStr};

use serde::Serialize;

/// A language a data file can be published in.
///
/// Variants are listed in fallback precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Language {
    /// English summaries.
    English,
    /// Chinese summaries.
    Chinese,
}

impl Language {
    /// Every known language, in fallback precedence order.
    pub const ALL: [Self; 2] = [Self::English, Self::Chinese];

    /// Name as it appears in data file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Chinese => "Chinese",
        }
    }

    /// Maps a locale tag such as `zh_CN.UTF-8` or `en-US` to a language.
    ///
    /// Anything that does not start with `zh` is English.
    pub fn from_locale(locale: &str) -> Self {
        if locale.trim().to_ascii_lowercase().starts_with("zh") {
            Self::Chinese
        } else {
            Self::English
        }
    }

    /// Detects the user's language.
    ///
    /// A configured locale wins over `LC_ALL`, `LC_MESSAGES` and `LANG`, checked in that
    /// order. Defaults to English.
    pub fn detect(configured_locale: Option<&str>) -> Self {
        if let Some(locale) = configured_locale {
            return Self::from_locale(locale);
        }
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
            .map_or(Self::English, |value| Self::from_locale(&value))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a language name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts full names case-insensitively, plus the `en` and `zh` codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "en" => return Ok(Self::English),
            "zh" => return Ok(Self::Chinese),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Picks the language to load from those available for a date.
///
/// Order: the caller's preference, the detected language, then each known language in
/// precedence order, then whatever is listed first. Returns `None` only when nothing is
/// available.
pub fn select_language(
    available: &[Language],
    preferred: Option<Language>,
    detected: Language,
) -> Option<Language> {
    preferred
        .into_iter()
        .chain([detected])
        .chain(Language::ALL)
        .find(|lang| available.contains(lang))
        .or_else(|| available.first().copied())
}

/// Languages to try, in order, when the index lists none for a date.
pub fn fallback_order(preferred: Option<Language>, detected: Language) -> Vec<Language> {
    let mut order = Vec::with_capacity(Language::ALL.len());
    for lang in preferred.into_iter().chain([detected]).chain(Language::ALL) {
        if !order.contains(&lang) {
            order.push(lang);
        }
    }
    order
}
