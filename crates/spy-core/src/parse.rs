//! Parsers turning free-text votes and predictions into structured results.
//!
//! Markers come from the [`Locale`]; a response that lacks its marker parses
//! to "no vote" or an empty prediction rather than an error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::names::{clean_reference, resolve};

/// A parser from agent text to a structured value, resolved against candidate names.
pub trait ResponseParser {
    /// Parsed result.
    type Output;

    /// Parse `text`, resolving names against `candidates`.
    fn parse(&self, text: &str, candidates: &[String]) -> Self::Output;
}

/// Lowercase and fold full-width colons so markers match either form.
fn normalize(text: &str) -> String {
    text.to_lowercase().replace('：', ":")
}

/// Text following the first occurrence of `marker`, if any.
fn after_marker<'t>(text: &'t str, marker: &str) -> Option<&'t str> {
    if marker.is_empty() {
        return None;
    }
    text.find(marker).map(|i| &text[i + marker.len()..])
}

/// Extracts the single vote target after the vote marker.
#[derive(Debug, Clone)]
pub struct VoteParser {
    marker: String,
    end_of_speech: String,
}

impl VoteParser {
    /// A parser using the locale's vote marker.
    pub fn new(locale: &Locale) -> Self {
        Self {
            marker: normalize(&locale.vote_marker),
            end_of_speech: normalize(&locale.end_of_speech),
        }
    }
}

impl ResponseParser for VoteParser {
    type Output = Option<String>;

    fn parse(&self, text: &str, candidates: &[String]) -> Option<String> {
        let text = normalize(text);
        let rest = after_marker(&text, &self.marker)?;
        let line = rest.lines().next().unwrap_or("");
        let target = clean_reference(line, &self.end_of_speech);
        if target.is_empty() {
            return None;
        }
        resolve(&target, candidates)
    }
}

/// Predicted Spy and Blank name sets from one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePrediction {
    /// Names predicted to be Spies.
    pub spies: BTreeSet<String>,
    /// Names predicted to be Blanks.
    pub blanks: BTreeSet<String>,
}

impl RolePrediction {
    /// True when no names were predicted.
    pub fn is_empty(&self) -> bool {
        self.spies.is_empty() && self.blanks.is_empty()
    }
}

/// Extracts per-role name lists after each role marker.
#[derive(Debug, Clone)]
pub struct PredictionParser {
    spy_marker: String,
    blank_marker: Option<String>,
    separators: Vec<String>,
    end_of_speech: String,
}

impl PredictionParser {
    /// Blank lists are only parsed when the game has blanks.
    pub fn new(locale: &Locale, has_blank: bool) -> Self {
        Self {
            spy_marker: normalize(&locale.spy_marker),
            blank_marker: has_blank.then(|| normalize(&locale.blank_marker)),
            separators: locale.list_separators.iter().map(|s| normalize(s)).collect(),
            end_of_speech: normalize(&locale.end_of_speech),
        }
    }

    /// The section after `marker`, cut at the next marker, newline, or end of speech.
    fn section<'t>(&self, text: &'t str, marker: &str) -> Option<&'t str> {
        let rest = after_marker(text, marker)?;
        let mut stops: Vec<&str> = vec![self.spy_marker.as_str(), "\n"];
        if let Some(blank) = &self.blank_marker {
            stops.push(blank);
        }
        if !self.end_of_speech.is_empty() {
            stops.push(&self.end_of_speech);
        }
        let end = stops
            .iter()
            .filter(|s| !s.is_empty())
            .filter_map(|s| rest.find(s))
            .min()
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }

    fn names(&self, section: &str, candidates: &[String]) -> BTreeSet<String> {
        let mut pieces = vec![section.to_string()];
        for sep in &self.separators {
            pieces = pieces
                .iter()
                .flat_map(|p| p.split(sep.as_str()).map(str::to_string))
                .collect();
        }
        pieces
            .iter()
            .map(|p| clean_reference(p, &self.end_of_speech))
            .filter(|p| !p.is_empty())
            .filter_map(|p| resolve(&p, candidates))
            .collect()
    }
}

impl ResponseParser for PredictionParser {
    type Output = RolePrediction;

    fn parse(&self, text: &str, candidates: &[String]) -> RolePrediction {
        let text = normalize(text);
        let spies = self
            .section(&text, &self.spy_marker)
            .map(|s| self.names(s, candidates))
            .unwrap_or_default();
        let blanks = self
            .blank_marker
            .as_deref()
            .and_then(|m| self.section(&text, m))
            .map(|s| self.names(s, candidates))
            .unwrap_or_default();
        RolePrediction { spies, blanks }
    }
}
