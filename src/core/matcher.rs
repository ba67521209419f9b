//! Event title → template resolution.
//!
//! Every keyword is scored against the normalised title with a
//! Levenshtein ratio (0-100). A keyword contained in a longer title is
//! scored on its best-aligned window of the title, so "DH: Game 1 - Petals"
//! scores 100 against "petals". The highest score wins; on equal scores the
//! keyword declared first in the catalog wins, except that a title equal
//! to a keyword always resolves to that keyword. Below the acceptance
//! threshold the calendar's `default` template is returned instead.

use crate::catalog::{DEFAULT_KEYWORD, TemplateCatalog, TemplateEntry};
use strsim::normalized_levenshtein;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'a> {
    pub keyword: &'a str,
    pub template: &'a TemplateEntry,
    /// Best score seen, even when the default template was chosen.
    pub score: u8,
    pub fallback: bool,
}

pub struct Matcher<'a> {
    catalog: &'a TemplateCatalog,
    threshold: u8,
}

impl<'a> Matcher<'a> {
    pub fn new(catalog: &'a TemplateCatalog, threshold: u8) -> Self {
        Self {
            catalog,
            threshold: threshold.min(100),
        }
    }

    /// Never fails: the default template is the answer of last resort.
    pub fn match_title(&self, title: &str) -> MatchResult<'a> {
        let normalized = normalize(title);

        let mut best: Option<(&'a str, &'a TemplateEntry, u8)> = None;
        for (keyword, template) in self.catalog.iter() {
            if keyword == DEFAULT_KEYWORD {
                continue;
            }
            // An exact title beats any keyword merely contained in it.
            if normalized == keyword {
                return MatchResult {
                    keyword,
                    template,
                    score: 100,
                    fallback: false,
                };
            }

            let s = score(&normalized, keyword);
            debug!(title = %normalized, keyword, score = s, "keyword_scored");

            // Strictly greater: earlier keywords keep ties.
            if best.is_none_or(|(_, _, b)| s > b) {
                best = Some((keyword, template, s));
            }
        }

        match best {
            Some((keyword, template, s)) if !normalized.is_empty() && s >= self.threshold => {
                MatchResult {
                    keyword,
                    template,
                    score: s,
                    fallback: false,
                }
            }
            _ => {
                let s = best.map(|(_, _, s)| s).unwrap_or(0);
                info!(
                    title,
                    calendar = self.catalog.name(),
                    best_score = s,
                    threshold = self.threshold,
                    "no keyword above threshold, using default template"
                );
                MatchResult {
                    keyword: DEFAULT_KEYWORD,
                    template: self.catalog.default_entry(),
                    score: s,
                    fallback: true,
                }
            }
        }
    }
}

/// Resolve `title` against `catalog` in one call.
pub fn match_title<'a>(title: &str, catalog: &'a TemplateCatalog, threshold: u8) -> MatchResult<'a> {
    Matcher::new(catalog, threshold).match_title(title)
}

pub fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Similarity of a normalised title and a keyword, 0-100.
pub fn score(title: &str, keyword: &str) -> u8 {
    ratio(title, keyword).max(partial_ratio(title, keyword))
}

/// Whole-string Levenshtein ratio.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() && b.is_empty() {
        return 0;
    }
    to_percent(normalized_levenshtein(a, b))
}

/// Ratio of the shorter string against its best window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return 0;
    }

    let needle: String = short.iter().collect();
    let best = long
        .windows(short.len())
        .map(|w| normalized_levenshtein(&needle, &w.iter().collect::<String>()))
        .fold(0.0_f64, f64::max);

    to_percent(best)
}

fn to_percent(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}
