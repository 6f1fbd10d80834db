//! Headline normalization used as the title+window dedup key.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduce a headline to a comparable key.
///
/// NFKC-normalizes and lower-cases the title, strips a trailing
/// `| Source`, `- Source`, `— Source` or `– Source` byline when `source` is
/// given, replaces everything that is not a letter, digit or whitespace with
/// a space, then collapses and trims whitespace.
///
/// The byline match is textual: a title that merely ends in the source name
/// after a dash loses that tail too.
///
/// An empty result means the article cannot be grouped by title.
#[must_use]
pub fn normalize_title(title: &str, source: Option<&str>) -> String {
    let byline = source.and_then(byline_pattern);
    normalize_with(title, byline.as_ref())
}

/// Title normalizer for a whole batch: each distinct source name has its
/// byline pattern compiled once.
#[derive(Debug, Default)]
pub(crate) struct TitleKeyer {
    bylines: HashMap<String, Option<Regex>>,
}

impl TitleKeyer {
    /// Same result as [`normalize_title`].
    pub(crate) fn key(&mut self, title: &str, source: Option<&str>) -> String {
        let byline = match source {
            Some(name) => {
                if !self.bylines.contains_key(name) {
                    self.bylines.insert(name.to_string(), byline_pattern(name));
                }
                self.bylines.get(name).and_then(Option::as_ref)
            }
            None => None,
        };
        normalize_with(title, byline)
    }

    pub(crate) fn cached_sources(&self) -> usize {
        self.bylines.len()
    }
}

fn normalize_with(title: &str, byline: Option<&Regex>) -> String {
    let mut text = title.nfkc().collect::<String>().to_lowercase();

    if let Some(byline) = byline {
        text = byline.replace(&text, "").into_owned();
    }

    let text = NON_WORD_RE.replace_all(&text, " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Build the trailing-byline pattern for a source name, or `None` when the
/// name has nothing left to match after punctuation is stripped.
fn byline_pattern(source: &str) -> Option<Regex> {
    let name: String = source
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    if name.trim().is_empty() {
        return None;
    }

    Regex::new(&format!(r"\s*(?:\||-|—|–)\s*{}$", regex::escape(&name))).ok()
}
