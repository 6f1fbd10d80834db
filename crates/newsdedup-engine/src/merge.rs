//! The "better of two" rule used to resolve every duplicate pair.

use newsdedup_core::Article;

use crate::canonical::canonicalize_url;

/// Precomputed ranking inputs for one article.
#[derive(Debug, Clone)]
pub(crate) struct MergeKey {
    pub(crate) published_ms: i64,
    pub(crate) completeness: u8,
    pub(crate) canonical_url: Option<String>,
}

impl MergeKey {
    pub(crate) fn of(article: &Article) -> Self {
        Self {
            published_ms: article.published_millis(),
            completeness: article.completeness(),
            canonical_url: canonicalize_url(article.link()),
        }
    }
}

/// Whether `b` should replace `a`.
///
/// Later publication wins, then higher completeness, then the shorter
/// canonical URL when both have one and they differ. Anything else keeps `a`.
pub(crate) fn prefers_second(a: &MergeKey, b: &MergeKey) -> bool {
    if a.published_ms != b.published_ms {
        return b.published_ms > a.published_ms;
    }
    if a.completeness != b.completeness {
        return b.completeness > a.completeness;
    }
    match (&a.canonical_url, &b.canonical_url) {
        (Some(a_url), Some(b_url)) if a_url != b_url => b_url.len() < a_url.len(),
        _ => false,
    }
}

/// Pick the record to keep out of two duplicates.
///
/// Returns one of the two inputs unchanged; on a full tie the first argument
/// is kept so the earlier record in a batch survives.
#[must_use]
pub fn choose_better<'a>(a: &'a Article, b: &'a Article) -> &'a Article {
    if prefers_second(&MergeKey::of(a), &MergeKey::of(b)) {
        b
    } else {
        a
    }
}
