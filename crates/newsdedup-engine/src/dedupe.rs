//! Two-stage batch deduplication.
//!
//! 1. Fold articles sharing a canonical URL into one record.
//! 2. Bucket the survivors by normalized title, then cluster each bucket by
//!    publication time so only same-titled articles within the window merge.
//!
//! Output order follows processing order: URL-keyed survivors in first-seen
//! order, then URL-less articles, regrouped by first appearance of their
//! title key. It is not sorted by time.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use newsdedup_core::{Article, DedupeOptions};
use serde::Serialize;

use crate::merge::{prefers_second, MergeKey};
use crate::title::TitleKeyer;

/// Counts from one deduplication run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupeReport {
    pub input: usize,
    pub after_url_merge: usize,
    pub output: usize,
    pub url_duplicates: usize,
    pub title_duplicates: usize,
}

impl DedupeReport {
    /// Records dropped as duplicates across both stages.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.input - self.output
    }

    /// Percentage of the input removed; `0.0` for an empty batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.input == 0 {
            0.0
        } else {
            self.removed() as f64 / self.input as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Url,
    Title,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Url => "url",
            Stage::Title => "title",
        }
    }
}

/// An article paired with its ranking inputs so they are computed once.
struct Candidate {
    article: Article,
    key: MergeKey,
}

impl Candidate {
    fn new(article: Article) -> Self {
        let key = MergeKey::of(&article);
        Self { article, key }
    }
}

/// Deduplicate a batch of articles.
///
/// Never fails: malformed links, dates and titles only weaken matching.
/// Every returned record is one of the inputs.
#[must_use]
pub fn dedupe(articles: Vec<Article>, options: &DedupeOptions) -> Vec<Article> {
    dedupe_with_report(articles, options).0
}

/// Same as [`dedupe`] but also reports how many records each stage removed.
#[must_use]
pub fn dedupe_with_report(
    articles: Vec<Article>,
    options: &DedupeOptions,
) -> (Vec<Article>, DedupeReport) {
    let input = articles.len();

    let stage1 = merge_by_url(articles);
    let after_url_merge = stage1.len();

    let survivors = merge_by_title(stage1, options.window_ms());
    let output = survivors.len();

    let report = DedupeReport {
        input,
        after_url_merge,
        output,
        url_duplicates: input - after_url_merge,
        title_duplicates: after_url_merge - output,
    };
    tracing::debug!(
        input = report.input,
        after_url_merge = report.after_url_merge,
        output = report.output,
        "dedupe complete"
    );

    (
        survivors.into_iter().map(|c| c.article).collect(),
        report,
    )
}

/// Fold articles by canonical URL. Keyed survivors come first in first-seen
/// order, followed by articles without a usable link in input order.
fn merge_by_url(articles: Vec<Article>) -> Vec<Candidate> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut keyed: Vec<Candidate> = Vec::new();
    let mut leftovers: Vec<Candidate> = Vec::new();

    for article in articles {
        let candidate = Candidate::new(article);
        let Some(url_key) = candidate.key.canonical_url.clone() else {
            leftovers.push(candidate);
            continue;
        };
        match slots.entry(url_key) {
            Entry::Occupied(slot) => merge_into(&mut keyed[*slot.get()], candidate, Stage::Url),
            Entry::Vacant(slot) => {
                slot.insert(keyed.len());
                keyed.push(candidate);
            }
        }
    }

    tracing::debug!(
        url_keyed = keyed.len(),
        leftovers = leftovers.len(),
        "url merge stage"
    );

    keyed.extend(leftovers);
    keyed
}

/// Bucket by normalized title and collapse each bucket within the window.
///
/// Articles with an empty title key form their own single-member bucket so
/// they pass through untouched.
fn merge_by_title(candidates: Vec<Candidate>, window_ms: u64) -> Vec<Candidate> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Vec<Candidate>> = Vec::new();
    let mut keyer = TitleKeyer::default();
    let mut untitled = 0_usize;

    for candidate in candidates {
        let title_key = keyer.key(&candidate.article.title, candidate.article.source_name());
        if title_key.is_empty() {
            untitled += 1;
            buckets.push(vec![candidate]);
            continue;
        }
        match slots.entry(title_key) {
            Entry::Occupied(slot) => buckets[*slot.get()].push(candidate),
            Entry::Vacant(slot) => {
                slot.insert(buckets.len());
                buckets.push(vec![candidate]);
            }
        }
    }

    tracing::debug!(
        title_buckets = slots.len(),
        untitled,
        sources = keyer.cached_sources(),
        "title merge stage"
    );

    buckets
        .into_iter()
        .flat_map(|bucket| cluster_bucket(bucket, window_ms))
        .collect()
}

/// Greedy windowed clustering over one title bucket.
///
/// The bucket is walked newest first; each article merges into the first kept
/// representative within `window_ms` of it (inclusive), or else becomes a new
/// representative.
fn cluster_bucket(mut bucket: Vec<Candidate>, window_ms: u64) -> Vec<Candidate> {
    if bucket.len() < 2 {
        return bucket;
    }

    bucket.sort_by(|a, b| b.key.published_ms.cmp(&a.key.published_ms));

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in bucket {
        let published_ms = candidate.key.published_ms;
        match kept
            .iter()
            .position(|rep| rep.key.published_ms.abs_diff(published_ms) <= window_ms)
        {
            Some(idx) => merge_into(&mut kept[idx], candidate, Stage::Title),
            None => kept.push(candidate),
        }
    }
    kept
}

/// Resolve a duplicate pair in place: the slot holds the winner afterwards.
fn merge_into(slot: &mut Candidate, challenger: Candidate, stage: Stage) {
    if prefers_second(&slot.key, &challenger.key) {
        tracing::trace!(
            stage = stage.as_str(),
            kept = %challenger.article.id,
            dropped = %slot.article.id,
            "merged duplicate"
        );
        *slot = challenger;
    } else {
        tracing::trace!(
            stage = stage.as_str(),
            kept = %slot.article.id,
            dropped = %challenger.article.id,
            "merged duplicate"
        );
    }
}
