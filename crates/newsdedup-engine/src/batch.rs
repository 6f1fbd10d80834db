//! JSON batch reading and writing for callers that hand articles over as files.

use std::io::{Read, Write};

use newsdedup_core::Article;
use serde::Deserialize;

use crate::error::BatchError;

/// Accepted batch shapes: a bare array, or the news API envelope with the
/// articles under `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchEnvelope {
    Bare(Vec<Article>),
    Wrapped { data: Vec<Article> },
}

/// Decode a batch of articles from JSON.
///
/// # Errors
///
/// Returns [`BatchError`] if the reader fails or the document is neither an
/// article array nor an object with a `data` article array.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<Article>, BatchError> {
    let envelope: BatchEnvelope = serde_json::from_reader(reader)?;
    let articles = match envelope {
        BatchEnvelope::Bare(articles) | BatchEnvelope::Wrapped { data: articles } => articles,
    };
    tracing::debug!(count = articles.len(), "read article batch");
    Ok(articles)
}

/// Encode a batch of articles as a JSON array followed by a newline.
///
/// # Errors
///
/// Returns [`BatchError`] if serialization or the write fails.
pub fn write_batch<W: Write>(
    mut writer: W,
    articles: &[Article],
    pretty: bool,
) -> Result<(), BatchError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, articles)?;
    } else {
        serde_json::to_writer(&mut writer, articles)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
