//! `dedupe` command: read a batch, collapse duplicates, write the survivors.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use newsdedup_core::{AppConfig, DedupeOptions};
use newsdedup_engine::{dedupe_with_report, read_batch, write_batch, Article};

#[derive(Debug, Args)]
pub struct DedupeArgs {
    /// JSON batch to read (stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Where to write the deduplicated batch (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Title matching window in hours; overrides NEWSDEDUP_TITLE_WINDOW_HOURS
    #[arg(long)]
    pub window_hours: Option<f64>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,

    /// Print the run report as JSON on stderr
    #[arg(long)]
    pub report: bool,
}

impl DedupeArgs {
    pub(crate) fn options(&self, config: &AppConfig) -> DedupeOptions {
        self.window_hours
            .map_or_else(|| config.dedupe_options(), DedupeOptions::with_title_window_hours)
    }
}

/// Run the `dedupe` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, or the output
/// cannot be written.
pub(crate) fn run_dedupe(config: &AppConfig, args: &DedupeArgs) -> anyhow::Result<()> {
    let articles = load_articles(args.input.as_ref())?;
    let options = args.options(config);

    let (survivors, report) = dedupe_with_report(articles, &options);
    tracing::info!(
        input = report.input,
        output = report.output,
        url_duplicates = report.url_duplicates,
        title_duplicates = report.title_duplicates,
        ratio = report.ratio(),
        window_hours = options.title_window_hours,
        "deduplication complete"
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_batch(BufWriter::new(file), &survivors, args.pretty)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            write_batch(std::io::stdout().lock(), &survivors, args.pretty)
                .context("failed to write batch to stdout")?;
        }
    }

    if args.report {
        eprintln!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}

fn load_articles(input: Option<&PathBuf>) -> anyhow::Result<Vec<Article>> {
    match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            read_batch(BufReader::new(file))
                .with_context(|| format!("failed to decode {}", path.display()))
        }
        None => read_batch(std::io::stdin().lock()).context("failed to decode batch from stdin"),
    }
}
