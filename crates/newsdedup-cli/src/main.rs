mod dedupe;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::dedupe::DedupeArgs;

#[derive(Debug, Parser)]
#[command(name = "newsdedup")]
#[command(about = "Collapse duplicate news articles in a JSON batch")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Deduplicate a batch of articles
    Dedupe(DedupeArgs),
    /// Print the canonical dedup key for a URL
    Canonicalize {
        /// Raw source link
        url: String,
    },
    /// Print the normalized title key for a headline
    TitleKey {
        /// Headline as published
        title: String,

        /// Feed display name whose trailing byline should be stripped
        #[arg(long)]
        source: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = newsdedup_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Dedupe(args)) => dedupe::run_dedupe(&config, &args)?,
        Some(Commands::Canonicalize { url }) => {
            let key = newsdedup_engine::canonicalize_url(Some(&url));
            println!("{}", serde_json::to_string(&key)?);
        }
        Some(Commands::TitleKey { title, source }) => {
            println!(
                "{}",
                newsdedup_engine::normalize_title(&title, source.as_deref())
            );
        }
        None => println!("newsdedup: run `newsdedup --help` for usage"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
