//! Shared types and configuration for the news deduplication workspace.

pub mod app_config;
pub mod article;
pub mod config;
pub mod options;

pub use app_config::AppConfig;
pub use article::{Article, PublishedAt};
pub use config::{load_app_config, load_app_config_from_env};
pub use options::{DedupeOptions, DEFAULT_TITLE_WINDOW_HOURS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
