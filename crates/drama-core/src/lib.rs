//! Shared domain types, configuration, and the listing-source seam for autodrama.

pub mod app_config;
pub mod config;
pub mod source;
pub mod types;

pub use app_config::{AppConfig, Preset, RedditCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use source::ListingSource;
pub use types::{Comment, ParentRef, Submission, TimeWindow};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid parent id: {0}")]
    InvalidParentId(String),

    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
