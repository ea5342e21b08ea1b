//! Centralized error handling for the publisher.
//!
//! Every stage of the run (query, transform, publish) reports failures through
//! [`PublisherError`]. Nothing in the pipeline recovers from an error locally:
//! the binary prints the message and exits with a non-zero code.
//!
//! ## Categories
//!
//! ```
//! use qafiyah_publisher::error::PublisherError;
//!
//! fn describe(err: &PublisherError) -> &'static str {
//!     match err {
//!         PublisherError::DataSource(_) => "database",
//!         PublisherError::Precondition(_) => "missing credential",
//!         PublisherError::Publish(_) => "dataset upload",
//!         PublisherError::CardUpload { .. } => "card upload",
//!         _ => "other",
//!     }
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` to any `Result` whose error converts into
//! [`PublisherError`]. Unlike a stringly `anyhow` context, the category of the
//! error is kept, only the message gets the prefix:
//!
//! ```no_run
//! use qafiyah_publisher::error::{Result, ResultExt as _};
//!
//! fn read_card(path: &str) -> Result<Vec<u8>> {
//!     std::fs::read(path).context("Failed to read dataset card")
//! }
//! ```

use std::fmt;

/// Main error type for publisher operations.
#[derive(Debug)]
pub enum PublisherError {
    /// Connection or query failure against the relational store.
    DataSource(String),

    /// A required input is missing (the hub credential outside preview mode).
    Precondition(String),

    /// The primary dataset upload failed. The remote dataset was not replaced.
    Publish(String),

    /// The dataset card upload failed after the dataset itself was published.
    CardUpload { repo_id: String, message: String },

    /// Columnar conversion or Parquet serialization failed.
    DataProcessing(String),

    /// Configuration file or connection string could not be used.
    Config(String),

    /// I/O errors (card file, config file)
    Io(std::io::Error),
}

impl PublisherError {
    /// Build the error reported when no hub token is available.
    pub fn missing_token() -> Self {
        Self::Precondition(
            "HF_TOKEN environment variable is required.\n\
             Set it in .env file or export it in your shell.\n\n\
             To get a token, visit: https://huggingface.co/settings/tokens"
                .to_owned(),
        )
    }

    /// Whether the primary dataset reached the hub before this error happened.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::CardUpload { .. })
    }

    fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Self::DataSource(msg) => Self::DataSource(format!("{prefix}: {msg}")),
            Self::Precondition(msg) => Self::Precondition(format!("{prefix}: {msg}")),
            Self::Publish(msg) => Self::Publish(format!("{prefix}: {msg}")),
            Self::CardUpload { repo_id, message } => Self::CardUpload {
                repo_id,
                message: format!("{prefix}: {message}"),
            },
            Self::DataProcessing(msg) => Self::DataProcessing(format!("{prefix}: {msg}")),
            Self::Config(msg) => Self::Config(format!("{prefix}: {msg}")),
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), format!("{prefix}: {e}"))),
        }
    }
}

impl fmt::Display for PublisherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataSource(msg) => write!(f, "Database error: {msg}"),
            Self::Precondition(msg) => write!(f, "{msg}"),
            Self::Publish(msg) => write!(f, "Dataset upload failed: {msg}"),
            Self::CardUpload { repo_id, message } => write!(
                f,
                "Dataset {repo_id} was published, but the dataset card upload failed: {message}"
            ),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for PublisherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PublisherError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for PublisherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for PublisherError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<sqlx::Error> for PublisherError {
    fn from(err: sqlx::Error) -> Self {
        Self::DataSource(err.to_string())
    }
}

impl From<reqwest::Error> for PublisherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Publish(err.to_string())
    }
}

/// Result type alias for publisher operations.
pub type Result<T> = std::result::Result<T, PublisherError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PublisherError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_prefix(&msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_prefix(&f()))
    }
}
