//! Centralized error handling for the bikeshare explorer.
//!
//! Every fallible library operation returns [`Result`], whose error type is
//! [`ExplorerError`]. The session loop matches on the variants to decide
//! whether a failure sends the user back to the prompts, is reported and
//! skipped, or ends the session.
//!
//! ```
//! use bikeshare::error::ExplorerError;
//!
//! fn describe(err: &ExplorerError) -> &'static str {
//!     match err {
//!         ExplorerError::Parse(_) => "bad timestamp in the dataset",
//!         ExplorerError::Precondition(_) => "column has the wrong type",
//!         ExplorerError::Aborted => "input closed",
//!         _ => "other failure",
//!     }
//! }
//! # assert_eq!(describe(&ExplorerError::Aborted), "input closed");
//! ```
//!
//! The [`ResultExt`] trait adds `.context()` to any result whose error converts
//! into [`ExplorerError`]:
//!
//! ```no_run
//! use bikeshare::error::ResultExt as _;
//!
//! fn read_settings() -> bikeshare::error::Result<String> {
//!     std::fs::read_to_string("config.json").context("Failed to read settings")
//! }
//! ```

use std::fmt;

/// Main error type for bikeshare operations.
#[derive(Debug)]
pub enum ExplorerError {
    /// I/O errors (terminal, files)
    Io(std::io::Error),

    /// Tabular engine errors (Polars)
    DataProcessing(String),

    /// Settings file errors
    Config(String),

    /// Dataset file not found
    InvalidPath(String),

    /// City name outside the supported set
    InvalidCity(String),

    /// Month that is neither `all` nor an English month name or abbreviation
    InvalidMonth(String),

    /// Day that is neither `all` nor an English weekday name or abbreviation
    InvalidDay(String),

    /// Malformed timestamp in a dataset
    Parse(String),

    /// A statistic's required column is missing or has the wrong type
    Precondition(String),

    /// A column had no values to aggregate
    EmptyColumn(String),

    /// Input stream closed
    Aborted,

    /// Generic error with context
    Other(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::InvalidCity(city) => write!(f, "Unsupported city: {city:?}"),
            Self::InvalidMonth(month) => write!(f, "Unrecognised month: {month:?}"),
            Self::InvalidDay(day) => write!(f, "Unrecognised day: {day:?}"),
            Self::Parse(msg) => write!(f, "Timestamp parse error: {msg}"),
            Self::Precondition(msg) => write!(f, "Precondition violated: {msg}"),
            Self::EmptyColumn(column) => write!(f, "No values to aggregate in column '{column}'"),
            Self::Aborted => write!(f, "Input closed by user"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for ExplorerError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for ExplorerError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for bikeshare operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

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
    E: Into<ExplorerError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: ExplorerError = e.into();
            ExplorerError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: ExplorerError = e.into();
            ExplorerError::Other(format!("{}: {}", f(), err))
        })
    }
}
