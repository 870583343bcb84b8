//! Centralized error handling for the bikeshare explorer.
//!
//! Invalid interactive input never reaches this module: the prompts recover
//! from it locally by asking again. Everything here is either fatal (a
//! dataset that cannot be read or does not have the expected shape) or the
//! user closing standard input.
//!
//! ## Custom Error Type
//!
//! ```
//! use bikeshare::error::BikeshareError;
//!
//! fn describe(err: &BikeshareError) -> &'static str {
//!     match err {
//!         BikeshareError::Io(_) => "i/o",
//!         BikeshareError::MissingColumn(_) => "schema",
//!         BikeshareError::Aborted => "closed",
//!         _ => "other",
//!     }
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! `ResultExt` adds `.context()` to any `Result` whose error converts into
//! [`BikeshareError`]:
//!
//! ```no_run
//! use bikeshare::error::ResultExt as _;
//!
//! fn read_dataset() -> bikeshare::error::Result<String> {
//!     std::fs::read_to_string("chicago.csv").context("Failed to read dataset")
//! }
//! ```

use std::fmt;

/// Main error type for bikeshare operations.
#[derive(Debug)]
pub enum BikeshareError {
    /// I/O errors (dataset files, terminal reads and writes)
    Io(std::io::Error),

    /// Data processing errors raised by Polars
    DataProcessing(String),

    /// A required column is absent from a dataset
    MissingColumn(String),

    /// A Start Time cell that could not be parsed as a timestamp
    MalformedTimestamp { row: usize, value: String },

    /// A categorical column with fewer distinct values than a report needs
    InsufficientCategories {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Configuration errors
    Config(String),

    /// Standard input was closed while waiting for an answer
    Aborted,

    /// Generic error with context
    Other(String),
}

impl fmt::Display for BikeshareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::MissingColumn(name) => write!(f, "Missing required column: {name}"),
            Self::MalformedTimestamp { row, value } => {
                write!(f, "Malformed timestamp at row {row}: '{value}'")
            }
            Self::InsufficientCategories {
                column,
                expected,
                found,
            } => write!(
                f,
                "Column '{column}' needs at least {expected} categories, found {found}"
            ),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Aborted => write!(f, "Input closed by user"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for BikeshareError {}

impl From<std::io::Error> for BikeshareError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for BikeshareError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for BikeshareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for BikeshareError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for bikeshare operations.
pub type Result<T> = std::result::Result<T, BikeshareError>;

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
    E: Into<BikeshareError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: BikeshareError = e.into();
            BikeshareError::Other(format!("{}: {}", f(), err))
        })
    }
}
