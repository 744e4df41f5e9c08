// Error type for the uploader. Every failure is terminal: `main` prints
// it and exits with the code returned by `PushError::exit_code`. The codes
// are part of the command-line interface.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PushError>;

#[derive(Debug, Error)]
pub enum PushError {
    /// Wrong number of command-line arguments.
    #[error("usage: test-push <test-dir>")]
    Usage,

    #[error("cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `Temps` value without a recognized unit suffix.
    #[error("'Temps' format not implemented: '{0}'")]
    DurationFormat(String),

    #[error("cannot parse int16 for 'Temps': '{0}'")]
    DurationValue(String),

    /// A line that does not split into exactly two `;` separated parts.
    #[error("{file} has a line with != 2 parts: '{line}'")]
    MalformedLine { file: &'static str, line: String },

    #[error("'{field}' should be an integer (it's '{value}')")]
    IntegerField { field: &'static str, value: String },

    #[error("expected index '{expected}' in solutions.csv (got '{found}')")]
    IndexMismatch { expected: usize, found: String },

    #[error("cannot encode '{part}' form part: {reason}")]
    FormEncoding { part: &'static str, reason: String },

    #[error("cannot make request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("cannot perform http request: {0}")]
    Http(#[source] reqwest::Error),

    #[error("cannot read response body: {0}")]
    ResponseBody(#[source] reqwest::Error),
}

impl PushError {
    /// Process exit code for this failure category.
    pub fn exit_code(&self) -> u8 {
        match self {
            PushError::Usage => 1,
            PushError::Open { .. } => 2,
            PushError::Read { .. } => 3,
            PushError::DurationFormat(_) => 4,
            PushError::DurationValue(_) => 5,
            PushError::MalformedLine { .. } => 6,
            PushError::IntegerField { .. } | PushError::IndexMismatch { .. } => 7,
            PushError::FormEncoding { .. } => 8,
            PushError::Request(_) => 11,
            PushError::Http(_) => 12,
            PushError::ResponseBody(_) => 13,
        }
    }
}
