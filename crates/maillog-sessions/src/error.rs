use std::path::PathBuf;

use thiserror::Error;

/// A line that does not follow `<timestamp> <session_id> <key>=<value>`.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("expected 3 space-separated tokens in line '{line}'")]
    MalformedLine { line: String },

    #[error("should be key and value in '{fragment}'")]
    MalformedField { fragment: String },
}

#[derive(Error, Debug)]
pub enum DurationError {
    #[error("invalid timestamp '{timestamp}'")]
    TimestampParse {
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Failure while folding a log stream into sessions. The first one aborts the run.
///
/// The display text only locates the failure; the cause is the error source.
#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("Failed to open log file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line_number}")]
    Read {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line_number}")]
    Decode {
        line_number: usize,
        #[source]
        source: DecodeError,
    },

    #[error("line {line_number}")]
    Duration {
        line_number: usize,
        #[source]
        source: DurationError,
    },
}

impl AssembleError {
    /// 1-based line number the error occurred on, when there is one.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            AssembleError::Open { .. } => None,
            AssembleError::Read { line_number, .. }
            | AssembleError::Decode { line_number, .. }
            | AssembleError::Duration { line_number, .. } => Some(*line_number),
        }
    }
}
