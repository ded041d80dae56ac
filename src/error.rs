//! Error handling for Dst bulletin extraction.
//!
//! Every failure aborts the whole extraction: there are no partial results
//! and no skipped lines.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DstError {
    #[error("Source '{name}' is not readable: {source}")]
    NotReadable {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("line {line} not valid: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

impl DstError {
    /// Create a not-readable error for the named source
    pub fn not_readable(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::NotReadable {
            name: name.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a malformed record error for a 1-based line number
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Line number of the offending record, if this is a record error
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DstError>;
