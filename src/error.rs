//! Load outcomes and error types
//!
//! A store reports structural problems with its source exactly once, as a
//! [`ParseOutcome`] recorded at construction. Lookups never fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Terminal status of a scan, recorded once per constructed store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParseOutcome {
    /// Every line was recognized
    #[default]
    Success,
    /// The scanner rejected the content at `line` (1-based)
    SyntaxError { line: usize },
    /// The source could not be opened or read
    OpenError,
}

impl ParseOutcome {
    /// Returns true when the scan completed without errors
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the first offending line for a syntax error
    pub fn error_line(&self) -> Option<usize> {
        match *self {
            Self::SyntaxError { line } => Some(line),
            Self::Success | Self::OpenError => None,
        }
    }

    /// Integer form used by the classic reader: `0` on success, the line
    /// number of the first error, or `-1` when the file could not be opened.
    pub fn code(&self) -> i64 {
        match *self {
            Self::Success => 0,
            Self::SyntaxError { line } => i64::try_from(line).unwrap_or(i64::MAX),
            Self::OpenError => -1,
        }
    }

    /// Converts the outcome into a `Result` so callers can use `?`
    pub fn into_result(self) -> Result<(), LoadError> {
        match self {
            Self::Success => Ok(()),
            Self::SyntaxError { line } => Err(LoadError::Syntax { line }),
            Self::OpenError => Err(LoadError::Open),
        }
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.into_result() {
            Ok(()) => f.write_str("success"),
            Err(err) => write!(f, "{err}"),
        }
    }
}

/// Error form of a failed [`ParseOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source could not be opened or read
    #[error("unable to open file")]
    Open,

    /// The scanner rejected a line
    #[error("parse error on line {line}")]
    Syntax { line: usize },
}
