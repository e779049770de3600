//! The scanner's single error kind.

use crate::mark::Mark;

/// An error that occurred while scanning.
///
/// This is the only error kind the scanner ever produces. Scanning is
/// non-recoverable: the first `SyntaxError` encountered poisons the
/// scanner and no further tokens are produced.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{message} at line {} column {}", mark.line() + 1, mark.column() + 1)]
pub struct SyntaxError {
    mark: Mark,
    message: String,
}

impl SyntaxError {
    /// Create a new error from a location and a message.
    pub(crate) fn new(mark: Mark, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            mark,
            message: message.into(),
        }
    }

    /// Return the marker pointing to the error in the source.
    #[must_use]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Return the human-readable message describing the error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

pub(crate) type ScanResult<T = ()> = Result<T, SyntaxError>;
