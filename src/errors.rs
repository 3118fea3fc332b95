//! Error types for a single debug invocation.
//!
//! Every variant maps to the stage it originates from. None of them ever
//! escapes the entry point: the orchestrator turns each one into a single
//! `DEBUG: ` diagnostic line on the sink and returns.

use crate::observability::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for debug-here operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No file or line was recorded for the caller
    #[error("unable to determine caller: {reason}")]
    CallerUnavailable { reason: String },

    /// The caller's source file could not be found, read or parsed
    #[error("failed to parse {}: {message}", .path.display())]
    SourceParseFailure { path: PathBuf, message: String },

    /// No single-argument call to the entry point starts on the caller's line
    #[error("no call to the debug entry point found at {}:{line}", .path.display())]
    CallSiteNotFound { path: PathBuf, line: usize },

    /// Part of the value could not be rendered; a lossy rendering is used instead
    #[error("failed to format {type_name}: {reason}")]
    FormatFailure { type_name: String, reason: String },
}

impl Error {
    /// Create a caller-unavailable error
    pub fn caller_unavailable(reason: impl Into<String>) -> Self {
        Self::CallerUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a parse failure for a file
    pub fn source_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SourceParseFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a call-site-not-found error for a file and line
    pub fn call_site_not_found(path: impl Into<PathBuf>, line: usize) -> Self {
        Self::CallSiteNotFound {
            path: path.into(),
            line,
        }
    }

    /// Create a formatting failure for a type
    pub fn format_failure(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FormatFailure {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Stage this error originates from
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::CallerUnavailable { .. } => Stage::Locate,
            Self::SourceParseFailure { .. } => Stage::Parse,
            Self::CallSiteNotFound { .. } => Stage::Find,
            Self::FormatFailure { .. } => Stage::Render,
        }
    }

    /// Whether the invocation can still produce its output line.
    ///
    /// Only formatting failures have a fallback.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::FormatFailure { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::source_parse("src/lib.rs", "expected `;` at 3:7");
        assert_eq!(
            err.to_string(),
            "failed to parse src/lib.rs: expected `;` at 3:7"
        );

        let err = Error::call_site_not_found("tests/a.rs", 12);
        assert_eq!(
            err.to_string(),
            "no call to the debug entry point found at tests/a.rs:12"
        );

        let err = Error::caller_unavailable("no source file for src/main.rs");
        assert_eq!(
            err.to_string(),
            "unable to determine caller: no source file for src/main.rs"
        );
    }

    #[test]
    fn test_error_stage() {
        assert_eq!(Error::caller_unavailable("x").stage(), Stage::Locate);
        assert_eq!(Error::source_parse("a.rs", "x").stage(), Stage::Parse);
        assert_eq!(Error::call_site_not_found("a.rs", 1).stage(), Stage::Find);
        assert_eq!(Error::format_failure("T", "x").stage(), Stage::Render);
    }

    #[test]
    fn test_only_format_failure_is_recoverable() {
        assert!(Error::format_failure("RefCell<i32>", "mutably borrowed").is_recoverable());
        assert!(!Error::call_site_not_found("a.rs", 1).is_recoverable());
        assert!(!Error::source_parse("a.rs", "x").is_recoverable());
    }
}
