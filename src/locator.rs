//! Caller locator.
//!
//! The entry points are `#[track_caller]`, so `Location::caller()` reports
//! the frame that invoked them. rustc honours `track_caller` regardless of
//! inlining; the reported line is exact for direct calls.
//!
//! The reported file name is the path rustc was given, usually relative to
//! the workspace root (`tests/debug_test.rs`, `crates/foo/src/lib.rs`). It
//! is resolved against configured roots, then the working directory and its
//! ancestors.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::panic::Location;
use std::path::{Path, PathBuf};

/// File and position of the code that called the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerLocation {
    /// File as reported by the compiler
    pub file: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl CallerLocation {
    /// Location of whoever called the current `#[track_caller]` chain.
    #[track_caller]
    pub fn capture() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&Location<'_>> for CallerLocation {
    fn from(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
        }
    }
}

/// Find the caller's file on disk.
///
/// Fails with [`Error::CallerUnavailable`] when the location carries no file
/// or line, and with [`Error::SourceParseFailure`] when no candidate path
/// exists.
pub fn resolve_source_path(caller: &CallerLocation, roots: &[PathBuf]) -> Result<PathBuf> {
    if caller.file.is_empty() || caller.line == 0 {
        return Err(Error::caller_unavailable(
            "no source location was recorded for the caller",
        ));
    }

    let cwd = std::env::current_dir().ok();
    let file = Path::new(&caller.file);
    candidate_paths(file, roots, cwd.as_deref())
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            Error::source_parse(&caller.file, "cannot read file: not found on disk")
        })
}

/// Paths tried for `file`, in order.
pub fn candidate_paths(file: &Path, roots: &[PathBuf], cwd: Option<&Path>) -> Vec<PathBuf> {
    if file.is_absolute() {
        return vec![file.to_path_buf()];
    }

    let mut candidates: Vec<PathBuf> = roots.iter().map(|root| root.join(file)).collect();
    match cwd {
        Some(cwd) => candidates.extend(cwd.ancestors().map(|dir| dir.join(file))),
        None => candidates.push(file.to_path_buf()),
    }
    candidates
}
