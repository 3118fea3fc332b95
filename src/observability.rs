//! Stage tracking for tracing spans and diagnostics.
//!
//! Every invocation of the entry point walks the same four stages. Each one
//! runs inside its own `tracing` span so a subscriber installed by the host
//! program (or a test) can see where an invocation stopped.

use std::fmt;
use tracing::Span;

/// Stages of a single debug invocation, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Capturing the caller's file and line
    Locate,
    /// Reading and parsing the caller's source file
    Parse,
    /// Searching the syntax tree for the matching call expression
    Find,
    /// Rendering the expression text and the value, then writing the line
    Render,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 4] = [Stage::Locate, Stage::Parse, Stage::Find, Stage::Render];

    /// Span name used for this stage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locate => "locate",
            Self::Parse => "parse",
            Self::Find => "find_call_site",
            Self::Render => "render",
        }
    }

    /// Open a debug-level span for this stage.
    pub fn span(&self, file: &str, line: u32) -> Span {
        match self {
            Self::Locate => tracing::debug_span!("locate", file, line),
            Self::Parse => tracing::debug_span!("parse", file, line),
            Self::Find => tracing::debug_span!("find_call_site", file, line),
            Self::Render => tracing::debug_span!("render", file, line),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
