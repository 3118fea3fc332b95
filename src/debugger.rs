//! Orchestrator: locate, parse, find, then render and emit.
//!
//! Each stage can fail; a failure ends the invocation after one diagnostic
//! line on the sink. Nothing is returned to the caller and nothing panics.
//!
//! Parsing, call-site search and expression rendering run on a scoped worker
//! thread. proc-macro2 keeps span locations in a per-thread table that grows
//! with every parse and cannot be trimmed without invalidating the host's own
//! spans; the worker's table is dropped when the thread exits. Only owned
//! results cross back, and the value itself is rendered on the calling
//! thread since it need not be `Send`.
//!
//! ```text
//! DEBUG: [tests/debug_test.rs:25:9] &tt.arg = 2
//! DEBUG: failed to parse src/broken.rs: expected `;` at 3:7
//! ```

use crate::call_site::find_call_site;
use crate::common::SourceLocation;
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::expression::render_expression;
use crate::inspect::{render, render_lossy, Inspect};
use crate::locator::{resolve_source_path, CallerLocation};
use crate::observability::Stage;
use crate::parsing::parse_source;
use serde::{Deserialize, Serialize};
use std::io::{self, Stderr, Write};
use std::path::Path;
use std::thread;
use tracing::{Dispatch, Span};

/// Prefix of every line written by the debugger.
pub const LINE_PREFIX: &str = "DEBUG: ";

/// Outcome of one successful observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Caller file and line, with the callee column from the syntax tree
    pub location: SourceLocation,
    /// Argument source text
    pub expression: String,
    /// Rendered value
    pub value: String,
}

impl Report {
    /// The output line, without the trailing newline.
    pub fn line(&self) -> String {
        format!(
            "{LINE_PREFIX}[{}] {} = {}",
            self.location, self.expression, self.value
        )
    }
}

/// Debug entry point with an explicit sink and configuration.
///
/// ```no_run
/// use debug_here::Debugger;
///
/// let mut debugger = Debugger::with_sink(Vec::new());
/// let answer = 6 * 7;
/// debugger.debug(&answer);
/// let output = String::from_utf8(debugger.into_sink()).unwrap();
/// ```
pub struct Debugger<W: Write> {
    sink: W,
    config: Config,
}

impl Debugger<Stderr> {
    /// Debugger writing to the process's standard error.
    pub fn stderr() -> Self {
        Self::with_sink(io::stderr())
    }
}

impl Default for Debugger<Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write> Debugger<W> {
    pub fn with_sink(sink: W) -> Self {
        Self {
            sink,
            config: Config::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Print the caller's location, the argument's source text and the
    /// rendered value as one line on the sink.
    #[track_caller]
    pub fn debug<T: Inspect + ?Sized>(&mut self, value: &T) {
        let caller = CallerLocation::capture();
        self.debug_from(&caller, value);
    }

    /// Write the line for an already captured caller location.
    pub fn debug_from<T: Inspect + ?Sized>(&mut self, caller: &CallerLocation, value: &T) {
        let line = self.line_for(caller, value);
        self.emit(&line);
    }

    /// Same as [`debug`](Self::debug) but returns the report instead of
    /// writing it.
    #[track_caller]
    pub fn observe<T: Inspect + ?Sized>(&self, value: &T) -> Result<Report> {
        let caller = CallerLocation::capture();
        self.observe_from(&caller, value)
    }

    /// Run every stage for an already captured caller location.
    pub fn observe_from<T: Inspect + ?Sized>(
        &self,
        caller: &CallerLocation,
        value: &T,
    ) -> Result<Report> {
        let path = {
            let _span = Stage::Locate.span(&caller.file, caller.line).entered();
            resolve_source_path(caller, &self.config.source_roots)?
        };

        let (location, expression) = analyze_on_worker(&path, caller, &self.config)?;

        let _span = Stage::Render.span(&caller.file, caller.line).entered();
        Ok(Report {
            location,
            expression,
            value: render_value(value),
        })
    }

    /// Output line for `caller`: the report, or the diagnostic of the stage
    /// that failed.
    fn line_for<T: Inspect + ?Sized>(&self, caller: &CallerLocation, value: &T) -> String {
        match self.observe_from(caller, value) {
            Ok(report) => report.line(),
            Err(err) => {
                tracing::warn!(stage = %err.stage(), error = %err, "debug invocation aborted");
                format!("{LINE_PREFIX}{err}")
            }
        }
    }

    fn emit(&mut self, line: &str) {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        if let Err(e) = self
            .sink
            .write_all(buf.as_bytes())
            .and_then(|()| self.sink.flush())
        {
            tracing::warn!(error = %e, "failed to write debug line");
        }
    }
}

/// Parse `path`, find the call and render its argument on a scoped thread.
///
/// The caller's tracing dispatcher and current span are carried over so the
/// stage spans nest as if they ran inline.
fn analyze_on_worker(
    path: &Path,
    caller: &CallerLocation,
    config: &Config,
) -> Result<(SourceLocation, String)> {
    let dispatch = tracing::dispatcher::get_default(Dispatch::clone);
    let parent = Span::current();

    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("debug-here-parse".to_string())
            .spawn_scoped(scope, move || {
                tracing::dispatcher::with_default(&dispatch, || {
                    parent.in_scope(|| analyze(path, caller, config))
                })
            })
            .map_err(|e| {
                Error::source_parse(path, format!("cannot start parser thread: {e}"))
            })?;

        worker
            .join()
            .unwrap_or_else(|_| Err(Error::source_parse(path, "parser thread panicked")))
    })
}

fn analyze(
    path: &Path,
    caller: &CallerLocation,
    config: &Config,
) -> Result<(SourceLocation, String)> {
    let parsed = {
        let _span = Stage::Parse.span(&caller.file, caller.line).entered();
        parse_source(path)?
    };

    let found = {
        let _span = Stage::Find.span(&caller.file, caller.line).entered();
        find_call_site(&parsed, caller, config)?
    };

    let _span = Stage::Render.span(&caller.file, caller.line).entered();
    let expression = render_expression(&parsed.content, &found.argument);
    Ok((found.location, expression))
}

/// Render a value, falling back to the lossy form when part of it cannot be
/// read.
pub fn render_value<T: Inspect + ?Sized>(value: &T) -> String {
    let shape = value.inspect();
    match render(&shape) {
        Ok(text) => text,
        Err(err) => {
            debug_assert!(err.is_recoverable());
            tracing::warn!(error = %err, "using lossy rendering");
            render_lossy(&shape)
        }
    }
}

/// Debug-print `value` to standard error.
///
/// Writes `DEBUG: [file:line:column] <expression> = <value>`, where
/// `<expression>` is the argument as written at the call site.
///
/// ```no_run
/// fn main() {
///     let scores = vec![3, 1, 4];
///     debug_here::debug(&scores);
///     // DEBUG: [src/main.rs:3:5] &scores = Vec<i32>{3, 1, 4}
/// }
/// ```
#[track_caller]
pub fn debug<T: Inspect + ?Sized>(value: &T) {
    Debugger::stderr().debug(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use syn::spanned::Spanned;

    fn output(debugger: Debugger<Vec<u8>>) -> String {
        String::from_utf8(debugger.into_sink()).unwrap()
    }

    #[test]
    fn test_report_line_format() {
        let report = Report {
            location: SourceLocation::new("src/main.rs", 4, 5),
            expression: "&x".into(),
            value: "2".into(),
        };
        assert_eq!(report.line(), "DEBUG: [src/main.rs:4:5] &x = 2");
    }

    #[test]
    fn test_debug_writes_one_line() {
        let mut debugger = Debugger::with_sink(Vec::new());
        let x = 40 + 2;
        let line = line!() + 1;
        debugger.debug(&x);
        assert_eq!(
            output(debugger),
            format!("DEBUG: [src/debugger.rs:{line}:18] &x = 42\n")
        );
    }

    #[test]
    fn test_observe_returns_report() {
        let debugger = Debugger::with_sink(io::sink());
        let line = line!() + 1;
        let report = debugger.observe("hi").unwrap();
        assert_eq!(report.location.line, line as usize);
        assert_eq!(report.expression, r#""hi""#);
        assert_eq!(report.value, r#""hi""#);
    }

    #[test]
    fn test_missing_caller_file_emits_diagnostic() {
        let mut debugger = Debugger::with_sink(Vec::new());
        let caller = CallerLocation {
            file: "src/missing_on_disk.rs".into(),
            line: 7,
            column: 1,
        };
        debugger.debug_from(&caller, &1);
        assert_eq!(
            output(debugger),
            "DEBUG: failed to parse src/missing_on_disk.rs: cannot read file: not found on disk\n"
        );
    }

    #[test]
    fn test_host_spans_stay_valid_after_debug() {
        let host = syn::parse_file("fn a() {}\n\nfn b() {}\n").unwrap();
        let mut debugger = Debugger::with_sink(io::sink());
        debugger.debug(&1);
        debugger.debug(&2);

        assert_eq!(host.items[1].span().start().line, 3);
    }

    #[test]
    fn test_format_failure_falls_back_to_lossy_rendering() {
        let cell = RefCell::new(5);
        let _borrow = cell.borrow_mut();
        assert_eq!(render_value(&cell), "RefCell<i32>{<mutably borrowed>}");
    }
}
