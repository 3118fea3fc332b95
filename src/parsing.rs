//! Reading and parsing the caller's source file.
//!
//! Every invocation parses its file from scratch: the file may have changed
//! since the last call, and nothing is cached between calls.
//!
//! ## Span table
//!
//! With proc-macro2's `span-locations` feature, every parse appends the file
//! to a per-thread table that spans index into. The table can only be
//! cleared as a whole, which would also invalidate spans the host program
//! holds, so callers parse on a short-lived thread instead and let the table
//! go away with it (see [`Debugger`](crate::Debugger)).

use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed source file. Rebuilt on every invocation.
pub struct ParsedSource {
    pub path: PathBuf,
    pub content: String,
    pub file: syn::File,
}

/// Read `path` and parse it as a Rust source file.
pub fn parse_source(path: &Path) -> Result<ParsedSource> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::source_parse(path, format!("cannot read file: {e}")))?;
    parse_content(path, content)
}

/// Parse already-loaded source text.
pub fn parse_content(path: impl Into<PathBuf>, content: String) -> Result<ParsedSource> {
    let path = path.into();
    match syn::parse_file(&content) {
        Ok(file) => Ok(ParsedSource {
            path,
            content,
            file,
        }),
        Err(e) => {
            let start = e.span().start();
            let message = format!("{} at {}:{}", e, start.line, start.column + 1);
            Err(Error::source_parse(path, message))
        }
    }
}
