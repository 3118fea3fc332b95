//! Expression renderer.
//!
//! The label printed for a value is the argument exactly as written: the
//! slice of the original source covered by the argument's span. Arguments
//! spanning several lines are folded onto one line. If the span does not map
//! back into the source, the token stream rendering is used instead.

use crate::common::{span_end, span_start};
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::Expr;

/// Source text of `expr`, folded onto a single line.
pub fn render_expression(source: &str, expr: &Expr) -> String {
    match source_slice(source, expr.span()) {
        Some(text) => fold_lines(text),
        None => {
            tracing::debug!("argument span outside source text, rendering tokens");
            expr.to_token_stream().to_string()
        }
    }
}

/// Text covered by `span` in `source`.
pub fn source_slice(source: &str, span: proc_macro2::Span) -> Option<&str> {
    let (start_line, start_col) = span_start(span);
    let (end_line, end_col) = span_end(span);
    if start_line == 0 || (end_line, end_col) <= (start_line, start_col) {
        return None;
    }

    let start = byte_offset(source, start_line, start_col)?;
    let end = byte_offset(source, end_line, end_col)?;
    source.get(start..end)
}

/// Byte offset of a (1-based line, 0-based char column) position.
fn byte_offset(source: &str, line: usize, column: usize) -> Option<usize> {
    let mut line_start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let text = text.strip_suffix('\n').unwrap_or(text);
            return match text.char_indices().nth(column) {
                Some((offset, _)) => Some(line_start + offset),
                None if text.chars().count() == column => Some(line_start + text.len()),
                None => None,
            };
        }
        line_start += text.len();
    }
    None
}

fn fold_lines(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
