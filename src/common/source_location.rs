use serde::{Deserialize, Serialize};
use std::fmt;
use syn::spanned::Spanned;

/// A position in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location of the first token of a syn node.
    ///
    /// proc-macro2 reports 0-based columns; they are shifted to 1-based here.
    pub fn of<T: Spanned>(file: impl Into<String>, node: &T) -> Self {
        let (line, column) = span_start(node.span());
        Self::new(file, line, column + 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Start of a span as (1-based line, 0-based column in chars)
pub fn span_start(span: proc_macro2::Span) -> (usize, usize) {
    let start = span.start();
    (start.line, start.column)
}

/// End of a span as (1-based line, 0-based column in chars), exclusive
pub fn span_end(span: proc_macro2::Span) -> (usize, usize) {
    let end = span.end();
    (end.line, end.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_of_node() {
        let expr: syn::Expr = syn::parse_str("foo(1)").unwrap();
        let loc = SourceLocation::of("a.rs", &expr);
        assert_eq!(loc, SourceLocation::new("a.rs", 1, 1));
        assert_eq!(loc.to_string(), "a.rs:1:1");
    }

    #[test]
    fn test_span_bounds_on_later_line() {
        let file = syn::parse_file("fn main() {\n    let x = 40 + 2;\n}\n").unwrap();
        let syn::Item::Fn(func) = &file.items[0] else {
            panic!("expected fn");
        };
        let syn::Stmt::Local(local) = &func.block.stmts[0] else {
            panic!("expected let");
        };
        let init = &local.init.as_ref().unwrap().expr;
        assert_eq!(span_start(init.span()), (2, 12));
        assert_eq!(span_end(init.span()), (2, 18));
    }
}
