//! Call site finder.
//!
//! Walks a parsed file in pre-order, depth-first order looking for a call to
//! the entry point whose callee starts on the caller's line. The first such
//! call wins. Callees are matched by name only:
//!
//! - `debug_here::debug(x)` / `::debug_here::debug(x)`
//! - `debug(x)` (imported, or inside the defining crate)
//! - `<receiver>.debug(x)` / `<receiver>.observe(x)` (the
//!   [`Debugger`](crate::Debugger) methods)
//!
//! Only calls with exactly one argument are candidates. Macro invocations are
//! searched too when their tokens parse as an expression list or as
//! statements, which covers `println!`, `assert_eq!`, `vec!` and friends.

use crate::common::{span_start, SourceLocation};
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::locator::CallerLocation;
use crate::parsing::ParsedSource;
use std::borrow::Cow;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Expr, ExprCall, ExprMethodCall, Item, Macro, Stmt, Token};

/// The matched call: where its callee starts and its single argument.
///
/// The argument borrows from the syntax tree. Arguments recovered from macro
/// tokens are re-parsed and therefore owned.
#[derive(Debug, Clone)]
pub struct CallSiteMatch<'ast> {
    pub location: SourceLocation,
    pub argument: Cow<'ast, Expr>,
}

impl CallSiteMatch<'_> {
    pub fn into_owned(self) -> CallSiteMatch<'static> {
        CallSiteMatch {
            location: self.location,
            argument: Cow::Owned(self.argument.into_owned()),
        }
    }
}

/// Find the call that produced `caller` in `parsed`.
pub fn find_call_site<'ast>(
    parsed: &'ast ParsedSource,
    caller: &CallerLocation,
    config: &Config,
) -> Result<CallSiteMatch<'ast>> {
    let line = caller.line as usize;
    let column = config
        .prefer_caller_column
        .then_some(caller.column as usize);

    find_in_file(&parsed.file, &caller.file, line, column, config)
        .ok_or_else(|| Error::call_site_not_found(&parsed.path, line))
}

/// Search `file` for a call on `line`.
///
/// `file_label` is the file name recorded in the match location. With a
/// `column`, a candidate at exactly that column beats earlier candidates on
/// the same line.
pub fn find_in_file<'ast>(
    file: &'ast syn::File,
    file_label: &str,
    line: usize,
    column: Option<usize>,
    config: &Config,
) -> Option<CallSiteMatch<'ast>> {
    let mut finder = CallSiteFinder::new(file_label, line, column, config);
    finder.visit_file(file);
    finder.into_match()
}

struct CallSiteFinder<'ast, 'c> {
    file_label: &'c str,
    line: usize,
    column: Option<usize>,
    config: &'c Config,
    first: Option<CallSiteMatch<'ast>>,
    exact: Option<CallSiteMatch<'ast>>,
}

impl<'ast, 'c> CallSiteFinder<'ast, 'c> {
    fn new(file_label: &'c str, line: usize, column: Option<usize>, config: &'c Config) -> Self {
        Self {
            file_label,
            line,
            column,
            config,
            first: None,
            exact: None,
        }
    }

    fn done(&self) -> bool {
        self.exact.is_some() || (self.column.is_none() && self.first.is_some())
    }

    fn into_match(self) -> Option<CallSiteMatch<'ast>> {
        self.exact.or(self.first)
    }

    fn record(&mut self, found: CallSiteMatch<'ast>) {
        if self.column == Some(found.location.column) {
            self.exact = Some(found);
        } else if self.first.is_none() {
            self.first = Some(found);
        }
    }

    fn on_target_line<T: Spanned>(&self, callee: &T) -> bool {
        span_start(callee.span()).0 == self.line
    }

    fn is_entry_path(&self, path: &syn::Path) -> bool {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect();
        match segments.as_slice() {
            [name] => *name == self.config.entry_point,
            [namespace, name] => {
                *namespace == self.config.namespace && *name == self.config.entry_point
            }
            _ => false,
        }
    }

    fn check_call(&mut self, call: &'ast ExprCall) {
        let Expr::Path(callee) = &*call.func else {
            return;
        };
        if callee.qself.is_some() || !self.is_entry_path(&callee.path) {
            return;
        }
        if !self.on_target_line(&call.func) || call.args.len() != 1 {
            return;
        }
        if let Some(argument) = call.args.first() {
            tracing::debug!(line = self.line, "matched path call to entry point");
            self.record(CallSiteMatch {
                location: SourceLocation::of(self.file_label, &call.func),
                argument: Cow::Borrowed(argument),
            });
        }
    }

    fn check_method_call(&mut self, call: &'ast ExprMethodCall) {
        if !self.config.methods.iter().any(|m| call.method == m.as_str()) {
            return;
        }
        if !self.on_target_line(&call.method) || call.args.len() != 1 {
            return;
        }
        if let Some(argument) = call.args.first() {
            tracing::debug!(line = self.line, "matched method call to entry point");
            self.record(CallSiteMatch {
                location: SourceLocation::of(self.file_label, &call.method),
                argument: Cow::Borrowed(argument),
            });
        }
    }

    fn nested<'m>(&self) -> CallSiteFinder<'m, 'c> {
        CallSiteFinder::new(self.file_label, self.line, self.column, self.config)
    }

    /// Search the tokens of a macro invocation.
    ///
    /// The re-parsed nodes only live for this call, so matches are made owned
    /// before they are recorded.
    fn search_macro(&mut self, mac: &Macro) {
        let (exact, first) =
            if let Ok(exprs) = mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
            {
                let mut inner = self.nested();
                for expr in &exprs {
                    inner.visit_expr(expr);
                }
                inner.into_owned_parts()
            } else if let Ok(stmts) = mac.parse_body_with(syn::Block::parse_within) {
                let mut inner = self.nested();
                for stmt in &stmts {
                    inner.visit_stmt(stmt);
                }
                inner.into_owned_parts()
            } else {
                return;
            };

        // Candidates from the macro come after anything already recorded in
        // pre-order, so only an empty slot is filled.
        if self.exact.is_none() {
            self.exact = exact;
        }
        if self.first.is_none() {
            self.first = first;
        }
    }

    fn into_owned_parts(
        self,
    ) -> (
        Option<CallSiteMatch<'static>>,
        Option<CallSiteMatch<'static>>,
    ) {
        (
            self.exact.map(CallSiteMatch::into_owned),
            self.first.map(CallSiteMatch::into_owned),
        )
    }
}

impl<'ast> Visit<'ast> for CallSiteFinder<'ast, '_> {
    fn visit_item(&mut self, item: &'ast Item) {
        if self.done() {
            return;
        }
        let span = item.span();
        if span.start().line > self.line || span.end().line < self.line {
            return;
        }
        visit::visit_item(self, item);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        if self.done() {
            return;
        }
        visit::visit_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if self.done() {
            return;
        }
        match expr {
            Expr::Call(call) => self.check_call(call),
            Expr::MethodCall(call) => self.check_method_call(call),
            _ => {}
        }
        if self.done() {
            return;
        }
        visit::visit_expr(self, expr);
    }

    fn visit_macro(&mut self, mac: &'ast Macro) {
        if self.done() {
            return;
        }
        self.search_macro(mac);
    }
}
