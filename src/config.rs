//! Programmatic configuration.
//!
//! There are no config files, flags or environment variables: a [`Config`]
//! is built in code and handed to a [`Debugger`](crate::Debugger). The
//! default matches the free [`debug`](crate::debug) function.

use std::path::PathBuf;

/// Crate name callers use to reach the entry point.
pub const DEFAULT_NAMESPACE: &str = "debug_here";
/// Name of the entry point function.
pub const DEFAULT_ENTRY_POINT: &str = "debug";
/// Methods accepted in `<receiver>.name(x)` form.
pub const DEFAULT_METHODS: [&str; 2] = ["debug", "observe"];

/// Settings for locating call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path prefix accepted before the entry point name, e.g. `debug_here`
    pub namespace: String,
    /// Entry point name, e.g. `debug`
    pub entry_point: String,
    /// Method names matched in `<receiver>.name(x)` form
    pub methods: Vec<String>,
    /// Extra directories tried before the working directory when resolving
    /// the caller's file
    pub source_roots: Vec<PathBuf>,
    /// Prefer a candidate whose callee column equals the caller column over
    /// an earlier candidate on the same line
    pub prefer_caller_column: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            methods: DEFAULT_METHODS.iter().map(|m| m.to_string()).collect(),
            source_roots: Vec::new(),
            prefer_caller_column: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match calls made through another path or a renamed import.
    #[must_use]
    pub fn with_entry_point(
        mut self,
        namespace: impl Into<String>,
        entry_point: impl Into<String>,
    ) -> Self {
        self.namespace = namespace.into();
        self.entry_point = entry_point.into();
        self
    }

    /// Replace the method names matched in `<receiver>.name(x)` form.
    #[must_use]
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Add a directory against which crate-relative file names are resolved.
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_roots.push(root.into());
        self
    }

    #[must_use]
    pub fn with_prefer_caller_column(mut self, prefer: bool) -> Self {
        self.prefer_caller_column = prefer;
        self
    }
}
