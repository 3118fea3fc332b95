//! Common utilities shared across the crate.
//!
//! Key components:
//! - **Source locations**: file, line and column positions derived from syn spans
//! - **Type names**: readable type names with module paths stripped

pub mod source_location;
pub mod type_name;

pub use source_location::{span_end, span_start, SourceLocation};
pub use type_name::{short_type_name, type_name_of};
