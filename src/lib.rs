//! Print any value together with the expression that produced it.
//!
//! ```no_run
//! use debug_here::Inspect;
//!
//! #[derive(Inspect)]
//! struct Person {
//!     name: String,
//!     age: u8,
//! }
//!
//! fn main() {
//!     let dave = Person { name: "dave".into(), age: 42 };
//!     debug_here::debug(&dave);
//!     // DEBUG: [src/main.rs:11:5] &dave = Person{name: "dave", age: 42}
//! }
//! ```
//!
//! Each call re-parses the caller's source file, finds the call on the
//! reported line and prints the argument's source text next to a rendering
//! of the value. Failures are reported on the same sink and never panic.

// Lets `#[derive(Inspect)]` expansions refer to `::debug_here` inside this crate.
extern crate self as debug_here;

pub mod call_site;
pub mod common;
pub mod config;
pub mod debugger;
pub mod errors;
pub mod expression;
pub mod inspect;
pub mod locator;
pub mod observability;
pub mod parsing;

pub use crate::common::{short_type_name, type_name_of, SourceLocation};
pub use crate::config::Config;
pub use crate::debugger::{debug, render_value, Debugger, Report, LINE_PREFIX};
pub use crate::errors::{Error, Result};
pub use crate::inspect::{render, render_lossy, Debugged, Fields, Inspect, Order, Shape};
pub use crate::locator::CallerLocation;
pub use crate::observability::Stage;

/// Derive [`Inspect`] for a struct or enum.
///
/// Every field is rendered, private ones included, in declaration order.
/// Fields whose type only implements `fmt::Debug` can be marked
/// `#[inspect(debug)]`.
pub use debug_here_derive::Inspect;
