//! Value formatter.
//!
//! Rust has no runtime reflection, so values opt into being rendered through
//! the [`Inspect`] capability. The crate implements it for primitives, text,
//! std collections, smart pointers and cells; user types derive it with
//! `#[derive(Inspect)]`. The derive expands inside the defining module, so
//! private fields are always part of the rendering.
//!
//! ```
//! use debug_here::{render, Inspect};
//! use std::collections::HashMap;
//!
//! let map = HashMap::from([("good", true), ("bad", false)]);
//! assert_eq!(
//!     render(&map.inspect()).unwrap(),
//!     r#"HashMap<&str, bool>{"bad": false, "good": true}"#
//! );
//! ```

mod impls;
pub mod render;
pub mod shape;

pub use render::{render, render_lossy};
pub use shape::{Fields, Order, Shape};

use crate::common::type_name_of;
use std::fmt;
use std::fmt::Write;

/// Capability to describe a value's structure to the formatter.
pub trait Inspect {
    fn inspect(&self) -> Shape;
}

/// Adapter rendering any `fmt::Debug` value as an opaque scalar.
///
/// Useful for third-party types that do not implement [`Inspect`]. A `Debug`
/// implementation that reports an error yields an unavailable shape.
pub struct Debugged<'a, T: ?Sized>(pub &'a T);

impl<T: fmt::Debug + ?Sized> Inspect for Debugged<'_, T> {
    fn inspect(&self) -> Shape {
        let mut out = String::new();
        match write!(out, "{:?}", self.0) {
            Ok(()) => Shape::Scalar(out),
            Err(_) => Shape::Unavailable {
                type_name: type_name_of::<T>(),
                reason: "Debug implementation returned an error".to_string(),
            },
        }
    }
}
