//! Turning a [`Shape`] into its single-line text form.
//!
//! Rendering rules:
//! - sequences: `TypeName{a, b}`
//! - maps: `TypeName{k: v}`; unordered containers are sorted by the rendered
//!   key, then by the rendered value
//! - records and variants: `Name{field: v}`, `Name(a, b)` or `Name`
//! - tuples: `(a, b)`, `(a,)`
//! - unavailable nodes: `TypeName{<reason>}`

use super::shape::{Fields, Order, Shape};
use crate::errors::{Error, Result};
use std::fmt::Write;

/// Strict rendering.
///
/// Fails with [`Error::FormatFailure`] when any nested value is unavailable;
/// callers fall back to [`render_lossy`].
pub fn render(shape: &Shape) -> Result<String> {
    match shape.first_unavailable() {
        Some((type_name, reason)) => Err(Error::format_failure(type_name, reason)),
        None => Ok(render_lossy(shape)),
    }
}

/// Rendering that never fails; unavailable nodes show their reason inline.
pub fn render_lossy(shape: &Shape) -> String {
    let mut out = String::new();
    write_shape(&mut out, shape);
    out
}

fn write_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Scalar(literal) => out.push_str(literal),
        Shape::Sequence {
            type_name,
            items,
            order,
        } => {
            let mut rendered: Vec<String> = items.iter().map(render_lossy).collect();
            if *order == Order::Unordered {
                rendered.sort();
            }
            out.push_str(type_name);
            write_braced(out, &rendered);
        }
        Shape::Map {
            type_name,
            entries,
            order,
        } => {
            let mut rendered: Vec<(String, String)> = entries
                .iter()
                .map(|(k, v)| (render_lossy(k), render_lossy(v)))
                .collect();
            if *order == Order::Unordered {
                rendered.sort();
            }
            let joined: Vec<String> = rendered
                .into_iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect();
            out.push_str(type_name);
            write_braced(out, &joined);
        }
        Shape::Composite { name, fields } => {
            out.push_str(name);
            write_fields(out, fields);
        }
        Shape::Tuple(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_shape(out, item);
            }
            if items.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
        Shape::Unavailable { type_name, reason } => {
            let _ = write!(out, "{type_name}{{<{reason}>}}");
        }
    }
}

fn write_fields(out: &mut String, fields: &Fields) {
    match fields {
        Fields::Named(named) => {
            let rendered: Vec<String> = named
                .iter()
                .map(|(name, value)| format!("{name}: {}", render_lossy(value)))
                .collect();
            write_braced(out, &rendered);
        }
        Fields::Unnamed(values) => {
            out.push('(');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_shape(out, value);
            }
            out.push(')');
        }
        Fields::Unit => {}
    }
}

fn write_braced(out: &mut String, parts: &[String]) {
    out.push('{');
    out.push_str(&parts.join(", "));
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scalar(s: &str) -> Shape {
        Shape::Scalar(s.to_string())
    }

    #[test]
    fn test_unordered_map_sorts_by_key() {
        let shape = Shape::Map {
            type_name: "HashMap<&str, bool>".into(),
            entries: vec![
                (Shape::text("good"), scalar("true")),
                (Shape::text("bad"), scalar("false")),
            ],
            order: Order::Unordered,
        };
        assert_eq!(
            render(&shape).unwrap(),
            r#"HashMap<&str, bool>{"bad": false, "good": true}"#
        );
    }

    #[test]
    fn test_ordered_map_keeps_order() {
        let shape = Shape::Map {
            type_name: "BTreeMap<i32, i32>".into(),
            entries: vec![(scalar("2"), scalar("0")), (scalar("10"), scalar("0"))],
            order: Order::Preserved,
        };
        assert_eq!(render_lossy(&shape), "BTreeMap<i32, i32>{2: 0, 10: 0}");
    }

    #[test]
    fn test_composites_and_tuples() {
        let record = Shape::Composite {
            name: "Person".into(),
            fields: Fields::Named(vec![
                ("exported".into(), Shape::text("yes")),
                ("not_exported".into(), Shape::text("no")),
            ]),
        };
        assert_eq!(
            render_lossy(&record),
            r#"Person{exported: "yes", not_exported: "no"}"#
        );

        let variant = Shape::Composite {
            name: "Some".into(),
            fields: Fields::Unnamed(vec![scalar("1")]),
        };
        assert_eq!(render_lossy(&variant), "Some(1)");

        let unit = Shape::Composite {
            name: "Marker".into(),
            fields: Fields::Unit,
        };
        assert_eq!(render_lossy(&unit), "Marker");

        assert_eq!(render_lossy(&Shape::Tuple(vec![scalar("1")])), "(1,)");
        assert_eq!(
            render_lossy(&Shape::Tuple(vec![scalar("1"), Shape::text("a")])),
            r#"(1, "a")"#
        );
    }

    #[test]
    fn test_unavailable_fails_strict_but_not_lossy() {
        let shape = Shape::Sequence {
            type_name: "Vec<RefCell<i32>>".into(),
            items: vec![Shape::Unavailable {
                type_name: "RefCell<i32>".into(),
                reason: "mutably borrowed".into(),
            }],
            order: Order::Preserved,
        };
        assert_eq!(
            render(&shape),
            Err(Error::format_failure("RefCell<i32>", "mutably borrowed"))
        );
        assert_eq!(
            render_lossy(&shape),
            "Vec<RefCell<i32>>{RefCell<i32>{<mutably borrowed>}}"
        );
    }
}
