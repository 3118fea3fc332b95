//! Structural description of a value.

use crate::common::type_name_of;
use crate::inspect::Inspect;

/// Whether a container's iteration order is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Keep the order the container yields
    Preserved,
    /// Sort by rendered form so output does not depend on hashing
    Unordered,
}

/// Fields of a record or enum variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Fields {
    /// `Name{a: 1, b: 2}`
    Named(Vec<(String, Shape)>),
    /// `Name(1, 2)`
    Unnamed(Vec<Shape>),
    /// `Name`
    Unit,
}

/// What the formatter walks. Produced by [`Inspect::inspect`].
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A value already in its literal form (`42`, `true`, `"text"`, `'c'`)
    Scalar(String),
    /// `TypeName{e1, e2}`; lists, arrays, slices and sets
    Sequence {
        type_name: String,
        items: Vec<Shape>,
        order: Order,
    },
    /// `TypeName{k1: v1, k2: v2}`
    Map {
        type_name: String,
        entries: Vec<(Shape, Shape)>,
        order: Order,
    },
    /// A struct or enum variant; `name` is printed as-is
    Composite { name: String, fields: Fields },
    /// `(a, b)`
    Tuple(Vec<Shape>),
    /// A value that cannot be read right now, e.g. a locked mutex
    Unavailable { type_name: String, reason: String },
}

impl Shape {
    /// Quoted text literal with control characters escaped.
    pub fn text(value: &str) -> Self {
        Self::Scalar(format!("{value:?}"))
    }

    /// Sequence of `T` elements rendered under `C`'s type name.
    pub fn sequence<'a, C, T, I>(items: I, order: Order) -> Self
    where
        C: ?Sized,
        T: Inspect + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::Sequence {
            type_name: type_name_of::<C>(),
            items: items.into_iter().map(|item| item.inspect()).collect(),
            order,
        }
    }

    /// Key/value container rendered under `C`'s type name.
    pub fn map<'a, C, K, V, I>(entries: I, order: Order) -> Self
    where
        C: ?Sized,
        K: Inspect + ?Sized + 'a,
        V: Inspect + ?Sized + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        Self::Map {
            type_name: type_name_of::<C>(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.inspect(), v.inspect()))
                .collect(),
            order,
        }
    }

    /// Single-field wrapper such as `RefCell<i32>(5)`.
    pub fn wrapper<C: ?Sized>(inner: Shape) -> Self {
        Self::Composite {
            name: type_name_of::<C>(),
            fields: Fields::Unnamed(vec![inner]),
        }
    }

    pub fn unavailable<C: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            type_name: type_name_of::<C>(),
            reason: reason.into(),
        }
    }

    /// First unavailable node in pre-order, as `(type_name, reason)`.
    pub fn first_unavailable(&self) -> Option<(&str, &str)> {
        match self {
            Self::Scalar(_) => None,
            Self::Unavailable { type_name, reason } => Some((type_name.as_str(), reason.as_str())),
            Self::Sequence { items, .. } | Self::Tuple(items) => {
                items.iter().find_map(Shape::first_unavailable)
            }
            Self::Map { entries, .. } => entries
                .iter()
                .find_map(|(k, v)| k.first_unavailable().or_else(|| v.first_unavailable())),
            Self::Composite { fields, .. } => match fields {
                Fields::Named(named) => named.iter().find_map(|(_, v)| v.first_unavailable()),
                Fields::Unnamed(values) => values.iter().find_map(Shape::first_unavailable),
                Fields::Unit => None,
            },
        }
    }
}
