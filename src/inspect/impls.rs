//! `Inspect` implementations for std types.

use super::shape::{Fields, Order, Shape};
use super::Inspect;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock, TryLockError};
use std::time::Duration;

macro_rules! inspect_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Shape {
                    Shape::Scalar(self.to_string())
                }
            }
        )*
    };
}

macro_rules! inspect_debug {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn inspect(&self) -> Shape {
                    Shape::Scalar(format!("{self:?}"))
                }
            }
        )*
    };
}

inspect_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool);

// Debug keeps the fractional part (`1.0`) and quotes/escapes chars.
inspect_debug!(f32, f64, char, Duration);

impl Inspect for () {
    fn inspect(&self) -> Shape {
        Shape::Scalar("()".to_string())
    }
}

impl Inspect for str {
    fn inspect(&self) -> Shape {
        Shape::text(self)
    }
}

impl Inspect for String {
    fn inspect(&self) -> Shape {
        Shape::text(self)
    }
}

impl Inspect for OsStr {
    fn inspect(&self) -> Shape {
        Shape::text(&self.to_string_lossy())
    }
}

impl Inspect for OsString {
    fn inspect(&self) -> Shape {
        self.as_os_str().inspect()
    }
}

impl Inspect for Path {
    fn inspect(&self) -> Shape {
        self.as_os_str().inspect()
    }
}

impl Inspect for PathBuf {
    fn inspect(&self) -> Shape {
        self.as_os_str().inspect()
    }
}

// References and owning pointers are transparent.

impl<T: Inspect + ?Sized> Inspect for &T {
    fn inspect(&self) -> Shape {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn inspect(&self) -> Shape {
        (**self).inspect()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn inspect(&self) -> Shape {
        (**self).inspect()
    }
}

// Shared pointers can form cycles through interior mutability. Pointees
// currently being inspected on this thread are tracked by address; reaching
// one again renders a marker instead of recursing.

thread_local! {
    static IN_PROGRESS: RefCell<HashSet<*const ()>> = RefCell::new(HashSet::new());
}

/// Removes its pointee from [`IN_PROGRESS`] when dropped, including on unwind.
struct InProgress(*const ());

impl InProgress {
    /// `None` when `ptr` is already being inspected. No guard is built in
    /// that case, so the outer entry stays in place.
    fn enter(ptr: *const ()) -> Option<Self> {
        if IN_PROGRESS.with(|set| set.borrow_mut().insert(ptr)) {
            Some(Self(ptr))
        } else {
            None
        }
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with(|set| {
            set.borrow_mut().remove(&self.0);
        });
    }
}

fn inspect_shared<P: ?Sized, T: Inspect + ?Sized>(ptr: *const T, value: &T) -> Shape {
    match InProgress::enter(ptr.cast::<()>()) {
        Some(_guard) => value.inspect(),
        None => Shape::unavailable::<P>("cycle"),
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn inspect(&self) -> Shape {
        inspect_shared::<Self, T>(Rc::as_ptr(self), &**self)
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn inspect(&self) -> Shape {
        inspect_shared::<Self, T>(Arc::as_ptr(self), &**self)
    }
}

impl<B> Inspect for Cow<'_, B>
where
    B: Inspect + ToOwned + ?Sized,
{
    fn inspect(&self) -> Shape {
        (**self).inspect()
    }
}

// Sequences

impl<T: Inspect> Inspect for [T] {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Preserved)
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Preserved)
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Preserved)
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Preserved)
    }
}

impl<T: Inspect> Inspect for LinkedList<T> {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Preserved)
    }
}

// Internal heap order is deterministic for a given insertion sequence.
impl<T: Inspect> Inspect for BinaryHeap<T> {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Preserved)
    }
}

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Unordered)
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn inspect(&self) -> Shape {
        Shape::sequence::<Self, _, _>(self, Order::Preserved)
    }
}

// Maps

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn inspect(&self) -> Shape {
        Shape::map::<Self, _, _, _>(self, Order::Unordered)
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn inspect(&self) -> Shape {
        Shape::map::<Self, _, _, _>(self, Order::Preserved)
    }
}

// Enums from the prelude render without their type name, as written in code.

impl<T: Inspect> Inspect for Option<T> {
    fn inspect(&self) -> Shape {
        match self {
            Some(value) => Shape::Composite {
                name: "Some".to_string(),
                fields: Fields::Unnamed(vec![value.inspect()]),
            },
            None => Shape::Composite {
                name: "None".to_string(),
                fields: Fields::Unit,
            },
        }
    }
}

impl<T: Inspect, E: Inspect> Inspect for Result<T, E> {
    fn inspect(&self) -> Shape {
        let (name, inner) = match self {
            Ok(value) => ("Ok", value.inspect()),
            Err(err) => ("Err", err.inspect()),
        };
        Shape::Composite {
            name: name.to_string(),
            fields: Fields::Unnamed(vec![inner]),
        }
    }
}

// Cells

impl<T: Inspect + Copy> Inspect for Cell<T> {
    fn inspect(&self) -> Shape {
        Shape::wrapper::<Self>(self.get().inspect())
    }
}

impl<T: Inspect + ?Sized> Inspect for RefCell<T> {
    fn inspect(&self) -> Shape {
        match self.try_borrow() {
            Ok(value) => Shape::wrapper::<Self>(value.inspect()),
            Err(_) => Shape::unavailable::<Self>("mutably borrowed"),
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for Mutex<T> {
    fn inspect(&self) -> Shape {
        match self.try_lock() {
            Ok(guard) => Shape::wrapper::<Self>(guard.inspect()),
            Err(TryLockError::Poisoned(poisoned)) => {
                Shape::wrapper::<Self>(poisoned.into_inner().inspect())
            }
            Err(TryLockError::WouldBlock) => Shape::unavailable::<Self>("locked"),
        }
    }
}

impl<T: Inspect + ?Sized> Inspect for RwLock<T> {
    fn inspect(&self) -> Shape {
        match self.try_read() {
            Ok(guard) => Shape::wrapper::<Self>(guard.inspect()),
            Err(TryLockError::Poisoned(poisoned)) => {
                Shape::wrapper::<Self>(poisoned.into_inner().inspect())
            }
            Err(TryLockError::WouldBlock) => Shape::unavailable::<Self>("write-locked"),
        }
    }
}

// Tuples

macro_rules! inspect_tuple {
    ($($name:ident),+) => {
        impl<$($name: Inspect),+> Inspect for ($($name,)+) {
            #[allow(non_snake_case)]
            fn inspect(&self) -> Shape {
                let ($($name,)+) = self;
                Shape::Tuple(vec![$($name.inspect()),+])
            }
        }
    };
}

inspect_tuple!(A);
inspect_tuple!(A, B);
inspect_tuple!(A, B, C);
inspect_tuple!(A, B, C, D);
inspect_tuple!(A, B, C, D, E);
inspect_tuple!(A, B, C, D, E, F);
inspect_tuple!(A, B, C, D, E, F, G);
inspect_tuple!(A, B, C, D, E, F, G, H);
