//! Readable type names.
//!
//! `std::any::type_name` spells out full module paths
//! (`std::collections::hash::map::HashMap<&str, bool>`). Output lines only
//! keep the last segment of every path: `HashMap<&str, bool>`.

/// Short name of `T`, with every module path stripped.
pub fn type_name_of<T: ?Sized>() -> String {
    short_type_name(std::any::type_name::<T>())
}

/// Strip module paths from every path segment in a type name.
///
/// Generic arguments, references, slices, tuples and `dyn` bounds are kept.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();

    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            path.push(ch);
        } else {
            push_last_segment(&mut out, &path);
            path.clear();
            out.push(ch);
        }
    }
    push_last_segment(&mut out, &path);
    out
}

fn push_last_segment(out: &mut String, path: &str) {
    match path.rfind("::") {
        Some(idx) => out.push_str(&path[idx + 2..]),
        None => out.push_str(path),
    }
}
