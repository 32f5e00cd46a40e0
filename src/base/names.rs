//! Helpers for dotted and generic names.
//!
//! Names arrive from the syntax tree as written in source: possibly dotted
//! (`A.B.C`), possibly carrying generic arguments (`List<Bun>`), possibly with
//! an alias qualifier (`global::System`). Every lookup goes through these.

use super::constants::{ALIAS_QUALIFIER, NAMESPACE_SEPARATOR};

/// Remove every generic-argument group from a name.
///
/// `Salad<T>` becomes `Salad`, `Outer<int>.Inner<Dictionary<K, V>>` becomes
/// `Outer.Inner`. Unbalanced brackets drop everything after the opening one.
pub fn strip_generics(name: &str) -> String {
    if !name.contains('<') {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for ch in name.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Remove an alias qualifier such as `global::`.
pub fn strip_alias_qualifier(name: &str) -> &str {
    match name.rfind(ALIAS_QUALIFIER) {
        Some(idx) => &name[idx + ALIAS_QUALIFIER.len()..],
        None => name,
    }
}

/// Split a dotted name into its non-empty segments.
pub fn segments(name: &str) -> Vec<&str> {
    name.split(NAMESPACE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Join a namespace and a name, skipping the separator for the root namespace.
pub fn join(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
    }
}
