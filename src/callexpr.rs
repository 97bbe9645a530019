//! Raw call-expression and type-name normalization.
//!
//! Call expressions arrive as whatever text the parser could produce:
//! `com.shop.OrderService.place(com.shop.Order)`, `repo.findById(id).get()`,
//! `this.helper()`, `save`. Everything here is string surgery; nothing
//! consults the index.

use std::sync::LazyLock;

use regex::Regex;

/// Innermost generic argument list, e.g. `<String>` in `Map<K, List<String>>`.
static GENERIC_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("static regex"));

/// Remove every balanced `(...)` group, leaving the dotted skeleton.
///
/// `a.b(x, f(y)).c()` → `a.b.c`. Unbalanced input drops everything after the
/// unmatched `(`.
#[must_use]
pub fn strip_args(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Drop generic arguments and array / varargs markers from a type name.
///
/// `List<Order>` → `List`, `Map<String, List<Item>>` → `Map`, `Item[]` → `Item`.
#[must_use]
pub fn strip_generics(type_name: &str) -> String {
    let mut current = type_name.trim().to_string();
    loop {
        let next = GENERIC_ARGS.replace_all(&current, "").into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current
        .trim_end_matches("...")
        .trim_end_matches("[]")
        .trim()
        .to_string()
}

/// Split a call expression into its dotted segments, without argument lists
/// or explicit method type arguments (`Collections.<T>emptyList()`).
#[must_use]
pub fn segments(raw: &str) -> Vec<String> {
    let skeleton = strip_args(raw);
    let skeleton = GENERIC_ARGS.replace_all(&skeleton, "");
    skeleton
        .split('.')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The last dotted component: the simple method name of a call, the simple
/// name of a qualified type.
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Everything before the trailing segment, joined back with dots.
/// Empty for bare calls.
#[must_use]
pub fn qualifier(segs: &[String]) -> String {
    match segs.len() {
        0 | 1 => String::new(),
        n => segs[..n - 1].join("."),
    }
}

/// `new Order` segment text → `Order` (the parser keeps the keyword when it
/// prints a constructor receiver).
#[must_use]
pub fn constructed_type(segment: &str) -> Option<&str> {
    segment.strip_prefix("new ").map(str::trim).filter(|t| !t.is_empty())
}
