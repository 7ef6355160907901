//! # Field Paths
//!
//! Errors are located by dotted paths joined from the root: `a.b.c` for
//! nested fields, `a.0`, `a.1` for collection items. The root itself has no
//! path; root-level errors are reported under a label (`root` by default).

/// Default label reported for errors at the root of the input.
pub const DEFAULT_ROOT_LABEL: &str = "root";

/// Append a segment to an optional prefix.
pub fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(p) => format!("{p}.{segment}"),
        None => segment.to_string(),
    }
}

/// Append a 0-based collection index to an optional prefix.
pub fn index(prefix: Option<&str>, i: usize) -> String {
    join(prefix, &i.to_string())
}

/// The prefix itself, or `root_label` when at the root.
pub fn or_root(prefix: Option<&str>, root_label: &str) -> String {
    prefix.unwrap_or(root_label).to_string()
}
