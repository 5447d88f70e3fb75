//! Path references in the SKILL.md body.
//!
//! Any `scripts/…`, `references/…` or `assets/…` token counts, whether it sits
//! in a link, in backticks, or in plain prose. Prose mentions are therefore
//! reported as references too.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Bundle subdirectories a body may point into
pub const RESOURCE_DIRS: [&str; 3] = ["scripts", "references", "assets"];

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:scripts|references|assets)/[\w.-]+").expect("reference pattern is valid")
});

/// Distinct path references in `body`, sorted
pub fn extract_references(body: &str) -> BTreeSet<String> {
    REFERENCE_RE
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        .collect()
}
