//! Slug derivation for tag segments.
//!
//! Labels in the entity table are free Italian text with accents,
//! apostrophes and the occasional slash. Tag segments must be plain
//! `[a-z0-9-]`, so [`slugify`] reduces a label step by step: NFKD
//! decomposition, non-ASCII removal, lowercasing, whitespace to hyphens,
//! removal of every other character, hyphen-run collapse, edge trim.
//!
//! The function is pure and idempotent. A label with no ASCII content
//! reduces to the empty string; callers that need a non-empty tag segment
//! must treat that as an error.

use unicode_normalization::UnicodeNormalization;

/// Derive a tag-safe slug from a human-readable label.
///
/// NFKD decomposition splits accented letters into a base letter plus
/// combining marks, and the ASCII filter then drops the marks, so `ì`
/// reduces to `i`. Characters with no ASCII decomposition are dropped
/// entirely.
pub fn slugify(label: &str) -> String {
    let ascii: String = label.nfkd().filter(char::is_ascii).collect();
    let lowered = ascii.to_ascii_lowercase();

    let hyphenated: String = lowered
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    let mut collapsed = String::with_capacity(hyphenated.len());
    let mut prev_hyphen = false;
    for c in hyphenated.chars() {
        if c == '-' {
            if !prev_hyphen {
                collapsed.push('-');
            }
            prev_hyphen = true;
        } else {
            collapsed.push(c);
            prev_hyphen = false;
        }
    }

    collapsed.trim_matches('-').to_string()
}
