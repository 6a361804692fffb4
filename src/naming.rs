//! Canonical names: the stable lookup key derived from a display name.
//!
//! `"My  Bank\n"` and `"my bank"` both canonicalize to `"my_bank"`, so
//! they refer to the same record.

use crate::errors::{LockboxError, Result};

/// Character that replaces each run of whitespace.
pub const SEPARATOR: char = '_';

/// Map a display name to its canonical lookup key.
///
/// Lowercases, drops one trailing newline, and collapses every run of
/// whitespace into a single [`SEPARATOR`]. Leading and trailing whitespace
/// produce no separator. Blank names must be rejected with
/// [`validate_name`] before reaching this function.
pub fn canonicalize(name: &str) -> String {
    let name = name.strip_suffix('\n').unwrap_or(name);
    let lowered = name.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    for word in lowered.split_whitespace() {
        if !out.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(word);
    }
    out
}

/// Reject names that are empty or whitespace-only.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LockboxError::EmptyName);
    }
    Ok(())
}
