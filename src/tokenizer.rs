//! Splits text on ASCII space runs and validates byte content.
//!
//! Grounded on `original_source/search-server/string_processing.cpp`'s
//! `SplitIntoWords`, minus the spurious trailing `"hello"` token that one
//! variant of that function appended — spec.md names this as a bug, not a
//! behavior to preserve.

/// Splits `text` on runs of ASCII spaces, returning non-empty tokens in
/// input order. Tabs and newlines are not delimiters.
pub fn split(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// `false` iff any byte in `text` has value `< 32` (a control byte).
pub fn is_valid(text: &str) -> bool {
    text.bytes().all(|b| b >= 32)
}
