//! Removes documents that share an identical word set (ignoring term
//! frequencies), keeping the smallest id among each duplicate group.
//!
//! Grounded on `original_source/search-server/remove_duplicates.cpp`'s
//! `RemoveDuplicates`: walks ids in ascending order, and a document is a
//! duplicate the moment its word *set* has been seen already, regardless of
//! word counts.

use crate::index::PostingIndex;
use std::collections::HashSet;

/// Removes duplicate documents from `index`, returning the ids removed in
/// ascending order.
pub(crate) fn remove_duplicates(index: &mut PostingIndex) -> Vec<i64> {
    let mut seen_word_sets: HashSet<Vec<&'static str>> = HashSet::new();
    let mut to_remove = Vec::new();

    for id in index.iter_ids().collect::<Vec<_>>() {
        let mut words: Vec<&'static str> = index.forward_words(id).keys().copied().collect();
        words.sort_unstable();
        if !seen_word_sets.insert(words) {
            to_remove.push(id);
        }
    }

    for &id in &to_remove {
        index.remove_document(id);
        tracing::info!(document_id = id, "removed duplicate document");
    }
    to_remove
}
