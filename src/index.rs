//! The posting index: forward/inverted maps, document metadata, and the
//! live-id set, plus the invariants spec.md §3 requires hold after every
//! public operation.
//!
//! Grounded on `original_source/search-server/search_server.h`'s private
//! state (`word_to_document_freqs_`, `document_to_word_freqs_`,
//! `words_storage_`, `documents_`, `id_list_`) and on `AddDocument`/
//! `RemoveDocument` in `search_server.cpp`.

use crate::arena::StringArena;
use crate::document::{compute_average_rating, Status};
use crate::error::SearchError;
use crate::tokenizer;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

pub(crate) struct DocumentData {
    pub rating: i64,
    pub status: Status,
}

pub(crate) struct PostingIndex {
    stop_words: std::collections::HashSet<String>,
    arena: StringArena,
    /// word -> doc_id -> term frequency
    inverted: HashMap<&'static str, BTreeMap<i64, f64>>,
    /// doc_id -> word -> term frequency
    forward: HashMap<i64, HashMap<&'static str, f64>>,
    docs: HashMap<i64, DocumentData>,
    live_ids: BTreeSet<i64>,
}

fn empty_word_freqs() -> &'static HashMap<&'static str, f64> {
    static EMPTY: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    EMPTY.get_or_init(HashMap::new)
}

impl PostingIndex {
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = std::collections::HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !tokenizer::is_valid(word) {
                return Err(SearchError::InvalidCharacters(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self {
            stop_words: set,
            arena: StringArena::new(),
            inverted: HashMap::new(),
            forward: HashMap::new(),
            docs: HashMap::new(),
            live_ids: BTreeSet::new(),
        })
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.live_ids.contains(&id)
    }

    pub fn document_count(&self) -> usize {
        self.live_ids.len()
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.live_ids.iter().copied()
    }

    pub fn doc_data(&self, id: i64) -> Option<&DocumentData> {
        self.docs.get(&id)
    }

    pub fn postings(&self, word: &str) -> Option<&BTreeMap<i64, f64>> {
        self.inverted.get(word)
    }

    pub fn forward_words(&self, id: i64) -> &HashMap<&'static str, f64> {
        self.forward.get(&id).unwrap_or_else(|| empty_word_freqs())
    }

    /// idf(w) = ln(N / df(w)). Callers are expected to have already checked
    /// the word is present in `inverted`.
    pub fn idf(&self, word: &str) -> f64 {
        let df = self.inverted.get(word).map(|m| m.len()).unwrap_or(0);
        if df == 0 {
            return 0.0;
        }
        (self.document_count() as f64 / df as f64).ln()
    }

    pub fn add_document(
        &mut self,
        id: i64,
        text: &str,
        status: Status,
        ratings: &[i64],
    ) -> Result<(), SearchError> {
        if id < 0 {
            return Err(SearchError::NegativeId(id));
        }
        if self.docs.contains_key(&id) {
            return Err(SearchError::DuplicateId(id));
        }
        if !tokenizer::is_valid(text) {
            return Err(SearchError::InvalidCharacters(text.to_string()));
        }

        let words: Vec<&'static str> = tokenizer::split(text)
            .into_iter()
            .filter(|w| !self.stop_words.contains(*w))
            .map(|w| self.arena.intern(w))
            .collect();

        let n = words.len();
        if n > 0 {
            let inv_word_count = 1.0 / n as f64;
            let forward_entry = self.forward.entry(id).or_default();
            for word in words {
                *self.inverted.entry(word).or_default().entry(id).or_insert(0.0) += inv_word_count;
                *forward_entry.entry(word).or_insert(0.0) += inv_word_count;
            }
        } else {
            self.forward.entry(id).or_default();
        }

        self.docs.insert(id, DocumentData { rating: compute_average_rating(ratings), status });
        self.live_ids.insert(id);
        tracing::debug!(document_id = id, word_count = n, "document indexed");
        Ok(())
    }

    /// Removes `id` sequentially: drops it from `live_ids`/`docs`/`forward`,
    /// then from every inverted-index entry the document contributed to.
    pub fn remove_document(&mut self, id: i64) {
        self.live_ids.remove(&id);
        self.docs.remove(&id);
        let Some(words) = self.forward.remove(&id) else {
            return;
        };
        for word in words.into_keys() {
            self.prune_inverted_entry(word, id);
        }
        tracing::debug!(document_id = id, "document removed");
    }

    /// Removes `id`, parallelizing the per-word prune of the inverted index
    /// over the words the document contributed (spec.md §4.3). Mutation of
    /// the single shared inverted map is serialized behind one mutex for the
    /// duration of the call; the work parallelized is the hashing/lookup
    /// driving each removal, not lock-free sharding (only the aggregator
    /// used by `find_top` needs that).
    pub fn remove_document_parallel(&mut self, id: i64) {
        self.live_ids.remove(&id);
        self.docs.remove(&id);
        let Some(words) = self.forward.remove(&id) else {
            return;
        };
        let words: Vec<&'static str> = words.into_keys().collect();

        // Read-only pass, fanned out with rayon: shared `&HashMap` reads are
        // `Sync`, so this does real concurrent work with no locking.
        let inverted = &self.inverted;
        let becomes_empty: Vec<(&'static str, bool)> = words
            .par_iter()
            .map(|&word| {
                let empties = inverted
                    .get(word)
                    .map(|postings| postings.len() == 1 && postings.contains_key(&id))
                    .unwrap_or(false);
                (word, empties)
            })
            .collect();

        // Sequential mutation pass: cheap relative to the lookups above, and
        // avoids serializing the parallel work behind a single mutex.
        for (word, empties) in becomes_empty {
            if empties {
                self.inverted.remove(word);
            } else if let Some(postings) = self.inverted.get_mut(word) {
                postings.remove(&id);
            }
        }
        tracing::debug!(document_id = id, "document removed (parallel)");
    }

    fn prune_inverted_entry(&mut self, word: &str, id: i64) {
        if let Some(postings) = self.inverted.get_mut(word) {
            postings.remove(&id);
            if postings.is_empty() {
                self.inverted.remove(word);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_actual() -> Status {
        Status::Actual
    }

    #[test]
    fn add_document_rejects_negative_id() {
        let mut idx = PostingIndex::new::<_, &str>([]).unwrap();
        assert_eq!(
            idx.add_document(-1, "a b", status_actual(), &[]),
            Err(SearchError::NegativeId(-1))
        );
    }

    #[test]
    fn add_document_rejects_duplicate_id() {
        let mut idx = PostingIndex::new::<_, &str>([]).unwrap();
        idx.add_document(1, "a b", status_actual(), &[]).unwrap();
        assert_eq!(
            idx.add_document(1, "c d", status_actual(), &[]),
            Err(SearchError::DuplicateId(1))
        );
    }

    #[test]
    fn add_document_rejects_control_bytes() {
        let mut idx = PostingIndex::new::<_, &str>([]).unwrap();
        assert!(idx.add_document(1, "a\u{0}b", status_actual(), &[]).is_err());
    }

    #[test]
    fn empty_document_is_accepted_with_no_tf_entries() {
        let mut idx = PostingIndex::new::<_, &str>([]).unwrap();
        idx.add_document(1, "", status_actual(), &[]).unwrap();
        assert!(idx.forward_words(1).is_empty());
        assert!(idx.contains(1));
    }

    #[test]
    fn tf_sums_to_distinct_words_over_total_tokens() {
        let mut idx = PostingIndex::new::<_, &str>([]).unwrap();
        idx.add_document(1, "dog dog cat", status_actual(), &[]).unwrap();
        let freqs = idx.forward_words(1);
        assert_eq!(freqs.get("dog").copied(), Some(2.0 / 3.0));
        let sum: f64 = freqs.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn remove_document_clears_all_maps() {
        let mut idx = PostingIndex::new::<_, &str>([]).unwrap();
        idx.add_document(1, "dog cat", status_actual(), &[]).unwrap();
        idx.remove_document(1);
        assert!(!idx.contains(1));
        assert!(idx.forward_words(1).is_empty());
        assert!(idx.postings("dog").is_none());
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut idx = PostingIndex::new::<_, &str>([]).unwrap();
        idx.remove_document(42);
        assert!(!idx.contains(42));
    }

    #[test]
    fn parallel_and_sequential_removal_agree() {
        let mut seq = PostingIndex::new::<_, &str>([]).unwrap();
        let mut par = PostingIndex::new::<_, &str>([]).unwrap();
        for idx in [&mut seq, &mut par] {
            idx.add_document(1, "dog cat bird", status_actual(), &[]).unwrap();
            idx.add_document(2, "dog bird", status_actual(), &[]).unwrap();
        }
        seq.remove_document(1);
        par.remove_document_parallel(1);
        assert_eq!(seq.postings("dog").map(|m| m.len()), par.postings("dog").map(|m| m.len()));
        assert_eq!(seq.postings("cat").is_none(), par.postings("cat").is_none());
    }

    #[test]
    fn stop_words_are_stripped_before_indexing() {
        let mut idx = PostingIndex::new(["and", "with"]).unwrap();
        idx.add_document(1, "funny pet and nasty rat", status_actual(), &[]).unwrap();
        assert!(idx.postings("and").is_none());
        assert!(idx.postings("funny").is_some());
    }

    #[test]
    fn empty_stop_word_strings_are_discarded() {
        let idx = PostingIndex::new(["", "and"]).unwrap();
        assert!(!idx.is_stop_word(""));
        assert!(idx.is_stop_word("and"));
    }
}
