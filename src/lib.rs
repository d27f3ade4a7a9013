//! An in-memory TF-IDF search engine.
//!
//! [`SearchServer`] indexes plain-text documents under an integer id, a
//! [`document::Status`], and a set of integer ratings, and ranks them against
//! free-text queries with classical TF-IDF: `tf(w, d) = count(w, d) / |d|`
//! (non-stop-word tokens), `idf(w) = ln(N / df(w))`, and
//! `relevance(d) = sum(tf(w, d) * idf(w))` over the query's plus-words, minus
//! any document a minus-word touches.
//!
//! Every scoring and matching operation is offered in a sequential and a
//! [`rayon`](rayon)-backed parallel form, selected with [`ExecutionPolicy`].
//! Mutating operations (`add_document`, `remove_document`,
//! `remove_duplicates`) are single-writer: the index is not safe to mutate
//! from more than one thread concurrently, only to *read* concurrently with
//! other reads (`find_top`, `match_document`).
//!
//! # Quick start
//!
//! ```rust
//! use tfidf_search_server::{SearchServer, document::Status};
//!
//! let mut server = SearchServer::new(["and", "in", "on", "the"]).unwrap();
//! server.add_document(0, "a colorful parrot with green wings", Status::Actual, &[9]).unwrap();
//! server.add_document(1, "a gray cat and a gray dog", Status::Actual, &[5, 7]).unwrap();
//!
//! let top = server.find_top("gray cat").unwrap();
//! assert_eq!(top[0].id, 1);
//! ```

pub mod aggregator;
pub mod arena;
pub mod bulk;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod matcher;
pub mod query;
pub mod request_queue;
pub mod scorer;
pub mod tokenizer;

pub use document::{Document, Status};
pub use error::SearchError;
pub use query::{RawQuery, SortedQuery};
pub use request_queue::RequestQueue;
pub use scorer::{COMPARE_TOLERANCE, MAX_RESULT_DOCUMENT_COUNT};

use index::PostingIndex;

/// Minutes in a day; the window [`RequestQueue`] retains query history for.
pub const MIN_IN_DAY: usize = 1440;

/// Chooses the sequential or `rayon`-parallel implementation of a scoring or
/// matching operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

/// An in-memory, TF-IDF-ranked collection of text documents.
pub struct SearchServer {
    index: PostingIndex,
}

impl SearchServer {
    /// Creates an empty server. `stop_words` are dropped from every document
    /// and query the server subsequently processes.
    pub fn new<I, S>(stop_words: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { index: PostingIndex::new(stop_words)? })
    }

    /// Creates an empty server from a single ASCII-space-delimited stop-words
    /// string, matching `SearchServer(std::string_view stop_words_text)`.
    pub fn new_from_text(stop_words_text: &str) -> Result<Self, SearchError> {
        Self::new(tokenizer::split(stop_words_text))
    }

    /// Indexes `text` under `id`. `id` must be non-negative and not already
    /// present; `text` and every stop word must be free of control bytes.
    pub fn add_document(
        &mut self,
        id: i64,
        text: &str,
        status: Status,
        ratings: &[i64],
    ) -> Result<(), SearchError> {
        self.index.add_document(id, text, status, ratings)
    }

    /// Removes `id` sequentially. A no-op if `id` is not indexed.
    pub fn remove_document(&mut self, id: i64) {
        self.index.remove_document(id);
    }

    /// Removes `id`, parallelizing the inverted-index prune over the
    /// document's words.
    pub fn remove_document_parallel(&mut self, id: i64) {
        self.index.remove_document_parallel(id);
    }

    /// Removes documents that share an identical word set, keeping the
    /// smallest id in each duplicate group. Returns the removed ids in
    /// ascending order.
    pub fn remove_duplicates(&mut self) -> Vec<i64> {
        dedup::remove_duplicates(&mut self.index)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Document ids in ascending order.
    pub fn iter_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.index.iter_ids()
    }

    pub fn status_of(&self, id: i64) -> Option<Status> {
        self.index.doc_data(id).map(|d| d.status)
    }

    pub fn rating_of(&self, id: i64) -> Option<i64> {
        self.index.doc_data(id).map(|d| d.rating)
    }

    /// The word-frequency map for `id`, or an empty map if `id` is unknown.
    pub fn word_frequencies(&self, id: i64) -> &std::collections::HashMap<&'static str, f64> {
        self.index.forward_words(id)
    }

    /// Top `MAX_RESULT_DOCUMENT_COUNT` documents for `raw_query` among
    /// [`Status::Actual`] documents, sequentially scored.
    pub fn find_top(&self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        self.find_top_with(ExecutionPolicy::Sequential, raw_query, |_, status, _| {
            status == Status::Actual
        })
    }

    /// Like [`Self::find_top`], restricted to documents with the given
    /// status.
    pub fn find_top_with_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: Status,
    ) -> Result<Vec<Document>, SearchError> {
        self.find_top_with(policy, raw_query, move |_, doc_status, _| doc_status == status)
    }

    /// Top `MAX_RESULT_DOCUMENT_COUNT` documents for `raw_query` under
    /// `policy`, restricted to documents `predicate` accepts.
    pub fn find_top_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: impl Fn(i64, Status, i64) -> bool + Sync,
    ) -> Result<Vec<Document>, SearchError> {
        match policy {
            ExecutionPolicy::Sequential => {
                let query = query::parse_sorted(raw_query, |w| self.index.is_stop_word(w))?;
                Ok(scorer::find_top_sequential(&self.index, &query, predicate))
            }
            ExecutionPolicy::Parallel => {
                let query = query::parse_sorted(raw_query, |w| self.index.is_stop_word(w))?;
                Ok(scorer::find_top_parallel(&self.index, &query, predicate))
            }
        }
    }

    /// Plus-words of `raw_query` present in document `id`'s word set, sorted
    /// and deduplicated (empty if any minus-word is present), paired with
    /// the document's status.
    pub fn match_document<'a>(&self, raw_query: &'a str, id: i64) -> Result<(Vec<&'a str>, Status), SearchError> {
        let query = query::parse_sorted(raw_query, |w| self.index.is_stop_word(w))?;
        matcher::match_document_sequential(&self.index, id, &query)
    }

    /// Parallel counterpart to [`Self::match_document`].
    pub fn match_document_parallel<'a>(
        &self,
        raw_query: &'a str,
        id: i64,
    ) -> Result<(Vec<&'a str>, Status), SearchError> {
        let query = query::parse_raw(raw_query, |w| self.index.is_stop_word(w))?;
        matcher::match_document_parallel(&self.index, id, &query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_server() -> SearchServer {
        let mut server = SearchServer::new(["and", "with", "the", "this", "that"]).unwrap();
        server.add_document(0, "a colorful parrot with green wings", Status::Actual, &[8]).unwrap();
        server.add_document(1, "a gray cat and a long tail", Status::Actual, &[7]).unwrap();
        server.add_document(2, "a gray dog and a loud bark", Status::Actual, &[5]).unwrap();
        server.add_document(3, "gray dog and big eyes", Status::Actual, &[3]).unwrap();
        server.add_document(4, "big dog", Status::Actual, &[9]).unwrap();
        server
    }

    #[test]
    fn new_from_text_splits_stop_words_on_ascii_spaces() {
        let mut server = SearchServer::new_from_text("and  with").unwrap();
        server.add_document(0, "funny pet and nasty rat", Status::Actual, &[1]).unwrap();
        assert_eq!(server.word_frequencies(0).len(), 4);
    }

    #[test]
    fn find_top_ranks_by_tfidf_descending() {
        let server = build_server();
        let top = server.find_top("gray dog").unwrap();
        assert!(top.len() <= MAX_RESULT_DOCUMENT_COUNT);
        assert!(top.windows(2).all(|pair| pair[0].relevance >= pair[1].relevance - COMPARE_TOLERANCE));
    }

    #[test]
    fn find_top_with_custom_predicate_filters_by_rating() {
        let server = build_server();
        let top = server
            .find_top_with(ExecutionPolicy::Sequential, "big dog", |_, _, rating| rating > 1)
            .unwrap();
        let ids: Vec<i64> = top.iter().map(|d| d.id).collect();
        assert!(ids.contains(&4));
    }

    #[test]
    fn match_document_rejects_unknown_id() {
        let server = build_server();
        assert!(server.match_document("gray", 999).is_err());
    }

    #[test]
    fn add_document_rejects_duplicate_id() {
        let mut server = build_server();
        assert_eq!(
            server.add_document(0, "anything", Status::Actual, &[]),
            Err(SearchError::DuplicateId(0))
        );
    }

    #[test]
    fn sequential_and_parallel_find_top_agree() {
        let server = build_server();
        let seq = server.find_top_with(ExecutionPolicy::Sequential, "gray dog", |_, s, _| s == Status::Actual).unwrap();
        let par = server.find_top_with(ExecutionPolicy::Parallel, "gray dog", |_, s, _| s == Status::Actual).unwrap();
        let mut seq_ids: Vec<i64> = seq.iter().map(|d| d.id).collect();
        let mut par_ids: Vec<i64> = par.iter().map(|d| d.id).collect();
        seq_ids.sort_unstable();
        par_ids.sort_unstable();
        assert_eq!(seq_ids, par_ids);
    }

    #[test]
    fn sequential_and_parallel_find_top_agree_exactly_with_a_repeated_query_word() {
        let server = build_server();
        let seq = server
            .find_top_with(ExecutionPolicy::Sequential, "dog dog dog", |_, s, _| s == Status::Actual)
            .unwrap();
        let par = server
            .find_top_with(ExecutionPolicy::Parallel, "dog dog dog", |_, s, _| s == Status::Actual)
            .unwrap();
        assert_eq!(seq.len(), par.len());
        for (s, p) in seq.iter().zip(par.iter()) {
            assert_eq!(s.id, p.id);
            assert!((s.relevance - p.relevance).abs() < 1e-12);
        }
    }
}
