//! TF-IDF relevance scoring and the top-K ranking used by `find_top`.
//!
//! Grounded on `original_source/search-server/search_server.cpp`'s
//! `FindAllDocuments` (plus-words accumulate relevance, minus-words erase the
//! document outright, in that order) and `FindTopDocuments`'s sort/truncate
//! (`COMPARE_TOLERANCE` tie-break on rating, then truncate to
//! `MAX_RESULT_DOCUMENT_COUNT`). The parallel path fans the plus-word
//! accumulation out over a [`ConcurrentAggregator`] the way
//! `examples/probelabs-probe`'s search execution merges per-thread score maps
//! after a `rayon` `par_iter`.
//!
//! Both policies parse with [`crate::query::parse_sorted`]:
//! `search_server.h`'s `FindTopDocuments` overloads both call
//! `ParseQuerySorted` regardless of execution policy (`ParseQueryFast`/raw
//! is reserved for `MatchDocument`'s parallel overload, which re-sorts and
//! re-uniques the result anyway). A repeated plus-word must contribute its
//! `tf * idf` exactly once under either policy, or the two stop being
//! interchangeable.

use crate::aggregator::ConcurrentAggregator;
use crate::document::{Document, Status};
use crate::index::PostingIndex;
use crate::query::SortedQuery;
use rayon::prelude::*;

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const COMPARE_TOLERANCE: f64 = 1e-6;

fn rank_and_truncate(index: &PostingIndex, scores: impl IntoIterator<Item = (i64, f64)>) -> Vec<Document> {
    let mut docs: Vec<Document> = scores
        .into_iter()
        .map(|(id, relevance)| {
            let rating = index.doc_data(id).map(|d| d.rating).unwrap_or(0);
            Document { id, relevance, rating }
        })
        .collect();

    docs.sort_by(|a, b| {
        if (a.relevance - b.relevance).abs() > COMPARE_TOLERANCE {
            b.relevance.partial_cmp(&a.relevance).unwrap()
        } else {
            b.rating.cmp(&a.rating)
        }
    });
    docs.truncate(MAX_RESULT_DOCUMENT_COUNT);
    docs
}

/// Sequential relevance scan: deduplicated plus-words accumulate, then
/// minus-words erase, mirroring the original's two-pass
/// `for_each(plus); for_each(minus)` ordering.
pub(crate) fn find_top_sequential(
    index: &PostingIndex,
    query: &SortedQuery<'_>,
    predicate: impl Fn(i64, Status, i64) -> bool,
) -> Vec<Document> {
    use std::collections::BTreeMap;
    // Ordered by doc id so that, on an exact relevance-and-rating tie, the
    // stable sort below preserves the same ascending-id order the parallel
    // path gets from the aggregator's BTreeMap merge.
    let mut scores: BTreeMap<i64, f64> = BTreeMap::new();

    for &word in &query.plus_words {
        let Some(postings) = index.postings(word) else { continue };
        let idf = index.idf(word);
        for (&doc_id, &tf) in postings {
            let data = index.doc_data(doc_id).expect("postings reference a live document");
            if predicate(doc_id, data.status, data.rating) {
                *scores.entry(doc_id).or_insert(0.0) += tf * idf;
            }
        }
    }
    for &word in &query.minus_words {
        let Some(postings) = index.postings(word) else { continue };
        for &doc_id in postings.keys() {
            scores.remove(&doc_id);
        }
    }

    rank_and_truncate(index, scores)
}

/// Parallel relevance scan: plus-word postings are scored concurrently into
/// a sharded [`ConcurrentAggregator`], then minus-word postings are erased
/// from it before the merge. Takes a [`SortedQuery`], same as the sequential
/// path, so a repeated plus-word contributes its `tf * idf` exactly once
/// under either policy.
pub(crate) fn find_top_parallel(
    index: &PostingIndex,
    query: &SortedQuery<'_>,
    predicate: impl Fn(i64, Status, i64) -> bool + Sync,
) -> Vec<Document> {
    let shard_count = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1) * 4;
    let aggregator = ConcurrentAggregator::new(shard_count);

    query.plus_words.par_iter().for_each(|&word| {
        let Some(postings) = index.postings(word) else { return };
        let idf = index.idf(word);
        for (&doc_id, &tf) in postings {
            let data = index.doc_data(doc_id).expect("postings reference a live document");
            if predicate(doc_id, data.status, data.rating) {
                aggregator.access(doc_id).add(tf * idf);
            }
        }
    });

    query.minus_words.par_iter().for_each(|&word| {
        let Some(postings) = index.postings(word) else { return };
        for &doc_id in postings.keys() {
            aggregator.erase(doc_id);
        }
    });

    rank_and_truncate(index, aggregator.merge())
}
