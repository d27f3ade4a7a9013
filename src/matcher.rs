//! Matches a single document's forward entry against a query, without
//! touching relevance.
//!
//! Grounded on `original_source/search-server/search_server.cpp`'s
//! `MatchDocument`: minus-word presence short-circuits to an empty word
//! list, otherwise the sorted+deduped plus-words present in the document are
//! returned sorted. The parallel overload there walks the document's own
//! (smaller) word set against the query instead of the query against every
//! posting list; this mirrors that by testing membership in the document's
//! `forward_words` map rather than scanning `postings`.

use crate::document::Status;
use crate::error::SearchError;
use crate::index::PostingIndex;
use crate::query::{RawQuery, SortedQuery};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Sequential match: walks plus-words in order, stopping early if any
/// minus-word is present in the document.
pub(crate) fn match_document_sequential<'a>(
    index: &PostingIndex,
    id: i64,
    query: &SortedQuery<'a>,
) -> Result<(Vec<&'a str>, Status), SearchError> {
    if !index.contains(id) {
        return Err(SearchError::UnknownDocument(id));
    }
    let words = index.forward_words(id);
    let status = index.doc_data(id).expect("id already checked live").status;

    for &minus in &query.minus_words {
        if words.contains_key(minus) {
            return Ok((Vec::new(), status));
        }
    }

    let matched = query.plus_words.iter().copied().filter(|w| words.contains_key(*w)).collect();
    Ok((matched, status))
}

/// Parallel match: the minus-word scan and the plus-word scan each run
/// concurrently over the document's own word set.
pub(crate) fn match_document_parallel<'a>(
    index: &PostingIndex,
    id: i64,
    query: &RawQuery<'a>,
) -> Result<(Vec<&'a str>, Status), SearchError> {
    if !index.contains(id) {
        return Err(SearchError::UnknownDocument(id));
    }
    let words = index.forward_words(id);
    let status = index.doc_data(id).expect("id already checked live").status;

    let has_minus = query.minus_words.par_iter().any(|&minus| words.contains_key(minus));
    if has_minus {
        return Ok((Vec::new(), status));
    }

    let matched: BTreeSet<&str> =
        query.plus_words.par_iter().copied().filter(|w| words.contains_key(*w)).collect();
    Ok((matched.into_iter().collect(), status))
}
