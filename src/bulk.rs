//! Runs many queries against a [`crate::SearchServer`] at once.
//!
//! Grounded on `original_source/search-server/process_queries.cpp`'s
//! `ProcessQueries` (parallel `std::transform` over the query list, each
//! query scored against the server) and `ProcessQueriesJoined` (the same,
//! flattened into one vector with `reserve`d capacity).

use crate::document::Document;
use crate::{ExecutionPolicy, SearchError, SearchServer};
use rayon::prelude::*;

/// Scores every query in `queries` against `server` in parallel, returning
/// one result vector per query in input order.
pub fn process_queries(
    server: &SearchServer,
    queries: &[&str],
) -> Result<Vec<Vec<Document>>, SearchError> {
    queries
        .par_iter()
        .map(|&query| server.find_top_with(ExecutionPolicy::Sequential, query, |_, status, _| {
            status == crate::Status::Actual
        }))
        .collect()
}

/// Like [`process_queries`], flattened into a single vector in query order.
pub fn process_queries_joined(
    server: &SearchServer,
    queries: &[&str],
) -> Result<Vec<Document>, SearchError> {
    let per_query = process_queries(server, queries)?;
    let mut joined = Vec::with_capacity(queries.len() * crate::MAX_RESULT_DOCUMENT_COUNT);
    for docs in per_query {
        joined.extend(docs);
    }
    Ok(joined)
}
