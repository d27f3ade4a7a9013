//! A rolling window over the last [`crate::MIN_IN_DAY`] `find_top` calls,
//! tracking how many returned no results.
//!
//! Grounded on `original_source/search-server/request_queue.h`/
//! `request_queue.cpp`'s `RequestQueue<T>`: a deque of per-request outcomes
//! bounded at `min_in_day_`, with the oldest entry evicted (and its
//! contribution to `no_results_requests_` undone) once the window is full.

use crate::document::Document;
use crate::error::SearchError;
use crate::{ExecutionPolicy, SearchServer, Status, MIN_IN_DAY};
use std::collections::VecDeque;

struct QueryResult {
    was_empty: bool,
}

/// Wraps a [`SearchServer`] and remembers whether each of the last
/// [`MIN_IN_DAY`] `find_top` calls made through it returned any documents.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_results_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self { server, requests: VecDeque::new(), no_results_count: 0 }
    }

    /// Scores `raw_query` against the wrapped server's [`Status::Actual`]
    /// documents and records whether the result was empty, evicting the
    /// oldest recorded request if the window is now over [`MIN_IN_DAY`].
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        let results = self.server.find_top_with(ExecutionPolicy::Sequential, raw_query, |_, status, _| {
            status == Status::Actual
        })?;

        let was_empty = results.is_empty();
        if was_empty {
            self.no_results_count += 1;
        }
        self.requests.push_back(QueryResult { was_empty });

        if self.requests.len() > MIN_IN_DAY {
            if let Some(evicted) = self.requests.pop_front() {
                if evicted.was_empty {
                    self.no_results_count -= 1;
                }
            }
        }

        Ok(results)
    }

    /// Number of the retained requests (at most [`MIN_IN_DAY`]) that
    /// returned no results.
    pub fn no_results_count(&self) -> usize {
        self.no_results_count
    }
}
