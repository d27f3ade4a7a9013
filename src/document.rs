//! The [`Document`] result type and document lifecycle [`Status`].

use std::fmt;

/// Lifecycle status of an indexed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Actual = 0,
    Irrelevant = 1,
    Banned = 2,
    Removed = 3,
}

/// A single ranked result returned by [`crate::SearchServer::find_top`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Document {
    pub id: i64,
    pub relevance: f64,
    pub rating: i64,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Truncated-toward-zero mean of `ratings`, `0` for an empty slice.
pub(crate) fn compute_average_rating(ratings: &[i64]) -> i64 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().sum();
    sum / ratings.len() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[7, 2, 7]), 5);
        assert_eq!(compute_average_rating(&[1, 2, 3]), 2);
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[-1, -2]), -1);
    }

    #[test]
    fn document_display_matches_cli_contract() {
        let doc = Document { id: 1, relevance: 0.5, rating: 3 };
        assert_eq!(format!("{doc}"), "{ document_id = 1, relevance = 0.5, rating = 3 }");
    }
}
