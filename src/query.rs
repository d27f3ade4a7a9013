//! Query parsing: splits a raw query string into plus-words and minus-words.
//!
//! Grounded on `original_source/search-server/search_server.cpp`'s
//! `ParseQueryWord`/`ParseQueryFast`/`ParseQuerySorted`, which keep two
//! parsing entry points: an unsorted one (tolerates duplicates, feeds the
//! parallel path) and a sorted+deduped one (feeds the sequential path and
//! the matcher). spec.md §4.4 calls these the "raw" and "sorted" shapes.

use crate::error::SearchError;
use crate::tokenizer;
use std::collections::BTreeSet;

/// Plus/minus words as they appear in the query, duplicates intact. Used by
/// the parallel scorer, where additions are commutative and erase is
/// idempotent.
#[derive(Debug, Clone, Default)]
pub struct RawQuery<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

/// Plus/minus words, each sorted and deduplicated. Used by the sequential
/// scorer and by the matcher.
#[derive(Debug, Clone, Default)]
pub struct SortedQuery<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

enum ParsedWord<'a> {
    Plus(&'a str),
    Minus(&'a str),
    Stop,
}

fn parse_word<'a>(
    token: &'a str,
    is_stop_word: &impl Fn(&str) -> bool,
) -> Result<ParsedWord<'a>, SearchError> {
    let (is_minus, text) = if let Some(rest) = token.strip_prefix('-') {
        (true, rest)
    } else {
        (false, token)
    };

    if is_minus && (text.is_empty() || text.starts_with('-')) {
        return Err(SearchError::InvalidMinusWord(token.to_string()));
    }
    if !tokenizer::is_valid(text) {
        return Err(SearchError::InvalidCharacters(token.to_string()));
    }
    if is_stop_word(text) {
        return Ok(ParsedWord::Stop);
    }
    Ok(if is_minus { ParsedWord::Minus(text) } else { ParsedWord::Plus(text) })
}

/// Parses `raw_query` into the raw (duplicate-tolerant) shape.
pub fn parse_raw<'a>(
    raw_query: &'a str,
    is_stop_word: impl Fn(&str) -> bool,
) -> Result<RawQuery<'a>, SearchError> {
    let mut query = RawQuery::default();
    for token in tokenizer::split(raw_query) {
        match parse_word(token, &is_stop_word)? {
            ParsedWord::Plus(w) => query.plus_words.push(w),
            ParsedWord::Minus(w) => query.minus_words.push(w),
            ParsedWord::Stop => {}
        }
    }
    Ok(query)
}

/// Parses `raw_query` into the sorted, deduplicated shape.
pub fn parse_sorted<'a>(
    raw_query: &'a str,
    is_stop_word: impl Fn(&str) -> bool,
) -> Result<SortedQuery<'a>, SearchError> {
    let mut plus: BTreeSet<&str> = BTreeSet::new();
    let mut minus: BTreeSet<&str> = BTreeSet::new();
    for token in tokenizer::split(raw_query) {
        match parse_word(token, &is_stop_word)? {
            ParsedWord::Plus(w) => {
                plus.insert(w);
            }
            ParsedWord::Minus(w) => {
                minus.insert(w);
            }
            ParsedWord::Stop => {}
        }
    }
    Ok(SortedQuery {
        plus_words: plus.into_iter().collect(),
        minus_words: minus.into_iter().collect(),
    })
}
