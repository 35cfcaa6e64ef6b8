//! Token-overlap scoring for extraction benchmarks.
//!
//! An extractor's output is compared with a reference text (typically the
//! majority-vote consensus) as bags of whitespace tokens. Repeated tokens
//! count as many times as they occur, so an extractor that duplicates a
//! paragraph loses precision. [`score_words`] compares word tokens instead,
//! ignoring punctuation.

use std::collections::HashMap;

use crate::tokenize::{tokenize_words, tokenize_ws};

/// Precision, recall and F1 of a candidate text against a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenScore {
    /// Matched tokens / candidate tokens.
    pub precision: f64,
    /// Matched tokens / reference tokens.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

impl TokenScore {
    fn new(precision: f64, recall: f64) -> Self {
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
        }
    }

    /// Score for identical texts.
    #[must_use]
    pub fn perfect() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Score for texts with nothing in common.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Score `candidate` against `reference`.
///
/// Two empty texts score perfectly; if only one is empty the score is zero.
///
/// # Examples
///
/// ```
/// use vote_extract::scoring::score_tokens;
///
/// let score = score_tokens("the cat sat", "the cat sat on the mat");
/// assert_eq!(score.precision, 1.0);
/// assert_eq!(score.recall, 0.5);
/// ```
#[must_use]
pub fn score_tokens(candidate: &str, reference: &str) -> TokenScore {
    score_bags(&tokenize_ws(candidate), &tokenize_ws(reference))
}

/// Score `candidate` against `reference` on word tokens only.
///
/// Punctuation is dropped, so `"Hello, world!"` and `"Hello world"` match.
///
/// # Examples
///
/// ```
/// use vote_extract::scoring::score_words;
///
/// let score = score_words("Hello, world!", "Hello world");
/// assert_eq!(score.f1, 1.0);
/// ```
#[must_use]
pub fn score_words(candidate: &str, reference: &str) -> TokenScore {
    score_bags(&tokenize_words(candidate), &tokenize_words(reference))
}

fn score_bags(candidate: &[&str], reference: &[&str]) -> TokenScore {
    match (candidate.is_empty(), reference.is_empty()) {
        (true, true) => return TokenScore::perfect(),
        (true, false) | (false, true) => return TokenScore::zero(),
        (false, false) => {}
    }

    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for token in reference {
        *remaining.entry(*token).or_default() += 1;
    }

    let mut matched = 0usize;
    for token in candidate {
        if let Some(count) = remaining.get_mut(token).filter(|c| **c > 0) {
            *count -= 1;
            matched += 1;
        }
    }

    TokenScore::new(
        matched as f64 / candidate.len() as f64,
        matched as f64 / reference.len() as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_are_perfect() {
        let text = "The quick brown fox";
        assert_eq!(score_tokens(text, text), TokenScore::perfect());
    }

    #[test]
    fn disjoint_texts_score_zero() {
        assert_eq!(score_tokens("a b c", "x y z"), TokenScore::zero());
    }

    #[test]
    fn both_empty_is_perfect() {
        assert_eq!(score_tokens("", "  "), TokenScore::perfect());
    }

    #[test]
    fn one_empty_is_zero() {
        assert_eq!(score_tokens("", "a"), TokenScore::zero());
        assert_eq!(score_tokens("a", ""), TokenScore::zero());
    }

    #[test]
    fn duplicates_are_counted() {
        // Only one "fox" in the reference can be matched.
        let score = score_tokens("fox fox fox fox", "fox");
        assert_eq!(score.precision, 0.25);
        assert_eq!(score.recall, 1.0);
        assert!((score.f1 - 0.4).abs() < 1e-9);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(score_tokens("FOX", "fox"), TokenScore::zero());
    }

    #[test]
    fn word_scoring_ignores_punctuation() {
        assert_eq!(score_tokens("Hello, world!", "Hello world"), TokenScore::zero());
        assert_eq!(score_words("Hello, world!", "Hello world"), TokenScore::perfect());
        assert_eq!(score_words("...", "--"), TokenScore::perfect());
    }

    #[test]
    fn whitespace_is_normalized() {
        assert_eq!(score_tokens("a\n\nb\tc", " a b c "), TokenScore::perfect());
    }
}
