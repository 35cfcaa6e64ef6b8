//! Whitespace tokenization and boundary padding.
//!
//! Every token of a page is voted on using an n-gram window to its left and
//! to its right. Padding both ends of the page (and of every model answer)
//! with sentinel tokens gives tokens near the edges full-width windows.

use regex::Regex;
use std::sync::LazyLock;

/// Padding token. NUL never survives whitespace normalization of real text.
pub const SENTINEL: &str = "\0";

#[allow(clippy::expect_used)]
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Split text into whitespace-separated tokens.
///
/// Leading and trailing whitespace is ignored and runs of Unicode whitespace
/// count as a single separator. Empty or all-whitespace input yields no tokens.
/// Whitespace means the Unicode `White_Space` property, so the ASCII
/// information separators U+001C to U+001F stay inside tokens.
///
/// # Examples
///
/// ```
/// use vote_extract::tokenize::tokenize_ws;
///
/// assert_eq!(tokenize_ws("  A\tB\n\nC "), vec!["A", "B", "C"]);
/// assert!(tokenize_ws(" \n ").is_empty());
/// ```
#[must_use]
pub fn tokenize_ws(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Extract Unicode word tokens, skipping punctuation and symbols.
#[must_use]
pub fn tokenize_words(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Collapse all whitespace runs to single spaces and trim the ends.
#[must_use]
pub fn normalize_ws(text: &str) -> String {
    tokenize_ws(text).join(" ")
}

/// Surround a token sequence with `count` sentinels on each side.
#[must_use]
pub fn pad_tokens<'a>(tokens: &[&'a str], count: usize) -> Vec<&'a str> {
    let mut padded = Vec::with_capacity(tokens.len().saturating_add(count.saturating_mul(2)));
    padded.extend(std::iter::repeat(SENTINEL).take(count));
    padded.extend_from_slice(tokens);
    padded.extend(std::iter::repeat(SENTINEL).take(count));
    padded
}

/// Surround a normalized answer string with `count` sentinel tokens on each
/// side, plus one space at either end.
///
/// The outer spaces keep the answer's first and last tokens space-delimited,
/// so they can be found by [`space_wrap`]ped windows just like inner tokens.
#[must_use]
pub fn pad_answer(answer: &str, count: usize) -> String {
    let mut padded = String::with_capacity(answer.len().saturating_add(count.saturating_mul(4)).saturating_add(2));
    padded.push(' ');
    for _ in 0..count {
        padded.push_str(SENTINEL);
        padded.push(' ');
    }
    padded.push_str(answer);
    for _ in 0..count {
        padded.push(' ');
        padded.push_str(SENTINEL);
    }
    padded.push(' ');
    padded
}

/// Join tokens with single spaces and wrap the result in one space on each side.
///
/// The outer spaces anchor substring search on token boundaries so that
/// `" B C "` never matches inside `"AB CD"`.
#[must_use]
pub fn space_wrap(tokens: &[&str]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.len() + 1).sum::<usize>() + 1);
    out.push(' ');
    for token in tokens {
        out.push_str(token);
        out.push(' ');
    }
    if tokens.is_empty() {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_ws_splits_on_unicode_whitespace() {
        assert_eq!(tokenize_ws("a\u{00A0}b\u{2003}c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn tokenize_ws_keeps_information_separators() {
        assert_eq!(tokenize_ws("a\u{1f}b \u{1c}"), vec!["a\u{1f}b", "\u{1c}"]);
    }

    #[test]
    fn tokenize_ws_keeps_punctuation_attached() {
        assert_eq!(tokenize_ws("Hello, world!"), vec!["Hello,", "world!"]);
    }

    #[test]
    fn tokenize_ws_does_not_split_on_sentinel() {
        assert!(!'\0'.is_whitespace());
        assert_eq!(tokenize_ws("\0 a \0"), vec!["\0", "a", "\0"]);
    }

    #[test]
    fn tokenize_words_drops_punctuation() {
        assert_eq!(tokenize_words("Hello, wörld! 42"), vec!["Hello", "wörld", "42"]);
    }

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  one\n\ntwo\t three  "), "one two three");
    }

    #[test]
    fn pad_tokens_adds_sentinels_on_both_sides() {
        let padded = pad_tokens(&["A", "B"], 2);
        assert_eq!(padded, vec![SENTINEL, SENTINEL, "A", "B", SENTINEL, SENTINEL]);
    }

    #[test]
    fn pad_tokens_zero_is_identity() {
        assert_eq!(pad_tokens(&["A"], 0), vec!["A"]);
    }

    #[test]
    fn pad_answer_matches_wrapped_padded_tokens() {
        let tokens = pad_tokens(&["A", "B", "C"], 3);
        assert_eq!(pad_answer("A B C", 3), space_wrap(&tokens));
    }

    #[test]
    fn pad_answer_without_sentinels_still_delimits_edges() {
        assert_eq!(pad_answer("A B", 0), " A B ");
    }

    #[test]
    fn space_wrap_anchors_on_token_boundaries() {
        assert_eq!(space_wrap(&["B", "C"]), " B C ");
        assert!(!"AB CD".contains(&space_wrap(&["B", "C"])));
    }
}
