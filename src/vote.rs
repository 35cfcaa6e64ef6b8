//! N-gram matching and weighted vote aggregation.
//!
//! For every real token of a padded page, two context windows of
//! `ngram_size` tokens are built: one ending at the token and one starting at
//! it. A model votes for the token if either window occurs in its padded
//! answer. Votes are weighted per model and a token survives when its total
//! reaches the threshold.
//!
//! ```text
//! ngram_size = 2, page = "A B C"
//!
//! padded:   \0  A  B  C  \0
//! token B:     [A  B]          left  = " A B "
//!                 [B  C]       right = " B C "
//! ```

use crate::tokenize::space_wrap;

/// A model's padded answer for one page together with its vote weight.
#[derive(Debug, Clone, Copy)]
pub struct Ballot<'a> {
    /// Padded answer text. Empty when the model has no answer for the page.
    pub answer: &'a str,
    /// Non-negative weight added when the model votes for a token.
    pub weight: f64,
}

impl<'a> Ballot<'a> {
    /// Create a ballot.
    #[must_use]
    pub fn new(answer: &'a str, weight: f64) -> Self {
        Self { answer, weight }
    }

    /// Whether this model's answer supports either context window.
    #[must_use]
    pub fn supports(&self, window: &ContextWindow) -> bool {
        self.answer.contains(&window.left) || self.answer.contains(&window.right)
    }
}

/// Space-wrapped left and right n-grams around one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    /// N-gram ending at the token.
    pub left: String,
    /// N-gram starting at the token.
    pub right: String,
}

impl ContextWindow {
    /// Build the windows for `tokens[index]`.
    ///
    /// `index` must have `ngram_size - 1` tokens on both sides, which padding
    /// guarantees for every real token.
    ///
    /// # Panics
    ///
    /// Panics if `ngram_size` is zero or the windows run past either end.
    #[must_use]
    pub fn around(tokens: &[&str], index: usize, ngram_size: usize) -> Self {
        debug_assert!(ngram_size >= 1, "ngram_size must be at least 1");
        let reach = ngram_size - 1;
        Self {
            left: space_wrap(&tokens[index - reach..=index]),
            right: space_wrap(&tokens[index..=index + reach]),
        }
    }
}

/// Sum ballot weights for one token, stopping once `threshold` is reached.
///
/// Weights are non-negative, so stopping early never changes whether the
/// total reaches the threshold.
#[must_use]
pub fn count_votes(window: &ContextWindow, ballots: &[Ballot], threshold: f64) -> f64 {
    let mut total = 0.0;
    for ballot in ballots {
        if ballot.supports(window) {
            total += ballot.weight;
        }
        if total >= threshold {
            break;
        }
    }
    total
}

/// Vote on every interior token of a padded sequence.
///
/// Returns one total per padded position. Padding positions are never voted
/// on and keep a total of zero. An `ngram_size` of zero votes on nothing.
#[must_use]
pub fn tally(padded: &[&str], ballots: &[Ballot], threshold: f64, ngram_size: usize) -> Vec<f64> {
    let mut votes = vec![0.0; padded.len()];
    if ngram_size == 0 {
        return votes;
    }
    let reach = ngram_size.saturating_sub(1);
    let end = (padded.len() + 1).saturating_sub(ngram_size);

    for (index, total) in votes.iter_mut().enumerate().take(end).skip(reach) {
        let window = ContextWindow::around(padded, index, ngram_size);
        *total = count_votes(&window, ballots, threshold);
    }

    votes
}

/// Whether a vote total keeps its token. Ties pass.
#[inline]
#[must_use]
pub fn accepts(total: f64, threshold: f64) -> bool {
    total >= threshold
}
