//! Configuration options for majority voting and plaintext extraction.
//!
//! [`VoteOptions`] controls how model answers are combined, while
//! [`PlaintextOptions`] controls how the page HTML is flattened before voting.

use crate::error::{Error, Result};

/// Default n-gram context length.
pub const DEFAULT_NGRAM_SIZE: usize = 5;

/// Largest accepted n-gram context length.
pub const MAX_NGRAM_SIZE: usize = 1 << 16;

/// Parameters for the token-level majority vote.
///
/// # Example
///
/// ```rust
/// use vote_extract::VoteOptions;
///
/// let options = VoteOptions {
///     vote_threshold: 2.0,
///     ..VoteOptions::default()
/// };
/// assert_eq!(options.ngram_size, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteOptions {
    /// Minimum weighted vote sum a token needs to be kept.
    ///
    /// Comparison is inclusive: a token whose total equals the threshold is kept.
    /// A threshold of `0.0` keeps every token.
    ///
    /// Default: `1.0`
    pub vote_threshold: f64,

    /// Context length used to build the left and right matching windows.
    ///
    /// Must be between `1` and [`MAX_NGRAM_SIZE`].
    ///
    /// Default: `5`
    pub ngram_size: usize,
}

impl Default for VoteOptions {
    fn default() -> Self {
        Self {
            vote_threshold: 1.0,
            ngram_size: DEFAULT_NGRAM_SIZE,
        }
    }
}

impl VoteOptions {
    /// Create options with the given threshold and n-gram size.
    #[must_use]
    pub fn new(vote_threshold: f64, ngram_size: usize) -> Self {
        Self {
            vote_threshold,
            ngram_size,
        }
    }

    /// Number of sentinel tokens placed on each side of a padded sequence.
    #[must_use]
    pub fn padding(&self) -> usize {
        self.ngram_size.saturating_sub(1)
    }

    /// Check the options against a model list and its weights.
    ///
    /// Runs before any I/O so misconfigured calls fail fast.
    pub fn validate(&self, models: &[impl AsRef<str>], weights: &[f64]) -> Result<()> {
        if models.is_empty() {
            return Err(Error::Configuration("at least one input model is required".into()));
        }
        if models.len() != weights.len() {
            return Err(Error::Configuration(format!(
                "got {} models but {} weights",
                models.len(),
                weights.len()
            )));
        }
        if self.ngram_size == 0 {
            return Err(Error::Configuration("ngram_size must be at least 1".into()));
        }
        if self.ngram_size > MAX_NGRAM_SIZE {
            return Err(Error::Configuration(format!(
                "ngram_size {} exceeds the maximum of {MAX_NGRAM_SIZE}",
                self.ngram_size
            )));
        }
        if self.vote_threshold.is_nan() {
            return Err(Error::Configuration("vote_threshold must be a number".into()));
        }
        if let Some((model, weight)) = models
            .iter()
            .zip(weights)
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(Error::Configuration(format!(
                "weight {weight} for model '{}' must be finite and non-negative",
                model.as_ref()
            )));
        }
        Ok(())
    }
}

/// Options for converting HTML to plaintext.
///
/// The default value matches [`PlaintextOptions::raw`], the profile used for
/// voting, so the page and every model are compared on unfiltered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PlaintextOptions {
    /// Restrict output to the main content element (`<main>`, `<article>`, `[role=main]`).
    pub main_content: bool,

    /// Keep line breaks between block-level elements.
    pub preserve_formatting: bool,

    /// Prefix list items with a bullet marker.
    pub list_bullets: bool,

    /// Append link targets after link text.
    pub links: bool,

    /// Emit image alt text.
    pub alt_texts: bool,

    /// Emit `<noscript>` content.
    pub noscript: bool,

    /// Emit form field values, labels on buttons and option text.
    pub form_fields: bool,
}

impl PlaintextOptions {
    /// Full-text profile with every filter and decoration turned off.
    #[must_use]
    pub fn raw() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_five_gram_windows() {
        let options = VoteOptions::default();
        assert_eq!(options.ngram_size, 5);
        assert_eq!(options.padding(), 4);
    }

    #[test]
    fn unigram_has_no_padding() {
        assert_eq!(VoteOptions::new(1.0, 1).padding(), 0);
    }

    #[test]
    fn validate_rejects_empty_models() {
        let models: [&str; 0] = [];
        let err = VoteOptions::default().validate(&models, &[]);
        assert!(matches!(err, Err(Error::Configuration(_))));
    }

    #[test]
    fn validate_rejects_length_mismatch() {
        let err = VoteOptions::default().validate(&["a", "b"], &[1.0]);
        assert!(matches!(err, Err(Error::Configuration(_))));
    }

    #[test]
    fn validate_rejects_zero_ngram() {
        let err = VoteOptions::new(1.0, 0).validate(&["a"], &[1.0]);
        assert!(matches!(err, Err(Error::Configuration(_))));
    }

    #[test]
    fn validate_bounds_ngram_size() {
        assert!(VoteOptions::new(1.0, MAX_NGRAM_SIZE).validate(&["a"], &[1.0]).is_ok());
        for ngram_size in [MAX_NGRAM_SIZE + 1, usize::MAX] {
            let err = VoteOptions::new(1.0, ngram_size).validate(&["a"], &[1.0]);
            assert!(matches!(err, Err(Error::Configuration(_))), "ngram_size {ngram_size}");
        }
    }

    #[test]
    fn validate_rejects_negative_weight() {
        let err = VoteOptions::default().validate(&["a", "b"], &[1.0, -0.5]);
        match err {
            Err(Error::Configuration(msg)) => assert!(msg.contains("'b'")),
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_zero_threshold_and_zero_weight() {
        assert!(VoteOptions::new(0.0, 3).validate(&["a", "b"], &[0.0, 1.0]).is_ok());
    }

    #[test]
    fn raw_profile_turns_everything_off() {
        let raw = PlaintextOptions::raw();
        assert!(!raw.main_content);
        assert!(!raw.preserve_formatting);
        assert!(!raw.list_bullets);
        assert!(!raw.links);
        assert!(!raw.alt_texts);
        assert!(!raw.noscript);
        assert!(!raw.form_fields);
        assert_eq!(raw, PlaintextOptions::default());
    }
}
