//! Majority-vote orchestration.
//!
//! Ties the pieces together for one page:
//!
//! 1. validate the model list, weights and n-gram size
//! 2. make sure every model's answers are cached
//! 3. flatten the page HTML with the raw plaintext profile
//! 4. pad the page tokens and every model answer with sentinels
//! 5. vote on each real token and keep those that reach the threshold

use tracing::trace;

use crate::cache::ModelAnswerCache;
use crate::encoding;
use crate::error::Result;
use crate::html2text::{HtmlPlaintext, PlaintextExtractor};
use crate::options::{PlaintextOptions, VoteOptions};
use crate::tokenize::{pad_answer, pad_tokens, tokenize_ws};
use crate::vote::{accepts, tally, Ballot};

/// Majority-vote ensemble extractor bound to a model answer cache.
///
/// # Example
///
/// ```rust
/// use vote_extract::{MajorityVote, ModelAnswer, ModelAnswerCache, VoteOptions};
///
/// let cache = ModelAnswerCache::new("/unused");
/// cache.insert("m1", [("page", "A B C")].into_iter().collect::<ModelAnswer>());
///
/// let voter = MajorityVote::new(&cache);
/// let text = voter.extract(
///     "<html><body><p>A B C</p></body></html>",
///     "page",
///     &["m1"],
///     &[1.0],
///     &VoteOptions::new(1.0, 2),
/// )?;
/// assert_eq!(text, "A B C");
/// # Ok::<(), vote_extract::Error>(())
/// ```
#[derive(Debug)]
pub struct MajorityVote<'c, E = HtmlPlaintext> {
    cache: &'c ModelAnswerCache,
    extractor: E,
}

impl<'c> MajorityVote<'c> {
    /// Use the default `dom_query` plaintext extractor.
    #[must_use]
    pub fn new(cache: &'c ModelAnswerCache) -> Self {
        Self {
            cache,
            extractor: HtmlPlaintext,
        }
    }
}

impl<'c, E: PlaintextExtractor> MajorityVote<'c, E> {
    /// Use a custom HTML-to-plaintext extractor.
    pub fn with_extractor(cache: &'c ModelAnswerCache, extractor: E) -> Self {
        Self { cache, extractor }
    }

    /// The answer cache votes are read from.
    #[must_use]
    pub fn cache(&self) -> &'c ModelAnswerCache {
        self.cache
    }

    /// Build the consensus text for one HTML page.
    ///
    /// Configuration errors are raised before the cache is touched.
    /// Extractor errors are returned unchanged.
    pub fn extract<S: AsRef<str>>(
        &self,
        html: &str,
        page_id: &str,
        models: &[S],
        weights: &[f64],
        options: &VoteOptions,
    ) -> Result<String> {
        options.validate(models, weights)?;
        self.cache.ensure_loaded(models)?;

        let text = self
            .extractor
            .extract_plain_text(html, &PlaintextOptions::raw())?;
        Ok(self.vote_checked(&text, page_id, models, weights, options))
    }

    /// Build the consensus text for one page given as raw bytes.
    ///
    /// The charset is detected from the document before extraction.
    pub fn extract_bytes<S: AsRef<str>>(
        &self,
        html: &[u8],
        page_id: &str,
        models: &[S],
        weights: &[f64],
        options: &VoteOptions,
    ) -> Result<String> {
        options.validate(models, weights)?;
        let html = encoding::transcode_to_utf8(html);
        self.extract(&html, page_id, models, weights, options)
    }

    /// Vote on already-extracted page text, skipping HTML conversion.
    pub fn vote_text<S: AsRef<str>>(
        &self,
        text: &str,
        page_id: &str,
        models: &[S],
        weights: &[f64],
        options: &VoteOptions,
    ) -> Result<String> {
        options.validate(models, weights)?;
        self.cache.ensure_loaded(models)?;
        Ok(self.vote_checked(text, page_id, models, weights, options))
    }

    fn vote_checked<S: AsRef<str>>(
        &self,
        text: &str,
        page_id: &str,
        models: &[S],
        weights: &[f64],
        options: &VoteOptions,
    ) -> String {
        let padding = options.padding();
        let tokens = tokenize_ws(text);
        let padded = pad_tokens(&tokens, padding);

        let answers: Vec<String> = models
            .iter()
            .map(|model| {
                let answer = self.cache.get(model.as_ref());
                let page = answer.as_deref().and_then(|a| a.get(page_id)).unwrap_or("");
                pad_answer(page, padding)
            })
            .collect();
        let ballots: Vec<Ballot> = answers
            .iter()
            .zip(weights)
            .map(|(answer, weight)| Ballot::new(answer, *weight))
            .collect();

        let votes = tally(&padded, &ballots, options.vote_threshold, options.ngram_size);

        let real = padding..padded.len() - padding;
        let kept: Vec<&str> = padded[real.clone()]
            .iter()
            .zip(&votes[real])
            .filter(|(_, total)| accepts(**total, options.vote_threshold))
            .map(|(token, _)| *token)
            .collect();

        trace!(
            page_id,
            tokens = tokens.len(),
            kept = kept.len(),
            threshold = options.vote_threshold,
            "majority vote finished"
        );

        kept.join(" ")
    }
}
