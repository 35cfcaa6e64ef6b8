//! # vote-extract
//!
//! Majority-vote ensemble for content-extraction benchmarks.
//!
//! Several extractors produce plaintext for the same page. This crate fuses
//! their outputs into one consensus text that serves as pseudo ground truth:
//! every token of the page's full text is kept only if enough (weighted)
//! extractors produced it in the same n-gram context.
//!
//! ## Quick Start
//!
//! ```rust
//! use vote_extract::{extract_majority_vote, ModelAnswer, ModelAnswerCache};
//!
//! let cache = ModelAnswerCache::new("outputs/model-outputs");
//! cache.insert("m1", [("p1", "the cat sat on the mat")].into_iter().collect::<ModelAnswer>());
//! cache.insert("m2", [("p1", "the cat sat")].into_iter().collect::<ModelAnswer>());
//!
//! let html = "<html><body><nav>Home</nav><p>the cat sat on the mat</p></body></html>";
//! let consensus = extract_majority_vote(&cache, html, "p1", &["m1", "m2"], &[1.0, 1.0], 2.0, 2)?;
//! assert_eq!(consensus, "the cat sat");
//! # Ok::<(), vote_extract::Error>(())
//! ```
//!
//! ## Model outputs
//!
//! Answers are read lazily from `{root}/{dataset}/{model}.jsonl`, one JSON
//! record per line with at least `page_id` and `plaintext`. See [`cache`].

mod error;
mod extract;
mod options;

/// Model answer cache backed by JSONL output files.
pub mod cache;

/// Ensemble configuration files.
pub mod config;

/// Charset detection for raw HTML bytes.
pub mod encoding;

/// HTML-to-plaintext conversion.
pub mod html2text;

/// JSONL readers.
pub mod jsonl;

/// Token-overlap scoring against a reference text.
pub mod scoring;

/// Document sources for building datasets.
pub mod source;

/// Whitespace tokenization and sentinel padding.
pub mod tokenize;

/// N-gram matching and vote aggregation.
pub mod vote;

// Public API - re-exports
pub use cache::{ModelAnswer, ModelAnswerCache, PageId};
pub use config::{EnsembleConfig, ModelSpec};
pub use error::{Error, Result};
pub use extract::MajorityVote;
pub use html2text::{HtmlPlaintext, PlaintextExtractor};
pub use options::{PlaintextOptions, VoteOptions, DEFAULT_NGRAM_SIZE, MAX_NGRAM_SIZE};

/// Builds the consensus text of one page by majority vote.
///
/// # Arguments
///
/// * `cache` - Answer cache; missing models are loaded from disk on first use
/// * `html` - The page's HTML
/// * `page_id` - Identifier of the page in the model outputs
/// * `input_models` - Voting models, in evaluation order
/// * `model_weights` - One non-negative weight per model
/// * `vote_threshold` - Minimum weighted vote for a token to be kept (inclusive)
/// * `ngram_size` - Context window length, from 1 to [`MAX_NGRAM_SIZE`] (see [`DEFAULT_NGRAM_SIZE`])
///
/// # Errors
///
/// * [`Error::Configuration`] for an empty model list, mismatched weights or
///   an out-of-range `ngram_size`, before any I/O
/// * [`Error::Parse`] if a model output file holds a malformed record
/// * [`Error::Io`] if an output directory or file exists but cannot be read
pub fn extract_majority_vote<S: AsRef<str>>(
    cache: &ModelAnswerCache,
    html: &str,
    page_id: &str,
    input_models: &[S],
    model_weights: &[f64],
    vote_threshold: f64,
    ngram_size: usize,
) -> Result<String> {
    MajorityVote::new(cache).extract(
        html,
        page_id,
        input_models,
        model_weights,
        &VoteOptions::new(vote_threshold, ngram_size),
    )
}
