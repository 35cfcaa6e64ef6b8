//! Model answer cache.
//!
//! Model outputs live on disk as one JSONL file per (dataset, model) pair:
//!
//! ```text
//! {root}/{dataset}/{model}.jsonl
//! ```
//!
//! Each record carries at least `page_id` and `plaintext`. The cache loads a
//! model's records from every dataset on first reference and keeps them for
//! its lifetime. Entries are never evicted or modified after loading.
//!
//! Loading is guarded per model name, so concurrent first references share a
//! single disk scan. Once a model is loaded, lookups only take a read lock.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::jsonl;
use crate::tokenize::normalize_ws;

/// Environment variable naming the model outputs root directory.
pub const MODEL_OUTPUTS_ENV: &str = "MODEL_OUTPUTS_PATH";

/// Outputs root used when [`MODEL_OUTPUTS_ENV`] is unset.
pub const DEFAULT_MODEL_OUTPUTS_PATH: &str = "outputs/model-outputs";

/// Stable identifier of a document.
pub type PageId = String;

#[derive(Debug, Deserialize)]
struct AnswerRecord {
    page_id: PageId,
    plaintext: String,
}

/// One model's normalized plaintext answers, keyed by page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelAnswer {
    pages: HashMap<PageId, String>,
}

impl ModelAnswer {
    /// Answer text for `page_id`, if the model produced one.
    #[must_use]
    pub fn get(&self, page_id: &str) -> Option<&str> {
        self.pages.get(page_id).map(String::as_str)
    }

    /// Number of pages with an answer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the model answered no pages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over the page ids this model answered.
    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ModelAnswer
where
    K: Into<PageId>,
    V: AsRef<str>,
{
    /// Build an answer map in memory. Text is whitespace-normalized the same
    /// way as answers loaded from disk.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), normalize_ws(v.as_ref())))
                .collect(),
        }
    }
}

/// Memoized model answers, shared by every extraction that uses the same root.
#[derive(Debug)]
pub struct ModelAnswerCache {
    root: PathBuf,
    answers: RwLock<HashMap<String, Arc<ModelAnswer>>>,
    loading: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ModelAnswerCache {
    /// Create an empty cache reading model outputs below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            answers: RwLock::new(HashMap::new()),
            loading: Mutex::new(HashMap::new()),
        }
    }

    /// Create an empty cache rooted at `$MODEL_OUTPUTS_PATH`, or
    /// `outputs/model-outputs` if the variable is unset.
    #[must_use]
    pub fn from_env() -> Self {
        let root = std::env::var_os(MODEL_OUTPUTS_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_MODEL_OUTPUTS_PATH), PathBuf::from);
        Self::new(root)
    }

    /// Root directory scanned for dataset subdirectories.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Insert an in-memory answer map for `model` unless one is already cached.
    ///
    /// Returns `false` and leaves the cache untouched if `model` was present.
    pub fn insert(&self, model: impl Into<String>, answer: ModelAnswer) -> bool {
        let mut answers = self.answers.write().unwrap_or_else(PoisonError::into_inner);
        let model = model.into();
        if answers.contains_key(&model) {
            return false;
        }
        answers.insert(model, Arc::new(answer));
        true
    }

    /// Whether `model` has been loaded.
    #[must_use]
    pub fn contains(&self, model: &str) -> bool {
        self.answers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(model)
    }

    /// Names of all loaded models, sorted.
    #[must_use]
    pub fn models(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .answers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Loaded answers for `model`, if any.
    #[must_use]
    pub fn get(&self, model: &str) -> Option<Arc<ModelAnswer>> {
        self.answers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(model)
            .cloned()
    }

    /// Load every model in `models` that is not cached yet.
    ///
    /// Models without an output file in any dataset are cached as empty
    /// answer maps. A malformed record aborts loading with [`Error::Parse`]
    /// and nothing is cached for that model.
    pub fn ensure_loaded<S: AsRef<str>>(&self, models: &[S]) -> Result<()> {
        for model in models {
            let model = model.as_ref();
            if self.contains(model) {
                continue;
            }

            let guard = self.load_guard(model);
            let _loading = guard.lock().unwrap_or_else(PoisonError::into_inner);

            // Another thread may have finished loading while we waited.
            if self.contains(model) {
                continue;
            }

            let answer = self.load_from_disk(model)?;
            self.insert(model, answer);
        }
        Ok(())
    }

    fn load_guard(&self, model: &str) -> Arc<Mutex<()>> {
        let mut loading = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(loading.entry(model.to_string()).or_default())
    }

    fn load_from_disk(&self, model: &str) -> Result<ModelAnswer> {
        let mut pages = HashMap::new();
        let mut files = 0usize;

        for dataset in self.dataset_dirs()? {
            let path = dataset.join(format!("{model}.jsonl"));
            if !path.is_file() {
                continue;
            }
            debug!(model, path = %path.display(), "reading model outputs");
            files += 1;

            for record in jsonl::read_records::<AnswerRecord>(&path)? {
                pages.insert(record.page_id, normalize_ws(&record.plaintext));
            }
        }

        if files == 0 {
            warn!(model, root = %self.root.display(), "no output files found for model");
        } else {
            info!(model, files, pages = pages.len(), "loaded model answers");
        }

        Ok(ModelAnswer { pages })
    }

    /// Dataset subdirectories of the root in sorted order.
    ///
    /// A missing root means there are no datasets.
    fn dataset_dirs(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))? {
            let path = entry.map_err(|e| Error::io(&self.root, e))?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}
