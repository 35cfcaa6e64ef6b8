//! Document sources for building benchmark datasets.
//!
//! A source turns query parameters into fetched HTML documents and persists
//! them under a dataset directory. The set of sources is closed and selected
//! by tag:
//!
//! | Tag       | Source                                  |
//! |-----------|-----------------------------------------|
//! | `gdelt`   | GDELT DOC 2.0 article list              |
//! | `urllist` | Plain text file with one URL per line   |
//!
//! Network access goes through [`Transport`], which callers implement with
//! the HTTP client of their choice. Sources never retry.

mod gdelt;
mod url_list;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sha2::{Digest, Sha256};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};

pub use gdelt::{Article, GdeltMode, GdeltQuery, Timespan, GDELT_DOC_API};
pub use url_list::read_url_list;

/// Subdirectory of the destination holding fetched HTML files.
pub const DOCUMENTS_DIR: &str = "custom";

/// Subdirectory of the destination mapping document ids to source URLs.
pub const ASSOCIATION_DIR: &str = "url_association";

/// Blocking HTTP GET used by document sources.
pub trait Transport {
    /// Fetch the body of `url`.
    ///
    /// Network and HTTP status failures should be reported as [`Error::Fetch`].
    fn get(&self, url: &Url) -> Result<Vec<u8>>;
}

/// A fetched page and the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    /// Source URL.
    pub url: String,
    /// Raw response body.
    pub content: Vec<u8>,
}

impl FetchedDocument {
    /// Content-addressed id: hex SHA-256 of the body.
    #[must_use]
    pub fn id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.content);
        hex::encode(hasher.finalize())
    }
}

/// Parameters shared by all sources. Each source reads the fields it needs.
#[derive(Debug, Clone, Default)]
pub struct FetchParams {
    /// Free-text keyword (GDELT).
    pub keyword: String,
    /// Restrict to a publisher domain (GDELT).
    pub domain: String,
    /// Source language, e.g. `english` (GDELT).
    pub language: String,
    /// Output mode (GDELT).
    pub mode: GdeltMode,
    /// Look-back window (GDELT).
    pub timespan: Timespan,
    /// File with one URL per line (URL list).
    pub url_file: Option<PathBuf>,
}

/// Fetch and persist documents.
pub trait DocumentSource {
    /// Fetch every document matching `params`.
    fn fetch(&self, params: &FetchParams, transport: &dyn Transport) -> Result<Vec<FetchedDocument>>;

    /// Write documents below `destination`, returning the HTML file paths.
    ///
    /// Each document is stored as `custom/{id}.html` with its source URL in
    /// `url_association/{id}.txt`.
    fn persist(&self, documents: &[FetchedDocument], destination: &Path) -> Result<Vec<PathBuf>> {
        persist_documents(documents, destination)
    }
}

/// Closed set of document sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// GDELT DOC 2.0 API.
    Gdelt,
    /// Local URL list file.
    UrlList,
}

impl SourceKind {
    /// All sources, in tag order.
    pub const ALL: [SourceKind; 2] = [SourceKind::Gdelt, SourceKind::UrlList];

    /// Tag used to select this source.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            SourceKind::Gdelt => "gdelt",
            SourceKind::UrlList => "urllist",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let tags: Vec<&str> = SourceKind::ALL.iter().map(|k| k.tag()).collect();
                Error::InvalidQuery(format!("unknown source '{s}', expected one of: {}", tags.join(", ")))
            })
    }
}

impl DocumentSource for SourceKind {
    fn fetch(&self, params: &FetchParams, transport: &dyn Transport) -> Result<Vec<FetchedDocument>> {
        let urls = match self {
            SourceKind::Gdelt => gdelt::article_urls(params, transport)?,
            SourceKind::UrlList => {
                let path = params.url_file.as_deref().ok_or_else(|| {
                    Error::InvalidQuery("the urllist source needs a URL file".into())
                })?;
                read_url_list(path)?
            }
        };
        info!(source = %self, urls = urls.len(), "fetching documents");
        fetch_all(&urls, transport)
    }
}

fn fetch_all(urls: &[Url], transport: &dyn Transport) -> Result<Vec<FetchedDocument>> {
    urls.iter()
        .map(|url| {
            debug!(%url, "GET");
            Ok(FetchedDocument {
                url: url.to_string(),
                content: transport.get(url)?,
            })
        })
        .collect()
}

/// Write documents as content-addressed HTML files plus URL association files.
pub fn persist_documents(documents: &[FetchedDocument], destination: &Path) -> Result<Vec<PathBuf>> {
    let docs_dir = destination.join(DOCUMENTS_DIR);
    let assoc_dir = destination.join(ASSOCIATION_DIR);
    fs::create_dir_all(&docs_dir).map_err(|e| Error::io(&docs_dir, e))?;
    fs::create_dir_all(&assoc_dir).map_err(|e| Error::io(&assoc_dir, e))?;

    let mut written = Vec::with_capacity(documents.len());
    for doc in documents {
        let id = doc.id();
        let html_path = docs_dir.join(format!("{id}.html"));
        let assoc_path = assoc_dir.join(format!("{id}.txt"));
        fs::write(&html_path, &doc.content).map_err(|e| Error::io(&html_path, e))?;
        fs::write(&assoc_path, &doc.url).map_err(|e| Error::io(&assoc_path, e))?;
        written.push(html_path);
    }

    info!(destination = %destination.display(), documents = written.len(), "persisted documents");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in SourceKind::ALL {
            assert_eq!(kind.tag().parse::<SourceKind>().expect("known tag"), kind);
        }
        assert_eq!(" GDELT ".parse::<SourceKind>().expect("case-insensitive"), SourceKind::Gdelt);
    }

    #[test]
    fn unknown_tag_lists_choices() {
        match "newsplease".parse::<SourceKind>() {
            Err(Error::InvalidQuery(msg)) => assert!(msg.contains("gdelt, urllist")),
            other => panic!("expected InvalidQuery, got {other:?}"),
        }
    }

    #[test]
    fn document_id_is_sha256_of_content() {
        let doc = FetchedDocument {
            url: "https://example.com/".into(),
            content: b"abc".to_vec(),
        };
        assert_eq!(
            doc.id(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
