//! URL list files.

use std::fs;
use std::path::Path;

use tracing::warn;
use url::Url;

use crate::error::{Error, Result};

/// Read one URL per line, skipping blank lines.
///
/// Lines that are not absolute http(s) URLs are skipped with a warning.
pub fn read_url_list(path: &Path) -> Result<Vec<Url>> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut urls = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match Url::parse(line) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
                urls.push(url);
            }
            _ => warn!(path = %path.display(), line = idx + 1, value = line, "skipping invalid URL"),
        }
    }

    Ok(urls)
}
