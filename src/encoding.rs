//! Charset detection for raw HTML bytes.
//!
//! Pages in benchmark datasets are stored as they were crawled, so the bytes
//! may be in any legacy encoding. The charset is taken from a byte-order mark
//! or from a `<meta>` declaration near the top of the document, falling back
//! to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;
use std::sync::LazyLock;

/// Bytes of the document searched for a charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// `<meta charset="...">` and `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid regex")
});

/// Detect the encoding of an HTML document.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = &html[..html.len().min(SNIFF_LIMIT)];
    META_CHARSET_RE
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Undecodable sequences become U+FFFD rather than failing.
///
/// # Examples
///
/// ```
/// use vote_extract::encoding::transcode_to_utf8;
///
/// let html = b"<meta charset=\"ISO-8859-1\"><p>Caf\xE9</p>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let (text, _, _) = detect_encoding(html).decode(html);
    text.into_owned()
}
