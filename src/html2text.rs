//! HTML-to-plaintext conversion.
//!
//! The majority vote compares the full text of a page against each model's
//! output, so the page is flattened with every filter turned off (see
//! [`PlaintextOptions::raw`]). [`PlaintextExtractor`] is the seam for plugging
//! in a different converter; [`HtmlPlaintext`] is the default one, a plain
//! `dom_query` tree walk.

use dom_query::{Document, NodeRef, Selection};

use crate::error::Result;
use crate::options::PlaintextOptions;
use crate::tokenize::normalize_ws;

/// Selector for the main content element when `main_content` is enabled.
const MAIN_CONTENT_SELECTOR: &str = "main, article, [role=main]";

/// Bullet prefix for list items when `list_bullets` is enabled.
const LIST_BULLET: &str = "\u{2022} ";

/// Converts an HTML document into plaintext.
pub trait PlaintextExtractor {
    /// Extract the text of `html` according to `options`.
    ///
    /// Errors are passed through the majority vote unchanged.
    fn extract_plain_text(&self, html: &str, options: &PlaintextOptions) -> Result<String>;
}

impl<F> PlaintextExtractor for F
where
    F: Fn(&str, &PlaintextOptions) -> Result<String>,
{
    fn extract_plain_text(&self, html: &str, options: &PlaintextOptions) -> Result<String> {
        self(html, options)
    }
}

/// Default extractor backed by `dom_query`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPlaintext;

impl PlaintextExtractor for HtmlPlaintext {
    fn extract_plain_text(&self, html: &str, options: &PlaintextOptions) -> Result<String> {
        Ok(html_to_plaintext(html, options))
    }
}

/// Convert `html` to plaintext.
///
/// Text of `<script>`, `<style>`, `<template>`, `<svg>`, `<iframe>` and the
/// document head is never emitted. Block-level elements separate their
/// content; inline elements do not. Without `preserve_formatting` the result
/// is a single whitespace-normalized line.
///
/// `<noscript>` content is emitted only with `noscript` enabled. A head
/// `<noscript>` that holds block markup is closed by the parser and its
/// content moved into the body, so that text is emitted either way.
///
/// # Examples
///
/// ```
/// use vote_extract::html2text::html_to_plaintext;
/// use vote_extract::PlaintextOptions;
///
/// let html = "<html><head><title>T</title></head><body><p>Hello <b>wor</b>ld</p><p>Bye</p></body></html>";
/// assert_eq!(html_to_plaintext(html, &PlaintextOptions::raw()), "Hello world Bye");
/// ```
#[must_use]
pub fn html_to_plaintext(html: &str, options: &PlaintextOptions) -> String {
    let doc = Document::from(html);

    let mut root = doc.select("body");
    if options.main_content {
        let main = doc.select(MAIN_CONTENT_SELECTOR).first();
        if main.length() > 0 {
            root = main;
        }
    }

    let mut writer = TextWriter::new(options);
    if let Some(node) = root.nodes().first() {
        writer.walk_children(node);
    }
    writer.finish()
}

struct TextWriter<'o> {
    out: String,
    options: &'o PlaintextOptions,
}

impl<'o> TextWriter<'o> {
    fn new(options: &'o PlaintextOptions) -> Self {
        Self {
            out: String::new(),
            options,
        }
    }

    fn walk_children(&mut self, node: &NodeRef) {
        for child in node.children() {
            self.walk(&child);
        }
    }

    fn walk(&mut self, node: &NodeRef) {
        if node.is_text() {
            self.push_text(&node.text());
            return;
        }
        if !node.is_element() {
            return;
        }
        let Some(name) = node.node_name() else {
            return;
        };
        let tag = name.to_ascii_lowercase();
        let el = Selection::from(*node);

        match tag.as_str() {
            "script" | "style" | "template" | "head" | "svg" | "iframe" => {}
            "br" | "hr" => self.push_break(),
            "noscript" => {
                if self.options.noscript {
                    self.push_break();
                    self.walk_children(node);
                    self.push_break();
                }
            }
            "img" | "area" => {
                if self.options.alt_texts {
                    if let Some(alt) = el.attr("alt") {
                        self.push_text(&format!(" {alt} "));
                    }
                }
            }
            "input" => {
                if self.options.form_fields {
                    let kind = el.attr("type").map(|t| t.to_ascii_lowercase());
                    if kind.as_deref() != Some("hidden") {
                        if let Some(value) = el.attr("value").or_else(|| el.attr("placeholder")) {
                            self.push_text(&format!(" {value} "));
                        }
                    }
                }
            }
            "textarea" | "select" | "button" => {
                if self.options.form_fields {
                    self.push_text(" ");
                    self.walk_children(node);
                    self.push_text(" ");
                }
            }
            "a" => {
                self.walk_children(node);
                if self.options.links {
                    if let Some(href) = el.attr("href").filter(|h| !h.trim().is_empty()) {
                        self.push_text(&format!(" ({href}) "));
                    }
                }
            }
            "li" => {
                self.push_break();
                if self.options.list_bullets {
                    self.out.push_str(LIST_BULLET);
                }
                self.walk_children(node);
                self.push_break();
            }
            "td" | "th" => {
                self.push_text(" ");
                self.walk_children(node);
                self.push_text(" ");
            }
            _ if is_block(&tag) => {
                self.push_break();
                self.walk_children(node);
                self.push_break();
            }
            _ => self.walk_children(node),
        }
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if text.starts_with(char::is_whitespace) {
            self.out.push(' ');
        }
        let mut words = text.split_whitespace();
        if let Some(first) = words.next() {
            self.out.push_str(first);
            for word in words {
                self.out.push(' ');
                self.out.push_str(word);
            }
            if text.ends_with(char::is_whitespace) {
                self.out.push(' ');
            }
        }
    }

    fn push_break(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        if !self.options.preserve_formatting {
            return normalize_ws(&self.out);
        }
        self.out
            .lines()
            .map(normalize_ws)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "section"
            | "article"
            | "main"
            | "header"
            | "footer"
            | "nav"
            | "aside"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "dl"
            | "dt"
            | "dd"
            | "table"
            | "thead"
            | "tbody"
            | "tfoot"
            | "tr"
            | "caption"
            | "blockquote"
            | "pre"
            | "figure"
            | "figcaption"
            | "form"
            | "fieldset"
            | "address"
            | "details"
            | "summary"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(html: &str) -> String {
        html_to_plaintext(html, &PlaintextOptions::raw())
    }

    #[test]
    fn skips_scripts_and_styles() {
        let html = "<body><script>var x = 1;</script><style>p{}</style><p>Visible</p></body>";
        assert_eq!(raw(html), "Visible");
    }

    #[test]
    fn blocks_separate_words_inline_does_not() {
        let html = "<body><div>one</div><div>two</div><span>thr</span><em>ee</em></body>";
        assert_eq!(raw(html), "one two three");
    }

    #[test]
    fn raw_profile_keeps_navigation_and_footer() {
        let html = "<body><nav>Menu</nav><article><p>Story</p></article><footer>Legal</footer></body>";
        assert_eq!(raw(html), "Menu Story Legal");
    }

    #[test]
    fn main_content_narrows_to_article() {
        let html = "<body><nav>Menu</nav><article><p>Story</p></article><footer>Legal</footer></body>";
        let options = PlaintextOptions {
            main_content: true,
            ..PlaintextOptions::raw()
        };
        assert_eq!(html_to_plaintext(html, &options), "Story");
    }

    #[test]
    fn alt_text_only_when_enabled() {
        let html = r#"<body><p>Pic <img src="x.png" alt="A cat"> here</p></body>"#;
        assert_eq!(raw(html), "Pic here");
        let options = PlaintextOptions {
            alt_texts: true,
            ..PlaintextOptions::raw()
        };
        assert_eq!(html_to_plaintext(html, &options), "Pic A cat here");
    }

    #[test]
    fn noscript_only_when_enabled() {
        let html = "<head><noscript><p>head ns</p></noscript></head>\
                    <body><p>Before</p><noscript><p>Enable <b>JS</b></p></noscript><p>After</p></body>";
        assert_eq!(raw(html), "head ns Before After");
        let options = PlaintextOptions {
            noscript: true,
            ..PlaintextOptions::raw()
        };
        assert_eq!(html_to_plaintext(html, &options), "head ns Before Enable JS After");
    }

    #[test]
    fn link_text_kept_targets_only_when_enabled() {
        let html = r#"<body><p>See <a href="https://example.com/">this page</a>.</p></body>"#;
        assert_eq!(raw(html), "See this page.");
        let options = PlaintextOptions {
            links: true,
            ..PlaintextOptions::raw()
        };
        assert_eq!(
            html_to_plaintext(html, &options),
            "See this page (https://example.com/) ."
        );
    }

    #[test]
    fn form_fields_only_when_enabled() {
        let html = r#"<body><form><input type="text" value="typed"><button>Send</button><textarea>Notes</textarea></form><p>Body</p></body>"#;
        assert_eq!(raw(html), "Body");
        let options = PlaintextOptions {
            form_fields: true,
            ..PlaintextOptions::raw()
        };
        assert_eq!(html_to_plaintext(html, &options), "typed Send Notes Body");
    }

    #[test]
    fn hidden_inputs_never_emitted() {
        let html = r#"<body><form><input type="hidden" value="token123"></form></body>"#;
        let options = PlaintextOptions {
            form_fields: true,
            ..PlaintextOptions::raw()
        };
        assert_eq!(html_to_plaintext(html, &options), "");
    }

    #[test]
    fn formatting_keeps_block_lines_and_bullets() {
        let html = "<body><h1>Title</h1><ul><li>first</li><li>second</li></ul><p>end\n  of   text</p></body>";
        let options = PlaintextOptions {
            preserve_formatting: true,
            list_bullets: true,
            ..PlaintextOptions::raw()
        };
        assert_eq!(
            html_to_plaintext(html, &options),
            "Title\n\u{2022} first\n\u{2022} second\nend of text"
        );
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(raw(""), "");
    }

    #[test]
    fn closures_are_extractors() {
        let upper = |html: &str, _: &PlaintextOptions| -> Result<String> { Ok(html.to_uppercase()) };
        let text = upper
            .extract_plain_text("abc", &PlaintextOptions::raw())
            .expect("closure extractor");
        assert_eq!(text, "ABC");
    }
}
