//! GDELT DOC 2.0 article search.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use url::Url;

use super::{FetchParams, Transport};
use crate::error::{Error, Result};

/// DOC 2.0 API endpoint.
pub const GDELT_DOC_API: &str = "http://api.gdeltproject.org/api/v2/doc/doc";

#[allow(clippy::expect_used)]
static TIMESPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(days|weeks|months|years)$").expect("valid regex"));

/// Output mode of a DOC API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GdeltMode {
    /// List of matching articles. The only mode that yields documents.
    #[default]
    ArtList,
    /// Coverage volume over time.
    TimelineVol,
    /// Average tone over time.
    TimelineTone,
    /// Histogram of article tone.
    ToneChart,
}

impl GdeltMode {
    const ALL: [GdeltMode; 4] = [
        GdeltMode::ArtList,
        GdeltMode::TimelineVol,
        GdeltMode::TimelineTone,
        GdeltMode::ToneChart,
    ];

    fn as_str(self) -> &'static str {
        match self {
            GdeltMode::ArtList => "ArtList",
            GdeltMode::TimelineVol => "TimelineVol",
            GdeltMode::TimelineTone => "TimelineTone",
            GdeltMode::ToneChart => "ToneChart",
        }
    }
}

impl fmt::Display for GdeltMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GdeltMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GdeltMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidQuery(format!("unknown GDELT mode '{s}'")))
    }
}

/// Look-back window such as `1weeks` or `3months`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timespan(String);

impl Default for Timespan {
    fn default() -> Self {
        Self("1weeks".into())
    }
}

impl Timespan {
    /// The value as sent to the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Timespan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if TIMESPAN_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidQuery(format!(
                "invalid timespan '{s}', expected Xdays, Xweeks, Xmonths or Xyears"
            )))
        }
    }
}

/// Search query built from keyword, domain and language filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GdeltQuery(String);

impl GdeltQuery {
    /// Combine the filters into a query string.
    ///
    /// At least one filter must be non-empty.
    ///
    /// ```
    /// use vote_extract::source::GdeltQuery;
    ///
    /// let query = GdeltQuery::build("covid", "", "english")?;
    /// assert_eq!(query.as_str(), "covid sourceLang:english");
    /// # Ok::<(), vote_extract::Error>(())
    /// ```
    pub fn build(keyword: &str, domain: &str, language: &str) -> Result<Self> {
        let keyword = keyword.trim();
        let domain = domain.trim();
        let language = language.trim();
        if keyword.is_empty() && domain.is_empty() && language.is_empty() {
            return Err(Error::InvalidQuery(
                "at least one of keyword, domain or language is required".into(),
            ));
        }

        let mut parts = Vec::with_capacity(3);
        if !keyword.is_empty() {
            parts.push(keyword.to_string());
        }
        if !domain.is_empty() {
            parts.push(format!("domain:{domain}"));
        }
        if !language.is_empty() {
            parts.push(format!("sourceLang:{language}"));
        }
        Ok(Self(parts.join(" ")))
    }

    /// The rendered query.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full API request URL.
    pub fn request_url(&self, mode: GdeltMode, timespan: &Timespan) -> Result<Url> {
        Url::parse_with_params(
            GDELT_DOC_API,
            &[
                ("query", self.as_str()),
                ("mode", mode.as_str()),
                ("timespan", timespan.as_str()),
                ("format", "json"),
            ],
        )
        .map_err(|e| Error::InvalidQuery(e.to_string()))
    }
}

/// One entry of an `ArtList` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    /// Article URL.
    pub url: String,
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// First-seen timestamp, e.g. `20240115T103000Z`.
    #[serde(default)]
    pub seendate: String,
    /// Publisher domain.
    #[serde(default)]
    pub domain: String,
}

impl Article {
    /// Parsed first-seen timestamp.
    #[must_use]
    pub fn seen_at(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.seendate, "%Y%m%dT%H%M%SZ")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Deserialize)]
struct ArtListResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// Decode an `ArtList` JSON body.
pub(crate) fn parse_articles(body: &[u8]) -> Result<Vec<Article>> {
    let response: ArtListResponse = serde_json::from_slice(body)
        .map_err(|e| Error::InvalidQuery(format!("unexpected GDELT response: {e}")))?;
    Ok(response.articles)
}

pub(crate) fn article_urls(params: &FetchParams, transport: &dyn Transport) -> Result<Vec<Url>> {
    if params.mode != GdeltMode::ArtList {
        return Err(Error::InvalidQuery(format!(
            "GDELT mode {} does not return articles",
            params.mode
        )));
    }
    let query = GdeltQuery::build(&params.keyword, &params.domain, &params.language)?;
    let request = query.request_url(params.mode, &params.timespan)?;
    let articles = parse_articles(&transport.get(&request)?)?;

    Ok(articles
        .iter()
        .filter_map(|article| Url::parse(&article.url).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn query_needs_a_filter() {
        assert!(matches!(GdeltQuery::build("", " ", ""), Err(Error::InvalidQuery(_))));
    }

    #[test]
    fn query_renders_all_filters() {
        let query = GdeltQuery::build("climate", "bbc.co.uk", "english").expect("query");
        assert_eq!(query.as_str(), "climate domain:bbc.co.uk sourceLang:english");
    }

    #[test]
    fn request_url_encodes_parameters() {
        let query = GdeltQuery::build("climate change", "", "").expect("query");
        let url = query
            .request_url(GdeltMode::ArtList, &Timespan::default())
            .expect("url");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("query".into(), "climate change".into())));
        assert!(pairs.contains(&("mode".into(), "ArtList".into())));
        assert!(pairs.contains(&("timespan".into(), "1weeks".into())));
        assert!(pairs.contains(&("format".into(), "json".into())));
    }

    #[test]
    fn timespan_validation() {
        assert!("3months".parse::<Timespan>().is_ok());
        assert!("12days".parse::<Timespan>().is_ok());
        assert!("weeks".parse::<Timespan>().is_err());
        assert!("3fortnights".parse::<Timespan>().is_err());
    }

    #[test]
    fn mode_parsing_is_case_insensitive() {
        assert_eq!("artlist".parse::<GdeltMode>().expect("mode"), GdeltMode::ArtList);
        assert!("WordCloud".parse::<GdeltMode>().is_err());
    }

    #[test]
    fn parses_article_list() {
        let body = br#"{"articles":[{"url":"https://example.com/a","title":"A","seendate":"20240115T103000Z","domain":"example.com","language":"English"}]}"#;
        let articles = parse_articles(body).expect("articles");
        assert_eq!(articles.len(), 1);
        let seen = articles[0].seen_at().expect("timestamp");
        assert_eq!((seen.year(), seen.month(), seen.day()), (2024, 1, 15));
        assert_eq!((seen.hour(), seen.minute()), (10, 30));
    }

    #[test]
    fn empty_response_has_no_articles() {
        assert!(parse_articles(b"{}").expect("articles").is_empty());
    }
}
