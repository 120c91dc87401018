//! Response schema for the top-headlines endpoint.
//!
//! Only the fields the app renders are modelled. Anything else in the
//! payload (`status`, `totalResults`, `author`, `urlToImage`, ...) is ignored
//! by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Text shown in place of a missing article description.
pub const DESCRIPTION_FALLBACK: &str = "No description available";

/// Top-level envelope: `{ "articles": [...] }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
}

/// The outlet an article was published by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    pub id: Option<String>,
    pub name: String,
}

/// One headline.
///
/// Identity is the `url`: `PartialEq` and `Hash` look at nothing else, so two
/// records with the same link compare equal even if the server edited the
/// title between requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub source: Source,
    /// Raw `publishedAt` value. Kept as text so an odd timestamp never
    /// fails the whole decode.
    #[serde(rename = "publishedAt", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl Article {
    /// Description, or [`DESCRIPTION_FALLBACK`] when the server sent none.
    pub fn description_or_fallback(&self) -> &str {
        self.description.as_deref().unwrap_or(DESCRIPTION_FALLBACK)
    }

    /// Publish time, if present and valid RFC 3339.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

/// Parse a response body into articles, preserving server order.
///
/// A missing required field, a wrong type or truncated JSON fails the whole
/// body; there is no per-item recovery.
pub fn decode(body: &[u8]) -> Result<Vec<Article>, serde_json::Error> {
    let response: NewsResponse = serde_json::from_slice(body)?;
    Ok(response.articles)
}
