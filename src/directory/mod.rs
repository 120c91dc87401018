//! Static roster of politicians and tracked legislation.
//!
//! This data never changes while the app runs. It is either the built-in
//! sample roster or a TOML file loaded once at startup, and is handed to the
//! UI as an immutable [`Directory`].
//!
//! # File format
//!
//! ```toml
//! [[politicians]]
//! name = "John Doe"
//! district = "District 1"
//! state = "California"
//! party = "Democratic"
//!
//! [[legislation]]
//! name = "Bill A"
//! summary = "Summary of Bill A"
//! sponsor = "Sponsor A"
//! committees = "Committees A"
//! stage = "passed-senate"
//! latest_action = { action = "Passed Senate", date = "April 20, 2024" }
//! ```

mod stage;

pub use stage::BillStage;

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in roster file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Placeholder blurb shown under "Related News" when a bill has none.
pub const RELATED_NEWS_PLACEHOLDER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Sed eget libero euismod, bibendum ex sit amet, facilisis dui. Donec nec nunc sollicitudin, \
dapibus velit non, fermentum risus. Nam commodo volutpat erat nec egestas.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Politician {
    pub name: String,
    /// Portrait asset name; kept for rosters shared with graphical clients.
    #[serde(default)]
    pub portrait: Option<String>,
    pub district: String,
    pub state: String,
    pub party: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LatestAction {
    pub action: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Legislation {
    pub name: String,
    pub summary: String,
    pub sponsor: String,
    pub committees: String,
    pub latest_action: LatestAction,
    #[serde(default)]
    pub stage: BillStage,
    #[serde(default = "default_related_news")]
    pub related_news: String,
}

fn default_related_news() -> String {
    RELATED_NEWS_PLACEHOLDER.to_string()
}

/// Everything the Politicians and Legislation tabs render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub politicians: Vec<Politician>,
    #[serde(default)]
    pub legislation: Vec<Legislation>,
}

impl Directory {
    /// The sample roster shipped with the app.
    pub fn builtin() -> Self {
        let politician = |name: &str, portrait: &str, district: &str, state: &str, party: &str| {
            Politician {
                name: name.to_string(),
                portrait: Some(portrait.to_string()),
                district: district.to_string(),
                state: state.to_string(),
                party: party.to_string(),
            }
        };

        let bill = |letter: &str| Legislation {
            name: format!("Bill {letter}"),
            summary: format!("Summary of Bill {letter}"),
            sponsor: format!("Sponsor {letter}"),
            committees: format!("Committees {letter}"),
            latest_action: LatestAction {
                action: "Passed Senate".to_string(),
                date: "April 20, 2024".to_string(),
            },
            stage: BillStage::ToPresident,
            related_news: default_related_news(),
        };

        Self {
            politicians: vec![
                politician("John Doe", "politician1", "District 1", "California", "Democratic"),
                politician("Jane Smith", "politician2", "District 2", "New York", "Republican"),
                politician("Robert Johnson", "politician3", "District 3", "Texas", "Independent"),
            ],
            legislation: vec![bill("A"), bill("B"), bill("C")],
        }
    }

    /// Load a roster file, falling back to [`Directory::builtin`] when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No roster file found, using built-in roster");
                return Ok(Self::builtin());
            }
            Err(e) => return Err(DirectoryError::Io(e)),
        };

        let directory: Directory = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            politicians = directory.politicians.len(),
            legislation = directory.legislation.len(),
            "Loaded roster"
        );
        Ok(directory)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::builtin()
    }
}
