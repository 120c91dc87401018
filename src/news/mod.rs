//! Live headlines from the news endpoint.
//!
//! The pipeline is network → decode → publish → render:
//!
//! - [`client`] - One `GET` against the top-headlines endpoint, bounded body,
//!   decoded into the [`types`] schema. Returns a tagged result.
//! - [`types`] - `Article` / `Source` records and the response envelope.
//! - [`feed`] - [`FeedState`], the owned collection the UI renders. Failures
//!   collapse to an empty list here and nowhere else.
//!
//! # Example
//!
//! ```ignore
//! use watchdogs::news::{FeedState, NewsClient, StalePolicy};
//!
//! let client = NewsClient::new(&settings)?;
//! let mut feed = FeedState::new(StalePolicy::Discard);
//!
//! let ticket = feed.begin();
//! let outcome = client.fetch().await.map_err(|e| e.kind());
//! feed.complete(ticket, outcome);
//! ```

mod client;
mod feed;
mod types;

pub use client::{ClientBuildError, FetchError, NewsClient, NewsSettings, TOP_HEADLINES_PATH};
pub use feed::{Completion, FailureKind, FeedPhase, FeedState, FetchOutcome, FetchTicket, StalePolicy};
pub use types::{decode, Article, NewsResponse, Source, DESCRIPTION_FALLBACK};
