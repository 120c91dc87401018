//! The published headline list and its single mutation point.
//!
//! `FeedState` is owned by the app and written only from the UI loop, when a
//! fetch completion event is handled. Renderers read it through
//! [`FeedState::articles`], which is always a valid (possibly empty) slice.
//!
//! Each trigger takes a [`FetchTicket`] from [`FeedState::begin`]. The ticket
//! carries a generation number so a completion can be matched against the
//! most recent request; what happens to an out-of-date completion is decided
//! by the [`StalePolicy`].

use crate::news::types::Article;
use serde::Deserialize;
use std::collections::HashSet;

/// Coarse failure classes. Both are rendered the same way (empty list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Unreachable host, timeout, non-2xx status, oversized body.
    Transport,
    /// Body did not match the expected schema.
    Decode,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::Transport => "network",
            FailureKind::Decode => "bad response",
        }
    }
}

/// Tagged result of one fetch, as handed to [`FeedState::complete`].
pub type FetchOutcome = Result<Vec<Article>, FailureKind>;

/// What to do with a completion that belongs to an older request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Apply every completion in arrival order (last writer wins). A slow
    /// early request can overwrite a newer result.
    Overwrite,
    /// Only the latest request may write. Older completions are dropped and
    /// their tasks aborted on retrigger.
    #[default]
    Discard,
}

/// Lifecycle of the feed between triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Fetching,
    /// Last applied completion produced at least one article.
    Populated,
    /// Last applied completion produced nothing, or failed.
    Empty,
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of handing a completion to the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The collection was replaced; `count` is the new length.
    Applied { count: usize },
    /// The completion was older than the latest request and was ignored.
    Discarded,
}

/// The article collection currently available for display.
#[derive(Debug)]
pub struct FeedState {
    articles: Vec<Article>,
    phase: FeedPhase,
    last_failure: Option<FailureKind>,
    latest_generation: u64,
    policy: StalePolicy,
}

impl FeedState {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            articles: Vec::new(),
            phase: FeedPhase::Idle,
            last_failure: None,
            latest_generation: 0,
            policy,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// Failure kind of the last applied completion, `None` after a success.
    pub fn last_failure(&self) -> Option<FailureKind> {
        self.last_failure
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FeedPhase::Idle | FeedPhase::Fetching)
    }

    /// Register a new request and return its ticket.
    ///
    /// The current articles stay visible until the completion arrives.
    pub fn begin(&mut self) -> FetchTicket {
        self.latest_generation = self.latest_generation.wrapping_add(1);
        self.phase = FeedPhase::Fetching;
        FetchTicket {
            generation: self.latest_generation,
        }
    }

    /// Whether `ticket` belongs to the most recently started request.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.latest_generation
    }

    /// Apply a completion. This is the only way the collection changes.
    ///
    /// Success replaces the whole collection in server order, dropping any
    /// later article whose url was already seen. Failure resets it to empty;
    /// the previous contents are never kept.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> Completion {
        if self.policy == StalePolicy::Discard && !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.latest_generation,
                "Discarding stale headline completion"
            );
            return Completion::Discarded;
        }

        match outcome {
            Ok(articles) => {
                self.articles = dedup_by_url(articles);
                self.last_failure = None;
            }
            Err(kind) => {
                tracing::debug!(generation = ticket.generation, kind = kind.label(), "Headline fetch failed, showing empty list");
                self.articles = Vec::new();
                self.last_failure = Some(kind);
            }
        }

        self.phase = if self.articles.is_empty() {
            FeedPhase::Empty
        } else {
            FeedPhase::Populated
        };

        Completion::Applied {
            count: self.articles.len(),
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}

/// Keep the first article for each url, preserving order.
fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let total = articles.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let unique: Vec<Article> = articles
        .into_iter()
        .filter(|a| seen.insert(a.url.clone()))
        .collect();

    if unique.len() < total {
        tracing::debug!(dropped = total - unique.len(), "Dropped headlines with duplicate urls");
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::Source;
    use pretty_assertions::assert_eq;

    fn article(title: &str, url: &str) -> Article {
        Article {
            title: title.to_string(),
            description: Some(format!("About {title}")),
            url: url.to_string(),
            source: Source {
                id: None,
                name: "S".to_string(),
            },
            published_at: None,
        }
    }

    fn titles(feed: &FeedState) -> Vec<&str> {
        feed.articles().iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let feed = FeedState::default();
        assert_eq!(feed.phase(), FeedPhase::Idle);
        assert!(feed.articles().is_empty());
        assert!(feed.is_loading());
        assert_eq!(feed.policy(), StalePolicy::Discard);
    }

    #[test]
    fn test_success_populates_in_order() {
        let mut feed = FeedState::default();
        let ticket = feed.begin();
        assert_eq!(feed.phase(), FeedPhase::Fetching);

        let result = feed.complete(
            ticket,
            Ok(vec![article("A", "u1"), article("B", "u2"), article("C", "u3")]),
        );

        assert_eq!(result, Completion::Applied { count: 3 });
        assert_eq!(feed.phase(), FeedPhase::Populated);
        assert_eq!(titles(&feed), vec!["A", "B", "C"]);
        assert_eq!(feed.last_failure(), None);
    }

    #[test]
    fn test_empty_success_is_empty_phase() {
        let mut feed = FeedState::default();
        let ticket = feed.begin();
        feed.complete(ticket, Ok(Vec::new()));

        assert_eq!(feed.phase(), FeedPhase::Empty);
        assert_eq!(feed.last_failure(), None);
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_failure_resets_to_empty() {
        let mut feed = FeedState::default();
        let first = feed.begin();
        feed.complete(first, Ok(vec![article("A", "u1")]));

        let second = feed.begin();
        // Prior articles stay visible while the request is in flight
        assert_eq!(feed.articles().len(), 1);

        feed.complete(second, Err(FailureKind::Transport));
        assert!(feed.articles().is_empty());
        assert_eq!(feed.phase(), FeedPhase::Empty);
        assert_eq!(feed.last_failure(), Some(FailureKind::Transport));
    }

    #[test]
    fn test_success_after_failure_clears_failure() {
        let mut feed = FeedState::default();
        let t = feed.begin();
        feed.complete(t, Err(FailureKind::Decode));
        let t = feed.begin();
        feed.complete(t, Ok(vec![article("A", "u1")]));

        assert_eq!(feed.last_failure(), None);
        assert_eq!(feed.phase(), FeedPhase::Populated);
    }

    #[test]
    fn test_duplicate_urls_keep_first() {
        let mut feed = FeedState::default();
        let ticket = feed.begin();
        feed.complete(
            ticket,
            Ok(vec![
                article("First", "u1"),
                article("Other", "u2"),
                article("Repeat", "u1"),
            ]),
        );

        assert_eq!(titles(&feed), vec!["First", "Other"]);
    }

    #[test]
    fn test_replace_not_merge() {
        let mut feed = FeedState::default();
        let t = feed.begin();
        feed.complete(t, Ok(vec![article("A", "u1"), article("B", "u2")]));
        let t = feed.begin();
        feed.complete(t, Ok(vec![article("C", "u3")]));

        assert_eq!(titles(&feed), vec!["C"]);
    }

    #[test]
    fn test_same_payload_twice_is_idempotent() {
        let payload = vec![article("A", "u1"), article("B", "u2")];
        let mut feed = FeedState::default();

        let t = feed.begin();
        feed.complete(t, Ok(payload.clone()));
        let first: Vec<(String, String)> = feed
            .articles()
            .iter()
            .map(|a| (a.url.clone(), a.title.clone()))
            .collect();

        let t = feed.begin();
        feed.complete(t, Ok(payload));
        let second: Vec<(String, String)> = feed
            .articles()
            .iter()
            .map(|a| (a.url.clone(), a.title.clone()))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_discard_policy_drops_stale_completion() {
        let mut feed = FeedState::new(StalePolicy::Discard);
        let slow = feed.begin();
        let fast = feed.begin();

        assert_eq!(
            feed.complete(fast, Ok(vec![article("Fresh", "u2")])),
            Completion::Applied { count: 1 }
        );
        assert_eq!(
            feed.complete(slow, Ok(vec![article("Stale", "u1")])),
            Completion::Discarded
        );
        assert_eq!(titles(&feed), vec!["Fresh"]);
    }

    #[test]
    fn test_discard_policy_stale_failure_does_not_clear() {
        let mut feed = FeedState::new(StalePolicy::Discard);
        let slow = feed.begin();
        let fast = feed.begin();
        feed.complete(fast, Ok(vec![article("Fresh", "u2")]));
        feed.complete(slow, Err(FailureKind::Transport));

        assert_eq!(titles(&feed), vec!["Fresh"]);
        assert_eq!(feed.last_failure(), None);
    }

    #[test]
    fn test_discard_policy_keeps_fetching_until_latest_arrives() {
        let mut feed = FeedState::new(StalePolicy::Discard);
        let old = feed.begin();
        let _new = feed.begin();
        feed.complete(old, Ok(vec![article("Old", "u1")]));

        assert_eq!(feed.phase(), FeedPhase::Fetching);
        assert!(feed.articles().is_empty());
    }

    // Last-writer-wins: a slow first request overwrites the fresher result.
    #[test]
    fn test_overwrite_policy_lets_stale_completion_win() {
        let mut feed = FeedState::new(StalePolicy::Overwrite);
        let slow = feed.begin();
        let fast = feed.begin();

        feed.complete(fast, Ok(vec![article("Fresh", "u2")]));
        assert_eq!(
            feed.complete(slow, Ok(vec![article("Stale", "u1")])),
            Completion::Applied { count: 1 }
        );
        assert_eq!(titles(&feed), vec!["Stale"]);
    }

    #[test]
    fn test_ticket_generations_increase() {
        let mut feed = FeedState::default();
        let a = feed.begin();
        let b = feed.begin();
        assert!(b.generation() > a.generation());
        assert!(feed.is_current(b));
        assert!(!feed.is_current(a));
    }

    #[test]
    fn test_stale_policy_from_config_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: StalePolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"overwrite\"").unwrap();
        assert_eq!(w.policy, StalePolicy::Overwrite);
        let w: Wrapper = toml::from_str("policy = \"discard\"").unwrap();
        assert_eq!(w.policy, StalePolicy::Discard);
    }
}
