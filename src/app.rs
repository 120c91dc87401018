use crate::directory::{Directory, Legislation, Politician};
use crate::news::{Article, Completion, FeedState, FetchOutcome, FetchTicket, NewsClient, StalePolicy};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

// ============================================================================
// Tabs and Views
// ============================================================================

/// Top-level screens, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Politicians,
    Legislation,
    News,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Politicians, Tab::Legislation, Tab::News];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Politicians => "Politicians",
            Tab::Legislation => "Legislation",
            Tab::News => "News",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Whether the active tab shows its list or the selected item's detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks
pub enum AppEvent {
    /// A headline request finished.
    ///
    /// Fields:
    /// - `ticket`: issued by `FeedState::begin` when the request started
    /// - `outcome`: the article list, or the collapsed failure kind
    NewsFetched {
        ticket: FetchTicket,
        outcome: FetchOutcome,
    },
    /// A background task panicked.
    ///
    /// Fields:
    /// - `task`: Name of the task that panicked
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// App State
// ============================================================================

pub struct App {
    /// Roster for the Politicians and Legislation tabs. Never mutated.
    pub directory: Arc<Directory>,

    pub news_client: NewsClient,

    /// Headlines shown on the News tab. Written only by `apply_news`.
    pub feed: FeedState,

    /// Handle of the in-flight headline task, if any.
    pub news_handle: Option<tokio::task::JoinHandle<()>>,

    pub tab: Tab,
    pub view: View,

    /// Selected row per tab, indexed by `Tab::index`.
    pub selected: [usize; 3],

    /// Legislation detail: summary section expanded.
    pub summary_expanded: bool,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Only redraw when state changed.
    pub needs_redraw: bool,

    /// Loading spinner frame for the News tab.
    pub spinner_frame: usize,
}

impl App {
    pub fn new(
        directory: Directory,
        news_client: NewsClient,
        policy: StalePolicy,
        theme_variant: ThemeVariant,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            news_client,
            feed: FeedState::new(policy),
            news_handle: None,
            tab: Tab::Politicians,
            view: View::List,
            selected: [0; 3],
            summary_expanded: false,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Cycle to the next theme variant; returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.theme_variant = next;
        self.theme = StyleMap::from_palette(&next.palette());
        self.needs_redraw = true;
        next.name()
    }

    // ------------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------------

    /// Make `tab` the active screen.
    ///
    /// Returns true when the tab actually changed, i.e. the screen just
    /// became visible. Any open detail view is closed.
    pub fn switch_tab(&mut self, tab: Tab) -> bool {
        if self.tab == tab {
            return false;
        }
        tracing::debug!(from = self.tab.title(), to = tab.title(), "Switching tab");
        self.tab = tab;
        self.view = View::List;
        self.summary_expanded = false;
        self.needs_redraw = true;
        true
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    fn list_len(&self, tab: Tab) -> usize {
        match tab {
            Tab::Politicians => self.directory.politicians.len(),
            Tab::Legislation => self.directory.legislation.len(),
            Tab::News => self.feed.articles().len(),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected[self.tab.index()]
    }

    pub fn nav_down(&mut self) {
        let len = self.list_len(self.tab);
        let idx = &mut self.selected[self.tab.index()];
        if len > 0 && *idx + 1 < len {
            *idx += 1;
        }
    }

    pub fn nav_up(&mut self) {
        let idx = &mut self.selected[self.tab.index()];
        *idx = idx.saturating_sub(1);
    }

    pub fn nav_first(&mut self) {
        self.selected[self.tab.index()] = 0;
    }

    pub fn nav_last(&mut self) {
        let len = self.list_len(self.tab);
        self.selected[self.tab.index()] = len.saturating_sub(1);
    }

    /// Keep every tab's selection inside its list.
    pub fn clamp_selections(&mut self) {
        for tab in Tab::ALL {
            let len = self.list_len(tab);
            let idx = &mut self.selected[tab.index()];
            *idx = (*idx).min(len.saturating_sub(1));
        }
    }

    pub fn selected_politician(&self) -> Option<&Politician> {
        self.directory
            .politicians
            .get(self.selected[Tab::Politicians.index()])
    }

    pub fn selected_legislation(&self) -> Option<&Legislation> {
        self.directory
            .legislation
            .get(self.selected[Tab::Legislation.index()])
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.feed
            .articles()
            .get(self.selected[Tab::News.index()])
    }

    // ------------------------------------------------------------------------
    // Detail views
    // ------------------------------------------------------------------------

    /// Open the detail view for the selected row.
    ///
    /// Headlines have no detail screen; returns false there and on empty lists.
    pub fn open_detail(&mut self) -> bool {
        let has_item = match self.tab {
            Tab::Politicians => self.selected_politician().is_some(),
            Tab::Legislation => self.selected_legislation().is_some(),
            Tab::News => false,
        };
        if has_item {
            self.view = View::Detail;
            self.summary_expanded = false;
        }
        has_item
    }

    pub fn close_detail(&mut self) {
        self.view = View::List;
        self.summary_expanded = false;
    }

    pub fn toggle_summary(&mut self) {
        if self.tab == Tab::Legislation && self.view == View::Detail {
            self.summary_expanded = !self.summary_expanded;
        }
    }

    // ------------------------------------------------------------------------
    // Headlines
    // ------------------------------------------------------------------------

    /// Hand a finished fetch to the feed and fix up the News selection.
    pub fn apply_news(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> Completion {
        let finished_latest = self.feed.is_current(ticket);
        let completion = self.feed.complete(ticket, outcome);

        if finished_latest {
            self.news_handle = None;
        }

        if let Completion::Applied { count } = completion {
            tracing::debug!(count, generation = ticket.generation(), "Headlines published");
            self.selected[Tab::News.index()] = 0;
            self.clamp_selections();
            self.needs_redraw = true;
        }

        completion
    }

    // ------------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------------

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
