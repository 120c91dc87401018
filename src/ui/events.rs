//! Background task event processing.
//!
//! Every `AppEvent` is handled here, on the UI loop. This is the only place
//! headline completions reach the feed.

use crate::app::{App, AppEvent, Tab};
use crate::news::{Completion, FeedPhase};

pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::NewsFetched { ticket, outcome } => {
            let failed = outcome.is_err();
            match app.apply_news(ticket, outcome) {
                Completion::Applied { count } => {
                    tracing::info!(count, generation = ticket.generation(), "Headlines updated");
                    if failed && app.tab == Tab::News {
                        if let Some(kind) = app.feed.last_failure() {
                            app.set_status(format!("News unavailable ({})", kind.label()));
                        }
                    } else if app.feed.phase() == FeedPhase::Empty && app.tab == Tab::News {
                        app.set_status("No headlines right now");
                    }
                }
                Completion::Discarded => {}
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            app.set_status(format!("Internal error in {}: {}", task, error));
        }
    }
}
