//! Helper functions for UI operations.
//!
//! Background task spawning, panic capture, and the open-in-browser path.

use crate::app::{App, AppEvent, Tab};
use crate::news::{FailureKind, FetchOutcome, StalePolicy};
use crate::util::validate_url_for_open;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Panics inside a spawned task would otherwise vanish into the runtime and
/// leave the UI waiting forever for a completion event.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Start one headline request in the background.
///
/// Under [`StalePolicy::Discard`] the previous in-flight task is aborted; its
/// completion could never be applied anyway. Under `Overwrite` the earlier
/// task keeps running and its result lands whenever it arrives.
///
/// The task always reports back with `AppEvent::NewsFetched`, even when the
/// fetch panics, so the feed never stays in the loading phase.
pub(super) fn spawn_news_fetch(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.news_handle.take() {
        if app.feed.policy() == StalePolicy::Discard {
            handle.abort();
            tracing::debug!("Aborted previous headline task");
        }
    }

    let ticket = app.feed.begin();
    let client = app.news_client.clone();
    let tx = event_tx.clone();

    tracing::debug!(generation = ticket.generation(), "Spawning headline fetch task");

    app.news_handle = Some(tokio::spawn(async move {
        let outcome: FetchOutcome = match catch_task_panic(client.fetch()).await {
            Ok(Ok(articles)) => Ok(articles),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Headline fetch failed");
                Err(e.kind())
            }
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Headline task panicked");
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "news_fetch",
                        error: panic_msg,
                    })
                    .await;
                Err(FailureKind::Transport)
            }
        };

        if let Err(e) = tx.send(AppEvent::NewsFetched { ticket, outcome }).await {
            tracing::warn!(error = %e, "Failed to send headlines (receiver dropped)");
        }
    }));
}

/// Switch tabs, fetching headlines when the News tab comes into view.
pub(super) fn activate_tab(app: &mut App, tab: Tab, event_tx: &mpsc::Sender<AppEvent>) {
    if app.switch_tab(tab) && tab == Tab::News {
        spawn_news_fetch(app, event_tx);
    }
}

/// Open the selected headline in the system browser.
pub(super) fn open_selected_article(app: &mut App) {
    let Some(url) = app.selected_article().map(|a| a.url.clone()) else {
        app.set_status("No article selected");
        return;
    };

    // Validate before open::that() so feed data can't smuggle in other schemes
    match validate_url_for_open(&url) {
        Err(e) => app.set_status(e.to_string()),
        Ok(_) => match open::that(&url) {
            Ok(()) => app.set_status("Opening article..."),
            Err(e) => app.set_status(format!("Failed to open browser: {}", e)),
        },
    }
}
