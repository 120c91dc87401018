//! Keyboard input handling.
//!
//! Global keys (quit, tab switching, theme) work everywhere. The rest depend
//! on whether the active tab shows its list or a detail view.

use crate::app::{App, AppEvent, Tab, View};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{activate_tab, open_selected_article, spawn_news_fetch};
use super::Action;

pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Tab => {
            activate_tab(app, app.tab.next(), event_tx);
            return Action::Continue;
        }
        KeyCode::BackTab => {
            activate_tab(app, app.tab.prev(), event_tx);
            return Action::Continue;
        }
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            activate_tab(app, Tab::ALL[idx], event_tx);
            return Action::Continue;
        }
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
            return Action::Continue;
        }
        _ => {}
    }

    match app.view {
        View::List => handle_list_input(app, code, event_tx),
        View::Detail => handle_detail_input(app, code),
    }

    Action::Continue
}

fn handle_list_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Char('g') | KeyCode::Home => app.nav_first(),
        KeyCode::Char('G') | KeyCode::End => app.nav_last(),
        KeyCode::Enter => {
            if app.tab == Tab::News {
                open_selected_article(app);
            } else {
                app.open_detail();
            }
        }
        KeyCode::Char('o') if app.tab == Tab::News => open_selected_article(app),
        KeyCode::Char('r') if app.tab == Tab::News => {
            spawn_news_fetch(app, event_tx);
            app.set_status("Refreshing headlines...");
        }
        _ => {}
    }
}

fn handle_detail_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.close_detail(),
        KeyCode::Char(' ') => app.toggle_summary(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;
    use crate::news::{FeedPhase, NewsClient, NewsSettings, StalePolicy};
    use crate::theme::ThemeVariant;
    use std::time::Duration;

    fn test_app() -> App {
        let settings = NewsSettings {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
            ..NewsSettings::default()
        };
        let client = NewsClient::new(&settings).unwrap();
        App::new(
            Directory::builtin(),
            client,
            StalePolicy::Discard,
            ThemeVariant::Dark,
        )
    }

    fn press(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AppEvent>) -> Action {
        handle_input(app, code, KeyModifiers::NONE, tx)
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);
        assert!(matches!(press(&mut app, KeyCode::Char('q'), &tx), Action::Quit));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &tx),
            Action::Quit
        ));
    }

    #[tokio::test]
    async fn test_number_keys_switch_tabs() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);

        press(&mut app, KeyCode::Char('2'), &tx);
        assert_eq!(app.tab, Tab::Legislation);
        press(&mut app, KeyCode::Char('3'), &tx);
        assert_eq!(app.tab, Tab::News);
        assert_eq!(app.feed.phase(), FeedPhase::Fetching);
        press(&mut app, KeyCode::Char('1'), &tx);
        assert_eq!(app.tab, Tab::Politicians);
    }

    #[tokio::test]
    async fn test_tab_cycles_forward_and_back() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);

        press(&mut app, KeyCode::BackTab, &tx);
        assert_eq!(app.tab, Tab::News);
        press(&mut app, KeyCode::Tab, &tx);
        assert_eq!(app.tab, Tab::Politicians);
    }

    #[tokio::test]
    async fn test_enter_and_back_in_legislation() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);

        press(&mut app, KeyCode::Char('2'), &tx);
        press(&mut app, KeyCode::Char('j'), &tx);
        press(&mut app, KeyCode::Enter, &tx);
        assert_eq!(app.view, View::Detail);
        assert_eq!(app.selected_legislation().unwrap().name, "Bill B");

        press(&mut app, KeyCode::Char(' '), &tx);
        assert!(app.summary_expanded);

        // Navigation keys are inert in detail view
        press(&mut app, KeyCode::Char('j'), &tx);
        assert_eq!(app.selected_index(), 1);

        press(&mut app, KeyCode::Esc, &tx);
        assert_eq!(app.view, View::List);
    }

    #[tokio::test]
    async fn test_refresh_only_on_news_tab() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);

        press(&mut app, KeyCode::Char('r'), &tx);
        assert_eq!(app.feed.phase(), FeedPhase::Idle);

        press(&mut app, KeyCode::Char('3'), &tx);
        press(&mut app, KeyCode::Char('r'), &tx);
        assert_eq!(app.feed.phase(), FeedPhase::Fetching);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_open_with_no_articles_sets_status() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel(8);

        press(&mut app, KeyCode::Char('3'), &tx);
        press(&mut app, KeyCode::Char('o'), &tx);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "No article selected");
    }
}
