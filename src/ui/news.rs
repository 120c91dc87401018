use crate::app::App;
use crate::news::FeedPhase;
use crate::util::{single_line, truncate_to_width};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Format a publish time relative to `now`: "5m", "3h", "2d", or "Apr 20".
pub fn format_relative_time(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = published else {
        return String::new();
    };

    let diff = (now - ts).num_seconds();

    if diff < 0 {
        return "now".to_string();
    }
    if diff < 3600 {
        return format!("{}m", diff / 60);
    }
    if diff < 86400 {
        return format!("{}h", diff / 3600);
    }
    if diff < 604800 {
        return format!("{}d", diff / 86400);
    }

    ts.format("%b %d").to_string()
}

fn panel_title(app: &App) -> String {
    let count = app.feed.articles().len();
    match app.feed.phase() {
        FeedPhase::Idle | FeedPhase::Fetching => {
            let frame = SPINNER[app.spinner_frame % SPINNER.len()];
            format!("News {} ", frame)
        }
        FeedPhase::Empty => match app.feed.last_failure() {
            Some(kind) => format!("News unavailable ({})", kind.label()),
            None => "News".to_string(),
        },
        FeedPhase::Populated => format!("News ({})", count),
    }
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let articles = app.feed.articles();
    // Borders and the two-space indent
    let text_width = area.width.saturating_sub(4) as usize;
    let now = Utc::now();

    let items: Vec<ListItem> = if articles.is_empty() {
        let msg = if app.feed.is_loading() {
            "Loading headlines..."
        } else {
            "No articles"
        };
        vec![ListItem::new(Span::styled(msg, app.style("notice")))]
    } else {
        articles
            .iter()
            .map(|article| {
                let title = single_line(&article.title);
                let description = single_line(article.description_or_fallback());

                let mut meta = single_line(&article.source.name);
                let when = format_relative_time(article.published(), now);
                if !when.is_empty() {
                    meta.push_str(" · ");
                    meta.push_str(&when);
                }

                ListItem::new(vec![
                    Line::from(Span::styled(
                        truncate_to_width(&title, text_width + 2).into_owned(),
                        app.style("list_normal"),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", truncate_to_width(&description, text_width)),
                        app.style("list_secondary"),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", truncate_to_width(&meta, text_width)),
                        app.style("list_meta"),
                    )),
                ])
            })
            .collect()
    };

    let list = List::new(items)
        .highlight_style(app.style("list_selected"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(panel_title(app)),
        );

    let mut state = ListState::default();
    if !articles.is_empty() {
        state.select(Some(app.selected_index()));
    }
    f.render_stateful_widget(list, area, &mut state);
}
