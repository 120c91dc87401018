use crate::app::{App, Tab, View};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar: the current status message, or key hints.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else {
        Cow::Borrowed(hints(app.tab, app.view))
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}

fn hints(tab: Tab, view: View) -> &'static str {
    match (tab, view) {
        (Tab::News, _) => "[j/k]move [o/Enter]open [r]efresh [Tab/1-3]switch [t]heme [q]uit",
        (Tab::Legislation, View::Detail) => "[Space]summary [b/Esc]back [Tab/1-3]switch [q]uit",
        (_, View::Detail) => "[b/Esc]back [Tab/1-3]switch [t]heme [q]uit",
        (_, View::List) => "[j/k]move [Enter]details [Tab/1-3]switch [t]heme [q]uit",
    }
}
