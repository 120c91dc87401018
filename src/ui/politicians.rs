use crate::app::{App, View};
use crate::directory::Politician;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    match (app.view, app.selected_politician()) {
        (View::Detail, Some(p)) => render_detail(f, app, p, area),
        _ => render_list(f, app, area),
    }
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let politicians = &app.directory.politicians;

    let items: Vec<ListItem> = if politicians.is_empty() {
        vec![ListItem::new("No politicians in roster")]
    } else {
        politicians
            .iter()
            .map(|p| {
                ListItem::new(Line::from(vec![
                    Span::styled(p.name.clone(), app.style("list_normal")),
                    Span::styled(
                        format!("  {} · {}", p.party, p.state),
                        app.style("list_meta"),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .highlight_style(app.style("list_selected"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(format!("Politicians ({})", politicians.len())),
        );

    let mut state = ListState::default();
    if !politicians.is_empty() {
        state.select(Some(app.selected_index()));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame, app: &App, p: &Politician, area: Rect) {
    let field = |label: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{:<10}", label), app.style("detail_label")),
            Span::styled(value.to_string(), app.style("detail_body")),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(p.name.clone(), app.style("detail_heading"))),
        Line::from(""),
        field("District", &p.district),
        field("State", &p.state),
        field("Party", &p.party),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border"))
            .title("Politician"),
    );
    f.render_widget(paragraph, area);
}
