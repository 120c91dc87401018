use crate::app::{App, View};
use crate::directory::{BillStage, Legislation};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    match (app.view, app.selected_legislation()) {
        (View::Detail, Some(bill)) => render_detail(f, app, bill, area),
        _ => render_list(f, app, area),
    }
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let bills = &app.directory.legislation;

    let items: Vec<ListItem> = if bills.is_empty() {
        vec![ListItem::new("No legislation tracked")]
    } else {
        bills
            .iter()
            .map(|bill| {
                ListItem::new(vec![
                    Line::from(Span::styled(bill.name.clone(), app.style("list_normal"))),
                    Line::from(Span::styled(
                        format!("  {}", bill.summary),
                        app.style("list_secondary"),
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
                .title(format!("Legislation ({})", bills.len())),
        );

    let mut state = ListState::default();
    if !bills.is_empty() {
        state.select(Some(app.selected_index()));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame, app: &App, bill: &Legislation, area: Rect) {
    let info = info_lines(app, bill);
    let info_height = info.len() as u16 + 2;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(info_height),
            Constraint::Length(BillStage::ALL.len() as u16 + 3),
            Constraint::Min(3),
        ])
        .split(area);

    let info = Paragraph::new(info).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border"))
            .title("Bill"),
    );
    f.render_widget(info, rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_latest_action(f, app, bill, middle[0]);
    render_tracker(f, app, bill.stage, middle[1]);

    let related = Paragraph::new(bill.related_news.as_str())
        .style(app.style("detail_body"))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title("Related News"),
        );
    f.render_widget(related, rows[2]);
}

fn info_lines<'a>(app: &App, bill: &'a Legislation) -> Vec<Line<'a>> {
    let (marker, hint) = if app.summary_expanded {
        ("▾", "")
    } else {
        ("▸", "  (Space to expand)")
    };

    let mut lines = vec![
        Line::from(Span::styled(bill.name.as_str(), app.style("detail_heading"))),
        Line::from(vec![
            Span::styled(format!("{} Bill Summary", marker), app.style("detail_label")),
            Span::styled(hint, app.style("list_meta")),
        ]),
    ];

    if app.summary_expanded {
        lines.push(Line::from(Span::styled(
            format!("  {}", bill.summary),
            app.style("detail_body"),
        )));
    }

    lines.push(Line::from(vec![
        Span::styled("Sponsor     ", app.style("detail_label")),
        Span::styled(bill.sponsor.as_str(), app.style("detail_body")),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Committees  ", app.style("detail_label")),
        Span::styled(bill.committees.as_str(), app.style("detail_body")),
    ]));
    lines
}

fn render_latest_action(f: &mut Frame, app: &App, bill: &Legislation, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            bill.latest_action.action.as_str(),
            app.style("detail_body"),
        )),
        Line::from(Span::styled(
            bill.latest_action.date.as_str(),
            app.style("list_meta"),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border"))
            .title("Latest Action"),
    );
    f.render_widget(paragraph, area);
}

fn render_tracker(f: &mut Frame, app: &App, stage: BillStage, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title("Tracker");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BillStage::ALL.len() as u16),
            Constraint::Length(1),
        ])
        .split(inner);

    let steps: Vec<Line> = BillStage::ALL
        .iter()
        .map(|&step| {
            if stage.reached(step) {
                Line::from(Span::styled(
                    format!("● {}", step.label()),
                    app.style("tracker_done"),
                ))
            } else {
                Line::from(Span::styled(
                    format!("○ {}", step.label()),
                    app.style("tracker_pending"),
                ))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(steps), parts[0]);

    let gauge = Gauge::default()
        .gauge_style(app.style("tracker_gauge"))
        .ratio(stage.progress())
        .label(stage.label());
    f.render_widget(gauge, parts[1]);
}
