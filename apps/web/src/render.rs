use crate::animation::spinner_frame;
use crate::app::{SearchFocus, WebApp};
use org_directory_core::directory::state::NO_MATCHES_MESSAGE;
use org_directory_core::popup::LOADING_SCORES_LABEL;
use org_directory_core::{DirectoryView, LocationController, PopupView, ScoresView};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

const VESTING_LABEL: &str = "Show only companies with first vesting in < 1 year";

fn highlight() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Rgb(0, 0, 238))
        .add_modifier(Modifier::BOLD)
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::Rgb(0, 0, 238))
        .bg(Color::Rgb(200, 200, 200))
        .add_modifier(Modifier::BOLD)
}

pub fn render<L: LocationController, F: SearchFocus>(app: &WebApp<L, F>, f: &mut Frame<'_>) {
    let area = f.area();
    let block = Block::default()
        .title("Organization Directory")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area).inner(Margin::new(1, 1));
    f.render_widget(block, area);

    let view = app.directory.view();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(inner);

    render_controls(app, &view, f, layout[0]);
    render_pages(&view, f, layout[1]);
    if view.no_matches {
        let paragraph = Paragraph::new(NO_MATCHES_MESSAGE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, layout[2]);
    } else {
        render_table(&view, app.selected_row, f, layout[2]);
    }
    render_footer(f, layout[3]);

    if let Some(popup) = app
        .popup
        .view(app.directory.selected_organization(), app.directory.popup_visible())
    {
        render_popup(&popup, app.spinner_counter, f, area);
    }
}

fn render_controls<L, F: SearchFocus>(
    app: &WebApp<L, F>,
    view: &DirectoryView,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(58)])
        .split(area);

    let focused = app.focus.search_focused();
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let text = if view.search_term.is_empty() && !focused {
        Span::styled("Press / to search", Style::default().fg(Color::DarkGray))
    } else if focused {
        Span::raw(format!("{}▏", view.search_term))
    } else {
        Span::raw(view.search_term.clone())
    };
    let search = Paragraph::new(TextLine::from(text)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(search, columns[0]);

    let mark = if view.accelerated_vesting_only { "[x] " } else { "[ ] " };
    let vesting = Paragraph::new(TextLine::from(vec![
        Span::styled(mark, Style::default().fg(Color::Yellow)),
        Span::raw(VESTING_LABEL),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Gray)));
    f.render_widget(vesting, columns[1]);
}

fn render_pages(view: &DirectoryView, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled("Pages: ", Style::default().fg(Color::Gray))];
    for page in &view.pages {
        let style = if page.active {
            highlight()
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!(" {} ", page.number), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_table(view: &DirectoryView, selected: usize, f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Rank"),
        Cell::from("Name"),
        Cell::from("Overall Score"),
        Cell::from("Funding Round"),
        Cell::from("RTO Policy"),
        Cell::from("Profile Completeness"),
    ])
    .style(header_style());

    let rows = view.rows.iter().enumerate().map(|(index, row)| {
        let style = if index == selected {
            highlight()
        } else {
            Style::default().fg(Color::White)
        };
        Row::new(vec![
            Cell::from(row.ranking.clone()),
            Cell::from(row.name.clone()),
            Cell::from(row.avg_score.clone()),
            Cell::from(row.funding_round.clone()),
            Cell::from(row.rto_policy.clone()),
            Cell::from(row.profile_completeness.clone()),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(22),
            Constraint::Length(11),
            Constraint::Length(21),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(
        Block::default()
            .title(format!("{} matches", view.total_matches))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame<'_>, area: Rect) {
    let keys = [
        ("/", "Search"),
        ("v", "Vesting"),
        ("←/→ 1-9", "Page"),
        ("↑/↓", "Select"),
        ("Enter", "Details"),
        ("Esc/x", "Close"),
    ];
    let spans = keys
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Style::default().fg(Color::Gray)),
                Span::raw(format!(" {action}  ")),
            ]
        })
        .collect::<Vec<_>>();
    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn popup_area(area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .split(vertical[1])[1]
}

fn render_popup(view: &PopupView, spinner: f64, f: &mut Frame<'_>, area: Rect) {
    f.buffer_mut()
        .set_style(area, Style::default().fg(Color::DarkGray));

    let content = popup_area(area);
    f.render_widget(Clear, content);
    let block = Block::default()
        .title(view.name.clone())
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .title_bottom(TextLine::from("[x] Close").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(content).inner(Margin::new(1, 0));
    f.render_widget(block, content);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let detail = |label: &'static str, value: String| {
        TextLine::from(vec![
            Span::styled(format!("{label:>21} "), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };

    let mut lines = vec![
        detail("URL:", view.url.clone().unwrap_or_default()),
        detail("Type:", view.org_type.clone()),
        detail("Funding Round:", view.funding_round.clone()),
        detail("RTO Policy:", view.rto_policy.clone()),
    ];
    if let Some(gives_ratings) = view.gives_ratings {
        lines.push(detail("Gives Ratings:", gives_ratings.to_string()));
    }
    lines.extend([
        detail("Accelerated Vesting:", view.accelerated_vesting.to_string()),
        detail("Rank:", view.ranking.clone()),
        detail("Profile Completeness:", view.profile_completeness.clone()),
    ]);
    f.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
        columns[0],
    );

    match &view.scores {
        ScoresView::Loading => {
            let line = TextLine::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame(spinner)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(LOADING_SCORES_LABEL),
            ]);
            f.render_widget(Paragraph::new(line), columns[1]);
        }
        ScoresView::Rows(scores) => {
            let rows = scores.iter().map(|score| {
                Row::new(vec![
                    Cell::from(score.name.clone()),
                    Cell::from(score.score.clone()),
                ])
                .style(Style::default().fg(Color::White))
            });
            let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(8)])
                .header(Row::new(vec![Cell::from("Score"), Cell::from("")]).style(header_style()))
                .column_spacing(1);
            f.render_widget(table, columns[1]);
        }
    }
}
