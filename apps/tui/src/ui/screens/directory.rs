use crate::app::App;
use crate::ui::key_style;
use crate::ui::layout::{
    page_button_label, scroll_offset, DirectoryLayout, PAGES_PREFIX, VESTING_LABEL,
};
use org_directory_core::directory::state::NO_MATCHES_MESSAGE;
use org_directory_core::DirectoryView;
use ratatui::layout::{Alignment, Constraint, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

const SEARCH_PLACEHOLDER: &str = "Search organizations";

pub fn render_directory(app: &App, f: &mut Frame<'_>) {
    let layout = DirectoryLayout::new(f.area());
    let view = app.directory.view();

    render_search(app, &view, &layout, f);
    render_vesting(&view, &layout, f);
    render_pagination(&view, &layout, f);

    if view.no_matches {
        let alert = Paragraph::new(NO_MATCHES_MESSAGE)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().title("Organizations").borders(Borders::ALL));
        f.render_widget(alert, layout.table);
    } else {
        render_table(app, &view, &layout, f);
    }

    render_help_bar(app, &layout, f);
}

fn render_search(app: &App, view: &DirectoryView, layout: &DirectoryLayout, f: &mut Frame<'_>) {
    let focused = app.focus.search_focused();
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let text = if view.search_term.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(view.search_term.as_str())
    };

    let search = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(search, layout.search);

    if focused && !app.popup_visible() && !app.show_help {
        let typed = u16::try_from(view.search_term.chars().count()).unwrap_or(u16::MAX);
        let max_x = layout.search.right().saturating_sub(2);
        let x = layout.search.x.saturating_add(1).saturating_add(typed).min(max_x);
        f.set_cursor_position(Position::new(x, layout.search.y + 1));
    }
}

fn render_vesting(view: &DirectoryView, layout: &DirectoryLayout, f: &mut Frame<'_>) {
    let mark = if view.accelerated_vesting_only { "[x]" } else { "[ ]" };
    let checkbox = Paragraph::new(Line::from(vec![
        Span::styled(mark, key_style()),
        Span::raw(" "),
        Span::raw(VESTING_LABEL),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(checkbox, layout.vesting);
}

fn render_pagination(view: &DirectoryView, layout: &DirectoryLayout, f: &mut Frame<'_>) {
    let mut spans = vec![Span::styled(PAGES_PREFIX, Style::default().fg(Color::Gray))];
    for (i, page) in view.pages.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if page.active {
            Style::default()
                .bg(Color::Rgb(0, 0, 238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(page_button_label(page.number), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), layout.pagination);
}

fn render_table(app: &App, view: &DirectoryView, layout: &DirectoryLayout, f: &mut Frame<'_>) {
    let header = Row::new(vec![
        Cell::from("Rank"),
        Cell::from("Name"),
        Cell::from("Overall Score"),
        Cell::from("Funding Round"),
        Cell::from("RTO Policy"),
        Cell::from("Profile Completeness"),
    ])
    .style(key_style());

    let visible = layout.visible_rows();
    let offset = scroll_offset(view.rows.len(), visible, app.selected_row);

    let rows = view
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, row)| {
            let style = if i == app.selected_row {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(row.ranking.clone()),
                Cell::from(Span::styled(
                    row.name.clone(),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                )),
                Cell::from(Line::from(row.avg_score.clone()).alignment(Alignment::Right)),
                Cell::from(row.funding_round.clone()),
                Cell::from(row.rto_policy.clone()),
                Cell::from(
                    Line::from(row.profile_completeness.clone()).alignment(Alignment::Right),
                ),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(13),
        Constraint::Length(22),
        Constraint::Length(11),
        Constraint::Length(20),
    ];

    let selected_link = view
        .rows
        .get(app.selected_row)
        .map_or_else(String::new, |row| format!(" {} ", row.link));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Organizations ({} matches) | {}",
                    view.total_matches,
                    app.location.current()
                ))
                .title_bottom(Line::from(selected_link).right_aligned())
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, layout.table);
}

fn render_help_bar(app: &App, layout: &DirectoryLayout, f: &mut Frame<'_>) {
    let mut help_text = vec![
        Span::styled("/", key_style()),
        Span::raw(": Search   "),
        Span::styled("v", key_style()),
        Span::raw(": Vesting filter   "),
        Span::styled("←/→", key_style()),
        Span::raw(": Page   "),
        Span::styled("↑/↓", key_style()),
        Span::raw(": Navigate   "),
        Span::styled("Enter", key_style()),
        Span::raw(": Details   "),
        Span::styled("F1", key_style()),
        Span::raw(": Help   "),
        Span::styled("q", key_style()),
        Span::raw(": Quit"),
    ];

    if !app.status_message.is_empty() {
        help_text.push(Span::raw("   "));
        help_text.push(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Green),
        ));
    }

    let help = Paragraph::new(Line::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);
    f.render_widget(help, layout.help);
}
