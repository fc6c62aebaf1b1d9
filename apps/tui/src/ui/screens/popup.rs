use crate::app::App;
use crate::ui::key_style;
use crate::ui::layout::{PopupLayout, CLOSE_BUTTON_LABEL};
use org_directory_core::popup::LOADING_SCORES_LABEL;
use org_directory_core::{PopupView, ScoresView};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_popup(app: &App, f: &mut Frame<'_>) {
    let Some(view) = app
        .popup
        .view(app.directory.selected_organization(), app.popup_visible())
    else {
        return;
    };

    let layout = PopupLayout::new(f.area());

    // Dim everything behind the popup
    f.buffer_mut()
        .set_style(layout.overlay, Style::default().fg(Color::DarkGray));

    f.render_widget(Clear, layout.content);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", view.name),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(layout.content);
    f.render_widget(block, layout.content);
    f.render_widget(
        Paragraph::new(Span::styled(CLOSE_BUTTON_LABEL, key_style())),
        layout.close_button,
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    render_details(&view, columns[0], f);
    render_scores(app, &view, columns[1], f);
}

fn detail_line<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:>21} "), Style::default().fg(Color::Gray)),
        Span::raw(value.into()),
    ])
}

fn render_details(view: &PopupView, area: Rect, f: &mut Frame<'_>) {
    let mut lines = vec![
        detail_line("URL:", view.url.clone().unwrap_or_default()),
        detail_line("Type:", view.org_type.clone()),
        detail_line("Funding Round:", view.funding_round.clone()),
        detail_line("RTO Policy:", view.rto_policy.clone()),
    ];
    if let Some(gives_ratings) = view.gives_ratings {
        lines.push(detail_line("Gives Ratings:", gives_ratings));
    }
    lines.extend([
        detail_line("Accelerated Vesting:", view.accelerated_vesting),
        detail_line("Rank:", view.ranking.clone()),
        detail_line("Profile Completeness:", view.profile_completeness.clone()),
    ]);

    let details = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn render_scores(app: &App, view: &PopupView, area: Rect, f: &mut Frame<'_>) {
    match &view.scores {
        ScoresView::Loading => {
            let throbber = Throbber::default()
                .label(LOADING_SCORES_LABEL)
                .throbber_style(key_style());
            let mut state = app.throbber_state.clone();
            let line = Rect { height: 1.min(area.height), ..area };
            f.render_stateful_widget(throbber, line, &mut state);
        }
        ScoresView::Rows(scores) => {
            let rows = scores.iter().map(|score| {
                Row::new(vec![
                    Cell::from(score.name.clone()),
                    Cell::from(Line::from(score.score.clone()).alignment(Alignment::Right)),
                ])
            });
            let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(8)])
                .block(Block::default().borders(Borders::LEFT))
                .column_spacing(1);
            f.render_widget(table, area);
        }
    }
}
