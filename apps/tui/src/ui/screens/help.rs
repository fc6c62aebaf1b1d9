use crate::ui::key_style;
use crate::ui::layout::centered_rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const KEYS: [(&str, &str); 12] = [
    ("/ or s", "Focus the search box"),
    ("Enter / Esc", "Leave the search box"),
    ("Esc", "Clear the search term"),
    ("v", "Toggle the vesting filter"),
    ("← / →", "Previous / next page"),
    ("1-9", "Jump to a page"),
    ("↑ / ↓", "Move the row cursor"),
    ("Enter", "Show organization details"),
    ("x", "Close the details popup"),
    ("Esc", "Dismiss the details popup"),
    ("Mouse", "Click rows, pages, filters and the overlay"),
    ("q", "Quit"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 60, f.area());

    let mut lines: Vec<Line<'_>> = KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), key_style()),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}
