// UI module: layout and screen rendering

pub mod layout;
pub mod screens;

use crate::app::App;
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::directory::render_directory(app, f);

    if app.popup_visible() {
        screens::popup::render_popup(app, f);
    }

    if app.show_help {
        screens::help::render_help(f);
    }
}

pub(crate) fn key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
