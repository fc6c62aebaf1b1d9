use crate::app::input::helpers::{next_page, page_for_digit, previous_page};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_directory_input(app: &mut App, key: KeyCode) {
    let page_count = app.directory.page_numbers().len();
    let current_page = app.directory.current_page();

    match key {
        KeyCode::Char('q') => app.shutdown(),
        KeyCode::Char('/' | 's') => app.focus_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('v') => app.toggle_accelerated_vesting(),
        KeyCode::Left | KeyCode::Char('h') => {
            if let Some(page) = previous_page(current_page, page_count) {
                app.change_page(page);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if let Some(page) = next_page(current_page, page_count) {
                app.change_page(page);
            }
        }
        KeyCode::Char(digit @ '1'..='9') => {
            if let Some(page) = page_for_digit(digit, page_count) {
                app.change_page(page);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_row(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_row(),
        KeyCode::Home => app.select_row(0),
        KeyCode::End => app.select_row(usize::MAX),
        KeyCode::Enter => app.activate_selected_row(),
        _ => {}
    }
}
