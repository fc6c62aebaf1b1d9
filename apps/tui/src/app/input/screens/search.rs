use crate::app::state::App;
use crossterm::event::KeyCode;

/// Typing into the search box; every edit re-filters the directory.
pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(ch) => app.push_search_char(ch),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab | KeyCode::Down => app.end_search(),
        _ => {}
    }
}
