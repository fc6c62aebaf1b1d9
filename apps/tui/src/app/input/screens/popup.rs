use crate::app::state::App;
use crossterm::event::KeyCode;
use org_directory_core::Key;

pub fn handle_popup_input(app: &mut App, key: KeyCode) {
    match key {
        // `x` presses the close button
        KeyCode::Char('x') => app.click_close_button(),
        KeyCode::Esc => app.popup_key(Key::Escape),
        KeyCode::Enter => app.popup_key(Key::Enter),
        KeyCode::Char(ch) => app.popup_key(Key::Char(ch)),
        _ => app.popup_key(Key::Other),
    }
}
