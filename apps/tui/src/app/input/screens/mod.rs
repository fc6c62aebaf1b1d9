use crate::app::state::App;
use crossterm::event::KeyCode;

mod directory;
mod help;
mod popup;
mod search;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.popup_visible() {
        popup::handle_popup_input(app, key);
    } else if app.focus.search_focused() {
        search::handle_search_input(app, key);
    } else {
        directory::handle_directory_input(app, key);
    }
}
