mod helpers;
pub mod screens;

use crate::app::state::App;
use crate::ui::layout::{DirectoryLayout, PopupLayout};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

pub fn handle_input(app: &mut App, key: KeyCode) {
    screens::dispatch_input(app, key);
}

/// Left clicks, hit-tested against the layout last drawn into `area`.
pub fn handle_mouse(app: &mut App, event: MouseEvent, area: Rect) {
    if event.kind != MouseEventKind::Down(MouseButton::Left) || app.show_help {
        return;
    }
    let position = Position::new(event.column, event.row);

    if app.popup_visible() {
        if let Some(element) = PopupLayout::new(area).element_at(position) {
            app.click_popup(element);
        }
        return;
    }

    let layout = DirectoryLayout::new(area);
    if layout.search.contains(position) {
        app.focus_search();
        return;
    }

    // Clicking anywhere else moves focus off the search box
    app.end_search();

    if layout.vesting.contains(position) {
        app.toggle_accelerated_vesting();
    } else if let Some(page) = layout.page_at(position, &app.directory.view().pages) {
        app.change_page(page);
    } else if let Some(index) =
        layout.row_at(position, app.page_rows().len(), app.selected_row)
    {
        app.select_row(index);
        app.activate_selected_row();
    }
}
