//! Screen geometry shared by rendering and mouse hit-testing.

use org_directory_core::directory::PageButton;
use org_directory_core::PopupElement;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

pub const VESTING_LABEL: &str = "Show only companies with first vesting in < 1 year";
pub const PAGES_PREFIX: &str = "Pages: ";
pub const CLOSE_BUTTON_LABEL: &str = "[ Close ]";

// Border plus the header row
const TABLE_CHROME_TOP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryLayout {
    pub search: Rect,
    pub vesting: Rect,
    pub pagination: Rect,
    pub table: Rect,
    pub help: Rect,
}

impl DirectoryLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        // checkbox, a space and the label, inside a border
        let vesting_width = u16::try_from(VESTING_LABEL.len() + 6).unwrap_or(u16::MAX);
        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(vesting_width)])
            .split(rows[0]);

        Self {
            search: controls[0],
            vesting: controls[1],
            pagination: rows[1],
            table: rows[2],
            help: rows[3],
        }
    }

    /// How many body rows fit inside the table's border.
    pub const fn visible_rows(&self) -> usize {
        self.table.height.saturating_sub(TABLE_CHROME_TOP + 1) as usize
    }

    /// Index into the page's rows under `position`, if any.
    pub fn row_at(&self, position: Position, total_rows: usize, selected: usize) -> Option<usize> {
        let body_top = self.table.y + TABLE_CHROME_TOP;
        let body_bottom = self.table.bottom().saturating_sub(1);
        if !self.table.contains(position) || position.y < body_top || position.y >= body_bottom {
            return None;
        }

        let offset = scroll_offset(total_rows, self.visible_rows(), selected);
        let index = offset + usize::from(position.y - body_top);
        (index < total_rows).then_some(index)
    }

    /// The page whose button is under `position`, if any.
    pub fn page_at(&self, position: Position, pages: &[PageButton]) -> Option<usize> {
        if !self.pagination.contains(position) {
            return None;
        }

        let x = position.x - self.pagination.x;
        page_button_spans(pages)
            .into_iter()
            .find(|(_, start, width)| x >= *start && x < start + width)
            .map(|(number, _, _)| number)
    }
}

/// Label text for a page button.
pub fn page_button_label(number: usize) -> String {
    format!(" {number} ")
}

/// `(page, start column, width)` of every button, relative to the
/// pagination row. Buttons are separated by one space.
pub fn page_button_spans(pages: &[PageButton]) -> Vec<(usize, u16, u16)> {
    let mut x = u16::try_from(PAGES_PREFIX.len()).unwrap_or(u16::MAX);
    pages
        .iter()
        .map(|page| {
            let width = u16::try_from(page_button_label(page.number).len()).unwrap_or(u16::MAX);
            let span = (page.number, x, width);
            x = x.saturating_add(width + 1);
            span
        })
        .collect()
}

/// First row to draw so that the selected row stays visible.
pub const fn scroll_offset(total_rows: usize, max_visible_rows: usize, selected: usize) -> usize {
    if total_rows <= max_visible_rows || selected < max_visible_rows {
        return 0;
    }

    selected + 1 - max_visible_rows
}

/// A `percent_x` by `percent_y` rectangle centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupLayout {
    pub overlay: Rect,
    pub content: Rect,
    pub close_button: Rect,
}

impl PopupLayout {
    pub fn new(area: Rect) -> Self {
        let content = centered_rect(70, 70, area);
        let width = u16::try_from(CLOSE_BUTTON_LABEL.len())
            .unwrap_or(u16::MAX)
            .min(content.width.saturating_sub(2));
        let close_button = Rect {
            x: content.right().saturating_sub(width + 2),
            y: content.y,
            width,
            height: 1.min(content.height),
        };

        Self {
            overlay: area,
            content,
            close_button,
        }
    }

    /// The innermost popup element under `position`.
    pub fn element_at(&self, position: Position) -> Option<PopupElement> {
        if self.close_button.contains(position) {
            Some(PopupElement::CloseButton)
        } else if self.content.contains(position) {
            Some(PopupElement::Content)
        } else if self.overlay.contains(position) {
            Some(PopupElement::Overlay)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 40,
    };

    fn buttons(count: usize, active: usize) -> Vec<PageButton> {
        (1..=count)
            .map(|number| PageButton {
                number,
                active: number == active,
            })
            .collect()
    }

    #[test]
    fn directory_sections_stack_vertically() {
        let layout = DirectoryLayout::new(SCREEN);
        assert_eq!(layout.search.y, 0);
        assert_eq!(layout.pagination.y, 3);
        assert_eq!(layout.table.y, 4);
        assert_eq!(layout.help.bottom(), SCREEN.bottom());
        assert_eq!(layout.vesting.right(), SCREEN.right());
    }

    #[test]
    fn rows_are_hit_below_the_header() {
        let layout = DirectoryLayout::new(SCREEN);
        let header = Position::new(10, layout.table.y + 1);
        let first = Position::new(10, layout.table.y + 2);
        let third = Position::new(10, layout.table.y + 4);

        assert_eq!(layout.row_at(header, 15, 0), None);
        assert_eq!(layout.row_at(first, 15, 0), Some(0));
        assert_eq!(layout.row_at(third, 15, 0), Some(2));
        assert_eq!(layout.row_at(third, 2, 0), None);
    }

    #[test]
    fn page_buttons_are_hit_by_column() {
        let layout = DirectoryLayout::new(SCREEN);
        let pages = buttons(3, 1);
        let spans = page_button_spans(&pages);
        assert_eq!(spans, [(1, 7, 3), (2, 11, 3), (3, 15, 3)]);

        let y = layout.pagination.y;
        assert_eq!(layout.page_at(Position::new(8, y), &pages), Some(1));
        assert_eq!(layout.page_at(Position::new(10, y), &pages), None);
        assert_eq!(layout.page_at(Position::new(16, y), &pages), Some(3));
        assert_eq!(layout.page_at(Position::new(16, y + 1), &pages), None);
    }

    #[test]
    fn scroll_keeps_the_selection_visible() {
        assert_eq!(scroll_offset(10, 20, 9), 0);
        assert_eq!(scroll_offset(15, 5, 3), 0);
        assert_eq!(scroll_offset(15, 5, 5), 1);
        assert_eq!(scroll_offset(15, 5, 14), 10);
    }

    #[test]
    fn popup_elements_nest() {
        let layout = PopupLayout::new(SCREEN);
        let close = Position::new(layout.close_button.x, layout.close_button.y);
        let inside = Position::new(layout.content.x + 2, layout.content.y + 2);

        assert_eq!(layout.element_at(close), Some(PopupElement::CloseButton));
        assert_eq!(layout.element_at(inside), Some(PopupElement::Content));
        assert_eq!(layout.element_at(Position::new(0, 0)), Some(PopupElement::Overlay));
        assert_eq!(layout.element_at(Position::new(200, 0)), None);
    }
}
