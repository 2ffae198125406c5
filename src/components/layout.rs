//! Layout calculations shared by the components and the browser

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Gap between table columns
pub const COLUMN_SPACING: u16 = 1;

/// Data browser screen areas
pub struct BrowserLayout {
    pub header: Rect,
    pub table: Rect,
    pub help: Rect,
}

/// Centered popup of at most `width` x `height`
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let popup_x = area.x + (area.width - width) / 2;
    let popup_y = area.y + (area.height - height) / 2;

    Rect::new(popup_x, popup_y, width, height)
}

/// Split the screen into page header, table and help bar
pub fn browser_layout(area: Rect, header_height: u16) -> BrowserLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    BrowserLayout {
        header: chunks[0],
        table: chunks[1],
        help: chunks[2],
    }
}

/// Horizontal extents of table columns inside `area`
///
/// The same rectangles are used to draw and to hit-test clicks, so header
/// clicks always land on the column that was drawn there.
pub fn column_areas(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    if constraints.is_empty() {
        return Vec::new();
    }
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints.to_vec())
        .spacing(COLUMN_SPACING)
        .split(area)
        .to_vec()
}
