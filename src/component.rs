//! Component trait - interface shared by the table, dialog and page header
//!
//! Components own their presentation state, translate input into Actions
//! and draw themselves into a ratatui frame.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// The cycle is:
/// 1. `handle_key_event` / `handle_mouse_event` map input to an Action
///    without touching state
/// 2. `update` applies the Action, possibly returning a follow-up
/// 3. `draw` renders; it may cache geometry for mouse hit-testing but must
///    not change what the component shows
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Mouse positions are absolute terminal coordinates; components
    /// compare them against the area they were last drawn in.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}

/// Whether a left-button press landed inside `area`
pub fn clicked_in(mouse: &MouseEvent, area: Rect) -> bool {
    use crossterm::event::{MouseButton, MouseEventKind};

    matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
        && mouse.column >= area.x
        && mouse.column < area.x.saturating_add(area.width)
        && mouse.row >= area.y
        && mouse.row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_clicked_in() {
        let area = Rect::new(2, 3, 10, 2);
        assert!(clicked_in(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 3), area));
        assert!(clicked_in(&mouse(MouseEventKind::Down(MouseButton::Left), 11, 4), area));
        assert!(!clicked_in(&mouse(MouseEventKind::Down(MouseButton::Left), 12, 4), area));
        assert!(!clicked_in(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 3), area));
        assert!(!clicked_in(&mouse(MouseEventKind::Moved, 3, 3), area));
    }
}
