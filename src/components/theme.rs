//! Styling tokens
//!
//! Components compute booleans (is this header active, is this row
//! interactive) and ask the theme for a style; colors live only here.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub hover: Color,
    pub danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            hover: Color::Rgb(40, 44, 52),
            danger: Color::Red,
        }
    }
}

impl Theme {
    pub fn header(&self, sortable: bool, active: bool, focused: bool) -> Style {
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        style = if active {
            style.fg(self.accent)
        } else if sortable {
            style.fg(self.text)
        } else {
            style.fg(self.muted)
        };
        if focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    pub fn cell(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Cursor highlight; rows without a click handler get none
    pub fn row_highlight(&self, interactive: bool) -> Style {
        if interactive {
            Style::default().bg(self.hover).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    pub fn empty_state(&self) -> Style {
        Style::default().fg(Color::Black).bg(Color::Rgb(250, 250, 250))
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn description(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn link(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::UNDERLINED)
    }
}
