//! Button primitive used by dialogs and the page header

use crate::components::theme::Theme;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use std::fmt;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Click callback of a button or action
pub type ActionHandler = Rc<dyn Fn()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Default,
    Primary,
    Secondary,
    Cta,
    Destructive,
    Link,
    Action,
}

impl Appearance {
    /// Main actions receive initial focus in dialogs
    pub fn is_main(self) -> bool {
        matches!(
            self,
            Appearance::Primary | Appearance::Cta | Appearance::Destructive
        )
    }

    fn style(self, theme: &Theme) -> Style {
        match self {
            Appearance::Primary | Appearance::Cta => {
                Style::default().fg(Color::Black).bg(theme.accent)
            }
            Appearance::Destructive => Style::default().fg(Color::White).bg(theme.danger),
            Appearance::Link => theme.link(),
            Appearance::Secondary | Appearance::Default | Appearance::Action => {
                Style::default().fg(theme.text)
            }
        }
    }
}

/// Glyph for an icon name; unknown names get a bullet
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "close" => "×",
        "plus" | "add" => "+",
        "refresh" | "reload" => "↻",
        "help" => "?",
        "delete" => "✕",
        "settings" => "⚙",
        "check" => "✓",
        "search" => "⌕",
        _ => "•",
    }
}

#[derive(Clone, Default)]
pub struct Button {
    pub label: String,
    pub appearance: Appearance,
    pub icon: Option<String>,
    pub on_click: Option<ActionHandler>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("appearance", &self.appearance)
            .field("icon", &self.icon)
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Run the click handler, if any. Returns whether one ran.
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Text as drawn, e.g. `[ + New ]`
    pub fn text(&self) -> String {
        match (&self.icon, self.label.is_empty()) {
            (Some(icon), true) => format!("[ {} ]", icon_glyph(icon)),
            (Some(icon), false) => format!("[ {} {} ]", icon_glyph(icon), self.label),
            (None, _) => format!("[ {} ]", self.label),
        }
    }

    pub fn width(&self) -> u16 {
        u16::try_from(self.text().width()).unwrap_or(u16::MAX)
    }

    pub fn span(&self, theme: &Theme, focused: bool) -> Span<'static> {
        let mut style = self.appearance.style(theme);
        if focused {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        Span::styled(self.text(), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_button_text() {
        assert_eq!(Button::new("Save").text(), "[ Save ]");
        assert_eq!(Button::new("New").icon("plus").text(), "[ + New ]");
        assert_eq!(Button::new("").icon("close").text(), "[ × ]");
        assert_eq!(Button::new("Save").width(), 8);
    }

    #[test]
    fn test_click_runs_handler() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let button = Button::new("Go").on_click(move || counter.set(counter.get() + 1));
        assert!(button.click());
        assert!(button.click());
        assert_eq!(clicks.get(), 2);
        assert!(!Button::new("Inert").click());
    }
}
