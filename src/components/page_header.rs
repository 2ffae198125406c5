//! Page header: title, description and up to two actions

use crate::action::Action;
use crate::component::{clicked_in, Component};
use crate::components::automation;
use crate::components::button::{ActionHandler, Appearance, Button};
use crate::components::theme::Theme;
use crate::components::truncate::{truncate_str, wrap_line};
use anyhow::Result;
use crossterm::event::MouseEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use std::fmt;
use std::rc::Rc;

/// Header action; the icon is required
#[derive(Clone)]
pub struct PageAction {
    pub label: String,
    pub icon: String,
    pub handler: ActionHandler,
}

impl PageAction {
    pub fn new(label: impl Into<String>, icon: impl Into<String>, handler: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            handler: Rc::new(handler),
        }
    }

    fn button(&self, appearance: Appearance) -> Button {
        let handler = self.handler.clone();
        Button::new(self.label.clone())
            .icon(self.icon.clone())
            .appearance(appearance)
            .on_click(move || handler())
    }
}

impl fmt::Debug for PageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageAction")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    Text(Text<'static>),
    Structured {
        text: String,
        learn_more: Option<String>,
    },
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Text(Text::from(text.to_string()))
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Description::Text(Text::from(text))
    }
}

/// Description as drawn: body text and an optional "Learn more" target
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionContent {
    pub text: Text<'static>,
    pub learn_more: Option<String>,
}

/// Resolve the description, upgrading plain text plus the separate
/// `learn_more` prop into the structured form. No description means no
/// description block, even when `learn_more` is set.
pub fn soft_description(
    description: Option<&Description>,
    learn_more: Option<&str>,
) -> Option<DescriptionContent> {
    match description? {
        Description::Structured { text, learn_more } => Some(DescriptionContent {
            text: Text::from(text.clone()),
            learn_more: learn_more.clone(),
        }),
        Description::Text(text) => Some(DescriptionContent {
            text: text.clone(),
            learn_more: learn_more.map(str::to_string),
        }),
    }
}

#[derive(Debug, Default)]
pub struct PageHeaderProps {
    pub title: String,
    pub description: Option<Description>,
    pub learn_more: Option<String>,
    pub primary_action: Option<PageAction>,
    pub secondary_action: Option<PageAction>,
}

impl PageHeaderProps {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<Description>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn learn_more(mut self, url: impl Into<String>) -> Self {
        self.learn_more = Some(url.into());
        self
    }

    pub fn primary_action(mut self, action: PageAction) -> Self {
        self.primary_action = Some(action);
        self
    }

    pub fn secondary_action(mut self, action: PageAction) -> Self {
        self.secondary_action = Some(action);
        self
    }
}

pub struct PageHeader {
    title: String,
    description: Option<DescriptionContent>,
    /// Secondary first, then primary, as laid out on screen
    buttons: Vec<Button>,
    button_areas: Vec<Rect>,
    theme: Theme,
}

impl PageHeader {
    pub fn new(props: PageHeaderProps) -> Self {
        let description = soft_description(props.description.as_ref(), props.learn_more.as_deref());
        let mut buttons = Vec::new();
        if let Some(action) = &props.secondary_action {
            buttons.push(action.button(Appearance::Secondary));
        }
        if let Some(action) = &props.primary_action {
            buttons.push(action.button(Appearance::Cta));
        }
        Self {
            title: props.title,
            description,
            buttons,
            button_areas: Vec::new(),
            theme: Theme::default(),
        }
    }

    pub fn automation(&self) -> &'static str {
        automation::PAGE_HEADER
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&DescriptionContent> {
        self.description.as_ref()
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Replace the description, e.g. to surface a load error
    pub fn set_description(&mut self, description: Option<Description>) {
        let learn_more = self.description.as_ref().and_then(|d| d.learn_more.clone());
        self.description = soft_description(description.as_ref(), learn_more.as_deref());
    }

    fn description_lines(&self, width: u16) -> Vec<Line<'static>> {
        let Some(content) = &self.description else {
            return Vec::new();
        };
        let width = usize::from(width.max(1));
        let mut lines: Vec<Line<'static>> = content
            .text
            .lines
            .iter()
            .flat_map(|line| wrap_line(&line.clone().patch_style(self.theme.description()), width))
            .collect();
        if let Some(url) = &content.learn_more {
            let link = Line::from(vec![
                Span::styled("Learn more", self.theme.link()),
                Span::styled(format!(" {url}"), self.theme.description()),
            ]);
            lines.extend(wrap_line(&link, width));
        }
        lines
    }

    /// Rows needed at `width`: title, description and a blank separator
    pub fn height(&self, width: u16) -> u16 {
        let description = u16::try_from(self.description_lines(width).len()).unwrap_or(u16::MAX);
        description.saturating_add(2)
    }
}

impl Component for PageHeader {
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let hit = self.button_areas.iter().position(|area| clicked_in(&mouse, *area));
        if let Some(button) = hit.and_then(|i| self.buttons.get(i)) {
            tracing::debug!(label = %button.label, "page header action clicked");
            button.click();
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if area.height == 0 {
            return Ok(());
        }

        let buttons_width: u16 = self
            .buttons
            .iter()
            .map(|b| b.width() + 1)
            .sum::<u16>()
            .min(area.width);
        let title_width = area.width - buttons_width;
        let title = truncate_str(&self.title, usize::from(title_width));
        frame.render_widget(
            Paragraph::new(Line::styled(title, self.theme.title())),
            Rect::new(area.x, area.y, title_width, 1),
        );

        self.button_areas.clear();
        let mut x = area.x + title_width;
        for button in &self.buttons {
            let w = button.width().min(area.right().saturating_sub(x));
            let button_area = Rect::new(x, area.y, w, 1);
            frame.render_widget(Paragraph::new(Line::from(button.span(&self.theme, false))), button_area);
            self.button_areas.push(button_area);
            x = x.saturating_add(w + 1);
        }

        let lines = self.description_lines(area.width);
        if !lines.is_empty() && area.height > 1 {
            let rows = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height - 1);
            frame.render_widget(
                Paragraph::new(lines),
                Rect::new(area.x, area.y + 1, area.width, rows),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::cell::Cell;

    #[test]
    fn test_plain_description_upgraded_with_learn_more() {
        let description = Description::from("Manage your users");
        let content = soft_description(Some(&description), Some("https://example.com/users")).unwrap();
        assert_eq!(content.text, Text::from("Manage your users"));
        assert_eq!(content.learn_more.as_deref(), Some("https://example.com/users"));
    }

    #[test]
    fn test_structured_description_wins_over_legacy_learn_more() {
        let description = Description::Structured {
            text: "Users".to_string(),
            learn_more: None,
        };
        let content = soft_description(Some(&description), Some("https://ignored")).unwrap();
        assert_eq!(content.learn_more, None);
    }

    #[test]
    fn test_no_description_ignores_learn_more() {
        assert_eq!(soft_description(None, Some("https://example.com")), None);
        let header = PageHeader::new(PageHeaderProps::new("Users").learn_more("https://example.com"));
        assert_eq!(header.height(80), 2);
    }

    #[test]
    fn test_buttons_secondary_then_primary() {
        let header = PageHeader::new(
            PageHeaderProps::new("Users")
                .primary_action(PageAction::new("Create", "plus", || {}))
                .secondary_action(PageAction::new("Reload", "reload", || {})),
        );
        let labels: Vec<_> = header.buttons().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Reload", "Create"]);
        assert_eq!(header.automation(), "page-header");
        assert_eq!(header.buttons()[1].appearance, Appearance::Cta);
    }

    #[test]
    fn test_click_fires_primary_handler() {
        let created = Rc::new(Cell::new(0));
        let counter = created.clone();
        let mut header = PageHeader::new(
            PageHeaderProps::new("Users")
                .description("All users")
                .primary_action(PageAction::new("Create", "plus", move || counter.set(counter.get() + 1))),
        );
        let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
        terminal
            .draw(|frame| {
                header.draw(frame, frame.area()).unwrap();
            })
            .unwrap();

        let area = header.button_areas[0];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: area.x + 1,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        };
        header.handle_mouse_event(click).unwrap();
        assert_eq!(created.get(), 1);

        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Users"));
        assert!(rendered.contains("All users"));
        assert!(rendered.contains("[ + Create ]"));
    }

    #[test]
    fn test_set_description_keeps_learn_more() {
        let mut header = PageHeader::new(
            PageHeaderProps::new("Data")
                .description("ok")
                .learn_more("https://docs"),
        );
        header.set_description(Some(Description::from("failed to load")));
        let content = header.description().unwrap();
        assert_eq!(content.text, Text::from("failed to load"));
        assert_eq!(content.learn_more.as_deref(), Some("https://docs"));
        assert_eq!(header.height(80), 4);
    }
}
