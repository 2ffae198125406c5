//! Modal dialog component
//!
//! A centered box with an optional title, a scrollable body, a close button
//! and a row of action buttons. Focus is trapped inside the dialog: Tab and
//! Shift-Tab cycle through the close button, the body (form dialogs only)
//! and the actions.

use crate::action::Action;
use crate::component::{clicked_in, Component};
use crate::components::automation;
use crate::components::button::{ActionHandler, Appearance, Button};
use crate::components::layout::centered_popup;
use crate::components::theme::Theme;
use crate::components::truncate::wrap_line;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::fmt;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Dialog width in terminal columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogWidth {
    Small,
    #[default]
    Medium,
    Large,
    Columns(u16),
}

impl DialogWidth {
    pub fn columns(self) -> u16 {
        match self {
            DialogWidth::Small => 48,
            DialogWidth::Medium => 64,
            DialogWidth::Large => 80,
            DialogWidth::Columns(n) => n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogRole {
    /// Focus starts in the body
    Form,
    /// Focus starts on the close button; body describes the dialog
    Destructive,
}

/// Heading level of the title, 1 to 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleElement {
    H1,
    #[default]
    H2,
    H3,
    H4,
}

impl TitleElement {
    fn modifier(self) -> Modifier {
        match self {
            TitleElement::H1 => Modifier::BOLD | Modifier::UNDERLINED,
            TitleElement::H2 => Modifier::BOLD,
            TitleElement::H3 => Modifier::ITALIC,
            TitleElement::H4 => Modifier::empty(),
        }
    }
}

/// A structured dialog action, turned into a button when drawn
#[derive(Clone)]
pub struct DialogAction {
    pub label: String,
    pub appearance: Appearance,
    pub handler: ActionHandler,
}

impl DialogAction {
    pub fn new(label: impl Into<String>, handler: impl Fn() + 'static) -> Self {
        Self {
            label: label.into(),
            appearance: Appearance::Default,
            handler: Rc::new(handler),
        }
    }

    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }
}

impl fmt::Debug for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogAction")
            .field("label", &self.label)
            .field("appearance", &self.appearance)
            .finish()
    }
}

/// Footer entry: a structured action or a ready-made button
#[derive(Debug, Clone)]
pub enum DialogActionItem {
    Action(DialogAction),
    Button(Button),
}

impl DialogActionItem {
    /// Resolve into the button that is drawn and clicked
    pub fn to_button(&self) -> Button {
        match self {
            DialogActionItem::Action(action) => {
                let handler = action.handler.clone();
                Button::new(action.label.clone())
                    .appearance(action.appearance)
                    .on_click(move || handler())
            }
            DialogActionItem::Button(button) => button.clone(),
        }
    }
}

impl From<DialogAction> for DialogActionItem {
    fn from(action: DialogAction) -> Self {
        DialogActionItem::Action(action)
    }
}

impl From<Button> for DialogActionItem {
    fn from(button: Button) -> Self {
        DialogActionItem::Button(button)
    }
}

/// Element holding keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Close,
    Body,
    Action(usize),
}

/// Accessibility attributes a host can expose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogA11y {
    pub role: &'static str,
    pub modal: bool,
    pub labelled_by: Option<&'static str>,
    pub described_by: Option<&'static str>,
}

#[derive(Default)]
pub struct DialogProps {
    pub title: Option<String>,
    pub title_element: TitleElement,
    pub width: DialogWidth,
    pub role: Option<DialogRole>,
    pub actions: Vec<DialogActionItem>,
    pub body: Text<'static>,
    pub on_close: Option<ActionHandler>,
}

impl DialogProps {
    pub fn new(body: impl Into<Text<'static>>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title_element(mut self, element: TitleElement) -> Self {
        self.title_element = element;
        self
    }

    pub fn width(mut self, width: DialogWidth) -> Self {
        self.width = width;
        self
    }

    pub fn role(mut self, role: DialogRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn action(mut self, action: impl Into<DialogActionItem>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn on_close(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(handler));
        self
    }
}

#[derive(Debug, Default, Clone)]
struct DrawnLayout {
    close: Rect,
    buttons: Vec<Rect>,
}

pub struct Dialog {
    title: Option<String>,
    title_element: TitleElement,
    width: DialogWidth,
    role: Option<DialogRole>,
    buttons: Vec<Button>,
    body: Text<'static>,
    on_close: Option<ActionHandler>,
    focus: DialogFocus,
    scroll: u16,
    theme: Theme,
    drawn: DrawnLayout,
}

impl Dialog {
    pub fn new(props: DialogProps) -> Self {
        let buttons: Vec<Button> = props.actions.iter().map(DialogActionItem::to_button).collect();
        let focus = initial_focus(props.role, &buttons);
        Self {
            title: props.title,
            title_element: props.title_element,
            width: props.width,
            role: props.role,
            buttons,
            body: props.body,
            on_close: props.on_close,
            focus,
            scroll: 0,
            theme: Theme::default(),
            drawn: DrawnLayout::default(),
        }
    }

    pub fn focus(&self) -> DialogFocus {
        self.focus
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn accessibility(&self) -> DialogA11y {
        DialogA11y {
            role: "dialog",
            modal: true,
            labelled_by: self.title.as_ref().map(|_| "dialog-title"),
            described_by: (self.role == Some(DialogRole::Destructive)).then_some("dialog-description"),
        }
    }

    /// Focus order inside the trap
    fn focus_ring(&self) -> Vec<DialogFocus> {
        let mut ring = vec![DialogFocus::Close];
        if self.role == Some(DialogRole::Form) {
            ring.push(DialogFocus::Body);
        }
        ring.extend((0..self.buttons.len()).map(DialogFocus::Action));
        ring
    }

    fn move_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let current = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % ring.len()
        } else {
            (current + ring.len() - 1) % ring.len()
        };
        self.focus = ring[next];
    }

    /// Run the close handler
    pub fn close(&self) {
        if let Some(handler) = &self.on_close {
            handler();
        }
    }

    /// Activate the focused element. Returns the follow-up for the host.
    pub fn activate(&self) -> Option<Action> {
        match self.focus {
            DialogFocus::Close => {
                self.close();
                Some(Action::CloseModal)
            }
            DialogFocus::Body => None,
            DialogFocus::Action(i) => {
                if let Some(button) = self.buttons.get(i) {
                    button.click();
                }
                None
            }
        }
    }

    fn footer_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(button.span(&self.theme, self.focus == DialogFocus::Action(i)));
        }
        Line::from(spans)
    }

    fn footer_width(&self) -> u16 {
        let gaps = self.buttons.len().saturating_sub(1) as u16 * 2;
        self.buttons.iter().map(Button::width).sum::<u16>() + gaps
    }
}

/// Destructive dialogs start on the close button, forms in the body and
/// everything else on the main action.
fn initial_focus(role: Option<DialogRole>, buttons: &[Button]) -> DialogFocus {
    match role {
        Some(DialogRole::Destructive) => DialogFocus::Close,
        Some(DialogRole::Form) => DialogFocus::Body,
        None => {
            let main = buttons
                .iter()
                .position(|b| b.appearance.is_main())
                .or_else(|| buttons.len().checked_sub(1));
            main.map(DialogFocus::Action).unwrap_or(DialogFocus::Close)
        }
    }
}

impl Component for Dialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if clicked_in(&mouse, self.drawn.close) {
            self.focus = DialogFocus::Close;
            return Ok(Some(Action::Activate));
        }
        if let Some(i) = self.drawn.buttons.iter().position(|area| clicked_in(&mouse, *area)) {
            self.focus = DialogFocus::Action(i);
            return Ok(Some(Action::Activate));
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::CloseModal => {
                self.close();
                return Ok(Some(Action::CloseModal));
            }
            Action::FocusNext => self.move_focus(true),
            Action::FocusPrev => self.move_focus(false),
            Action::Activate => return Ok(self.activate()),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let header_rows: u16 = if self.title.is_some() { 2 } else { 0 };
        let footer_rows: u16 = if self.buttons.is_empty() { 0 } else { 2 };
        let width = self.width.columns().min(area.width);
        let body_width = width.saturating_sub(4).max(1) as usize;

        let lines: Vec<Line<'static>> = self
            .body
            .lines
            .iter()
            .flat_map(|line| wrap_line(line, body_width))
            .collect();
        let body_rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        // Leave a margin around the dialog so it never fills the screen
        let max_height = area.height.saturating_sub(2).max(3);
        let height = body_rows
            .saturating_add(header_rows + footer_rows + 2)
            .min(max_height);

        let popup = centered_popup(area, width, height);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(true));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        if inner.height == 0 || inner.width == 0 {
            return Ok(());
        }

        let close = Button::new("").icon("close");
        let close_area = Rect::new(
            popup.x + popup.width.saturating_sub(close.width() + 1),
            popup.y,
            close.width().min(popup.width),
            1,
        );
        frame.render_widget(
            Paragraph::new(Line::from(close.span(&self.theme, self.focus == DialogFocus::Close))),
            close_area,
        );
        self.drawn.close = close_area;

        let mut y = inner.y;
        if let Some(title) = &self.title {
            let style = self.theme.title().add_modifier(self.title_element.modifier());
            frame.render_widget(
                Paragraph::new(Line::styled(title.clone(), style)).alignment(Alignment::Center),
                Rect::new(inner.x, y, inner.width, 1),
            );
            y += header_rows;
        }

        let body_height = inner
            .height
            .saturating_sub(header_rows + footer_rows);
        let max_scroll = body_rows.saturating_sub(body_height);
        self.scroll = self.scroll.min(max_scroll);
        let body_area = Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), body_height);
        frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), body_area);

        self.drawn.buttons.clear();
        if !self.buttons.is_empty() && inner.height > footer_rows {
            let footer_y = inner.y + inner.height - 1;
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "─".repeat(inner.width as usize),
                    self.theme.border(false),
                )),
                Rect::new(inner.x, footer_y - 1, inner.width, 1),
            );

            let footer_width = self.footer_width().min(inner.width);
            let mut x = inner.x + (inner.width - footer_width) / 2;
            frame.render_widget(
                Paragraph::new(self.footer_line()),
                Rect::new(x, footer_y, footer_width, 1),
            );
            for button in &self.buttons {
                let w = button.width();
                self.drawn.buttons.push(Rect::new(x, footer_y, w, 1));
                x = x.saturating_add(w + 2);
            }
        }

        Ok(())
    }
}

/// Width a dialog needs to show `text` without wrapping
pub fn natural_width(text: &Text<'_>) -> u16 {
    let widest = text
        .lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.width()).sum::<usize>())
        .max()
        .unwrap_or(0);
    u16::try_from(widest + 4).unwrap_or(u16::MAX)
}

/// The automation ids attached to a dialog's parts
pub fn automation_ids(dialog: &Dialog) -> Vec<&'static str> {
    let mut ids = vec![automation::DIALOG];
    if dialog.title.is_some() {
        ids.push(automation::DIALOG_TITLE);
    }
    ids.push(automation::DIALOG_BODY);
    if !dialog.buttons.is_empty() {
        ids.push(automation::DIALOG_FOOTER);
    }
    ids
}
