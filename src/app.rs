//! Root application component
//!
//! The data browser: a page header, a sortable table over a dataset and a
//! modal stack of dialogs. App coordinates between components; callbacks
//! handed to them push Actions onto the shared queue, which `dispatch`
//! drains after every event.

use crate::action::{Action, ActionQueue};
use crate::component::Component;
use crate::components::dialog::natural_width;
use crate::components::{
    browser_layout, Appearance, Description, Dialog, DialogAction, DialogProps, DialogRole,
    DialogWidth, PageAction, PageHeader, PageHeaderProps, Table, TableProps, Theme,
};
use crate::config::{Config, SortModeSetting};
use crate::model::modal::{Modal, ModalStack};
use crate::model::{sort_items, ColumnConfig, ColumnHooks, Item, SortDescriptor, SortDirection};
use crate::services::{self, Dataset};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};
use std::path::PathBuf;

const HELP_TEXT: &[(&str, &str)] = &[
    ("j / k", "Next / previous row"),
    ("g / G", "First / last row"),
    ("Ctrl-d / Ctrl-u", "Page down / up"),
    ("h / l", "Focus previous / next column"),
    ("s", "Sort on the focused column"),
    ("Enter", "Show row details"),
    ("r", "Reload the dataset"),
    ("?", "This help"),
    ("q", "Quit"),
    ("Tab / Shift-Tab", "Move focus inside a dialog"),
    ("Esc", "Close the dialog"),
];

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    pub config: Config,

    /// Dataset file; `None` shows the built-in sample
    pub data_path: Option<PathBuf>,

    /// Rows as loaded, before any sorting
    pub dataset: Dataset,

    /// Follow-up actions pushed by component callbacks
    pub queue: ActionQueue,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message shown in the header
    pub error: Option<String>,

    /// Sort state owned by the app when the table is controlled
    pub sort_on: Option<String>,
    pub sort_direction: SortDirection,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub header: PageHeader,
    pub table: Table,
    /// Dialog for the top modal
    pub dialog: Option<Dialog>,

    theme: Theme,
}

impl App {
    pub fn new(config: Config, data_path: Option<PathBuf>) -> Result<App> {
        let data_path = data_path.or_else(|| config.data_path.as_ref().map(PathBuf::from));
        let queue = ActionQueue::new();

        let (dataset, error) = match &data_path {
            Some(path) => match services::load_dataset(path) {
                Ok(dataset) => (dataset, None),
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "failed to load dataset");
                    (Dataset::default(), Some(format!("Failed to load {}: {}", path.display(), err)))
                }
            },
            None => (services::sample_dataset(), None),
        };

        let header = PageHeader::new(
            PageHeaderProps::new(config.title.clone())
                .secondary_action(PageAction::new("Help", "help", queue.sender(Action::OpenHelp)))
                .primary_action(PageAction::new("Reload", "reload", queue.sender(Action::Reload))),
        );

        let sort_on = config.sort_on.clone();
        let sort_direction = config.sort_direction;
        let (table, column_error) = build_table(&config, &dataset, &data_path, &queue)?;

        let mut app = App {
            config,
            data_path,
            dataset,
            queue,
            modals: ModalStack::new(),
            should_quit: false,
            error: error.or(column_error),
            sort_on,
            sort_direction,
            header,
            table,
            dialog: None,
            theme: Theme::default(),
        };
        if app.table.is_controlled() {
            app.arrange_controlled();
        }
        app.refresh_description();
        Ok(app)
    }

    /// Apply an action and everything it leads to: follow-ups returned by
    /// `update` and actions queued by callbacks.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let mut current = Some(action);
        loop {
            while let Some(action) = current {
                tracing::trace!(action = %action, "dispatch");
                current = self.update(action)?;
            }
            match self.queue.pop() {
                Some(queued) => current = Some(queued),
                None => return Ok(()),
            }
        }
    }

    fn open_modal(&mut self, modal: Modal) {
        if self.modals.contains(&modal) {
            return;
        }
        self.modals.push(modal);
        self.sync_dialog();
    }

    fn close_modal(&mut self) {
        self.modals.pop();
        self.sync_dialog();
    }

    /// Build the dialog for whatever modal is now on top
    fn sync_dialog(&mut self) {
        let dialog = self.modals.top().cloned().map(|modal| self.build_dialog(&modal));
        self.dialog = dialog;
    }

    fn build_dialog(&self, modal: &Modal) -> Dialog {
        let close = || DialogAction::new("Close", self.queue.sender(Action::CloseModal));
        match modal {
            Modal::QuitConfirm => Dialog::new(
                DialogProps::new("Are you sure you want to quit?")
                    .title("Quit")
                    .role(DialogRole::Destructive)
                    .width(DialogWidth::Small)
                    .action(DialogAction::new("Cancel", self.queue.sender(Action::CloseModal)))
                    .action(
                        DialogAction::new("Quit", self.queue.sender(Action::ForceQuit))
                            .appearance(Appearance::Destructive),
                    )
                    .on_close(|| tracing::debug!("quit cancelled")),
            ),
            Modal::RowDetails { item } => {
                let body = details_text(item, &self.theme);
                let width = natural_width(&body).clamp(40, 80);
                Dialog::new(
                    DialogProps::new(body)
                        .title("Row details")
                        .width(DialogWidth::Columns(width))
                        .action(close().appearance(Appearance::Primary)),
                )
            }
            Modal::Help => Dialog::new(
                DialogProps::new(help_text(&self.theme))
                    .title("Keyboard shortcuts")
                    .width(DialogWidth::Medium)
                    .action(close()),
            ),
        }
    }

    /// Re-read the dataset, keeping the current rows on failure
    fn reload(&mut self) {
        let result = match &self.data_path {
            Some(path) => services::load_dataset(path)
                .with_context(|| format!("Failed to load {}", path.display())),
            None => Ok(services::sample_dataset()),
        };
        match result {
            Ok(dataset) => {
                self.dataset = dataset;
                self.error = None;
                if self.table.is_controlled() {
                    self.arrange_controlled();
                } else {
                    self.table.set_items(self.dataset.items.clone());
                }
            }
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "reload failed");
                self.error = Some(format!("{err:#}"));
            }
        }
        self.refresh_description();
    }

    /// Controlled table asked for a new order
    fn apply_sort(&mut self, field: String, direction: SortDirection) {
        tracing::info!(field = %field, direction = %direction, "sorting dataset");
        self.sort_on = Some(field);
        self.sort_direction = direction;
        self.arrange_controlled();
    }

    /// Sort the dataset by the app's sort state and hand it to the table
    fn arrange_controlled(&mut self) {
        let column = self
            .sort_on
            .as_deref()
            .and_then(|field| self.table.columns().iter().find(|c| c.field == field))
            .cloned();
        let items = match column {
            Some(column) => sort_items(
                &self.dataset.items,
                &SortDescriptor::new(column, self.sort_direction),
            ),
            None => self.dataset.items.clone(),
        };
        self.table.set_items(items);
        self.table
            .set_sort_props(self.sort_on.clone(), self.sort_direction);
    }

    fn refresh_description(&mut self) {
        let description = match &self.error {
            Some(error) => error.clone(),
            None => self.config.description.clone().unwrap_or_else(|| {
                format!("{} items from {}", self.dataset.items.len(), source_name(&self.data_path))
            }),
        };
        self.header.set_description(Some(Description::from(description)));
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = [("q", "quit"), ("?", "help"), ("r", "reload"), ("s", "sort"), ("Enter", "details")];
        let mut spans = Vec::new();
        for (key, label) in hints {
            spans.push(Span::styled(format!(" {key} "), self.theme.title()));
            spans.push(Span::styled(format!("{label} "), self.theme.description()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        // Only the top modal receives input
        if let Some(dialog) = self.dialog.as_mut() {
            return match dialog.handle_key_event(key)? {
                Some(action) => dialog.update(action),
                None => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::OpenQuitDialog)),
            KeyCode::Char('?') => Ok(Some(Action::OpenHelp)),
            KeyCode::Char('r') => Ok(Some(Action::Reload)),
            _ => self.table.handle_key_event(key),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(dialog) = self.dialog.as_mut() {
            return match dialog.handle_mouse_event(mouse)? {
                Some(action) => dialog.update(action),
                None => Ok(None),
            };
        }
        self.header.handle_mouse_event(mouse)?;
        self.table.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                tracing::info!("quitting");
                self.should_quit = true;
            }
            Action::Reload => self.reload(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.open_modal(Modal::QuitConfirm),
            Action::OpenHelp => self.open_modal(Modal::Help),
            Action::ShowDetails(item) => self.open_modal(Modal::RowDetails { item }),
            Action::CloseModal => self.close_modal(),
            Action::FocusNext
            | Action::FocusPrev
            | Action::Activate
            | Action::ScrollUp
            | Action::ScrollDown => {
                if let Some(dialog) = self.dialog.as_mut() {
                    return dialog.update(action);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Table
            // ─────────────────────────────────────────────────────────────────
            Action::SortRequested(field, direction) => self.apply_sort(field, direction),
            other => return self.table.update(other),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = browser_layout(area, self.header.height(area.width));
        self.header.draw(frame, layout.header)?;
        self.table.draw(frame, layout.table)?;
        self.draw_help_bar(frame, layout.help);

        // Draw modal overlay if active
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.draw(frame, area)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Build the table for `dataset`
///
/// Invalid configured columns fall back to one column per field; the
/// returned message explains why.
fn build_table(
    config: &Config,
    dataset: &Dataset,
    data_path: &Option<PathBuf>,
    queue: &ActionQueue,
) -> Result<(Table, Option<String>)> {
    let props = |columns: Vec<ColumnConfig>| {
        let row_queue = queue.clone();
        let mut props = TableProps::new(dataset.items.clone(), columns)
            .hooks(ColumnHooks::new())
            .title(source_name(data_path))
            .sort_direction(config.sort_direction)
            .on_row_click(move |_, item: &Item| row_queue.push(Action::ShowDetails(item.clone())));
        if let Some(field) = &config.sort_on {
            props = props.sort_on(field.clone());
        }
        if let Some(message) = &config.empty_message {
            props = props.empty_message(message.clone());
        }
        if config.sort_mode == SortModeSetting::Controlled {
            let sort_queue = queue.clone();
            props = props.on_sort(move |field, direction| {
                sort_queue.push(Action::SortRequested(field.to_string(), direction))
            });
        }
        props
    };

    if config.columns.is_empty() {
        let table = Table::new(props(dataset.default_columns())).context("Invalid dataset columns")?;
        return Ok((table, None));
    }
    match Table::new(props(config.columns.clone())) {
        Ok(table) => Ok((table, None)),
        Err(err) => {
            tracing::warn!(error = %err, "configured columns rejected");
            let table = Table::new(props(dataset.default_columns())).context("Invalid dataset columns")?;
            Ok((table, Some(format!("Configured columns ignored: {err}"))))
        }
    }
}

fn source_name(data_path: &Option<PathBuf>) -> String {
    match data_path {
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        None => "sample data".to_string(),
    }
}

fn details_text(item: &Item, theme: &Theme) -> Text<'static> {
    let lines: Vec<Line<'static>> = item
        .iter()
        .map(|(field, value)| {
            Line::from(vec![
                Span::styled(format!("{field}: "), theme.title()),
                Span::raw(value.to_string()),
            ])
        })
        .collect();
    Text::from(lines)
}

fn help_text(theme: &Theme) -> Text<'static> {
    let lines: Vec<Line<'static>> = HELP_TEXT
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:<18}"), theme.title()),
                Span::raw(*what),
            ])
        })
        .collect();
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            app.dispatch(action).unwrap();
        }
        // Callbacks may have queued work even without a direct action
        while let Some(action) = app.queue.pop() {
            app.dispatch(action).unwrap();
        }
    }

    fn names(app: &App) -> Vec<String> {
        app.table
            .sorted_items()
            .iter()
            .map(|item| item.get("name").map(|v| v.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_sample_dataset_sorted_by_first_column() {
        let app = App::new(Config::default(), None).unwrap();
        assert!(!app.table.is_controlled());
        assert_eq!(app.table.row_count(), 6);
        assert_eq!(names(&app)[0], "Ada Lovelace");
        assert_eq!(app.error, None);
    }

    #[test]
    fn test_quit_dialog_confirm() {
        let mut app = App::new(Config::default(), None).unwrap();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        // Close button, Cancel, Quit
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_dialog_escape_closes() {
        let mut app = App::new(Config::default(), None).unwrap();
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(app.dialog.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_cancel_closes_quit_dialog() {
        let mut app = App::new(Config::default(), None).unwrap();
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_enter_opens_row_details() {
        let mut app = App::new(Config::default(), None).unwrap();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        match app.modals.top() {
            Some(Modal::RowDetails { item }) => {
                assert_eq!(item.get("name"), Some(&Value::Text("Alan Turing".to_string())));
            }
            other => panic!("expected row details, got {other:?}"),
        }
        // The details dialog focuses its Close action
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_controlled_mode_sorts_in_app() {
        let config = Config {
            sort_mode: SortModeSetting::Controlled,
            sort_on: Some("age".to_string()),
            ..Config::default()
        };
        let mut app = App::new(config, None).unwrap();
        assert!(app.table.is_controlled());
        assert_eq!(names(&app)[0], "Ada Lovelace");
        assert_eq!(names(&app)[5], "Katherine Johnson");

        app.dispatch(Action::HeaderClicked("age".to_string())).unwrap();
        assert_eq!(app.sort_direction, SortDirection::Descending);
        assert_eq!(names(&app)[0], "Katherine Johnson");
        assert_eq!(app.table.sort().field(), Some("age"));
    }

    #[test]
    fn test_missing_file_shows_error() {
        let mut app = App::new(
            Config::default(),
            Some(PathBuf::from("/nonexistent/cosmos-tui/data.json")),
        )
        .unwrap();
        assert_eq!(app.table.row_count(), 0);
        assert!(app.error.as_deref().unwrap_or_default().starts_with("Failed to load"));

        app.dispatch(Action::Reload).unwrap();
        assert!(app.error.is_some());
    }

    #[test]
    fn test_invalid_configured_columns_fall_back() {
        let config = Config {
            columns: vec![ColumnConfig::new("name"), ColumnConfig::new("name")],
            ..Config::default()
        };
        let app = App::new(config, None).unwrap();
        assert_eq!(app.table.columns().len(), 4);
        assert!(app.error.as_deref().unwrap_or_default().contains("declared twice"));
    }

    #[test]
    fn test_help_opens_once() {
        let mut app = App::new(Config::default(), None).unwrap();
        app.dispatch(Action::OpenHelp).unwrap();
        app.dispatch(Action::OpenHelp).unwrap();
        app.dispatch(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_draw_with_dialog() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut app = App::new(Config::default(), None).unwrap();
        app.dispatch(Action::OpenHelp).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                app.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Keyboard shortcuts"));
        assert!(rendered.contains("Data browser"));
    }
}
