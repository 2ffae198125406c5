//! Sortable table component
//!
//! The table sorts its own items (self-managed) unless an `on_sort`
//! handler is supplied, in which case the caller owns the order and the
//! table only reports header clicks (controlled). Rows are drawn per
//! column so long cells either truncate with an ellipsis or wrap, and the
//! drawn geometry is kept for mouse hit-testing.

pub mod view;

pub use view::{
    empty_state, header_cells, render_rows, HeaderCell, RenderedRow, RowClick, RowClickHandler,
    RowEvent, TableView,
};

use crate::action::Action;
use crate::component::{clicked_in, Component};
use crate::components::layout::column_areas;
use crate::components::theme::Theme;
use crate::components::truncate::{truncate_line, truncate_str, wrap_line};
use crate::components::automation;
use crate::error::TableError;
use crate::model::{
    infer_columns, validate_columns, ColumnConfig, ColumnDescriptor, ColumnHooks, HeaderClick,
    Item, SortController, SortDescriptor, SortDirection, SortHandler, SortMode,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Margin, Rect},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};
use std::rc::Rc;

pub const DEFAULT_EMPTY_MESSAGE: &str = "There are no items to display";

const PAGE_ROWS: usize = 10;

/// Table configuration
pub struct TableProps {
    pub items: Vec<Item>,
    pub columns: Vec<ColumnConfig>,
    pub hooks: ColumnHooks,
    /// Initial sort column (self-managed) or current sort column (controlled)
    pub sort_on: Option<String>,
    /// Current direction; only read in controlled mode
    pub sort_direction: SortDirection,
    pub on_row_click: Option<RowClickHandler>,
    /// Presence selects controlled mode
    pub on_sort: Option<SortHandler>,
    pub empty_message: Text<'static>,
    pub title: Option<String>,
}

impl TableProps {
    pub fn new(items: Vec<Item>, columns: Vec<ColumnConfig>) -> Self {
        Self {
            items,
            columns,
            hooks: ColumnHooks::new(),
            sort_on: None,
            sort_direction: SortDirection::Ascending,
            on_row_click: None,
            on_sort: None,
            empty_message: Text::from(DEFAULT_EMPTY_MESSAGE),
            title: None,
        }
    }

    pub fn hooks(mut self, hooks: ColumnHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn sort_on(mut self, field: impl Into<String>) -> Self {
        self.sort_on = Some(field.into());
        self
    }

    pub fn sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    pub fn on_row_click(mut self, handler: impl Fn(&RowEvent, &Item) + 'static) -> Self {
        self.on_row_click = Some(Rc::new(handler));
        self
    }

    pub fn on_sort(mut self, handler: impl Fn(&str, SortDirection) + 'static) -> Self {
        self.on_sort = Some(Rc::new(handler));
        self
    }

    pub fn empty_message(mut self, message: impl Into<Text<'static>>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Geometry of the last draw, for mouse hit-testing
#[derive(Debug, Default, Clone)]
struct DrawnLayout {
    header: Rect,
    columns: Vec<Rect>,
    /// (position in rendered order, row area)
    rows: Vec<(usize, Rect)>,
}

pub struct Table {
    items: Vec<Item>,
    declared: Vec<ColumnConfig>,
    hooks: ColumnHooks,
    columns: Vec<ColumnDescriptor>,
    sort_on: Option<String>,
    sort_direction: SortDirection,
    on_row_click: Option<RowClickHandler>,
    empty_message: Text<'static>,
    title: Option<String>,
    controller: SortController,

    theme: Theme,
    cursor: usize,
    focused_column: usize,
    scroll: usize,
    drawn: DrawnLayout,
}

impl Table {
    /// Build a table, validating its columns
    ///
    /// The sort mode is fixed here: controlled when `on_sort` is set,
    /// self-managed otherwise.
    pub fn new(props: TableProps) -> Result<Self, TableError> {
        let columns = infer_columns(&props.columns, &props.hooks);
        validate_columns(&columns)?;

        let controller = SortController::new(&columns, props.sort_on.as_deref(), props.on_sort);
        tracing::info!(
            columns = columns.len(),
            items = props.items.len(),
            controlled = controller.is_controlled(),
            "table created"
        );

        Ok(Self {
            items: props.items,
            declared: props.columns,
            hooks: props.hooks,
            columns,
            sort_on: props.sort_on,
            sort_direction: props.sort_direction,
            on_row_click: props.on_row_click,
            empty_message: props.empty_message,
            title: props.title,
            controller,
            theme: Theme::default(),
            cursor: 0,
            focused_column: 0,
            scroll: 0,
            drawn: DrawnLayout::default(),
        })
    }

    pub fn mode(&self) -> &SortMode {
        self.controller.mode()
    }

    pub fn is_controlled(&self) -> bool {
        self.controller.is_controlled()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// The caller's items, in the order they were supplied
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Sort descriptor used for the next render
    pub fn sort(&self) -> SortDescriptor {
        self.controller
            .descriptor(&self.columns, self.sort_on.as_deref(), self.sort_direction)
    }

    /// Items in display order
    pub fn sorted_items(&self) -> Vec<Item> {
        self.controller.arrange(&self.items, &self.sort())
    }

    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    /// Render the table into a view
    pub fn view(&self) -> TableView {
        let sort = self.sort();
        let arranged = self.controller.arrange(&self.items, &sort);
        let rows = render_rows(arranged, &self.columns, self.on_row_click.as_ref());
        let empty_state = empty_state(&rows, &self.empty_message);

        TableView {
            automation: automation::TABLE,
            body_automation: automation::TABLE_BODY,
            header: header_cells(&self.columns, &sort),
            rows,
            empty_state,
            sort,
        }
    }

    /// Header click on the column with `field`; unknown fields are ignored
    pub fn click_header(&mut self, field: &str) -> HeaderClick {
        let Some(column) = self.columns.iter().find(|c| c.field == field).cloned() else {
            return HeaderClick::Ignored;
        };
        let active = self.sort();
        self.controller.header_clicked(&column, &active)
    }

    /// Click the row at `position` in display order
    pub fn click_row(&self, position: usize, event: &RowEvent) -> bool {
        if self.on_row_click.is_none() {
            return false;
        }
        self.view()
            .rows
            .get(position)
            .map(|row| row.click(event))
            .unwrap_or(false)
    }

    /// Replace the items (a prop update)
    pub fn set_items(&mut self, items: Vec<Item>) {
        tracing::debug!(items = items.len(), "table items replaced");
        self.items = items;
        self.clamp_cursor();
    }

    /// Replace the declared columns and hooks
    ///
    /// Fails without changing anything when the new columns are invalid.
    /// A self-managed sort follows its field into the new columns.
    pub fn set_columns(&mut self, declared: Vec<ColumnConfig>, hooks: ColumnHooks) -> Result<(), TableError> {
        let columns = infer_columns(&declared, &hooks);
        validate_columns(&columns)?;
        self.controller.resync(&columns);
        self.declared = declared;
        self.hooks = hooks;
        self.columns = columns;
        self.focused_column = self.focused_column.min(self.columns.len().saturating_sub(1));
        Ok(())
    }

    /// Re-run column inference on the current declaration
    pub fn refresh_columns(&mut self) -> Result<(), TableError> {
        self.set_columns(self.declared.clone(), self.hooks.clone())
    }

    /// Update the sort props
    ///
    /// Controlled tables render with these from now on. Self-managed
    /// tables only read `sort_on` at construction, so this is ignored
    /// there.
    pub fn set_sort_props(&mut self, sort_on: Option<String>, direction: SortDirection) {
        self.sort_on = sort_on;
        self.sort_direction = direction;
    }

    pub fn set_empty_message(&mut self, message: impl Into<Text<'static>>) {
        self.empty_message = message.into();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused_column(&self) -> Option<&ColumnDescriptor> {
        self.columns.get(self.focused_column)
    }

    /// Item under the cursor, in display order
    pub fn selected_item(&self) -> Option<Item> {
        self.sorted_items().into_iter().nth(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let last = self.row_count().saturating_sub(1);
        self.cursor = self.cursor.min(last);
        self.scroll = self.scroll.min(self.cursor);
    }

    /// Lines of each cell once fitted to its column
    fn fit_cells(&self, row: &RenderedRow, widths: &[u16]) -> Vec<Vec<Line<'static>>> {
        row.cells
            .iter()
            .zip(&self.columns)
            .zip(widths)
            .map(|((cell, column), width)| {
                if column.truncating {
                    vec![truncate_line(cell, *width as usize)]
                } else {
                    wrap_line(cell, *width as usize)
                }
            })
            .collect()
    }

    fn draw_header(&self, frame: &mut Frame, view: &TableView, columns: &[Rect]) {
        for (i, (cell, area)) in view.header.iter().zip(columns).enumerate() {
            let style = self
                .theme
                .header(cell.sortable, cell.active, i == self.focused_column);
            let label = truncate_str(&cell.title(), area.width as usize);
            frame.render_widget(Paragraph::new(Line::styled(label, style)), *area);
        }
    }

    fn draw_empty_state(&self, frame: &mut Frame, body: Rect, message: Text<'static>) {
        let height = u16::try_from(message.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(body.height);
        let area = Rect::new(body.x, body.y, body.width, height);
        frame.render_widget(Block::default().style(self.theme.empty_state()), area);
        let paragraph = Paragraph::new(message)
            .style(self.theme.empty_state())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area.inner(Margin { vertical: 1, horizontal: 1 }));
    }
}

impl Component for Table {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('s') => Some(Action::SortFocusedColumn),
            KeyCode::Enter if self.on_row_click.is_some() && self.row_count() > 0 => {
                Some(Action::ClickRow(self.cursor, RowEvent::Key(key)))
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::ScrollDown => return Ok(Some(Action::NextRow)),
            MouseEventKind::ScrollUp => return Ok(Some(Action::PrevRow)),
            _ => {}
        }

        if clicked_in(&mouse, self.drawn.header) {
            let hit = self
                .drawn
                .columns
                .iter()
                .position(|area| mouse.column >= area.x && mouse.column < area.x + area.width);
            return Ok(hit
                .and_then(|i| self.columns.get(i))
                .map(|column| Action::HeaderClicked(column.field.clone())));
        }

        let hit = self
            .drawn
            .rows
            .iter()
            .find(|(_, area)| clicked_in(&mouse, *area))
            .map(|(position, _)| *position);
        Ok(hit.map(|position| Action::ClickRow(position, RowEvent::Mouse(mouse))))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let last = self.row_count().saturating_sub(1);
        match action {
            Action::NextRow => self.cursor = (self.cursor + 1).min(last),
            Action::PrevRow => self.cursor = self.cursor.saturating_sub(1),
            Action::FirstRow => self.cursor = 0,
            Action::LastRow => self.cursor = last,
            Action::PageDown => self.cursor = (self.cursor + PAGE_ROWS).min(last),
            Action::PageUp => self.cursor = self.cursor.saturating_sub(PAGE_ROWS),
            Action::NextColumn => {
                let last_column = self.columns.len().saturating_sub(1);
                self.focused_column = (self.focused_column + 1).min(last_column);
            }
            Action::PrevColumn => self.focused_column = self.focused_column.saturating_sub(1),
            Action::SortFocusedColumn => {
                return Ok(self
                    .focused_column()
                    .map(|column| Action::HeaderClicked(column.field.clone())));
            }
            Action::HeaderClicked(field) => {
                if let Some(i) = self.columns.iter().position(|c| c.field == field) {
                    self.focused_column = i;
                }
                self.click_header(&field);
            }
            Action::ClickRow(position, event) => {
                self.cursor = position.min(last);
                self.click_row(position, &event);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let view = self.view();
        let title = format!(" {} ", self.title.as_deref().unwrap_or("Table"));
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(format!(" {} rows ", view.rows.len()))
            .border_style(self.theme.border(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.drawn = DrawnLayout::default();
        if inner.height < 2 || inner.width < 2 {
            return Ok(());
        }

        // Leave the rightmost column for the scrollbar
        let header = Rect::new(inner.x, inner.y, inner.width - 1, 1);
        let constraints: Vec<_> = self.columns.iter().map(|c| c.width.constraint()).collect();
        let columns = column_areas(header, &constraints);
        self.draw_header(frame, &view, &columns);

        let separator = "─".repeat(inner.width as usize);
        frame.render_widget(
            Paragraph::new(Line::styled(separator, self.theme.border(false))),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );

        self.drawn.header = header;
        self.drawn.columns = columns.clone();

        let body = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);
        if body.height == 0 {
            return Ok(());
        }

        if view.rows.is_empty() {
            if let Some(message) = view.empty_state {
                self.draw_empty_state(frame, body, message);
            }
            return Ok(());
        }

        let widths: Vec<u16> = columns.iter().map(|c| c.width).collect();
        let fitted: Vec<Vec<Vec<Line<'static>>>> =
            view.rows.iter().map(|row| self.fit_cells(row, &widths)).collect();
        let heights: Vec<u16> = fitted
            .iter()
            .map(|cells| {
                let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
                u16::try_from(lines).unwrap_or(u16::MAX)
            })
            .collect();

        // Keep the cursor row on screen
        self.cursor = self.cursor.min(view.rows.len() - 1);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        while self.scroll < self.cursor
            && heights[self.scroll..=self.cursor].iter().map(|h| *h as u32).sum::<u32>()
                > body.height as u32
        {
            self.scroll += 1;
        }

        let mut y = body.y;
        let bottom = body.y + body.height;
        for position in self.scroll..view.rows.len() {
            if y >= bottom {
                break;
            }
            let row = &view.rows[position];
            let height = heights[position].min(bottom - y);
            let row_area = Rect::new(body.x, y, header.width, height);

            if position == self.cursor {
                frame.render_widget(
                    Block::default().style(self.theme.row_highlight(row.is_interactive())),
                    row_area,
                );
            }
            for (lines, column) in fitted[position].iter().zip(&columns) {
                let cell_area = Rect::new(column.x, y, column.width, height);
                frame.render_widget(
                    Paragraph::new(lines.clone()).style(self.theme.cell()),
                    cell_area,
                );
            }

            self.drawn.rows.push((position, row_area));
            y += height;
        }

        if self.drawn.rows.len() < view.rows.len() {
            let mut scrollbar_state = ScrollbarState::new(view.rows.len()).position(self.cursor);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                body,
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::cell::RefCell;

    fn people() -> Vec<Item> {
        vec![
            Item::new().with("name", "Bob").with("age", 30),
            Item::new().with("name", "Amy").with("age", 25),
            Item::new().with("name", "carl").with("age", 41),
        ]
    }

    fn declared() -> Vec<ColumnConfig> {
        vec![
            ColumnConfig::new("name").label("Name").sortable(),
            ColumnConfig::new("age").label("Age").sortable(),
        ]
    }

    fn names(items: &[Item]) -> Vec<String> {
        items
            .iter()
            .map(|i| i.get("name").map(Value::to_string).unwrap_or_default())
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_new_rejects_duplicate_fields() {
        let props = TableProps::new(people(), vec![ColumnConfig::new("name"), ColumnConfig::new("name")]);
        assert!(matches!(
            Table::new(props),
            Err(TableError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_self_managed_sorts_on_first_sortable_column() {
        let table = Table::new(TableProps::new(people(), declared())).unwrap();
        assert!(!table.is_controlled());
        assert_eq!(names(&table.sorted_items()), vec!["Amy", "Bob", "carl"]);
        // The caller's items are untouched
        assert_eq!(names(table.items()), vec!["Bob", "Amy", "carl"]);
    }

    #[test]
    fn test_self_managed_header_clicks() {
        let mut table = Table::new(TableProps::new(people(), declared()).sort_on("age")).unwrap();
        assert_eq!(names(&table.sorted_items()), vec!["Amy", "Bob", "carl"]);

        table.update(Action::HeaderClicked("name".to_string())).unwrap();
        let sort = table.sort();
        assert_eq!(sort.field(), Some("name"));
        assert_eq!(sort.direction, SortDirection::Ascending);

        table.update(Action::HeaderClicked("name".to_string())).unwrap();
        let sort = table.sort();
        assert_eq!(sort.field(), Some("name"));
        assert_eq!(sort.direction, SortDirection::Descending);
        assert_eq!(names(&table.sorted_items()), vec!["carl", "Bob", "Amy"]);
    }

    #[test]
    fn test_controlled_table_never_changes_its_own_sort() {
        let requests: Rc<RefCell<Vec<(String, SortDirection)>>> = Rc::default();
        let sink = requests.clone();
        let props = TableProps::new(people(), declared())
            .sort_on("name")
            .sort_direction(SortDirection::Descending)
            .on_sort(move |field, direction| sink.borrow_mut().push((field.to_string(), direction)));
        let mut table = Table::new(props).unwrap();
        assert!(table.is_controlled());

        // Items are shown exactly as supplied
        assert_eq!(names(&table.sorted_items()), vec!["Bob", "Amy", "carl"]);

        let before = table.sort();
        assert_eq!(
            table.click_header("name"),
            HeaderClick::Requested {
                field: "name".to_string(),
                direction: SortDirection::Ascending
            }
        );
        assert_eq!(table.sort(), before);
        assert_eq!(*requests.borrow(), vec![("name".to_string(), SortDirection::Ascending)]);

        // The owner applies the sort and re-supplies the props
        table.set_items(vec![people()[1].clone(), people()[0].clone(), people()[2].clone()]);
        table.set_sort_props(Some("name".to_string()), SortDirection::Ascending);
        assert_eq!(table.sort().direction, SortDirection::Ascending);
        assert_eq!(names(&table.sorted_items()), vec!["Amy", "Bob", "carl"]);
    }

    #[test]
    fn test_empty_state_rendering() {
        let table = Table::new(TableProps::new(Vec::new(), declared()).empty_message("No people")).unwrap();
        let view = table.view();
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_state, Some(Text::from("No people")));

        let table = Table::new(
            TableProps::new(vec![Item::new().with("name", "Amy")], declared()).empty_message("No people"),
        )
        .unwrap();
        let view = table.view();
        assert_eq!(view.rows.len(), 1);
        assert!(view.empty_state.is_none());
    }

    #[test]
    fn test_blank_empty_message_renders_nothing() {
        let table = Table::new(TableProps::new(Vec::new(), declared()).empty_message("")).unwrap();
        assert!(table.view().empty_state.is_none());

        let table = Table::new(TableProps::new(Vec::new(), declared())).unwrap();
        assert_eq!(table.view().empty_state, Some(Text::from(DEFAULT_EMPTY_MESSAGE)));
    }

    #[test]
    fn test_set_empty_message_toggles_empty_state() {
        let mut table = Table::new(TableProps::new(Vec::new(), declared()).empty_message("")).unwrap();
        assert!(table.view().empty_state.is_none());

        table.set_empty_message("Nothing yet");
        assert_eq!(table.view().empty_state, Some(Text::from("Nothing yet")));

        table.set_empty_message("");
        assert!(table.view().empty_state.is_none());
    }

    #[test]
    fn test_enter_clicks_row_under_cursor() {
        let clicked: Rc<RefCell<Vec<Item>>> = Rc::default();
        let sink = clicked.clone();
        let props = TableProps::new(people(), declared())
            .on_row_click(move |_, item| sink.borrow_mut().push(item.clone()));
        let mut table = Table::new(props).unwrap();

        table.update(Action::NextRow).unwrap();
        let action = table.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::ClickRow(1, RowEvent::Key(_)))));
        table.update(action.unwrap()).unwrap();

        // Display order is Amy, Bob, carl
        assert_eq!(names(&clicked.borrow()), vec!["Bob"]);
    }

    #[test]
    fn test_enter_without_row_handler_does_nothing() {
        let mut table = Table::new(TableProps::new(people(), declared())).unwrap();
        assert_eq!(table.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        assert!(!table.click_row(0, &RowEvent::Key(key(KeyCode::Enter))));
    }

    #[test]
    fn test_sort_key_uses_focused_column() {
        let mut table = Table::new(TableProps::new(people(), declared())).unwrap();
        table.update(Action::NextColumn).unwrap();
        let follow_up = table.update(Action::SortFocusedColumn).unwrap();
        assert_eq!(follow_up, Some(Action::HeaderClicked("age".to_string())));
        table.update(follow_up.unwrap()).unwrap();
        assert_eq!(table.sort().field(), Some("age"));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut table = Table::new(TableProps::new(people(), declared())).unwrap();
        table.update(Action::LastRow).unwrap();
        assert_eq!(table.cursor(), 2);
        table.update(Action::NextRow).unwrap();
        assert_eq!(table.cursor(), 2);
        table.set_items(vec![Item::new().with("name", "solo")]);
        assert_eq!(table.cursor(), 0);
        assert_eq!(table.selected_item().map(|i| names(&[i])), Some(vec!["solo".to_string()]));
    }

    #[test]
    fn test_set_columns_keeps_sort_field_and_rejects_invalid() {
        let mut table = Table::new(TableProps::new(people(), declared()).sort_on("age")).unwrap();
        let err = table.set_columns(vec![ColumnConfig::new("")], ColumnHooks::new());
        assert_eq!(err, Err(TableError::MissingField { index: 0 }));
        assert_eq!(table.columns().len(), 2);

        table
            .set_columns(vec![ColumnConfig::new("age").label("Years").sortable()], ColumnHooks::new())
            .unwrap();
        assert_eq!(table.sort().column.map(|c| c.label), Some("Years".to_string()));
        assert!(table.refresh_columns().is_ok());
    }

    #[test]
    fn test_draw_shows_sorted_rows_and_indicator() {
        let mut table = Table::new(TableProps::new(people(), declared())).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Name ▲"));
        let amy = text.find("Amy").unwrap();
        let bob = text.find("Bob").unwrap();
        assert!(amy < bob);
    }

    #[test]
    fn test_draw_empty_state() {
        let mut table = Table::new(TableProps::new(Vec::new(), declared()).empty_message("No people")).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        assert!(screen(&terminal).contains("No people"));
    }

    #[test]
    fn test_mouse_click_on_header_after_draw() {
        let mut table = Table::new(TableProps::new(people(), declared())).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();

        // Header row is just inside the border; the right half is "Age"
        let click = MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 20,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        let action = table.handle_mouse_event(click).unwrap();
        assert_eq!(action, Some(Action::HeaderClicked("age".to_string())));
    }

    #[test]
    fn test_mouse_click_on_row_after_draw() {
        let clicked = Rc::new(RefCell::new(Vec::new()));
        let log = clicked.clone();
        let props = TableProps::new(people(), declared()).on_row_click(move |event: &RowEvent, item: &Item| {
            let name = item.get("name").map(Value::to_string).unwrap_or_default();
            log.borrow_mut().push((matches!(event, RowEvent::Mouse(_)), name));
        });
        let mut table = Table::new(props).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();

        // First drawn row holds the first item after sorting by name
        let (position, area) = table.drawn.rows[0];
        let click = MouseEvent {
            kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: area.x + 1,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        };
        let action = table.handle_mouse_event(click).unwrap();
        assert!(matches!(action, Some(Action::ClickRow(0, RowEvent::Mouse(_)))));
        assert_eq!(position, 0);

        table.update(action.unwrap()).unwrap();
        assert_eq!(*clicked.borrow(), vec![(true, "Amy".to_string())]);
    }
}
