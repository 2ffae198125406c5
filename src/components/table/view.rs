//! Row/cell rendering
//!
//! Turns arranged items and column descriptors into a [`TableView`]: the
//! header cells with their sort flags, one [`RenderedRow`] per item and the
//! optional empty-state content. Drawing and tests both consume this view.

use crate::components::automation;
use crate::model::{ColumnDescriptor, ColumnWidth, Item, SortDescriptor, SortDirection};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::text::{Line, Text};
use std::fmt;
use std::rc::Rc;

/// Interaction that clicked a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// Row click callback, called with the event and the clicked item
pub type RowClickHandler = Rc<dyn Fn(&RowEvent, &Item)>;

/// Click handler attached to one rendered row
#[derive(Clone)]
pub struct RowClick(RowClickHandler);

impl RowClick {
    pub fn fire(&self, event: &RowEvent, item: &Item) {
        (self.0)(event, item)
    }
}

impl fmt::Debug for RowClick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RowClick(..)")
    }
}

#[derive(Debug, Clone)]
pub struct RenderedRow {
    pub item: Item,
    pub cells: Vec<Line<'static>>,
    /// Absent when the table has no row handler; such rows are inert
    pub on_click: Option<RowClick>,
    pub automation: &'static str,
}

impl RenderedRow {
    pub fn is_interactive(&self) -> bool {
        self.on_click.is_some()
    }

    /// Fire the row's click handler. Returns false for inert rows.
    pub fn click(&self, event: &RowEvent) -> bool {
        match &self.on_click {
            Some(handler) => {
                handler.fire(event, &self.item);
                true
            }
            None => false,
        }
    }
}

/// Header cell with the flags the styling layer needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub field: String,
    pub label: String,
    pub sortable: bool,
    pub active: bool,
    /// Set only on the active column
    pub direction: Option<SortDirection>,
    pub truncating: bool,
    pub width: ColumnWidth,
}

impl HeaderCell {
    /// Label with the sort indicator of the active column
    pub fn title(&self) -> String {
        match self.direction {
            Some(direction) => format!("{} {}", self.label, direction.symbol()),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableView {
    pub automation: &'static str,
    pub body_automation: &'static str,
    pub sort: SortDescriptor,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    /// Shown instead of the body when there are no rows
    pub empty_state: Option<Text<'static>>,
}

pub fn header_cells(columns: &[ColumnDescriptor], sort: &SortDescriptor) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|column| {
            let active = sort.is_active(&column.field);
            HeaderCell {
                field: column.field.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                active,
                direction: active.then_some(sort.direction),
                truncating: column.truncating,
                width: column.width,
            }
        })
        .collect()
}

/// One row per item in order, one cell per column
pub fn render_rows(
    items: Vec<Item>,
    columns: &[ColumnDescriptor],
    on_row_click: Option<&RowClickHandler>,
) -> Vec<RenderedRow> {
    items
        .into_iter()
        .map(|item| {
            let cells = columns.iter().map(|column| column.render_cell(&item)).collect();
            RenderedRow {
                cells,
                on_click: on_row_click.map(|handler| RowClick(handler.clone())),
                item,
                automation: automation::TABLE_ROW,
            }
        })
        .collect()
}

/// Whether `text` has nothing to show
pub fn is_blank(text: &Text<'_>) -> bool {
    text.lines
        .iter()
        .all(|line| line.spans.iter().all(|span| span.content.is_empty()))
}

/// Empty-state content: the message when there are no rows and the message
/// is not blank
pub fn empty_state(rows: &[RenderedRow], message: &Text<'static>) -> Option<Text<'static>> {
    if !rows.is_empty() || is_blank(message) {
        return None;
    }
    Some(message.clone())
}
