//! Sort-mode controller
//!
//! A table either owns its sort state (self-managed) or lets the caller own
//! it (controlled). The mode is picked once, at construction, by whether an
//! `on_sort` handler was supplied, and never changes afterwards.

use super::column::{find_column, ColumnDescriptor};
use super::item::Item;
use super::sort::{sort_items, SortDescriptor, SortDirection};
use std::fmt;
use std::rc::Rc;

/// Handler notified with `(field, direction)` when a controlled table's
/// header is clicked
pub type SortHandler = Rc<dyn Fn(&str, SortDirection)>;

/// Who owns the sort state
#[derive(Clone)]
pub enum SortMode {
    /// The table sorts its items itself
    SelfManaged(SortDescriptor),
    /// The caller supplies sorted items and the sort descriptor
    Controlled(SortHandler),
}

impl fmt::Debug for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::SelfManaged(sort) => f.debug_tuple("SelfManaged").field(sort).finish(),
            SortMode::Controlled(_) => f.write_str("Controlled(..)"),
        }
    }
}

/// Result of a header click
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderClick {
    /// The column is not sortable
    Ignored,
    /// Self-managed state changed to this descriptor
    Applied(SortDescriptor),
    /// The caller's handler was asked to apply this sort
    Requested {
        field: String,
        direction: SortDirection,
    },
}

/// Owns the sort mode of one table instance
#[derive(Debug, Clone)]
pub struct SortController {
    mode: SortMode,
}

impl SortController {
    /// Self-managed controller
    ///
    /// Starts on the `sort_on` column when given, otherwise on the first
    /// sortable column, otherwise unsorted. Direction starts ascending.
    pub fn self_managed(columns: &[ColumnDescriptor], sort_on: Option<&str>) -> Self {
        let column = match sort_on {
            Some(field) => {
                let found = find_column(columns, field).cloned();
                if found.is_none() {
                    tracing::warn!(field, "sort_on names an unknown column, table starts unsorted");
                }
                found
            }
            None => columns.iter().find(|c| c.sortable).cloned(),
        };

        Self {
            mode: SortMode::SelfManaged(SortDescriptor {
                column,
                direction: SortDirection::Ascending,
            }),
        }
    }

    /// Controlled controller forwarding header clicks to `on_sort`
    pub fn controlled(on_sort: SortHandler) -> Self {
        Self {
            mode: SortMode::Controlled(on_sort),
        }
    }

    /// Pick the mode from the presence of an `on_sort` handler
    pub fn new(
        columns: &[ColumnDescriptor],
        sort_on: Option<&str>,
        on_sort: Option<SortHandler>,
    ) -> Self {
        match on_sort {
            Some(handler) => Self::controlled(handler),
            None => Self::self_managed(columns, sort_on),
        }
    }

    pub fn mode(&self) -> &SortMode {
        &self.mode
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, SortMode::Controlled(_))
    }

    /// The descriptor to render with
    ///
    /// Self-managed tables use their own state. Controlled tables resolve
    /// the caller's `sort_on`/`direction` props against the columns.
    pub fn descriptor(
        &self,
        columns: &[ColumnDescriptor],
        sort_on: Option<&str>,
        direction: SortDirection,
    ) -> SortDescriptor {
        match &self.mode {
            SortMode::SelfManaged(sort) => sort.clone(),
            SortMode::Controlled(_) => SortDescriptor {
                column: sort_on.and_then(|field| find_column(columns, field).cloned()),
                direction,
            },
        }
    }

    /// The item sequence to render
    ///
    /// Self-managed tables sort a copy of `items`; controlled tables show
    /// the caller's items as they are.
    pub fn arrange(&self, items: &[Item], sort: &SortDescriptor) -> Vec<Item> {
        match &self.mode {
            SortMode::SelfManaged(_) => sort_items(items, sort),
            SortMode::Controlled(_) => items.to_vec(),
        }
    }

    /// React to a click on the header of `column`, given the descriptor
    /// currently rendered
    pub fn header_clicked(&mut self, column: &ColumnDescriptor, active: &SortDescriptor) -> HeaderClick {
        if !column.sortable {
            return HeaderClick::Ignored;
        }

        let direction = active.next_direction(&column.field);
        match &mut self.mode {
            SortMode::SelfManaged(sort) => {
                *sort = SortDescriptor::new(column.clone(), direction);
                tracing::debug!(field = %column.field, %direction, "table sort changed");
                HeaderClick::Applied(sort.clone())
            }
            SortMode::Controlled(on_sort) => {
                tracing::debug!(field = %column.field, %direction, "table sort requested");
                on_sort(&column.field, direction);
                HeaderClick::Requested {
                    field: column.field.clone(),
                    direction,
                }
            }
        }
    }

    /// Re-resolve the self-managed column after the columns were replaced
    ///
    /// The active field keeps its direction when it still exists; otherwise
    /// the table becomes unsorted.
    pub fn resync(&mut self, columns: &[ColumnDescriptor]) {
        if let SortMode::SelfManaged(sort) = &mut self.mode {
            if let Some(field) = sort.field().map(str::to_owned) {
                sort.column = find_column(columns, &field).cloned();
            }
        }
    }
}
