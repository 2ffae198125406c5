//! Model layer - table data, column configuration and sort state
//!
//! - `item` - records shown in a table
//! - `column` - declared columns, hooks and inference
//! - `sort` - comparators and the sort engine
//! - `sort_mode` - self-managed vs. controlled sort state
//! - `modal` - overlay stack of the data browser

pub mod column;
pub mod item;
pub mod modal;
pub mod sort;
pub mod sort_mode;

pub use column::{
    infer_columns, validate_columns, CellRenderer, ColumnConfig, ColumnDescriptor, ColumnHooks,
    ColumnWidth,
};
pub use item::{Item, Value};
pub use sort::{select_comparator, sort_items, Comparator, SortDescriptor, SortDirection};
pub use sort_mode::{HeaderClick, SortController, SortHandler, SortMode};
