//! Column configuration and inference
//!
//! Columns are declared as an ordered list of [`ColumnConfig`] (plain data,
//! loadable from config files). Custom cell renderers and comparators are
//! attached per field through [`ColumnHooks`]. [`infer_columns`] merges the
//! two into the [`ColumnDescriptor`]s the table works with.

use super::item::{Item, Value};
use super::sort::Comparator;
use crate::error::TableError;
use ratatui::layout::Constraint;
use ratatui::text::Line;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Requested column width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    /// Share the remaining space with other auto columns
    #[default]
    Auto,
    /// Fixed width in terminal cells
    Length(u16),
    /// Percentage of the table width
    Percentage(u16),
}

impl ColumnWidth {
    pub fn constraint(&self) -> Constraint {
        match self {
            ColumnWidth::Auto => Constraint::Fill(1),
            ColumnWidth::Length(n) => Constraint::Length(*n),
            ColumnWidth::Percentage(p) => Constraint::Percentage(*p),
        }
    }
}

/// Declared column configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub truncating: bool,
    #[serde(default)]
    pub width: ColumnWidth,
}

impl ColumnConfig {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn truncating(mut self) -> Self {
        self.truncating = true;
        self
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }
}

type RenderFn = dyn Fn(&Item, &ColumnDescriptor) -> Line<'static>;

/// Custom cell rendering function
///
/// Equality is pointer identity so that re-inferring columns from the same
/// hooks yields equal descriptors.
#[derive(Clone)]
pub struct CellRenderer(Rc<RenderFn>);

impl CellRenderer {
    pub fn new(f: impl Fn(&Item, &ColumnDescriptor) -> Line<'static> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn render(&self, item: &Item, column: &ColumnDescriptor) -> Line<'static> {
        (self.0)(item, column)
    }
}

impl PartialEq for CellRenderer {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellRenderer(..)")
    }
}

/// Per-field renderers and comparators
#[derive(Debug, Clone, Default)]
pub struct ColumnHooks {
    renderers: HashMap<String, CellRenderer>,
    comparators: HashMap<String, Comparator>,
}

impl ColumnHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render cells of `field` with `f` instead of the plain field value
    pub fn render(
        mut self,
        field: impl Into<String>,
        f: impl Fn(&Item, &ColumnDescriptor) -> Line<'static> + 'static,
    ) -> Self {
        self.renderers.insert(field.into(), CellRenderer::new(f));
        self
    }

    /// Order rows of `field` with `f` instead of the inferred comparator
    pub fn compare(
        mut self,
        field: impl Into<String>,
        f: impl Fn(&Item, &Item, &ColumnDescriptor) -> Ordering + 'static,
    ) -> Self {
        self.comparators.insert(field.into(), Comparator::custom(f));
        self
    }

    pub fn renderer(&self, field: &str) -> Option<&CellRenderer> {
        self.renderers.get(field)
    }

    pub fn comparator(&self, field: &str) -> Option<&Comparator> {
        self.comparators.get(field)
    }
}

/// Resolved, immutable column description
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub field: String,
    pub label: String,
    pub cell_renderer: Option<CellRenderer>,
    pub comparator: Option<Comparator>,
    pub sortable: bool,
    pub truncating: bool,
    pub width: ColumnWidth,
}

impl ColumnDescriptor {
    /// Descriptor without hooks, mostly useful in tests and demos
    pub fn plain(config: &ColumnConfig) -> Self {
        Self {
            field: config.field.clone(),
            label: config
                .label
                .clone()
                .unwrap_or_else(|| config.field.clone()),
            cell_renderer: None,
            comparator: None,
            sortable: config.sortable,
            truncating: config.truncating,
            width: config.width,
        }
    }

    /// The item's value for this column
    pub fn value<'a>(&self, item: &'a Item) -> Option<&'a Value> {
        item.get(&self.field)
    }

    /// Render the cell for `item`, using the custom renderer when present
    pub fn render_cell(&self, item: &Item) -> Line<'static> {
        match &self.cell_renderer {
            Some(renderer) => renderer.render(item, self),
            None => default_cell(item, self),
        }
    }
}

/// Default cell renderer: the field value as text, empty when missing
pub fn default_cell(item: &Item, column: &ColumnDescriptor) -> Line<'static> {
    Line::from(
        column
            .value(item)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    )
}

/// Build descriptors for the declared columns, in declaration order
pub fn infer_columns(declared: &[ColumnConfig], hooks: &ColumnHooks) -> Vec<ColumnDescriptor> {
    declared
        .iter()
        .map(|config| {
            let mut column = ColumnDescriptor::plain(config);
            column.cell_renderer = hooks.renderer(&config.field).cloned();
            column.comparator = hooks.comparator(&config.field).cloned();
            column
        })
        .collect()
}

/// Check that every column has a field and that fields are unique
pub fn validate_columns(columns: &[ColumnDescriptor]) -> Result<(), TableError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, column) in columns.iter().enumerate() {
        if column.field.trim().is_empty() {
            return Err(TableError::MissingField { index });
        }
        if let Some(first) = seen.insert(column.field.as_str(), index) {
            return Err(TableError::DuplicateField {
                field: column.field.clone(),
                first,
                second: index,
            });
        }
    }
    Ok(())
}

/// Look up a column by field
pub fn find_column<'a>(columns: &'a [ColumnDescriptor], field: &str) -> Option<&'a ColumnDescriptor> {
    columns.iter().find(|c| c.field == field)
}
