//! cosmos-tui - terminal UI components
//!
//! A sortable [`Table`], a modal [`Dialog`] and a [`PageHeader`] built on
//! ratatui's Component Architecture pattern, plus the pieces the
//! `cosmos-tui` data browser uses to wire them together.

pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod services;
pub mod tui;

pub use components::{Dialog, DialogProps, PageHeader, PageHeaderProps, Table, TableProps};
pub use error::{DatasetError, TableError};
pub use model::{
    ColumnConfig, ColumnDescriptor, ColumnHooks, Item, SortDescriptor, SortDirection, Value,
};
