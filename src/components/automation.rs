//! Automation ids for external test tooling
//!
//! Rendered views carry these ids so UI tests can find the table, its
//! rows or a dialog's parts. They have no effect on drawing.

pub const TABLE: &str = "table";
pub const TABLE_BODY: &str = "table.body";
pub const TABLE_ROW: &str = "table.row";
pub const DIALOG: &str = "dialog";
pub const DIALOG_TITLE: &str = "dialog.title";
pub const DIALOG_BODY: &str = "dialog.body";
pub const DIALOG_FOOTER: &str = "dialog.footer";
pub const PAGE_HEADER: &str = "page-header";
