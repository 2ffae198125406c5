//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod automation;
pub mod button;
pub mod dialog;
pub mod layout;
pub mod page_header;
pub mod table;
pub mod theme;
pub mod truncate;

pub use button::{Appearance, Button};
pub use dialog::{
    Dialog, DialogAction, DialogActionItem, DialogFocus, DialogProps, DialogRole, DialogWidth,
    TitleElement,
};
pub use layout::{browser_layout, centered_popup};
pub use page_header::{Description, PageAction, PageHeader, PageHeaderProps};
pub use table::{RowEvent, Table, TableProps};
pub use theme::Theme;
