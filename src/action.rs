//! Action enum - everything the components and the browser can do
//!
//! Components turn input events into Actions and apply them in `update`.
//! Callbacks handed to components (row clicks, dialog buttons, header
//! actions) cannot reach the app directly, so they push follow-up Actions
//! onto an [`ActionQueue`] that the app drains after every event.

use crate::components::table::RowEvent;
use crate::model::{Item, SortDirection};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// All possible actions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Reload the dataset from disk
    Reload,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,
    PageDown,
    PageUp,
    /// Move header focus right
    NextColumn,
    /// Move header focus left
    PrevColumn,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Interaction
    // ─────────────────────────────────────────────────────────────────────────
    /// Header of the column with this field was clicked
    HeaderClicked(String),
    /// Sort on the header that currently has focus
    SortFocusedColumn,
    /// Row at this position (in rendered order) was clicked
    ClickRow(usize, RowEvent),
    /// A controlled table asks the owner to sort
    SortRequested(String, SortDirection),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Show the fields of an item
    ShowDetails(Item),
    /// Close the top modal
    CloseModal,
    /// Move dialog focus forward
    FocusNext,
    /// Move dialog focus backward
    FocusPrev,
    /// Activate the focused dialog element
    Activate,
    ScrollUp,
    ScrollDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::Reload => write!(f, "Reload"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::PageDown => write!(f, "PageDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::HeaderClicked(field) => write!(f, "HeaderClicked({})", field),
            Action::SortFocusedColumn => write!(f, "SortFocusedColumn"),
            Action::ClickRow(index, _) => write!(f, "ClickRow({})", index),
            Action::SortRequested(field, direction) => {
                write!(f, "SortRequested({}, {})", field, direction)
            }
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::ShowDetails(_) => write!(f, "ShowDetails"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::FocusNext => write!(f, "FocusNext"),
            Action::FocusPrev => write!(f, "FocusPrev"),
            Action::Activate => write!(f, "Activate"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
        }
    }
}

/// Shared FIFO of follow-up actions pushed by component callbacks
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    inner: Rc<RefCell<VecDeque<Action>>>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, action: Action) {
        self.inner.borrow_mut().push_back(action);
    }

    pub fn pop(&self) -> Option<Action> {
        self.inner.borrow_mut().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// A callback that pushes `action` every time it runs
    pub fn sender(&self, action: Action) -> impl Fn() + 'static {
        let queue = self.clone();
        move || queue.push(action.clone())
    }
}
