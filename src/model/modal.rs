//! Modal stack for the data browser overlays
//!
//! Only the top modal receives input; everything below it is drawn but
//! inert.

use super::item::Item;

/// An overlay shown on top of the browser screen
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Destructive quit confirmation
    QuitConfirm,
    /// Field listing of a clicked row
    RowDetails { item: Item },
    /// Keyboard shortcuts
    Help,
}

impl Modal {
    pub fn name(&self) -> &'static str {
        match self {
            Modal::QuitConfirm => "quit",
            Modal::RowDetails { .. } => "row-details",
            Modal::Help => "help",
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        tracing::debug!(modal = modal.name(), depth = self.stack.len() + 1, "modal opened");
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        let modal = self.stack.pop();
        if let Some(m) = &modal {
            tracing::debug!(modal = m.name(), depth = self.stack.len(), "modal closed");
        }
        modal
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether `modal` is already open anywhere in the stack
    pub fn contains(&self, modal: &Modal) -> bool {
        self.stack.contains(modal)
    }
}
