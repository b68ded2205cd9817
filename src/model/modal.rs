//! Modal stack for managing overlays
//!
//! Only the top modal receives input. Closing the row detail view drops
//! every modal that belongs to it (edit form, delete confirmation).

use super::record::RecordId;

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Help dialog showing all keyboard shortcuts
    Help,
    /// Row detail view for one record
    RowDetail { id: RecordId },
    /// Field editor opened from the row detail view
    EditRecord { id: RecordId },
    /// Delete confirmation opened from the row detail view
    DeleteConfirm { id: RecordId },
    /// Status filter selection
    StatusFilter,
    /// Date filter input
    DateFilter,
}

impl Modal {
    /// Whether this modal is part of the row detail view
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            Modal::RowDetail { .. } | Modal::EditRecord { .. } | Modal::DeleteConfirm { .. }
        )
    }
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Bottom-to-top iteration for rendering
    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }

    /// Drop every modal belonging to the row detail view
    pub fn close_detail(&mut self) {
        self.stack.retain(|modal| !modal.is_detail());
    }
}
