//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::record::{EventRecord, EventStatus, RecordId, DATE_FORMAT};
use chrono::NaiveDate;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Highlight the next row on the page
    NextRow,
    /// Highlight the previous row on the page
    PrevRow,
    /// Highlight the first row on the page
    FirstRow,
    /// Highlight the last row on the page
    LastRow,
    /// Move to the next page
    NextPage,
    /// Move to the previous page
    PrevPage,
    /// Jump to a zero-based page index
    GoToPage(usize),
    /// Show or hide speaker/date beneath the highlighted row
    ToggleRowExpansion,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Row Interaction
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the detail view for the highlighted row
    OpenDetail,
    /// Open the detail view for a specific record (mouse click)
    OpenDetailFor(RecordId),
    /// Open the field editor for the record in the detail view
    StartEdit,
    /// Replace a record with an edited copy
    SubmitEdit(EventRecord),
    /// Ask for confirmation before deleting the record in the detail view
    RequestDelete,
    /// Delete a record
    DeleteRecord(RecordId),
    /// Set a record's status to complete
    MarkComplete(RecordId),

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Exit search mode
    ExitSearchMode,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,
    /// Drop the whole search query
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Filters & Sorting
    // ─────────────────────────────────────────────────────────────────────────
    /// Open status filter dialog
    OpenStatusFilter,
    /// Restrict rows to one status
    SetStatusFilter(EventStatus),
    /// Show rows of every status
    ClearStatusFilter,
    /// Open date filter dialog
    OpenDateFilter,
    /// Restrict rows to one date
    SetDateFilter(NaiveDate),
    /// Show rows of every date
    ClearDateFilter,
    /// Flip between oldest-first and newest-first
    ToggleSortOrder,
    /// Drop search text and both filters
    ClearFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Export the filtered rows to a document
    Export,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::GoToPage(index) => write!(f, "GoToPage({})", index),
            Action::ToggleRowExpansion => write!(f, "ToggleRowExpansion"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::OpenDetail => write!(f, "OpenDetail"),
            Action::OpenDetailFor(id) => write!(f, "OpenDetailFor({})", id),
            Action::StartEdit => write!(f, "StartEdit"),
            Action::SubmitEdit(record) => write!(f, "SubmitEdit({})", record.id),
            Action::RequestDelete => write!(f, "RequestDelete"),
            Action::DeleteRecord(id) => write!(f, "DeleteRecord({})", id),
            Action::MarkComplete(id) => write!(f, "MarkComplete({})", id),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::OpenStatusFilter => write!(f, "OpenStatusFilter"),
            Action::SetStatusFilter(status) => write!(f, "SetStatusFilter({})", status),
            Action::ClearStatusFilter => write!(f, "ClearStatusFilter"),
            Action::OpenDateFilter => write!(f, "OpenDateFilter"),
            Action::SetDateFilter(date) => {
                write!(f, "SetDateFilter({})", date.format(DATE_FORMAT))
            }
            Action::ClearDateFilter => write!(f, "ClearDateFilter"),
            Action::ToggleSortOrder => write!(f, "ToggleSortOrder"),
            Action::ClearFilters => write!(f, "ClearFilters"),
            Action::Export => write!(f, "Export"),
        }
    }
}
