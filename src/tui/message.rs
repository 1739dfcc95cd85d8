//! Message enum for the Elm-style update loop.
//!
//! Every user action is represented as a message, dispatched from key
//! events and processed by `App::update()`. This keeps data flow
//! unidirectional and the update logic testable without a terminal.

use crate::data::Status;

/// All possible user actions in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────────────────────
    // App lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Quit the application
    Quit,
    /// Reload the ticket collection from the service
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move selection up by one
    MoveUp,
    /// Move selection down by one
    MoveDown,
    /// Go to the first visible ticket
    GotoTop,
    /// Go to the last visible ticket
    GotoBottom,

    // ─────────────────────────────────────────────────────────────────────────
    // Search mode
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode, clearing the previous query
    EnterSearch,
    /// Exit search mode and drop the query
    ExitSearch,
    /// Leave search mode but keep the query applied
    ConfirmSearch,
    /// Add a character to the search query
    SearchInput(char),
    /// Remove the last character from the search query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the help modal
    ToggleHelp,
    /// Toggle the filter menu modal
    ToggleFilterMenu,
    /// Open the detail panel for the selected ticket
    OpenDetail,
    /// Close whichever modal is open
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Filter menu
    // ─────────────────────────────────────────────────────────────────────────
    /// Advance the status filter to the next value (or back to All)
    CycleStatusFilter,
    /// Advance the priority filter
    CyclePriorityFilter,
    /// Advance the category filter
    CycleCategoryFilter,
    /// Flip between newest-first and oldest-first
    ToggleSortOrder,
    /// Reset every filter to its default
    ClearFilters,

    // ─────────────────────────────────────────────────────────────────────────
    // New-ticket form
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the new-ticket form
    OpenForm,
    /// Close the form and discard the draft
    CancelForm,
    /// Move focus to the next form field
    FormNextField,
    /// Move focus to the previous form field
    FormPrevField,
    /// Type a character into the focused text field
    FormInput(char),
    /// Delete the last character of the focused text field
    FormBackspace,
    /// Cycle the draft's category
    CycleDraftCategory,
    /// Cycle the draft's priority
    CycleDraftPriority,
    /// Validate and submit the draft
    SubmitDraft,

    // ─────────────────────────────────────────────────────────────────────────
    // Detail panel
    // ─────────────────────────────────────────────────────────────────────────
    /// Request a status change for the ticket in the detail panel
    SetStatus(Status),

    // ─────────────────────────────────────────────────────────────────────────
    // No-op
    // ─────────────────────────────────────────────────────────────────────────
    /// No operation (unhandled keys)
    None,
}
