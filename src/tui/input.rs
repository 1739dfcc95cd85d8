//! Key dispatch: maps key events to messages based on the current mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::data::Status;

use super::{App, Message, ModalState};

/// Route a key to the handler for whichever mode is active.
pub fn dispatch(app: &App, key: KeyEvent) -> Message {
    if app.search_mode {
        return dispatch_search_mode(key);
    }

    match app.modal {
        ModalState::Help => dispatch_help_modal(key),
        ModalState::NewTicket => dispatch_form(app, key),
        ModalState::Detail => dispatch_detail(key),
        ModalState::FilterMenu => dispatch_filter_menu(key),
        ModalState::None => dispatch_normal_mode(key),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode-specific dispatch functions
// ─────────────────────────────────────────────────────────────────────────────

/// Handle keys in normal mode (main ticket list).
fn dispatch_normal_mode(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('q') => Message::Quit,
        KeyCode::Char('j') | KeyCode::Down => Message::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Message::MoveUp,
        KeyCode::Char('g') | KeyCode::Home => Message::GotoTop,
        KeyCode::Char('G') | KeyCode::End => Message::GotoBottom,
        KeyCode::Char('/') => Message::EnterSearch,
        KeyCode::Char('n') => Message::OpenForm,
        KeyCode::Enter => Message::OpenDetail,
        KeyCode::Char('f') => Message::ToggleFilterMenu,
        KeyCode::Char('o') => Message::ToggleSortOrder,
        KeyCode::Char('c') => Message::ClearFilters,
        KeyCode::Char('r') => Message::Refresh,
        KeyCode::Char('?') => Message::ToggleHelp,
        _ => Message::None,
    }
}

/// Handle keys in search mode.
fn dispatch_search_mode(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::ExitSearch,
        KeyCode::Enter => Message::ConfirmSearch,
        KeyCode::Backspace => Message::SearchBackspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Message::SearchInput(c)
        }
        _ => Message::None,
    }
}

fn dispatch_help_modal(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            Message::CloseModal
        }
        _ => Message::None,
    }
}

/// Handle keys in the new-ticket form.
///
/// Text fields swallow plain characters; the category/priority selectors
/// cycle with Left/Right or Space.
fn dispatch_form(app: &App, key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::CancelForm,
        KeyCode::Enter => Message::SubmitDraft,
        KeyCode::Tab | KeyCode::Down => Message::FormNextField,
        KeyCode::BackTab | KeyCode::Up => Message::FormPrevField,
        KeyCode::Backspace => Message::FormBackspace,
        KeyCode::Left | KeyCode::Right => match app.form_focus {
            super::FormField::Category => Message::CycleDraftCategory,
            super::FormField::Priority => Message::CycleDraftPriority,
            _ => Message::None,
        },
        KeyCode::Char(' ') if !app.form_focus.is_text() => match app.form_focus {
            super::FormField::Category => Message::CycleDraftCategory,
            super::FormField::Priority => Message::CycleDraftPriority,
            _ => Message::None,
        },
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Message::FormInput(c)
        }
        _ => Message::None,
    }
}

/// Handle keys in the detail panel. Digits pick the target status.
fn dispatch_detail(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Message::CloseModal,
        KeyCode::Char('1') => Message::SetStatus(Status::Open),
        KeyCode::Char('2') => Message::SetStatus(Status::InProgress),
        KeyCode::Char('3') => Message::SetStatus(Status::Resolved),
        _ => Message::None,
    }
}

fn dispatch_filter_menu(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('f') | KeyCode::Enter => {
            Message::CloseModal
        }
        KeyCode::Char('s') => Message::CycleStatusFilter,
        KeyCode::Char('p') => Message::CyclePriorityFilter,
        KeyCode::Char('c') => Message::CycleCategoryFilter,
        KeyCode::Char('o') => Message::ToggleSortOrder,
        KeyCode::Char('x') => Message::ClearFilters,
        _ => Message::None,
    }
}
