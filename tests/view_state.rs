//! View-state behavior: navigation, search mode, filter mutations,
//! notice expiry, and load failures leaving the collection intact.

use helpdeck::config::Config;
use helpdeck::data::{Category, FilterState, Priority, SortOrder, Status, Ticket};
use helpdeck::remote::StoreEvent;
use helpdeck::tui::{App, LoadState, Message, ModalState, NoticeKind};
use pretty_assertions::assert_eq;

fn make_ticket(id: i64, title: &str, created_at: &str) -> Ticket {
    Ticket {
        id,
        title: title.to_string(),
        description: format!("Description for {}", title),
        category: Category::Network,
        priority: Priority::Low,
        status: Status::Open,
        created_at: created_at.to_string(),
    }
}

fn loaded_app() -> App {
    let mut app = App::new(Config::default());
    app.apply(StoreEvent::Loaded(vec![
        make_ticket(1, "Password reset", "2024-01-01"),
        make_ticket(2, "WiFi down", "2024-02-01"),
        make_ticket(3, "Monitor flicker", "2024-03-01"),
    ]));
    app
}

#[test]
fn selection_moves_within_bounds() {
    let mut app = loaded_app();
    assert_eq!(app.selected, 0);

    app.update(Message::MoveDown);
    app.update(Message::MoveDown);
    assert_eq!(app.selected, 2);

    // Clamped at the end.
    app.update(Message::MoveDown);
    assert_eq!(app.selected, 2);

    app.update(Message::GotoTop);
    assert_eq!(app.selected, 0);
    app.update(Message::MoveUp);
    assert_eq!(app.selected, 0);

    app.update(Message::GotoBottom);
    assert_eq!(app.selected, 2);
}

#[test]
fn selection_clamps_when_filters_shrink_the_list() {
    let mut app = loaded_app();
    app.update(Message::GotoBottom);
    assert_eq!(app.selected, 2);

    app.filter.search = "wifi".to_string();
    app.refresh_visible();

    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.selected, 0);
}

#[test]
fn search_input_narrows_live_and_esc_restores() {
    let mut app = loaded_app();

    app.update(Message::EnterSearch);
    assert!(app.search_mode);
    for c in "wifi".chars() {
        app.update(Message::SearchInput(c));
    }
    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.selected_ticket().map(|t| t.id), Some(2));

    app.update(Message::ExitSearch);
    assert!(!app.search_mode);
    assert!(app.filter.search.is_empty());
    assert_eq!(app.visible.len(), 3);
}

#[test]
fn confirm_search_keeps_the_query_applied() {
    let mut app = loaded_app();
    app.update(Message::EnterSearch);
    for c in "wifi".chars() {
        app.update(Message::SearchInput(c));
    }
    app.update(Message::ConfirmSearch);

    assert!(!app.search_mode);
    assert_eq!(app.filter.search, "wifi");
    assert_eq!(app.visible.len(), 1);
}

#[test]
fn clear_filters_resets_everything_atomically() {
    let mut app = loaded_app();
    app.filter = FilterState {
        status: Some(Status::Open),
        priority: Some(Priority::Low),
        category: Some(Category::Network),
        sort: SortOrder::Oldest,
        search: "wifi".to_string(),
    };
    app.refresh_visible();

    app.update(Message::ClearFilters);

    assert_eq!(app.filter, FilterState::default());
    assert_eq!(app.filter.active_filter_count(), 0);
    assert_eq!(app.visible.len(), 3);
}

#[test]
fn filter_cycling_messages_reapply_the_engine() {
    let mut app = loaded_app();
    app.update(Message::CycleStatusFilter);
    assert_eq!(app.filter.status, Some(Status::Open));
    assert_eq!(app.visible.len(), 3);

    app.update(Message::CycleStatusFilter);
    assert_eq!(app.filter.status, Some(Status::InProgress));
    assert_eq!(app.visible.len(), 0);

    app.update(Message::ToggleSortOrder);
    assert_eq!(app.filter.sort, SortOrder::Oldest);
}

#[test]
fn only_one_modal_at_a_time() {
    let mut app = loaded_app();

    app.update(Message::ToggleHelp);
    assert_eq!(app.modal, ModalState::Help);

    app.update(Message::ToggleHelp);
    assert_eq!(app.modal, ModalState::None);

    app.update(Message::ToggleFilterMenu);
    assert_eq!(app.modal, ModalState::FilterMenu);
    app.update(Message::CloseModal);
    assert_eq!(app.modal, ModalState::None);
}

#[test]
fn open_detail_snapshots_the_selected_ticket() {
    let mut app = loaded_app();
    // Newest first: row 0 is ticket 3.
    app.update(Message::OpenDetail);
    assert_eq!(app.modal, ModalState::Detail);
    assert_eq!(app.detail.as_ref().map(|t| t.id), Some(3));

    app.update(Message::CloseModal);
    assert_eq!(app.modal, ModalState::None);
    assert!(app.detail.is_none());
}

#[test]
fn open_detail_with_empty_list_does_nothing() {
    let mut app = App::new(Config::default());
    app.update(Message::OpenDetail);
    assert_eq!(app.modal, ModalState::None);
    assert!(app.detail.is_none());
}

#[test]
fn load_failure_keeps_the_previous_collection() {
    let mut app = loaded_app();
    app.load_state = LoadState::Loading;

    app.apply(StoreEvent::LoadFailed("connection refused".to_string()));

    assert_eq!(app.load_state, LoadState::Idle);
    assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    assert_eq!(app.repository.len(), 3);
}

#[test]
fn last_load_wins_and_replaces_wholesale() {
    let mut app = loaded_app();

    app.apply(StoreEvent::Loaded(vec![make_ticket(9, "Fresh", "2024-04-01")]));

    assert_eq!(app.repository.len(), 1);
    assert_eq!(app.visible.len(), 1);
    assert_eq!(app.selected_ticket().map(|t| t.id), Some(9));
}

#[test]
fn notice_expires_after_the_configured_ticks() {
    let mut app = loaded_app();
    let ticks = app.config.ui.notice_ticks;

    app.apply(StoreEvent::Created { id: Some(7) });
    assert!(app.notice.is_some());

    for _ in 0..ticks - 1 {
        app.on_tick();
    }
    assert!(app.notice.is_some());

    app.on_tick();
    assert!(app.notice.is_none());
}

#[test]
fn form_editing_builds_the_draft() {
    let mut app = loaded_app();
    app.update(Message::OpenForm);
    assert_eq!(app.modal, ModalState::NewTicket);

    for c in "WiFi".chars() {
        app.update(Message::FormInput(c));
    }
    app.update(Message::FormNextField);
    for c in "down".chars() {
        app.update(Message::FormInput(c));
    }
    app.update(Message::FormNextField);
    app.update(Message::CycleDraftCategory);
    app.update(Message::FormNextField);
    app.update(Message::CycleDraftPriority);
    app.update(Message::CycleDraftPriority);

    assert_eq!(app.draft.title, "WiFi");
    assert_eq!(app.draft.description, "down");
    assert_eq!(app.draft.category, Category::Software);
    assert_eq!(app.draft.priority, Priority::High);

    // Cancel discards the draft entirely.
    app.update(Message::CancelForm);
    assert_eq!(app.modal, ModalState::None);
    assert!(app.draft.title.is_empty());
    assert_eq!(app.draft.category, Category::Network);
}
