use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::config::Config;
use crate::data::{draft, filter, FilterState, Status, Ticket, TicketDraft};
use crate::remote::{self, StoreEvent, TicketRepository};

use super::Message;

/// Braille spinner frames for loading animation
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Active modal state - only one modal can be active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    NewTicket,
    Detail,
    FilterMenu,
}

impl ModalState {
    pub fn is_none(&self) -> bool {
        matches!(self, ModalState::None)
    }
}

/// Create-flow states: Idle -> Validating -> Submitting -> Idle.
///
/// Success and failure both land back on Idle; what distinguishes them is
/// the notice and whether the draft survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateFlow {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Status-update flow states: Idle -> Updating -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateFlow {
    #[default]
    Idle,
    Updating,
}

/// Collection-load states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

/// Which field of the new-ticket form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Category,
    Priority,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Category,
            Self::Category => Self::Priority,
            Self::Priority => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Priority,
            Self::Description => Self::Title,
            Self::Category => Self::Description,
            Self::Priority => Self::Category,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient status-line message; expires after a fixed number of
/// event-loop ticks.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub ticks_left: u16,
}

pub struct App {
    pub config: Arc<Config>,
    pub repository: TicketRepository,

    // Derived view: engine output as indices into the repository
    pub filter: FilterState,
    pub visible: Vec<usize>,
    pub selected: usize,

    // UI state
    pub modal: ModalState,
    pub search_mode: bool,
    pub draft: TicketDraft,
    pub form_focus: FormField,
    /// Snapshot of the ticket open in the detail panel. Patched in place
    /// when the server confirms a status change, so the panel reflects it
    /// without waiting for the follow-up reload.
    pub detail: Option<Ticket>,
    pub notice: Option<Notice>,
    pub spinner_frame: usize,

    // Lifecycle flows, one finite enum each
    pub create_flow: CreateFlow,
    pub update_flow: UpdateFlow,
    pub load_state: LoadState,

    load_rx: Option<mpsc::Receiver<StoreEvent>>,
    create_rx: Option<mpsc::Receiver<StoreEvent>>,
    update_rx: Option<mpsc::Receiver<StoreEvent>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            repository: TicketRepository::new(),
            filter: FilterState::default(),
            visible: vec![],
            selected: 0,
            modal: ModalState::None,
            search_mode: false,
            draft: TicketDraft::default(),
            form_focus: FormField::Title,
            detail: None,
            notice: None,
            spinner_frame: 0,
            create_flow: CreateFlow::Idle,
            update_flow: UpdateFlow::Idle,
            load_state: LoadState::Idle,
            load_rx: None,
            create_rx: None,
            update_rx: None,
        }
    }

    /// Process a message and update app state.
    ///
    /// Returns `true` if the app should quit.
    pub fn update(&mut self, msg: Message) -> bool {
        match msg {
            // ─────────────────────────────────────────────────────────────────
            // App lifecycle
            // ─────────────────────────────────────────────────────────────────
            Message::Quit => return true,
            Message::Refresh => self.start_load(),

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Message::MoveUp => self.move_selection(-1),
            Message::MoveDown => self.move_selection(1),
            Message::GotoTop => self.selected = 0,
            Message::GotoBottom => {
                self.selected = self.visible.len().saturating_sub(1);
            }

            // ─────────────────────────────────────────────────────────────────
            // Search mode
            // ─────────────────────────────────────────────────────────────────
            Message::EnterSearch => self.enter_search(),
            Message::ExitSearch => self.exit_search(),
            Message::ConfirmSearch => self.search_mode = false,
            Message::SearchInput(c) => {
                self.filter.search.push(c);
                self.refresh_visible();
            }
            Message::SearchBackspace => {
                self.filter.search.pop();
                self.refresh_visible();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Message::ToggleHelp => self.toggle_modal(ModalState::Help),
            Message::ToggleFilterMenu => self.toggle_modal(ModalState::FilterMenu),
            Message::OpenDetail => self.open_detail(),
            Message::CloseModal => self.close_modal(),

            // ─────────────────────────────────────────────────────────────────
            // Filter menu
            // ─────────────────────────────────────────────────────────────────
            Message::CycleStatusFilter => {
                self.filter.cycle_status();
                self.refresh_visible();
            }
            Message::CyclePriorityFilter => {
                self.filter.cycle_priority();
                self.refresh_visible();
            }
            Message::CycleCategoryFilter => {
                self.filter.cycle_category();
                self.refresh_visible();
            }
            Message::ToggleSortOrder => {
                self.filter.sort = self.filter.sort.toggled();
                self.refresh_visible();
            }
            Message::ClearFilters => self.clear_filters(),

            // ─────────────────────────────────────────────────────────────────
            // New-ticket form
            // ─────────────────────────────────────────────────────────────────
            Message::OpenForm => self.open_form(),
            Message::CancelForm => self.cancel_form(),
            Message::FormNextField => self.form_focus = self.form_focus.next(),
            Message::FormPrevField => self.form_focus = self.form_focus.prev(),
            Message::FormInput(c) => match self.form_focus {
                FormField::Title => self.draft.title.push(c),
                FormField::Description => self.draft.description.push(c),
                FormField::Category | FormField::Priority => {}
            },
            Message::FormBackspace => match self.form_focus {
                FormField::Title => {
                    self.draft.title.pop();
                }
                FormField::Description => {
                    self.draft.description.pop();
                }
                FormField::Category | FormField::Priority => {}
            },
            Message::CycleDraftCategory => self.draft.category = self.draft.category.next(),
            Message::CycleDraftPriority => self.draft.priority = self.draft.priority.next(),
            Message::SubmitDraft => self.submit_draft(),

            // ─────────────────────────────────────────────────────────────────
            // Detail panel
            // ─────────────────────────────────────────────────────────────────
            Message::SetStatus(status) => self.request_status(status),

            // ─────────────────────────────────────────────────────────────────
            // No-op
            // ─────────────────────────────────────────────────────────────────
            Message::None => {}
        }
        false
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived view
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-run the filter/sort engine and clamp the cursor.
    pub fn refresh_visible(&mut self) {
        self.visible = filter::visible_indices(self.repository.tickets(), &self.filter);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    /// The ticket under the cursor, if any.
    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.visible
            .get(self.selected)
            .and_then(|&idx| self.repository.tickets().get(idx))
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let pos = self.selected as i32 + delta;
        self.selected = pos.clamp(0, len as i32 - 1) as usize;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search and filters
    // ─────────────────────────────────────────────────────────────────────────

    fn enter_search(&mut self) {
        self.search_mode = true;
        self.filter.search.clear();
        self.refresh_visible();
    }

    fn exit_search(&mut self) {
        self.search_mode = false;
        self.filter.search.clear();
        self.refresh_visible();
    }

    fn clear_filters(&mut self) {
        self.filter.clear();
        self.refresh_visible();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────

    fn toggle_modal(&mut self, modal: ModalState) {
        self.modal = if self.modal == modal {
            ModalState::None
        } else {
            modal
        };
    }

    fn open_detail(&mut self) {
        if let Some(ticket) = self.selected_ticket() {
            self.detail = Some(ticket.clone());
            self.modal = ModalState::Detail;
        }
    }

    fn close_modal(&mut self) {
        if self.modal == ModalState::Detail {
            self.detail = None;
        }
        self.modal = ModalState::None;
    }

    fn open_form(&mut self) {
        self.modal = ModalState::NewTicket;
        self.form_focus = FormField::Title;
    }

    fn cancel_form(&mut self) {
        self.draft = TicketDraft::default();
        self.modal = ModalState::None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle: load
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a background reload unless one is already in flight.
    pub fn start_load(&mut self) {
        if self.load_state != LoadState::Idle || self.load_rx.is_some() {
            return;
        }
        self.load_state = LoadState::Loading;
        self.load_rx = Some(remote::spawn_load(Arc::clone(&self.config)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle: create
    // ─────────────────────────────────────────────────────────────────────────

    /// Drive the create flow: Idle -> Validating -> Submitting.
    ///
    /// Validation failures surface a notice and leave the draft in place
    /// for correction; no request is issued. A submit while one is
    /// already in flight is rejected before any side effect.
    pub fn submit_draft(&mut self) {
        if self.create_flow != CreateFlow::Idle || self.create_rx.is_some() {
            return;
        }

        self.create_flow = CreateFlow::Validating;
        let validated = match draft::validate(&self.draft) {
            Ok(d) => d,
            Err(e) => {
                self.create_flow = CreateFlow::Idle;
                self.show_error(e.to_string());
                return;
            }
        };

        self.create_flow = CreateFlow::Submitting;
        self.create_rx = Some(remote::spawn_create(Arc::clone(&self.config), validated));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle: status update
    // ─────────────────────────────────────────────────────────────────────────

    /// Request a status change for the ticket open in the detail panel.
    ///
    /// Requesting the status the ticket already has is a no-op: no
    /// request is issued and nothing changes.
    pub fn request_status(&mut self, status: Status) {
        if self.update_flow != UpdateFlow::Idle || self.update_rx.is_some() {
            return;
        }
        let Some(ticket) = self.detail.as_ref() else {
            return;
        };
        if ticket.status == status {
            return;
        }

        let id = ticket.id;
        self.update_flow = UpdateFlow::Updating;
        self.update_rx = Some(remote::spawn_status_update(
            Arc::clone(&self.config),
            id,
            status,
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Store events
    // ─────────────────────────────────────────────────────────────────────────

    /// Drain all pending results from the flow channels (non-blocking,
    /// called from the event loop tick).
    pub fn poll_store(&mut self) {
        for events in [
            Self::drain(&mut self.load_rx),
            Self::drain(&mut self.create_rx),
            Self::drain(&mut self.update_rx),
        ] {
            for event in events {
                self.apply(event);
            }
        }
    }

    fn drain(slot: &mut Option<mpsc::Receiver<StoreEvent>>) -> Vec<StoreEvent> {
        let Some(rx) = slot.as_mut() else {
            return vec![];
        };
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    *slot = None;
                    break;
                }
            }
        }
        events
    }

    /// Apply a single store event to the view state.
    pub fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Loaded(tickets) => {
                self.repository.replace(tickets);
                self.load_state = LoadState::Idle;
                self.refresh_visible();
                // Keep an open detail panel in sync with the fresh copy.
                if let Some(open_id) = self.detail.as_ref().map(|t| t.id) {
                    if let Some(fresh) = self.repository.get(open_id) {
                        self.detail = Some(fresh.clone());
                    }
                }
            }
            StoreEvent::LoadFailed(msg) => {
                self.load_state = LoadState::Idle;
                self.show_error(msg);
            }
            StoreEvent::Created { id } => {
                self.create_flow = CreateFlow::Idle;
                self.draft = TicketDraft::default();
                if self.modal == ModalState::NewTicket {
                    self.modal = ModalState::None;
                }
                let text = match id {
                    Some(id) => format!("Ticket #{} created", id),
                    None => "Ticket created".to_string(),
                };
                self.show_success(text);
            }
            StoreEvent::CreateFailed(msg) => {
                self.create_flow = CreateFlow::Idle;
                self.show_error(msg);
            }
            StoreEvent::StatusConfirmed { id, status } => {
                self.update_flow = UpdateFlow::Idle;
                if let Some(ticket) = self.detail.as_mut() {
                    if ticket.id == id {
                        ticket.status = status;
                    }
                }
                self.show_success(format!("Status set to {}", status.label()));
            }
            StoreEvent::UpdateFailed(msg) => {
                self.update_flow = UpdateFlow::Idle;
                self.show_error(msg);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notices and ticks
    // ─────────────────────────────────────────────────────────────────────────

    fn show_success(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            kind: NoticeKind::Success,
            ticks_left: self.config.ui.notice_ticks,
        });
    }

    fn show_error(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            kind: NoticeKind::Error,
            ticks_left: self.config.ui.notice_ticks,
        });
    }

    pub fn is_busy(&self) -> bool {
        self.load_state == LoadState::Loading
            || self.create_flow == CreateFlow::Submitting
            || self.update_flow == UpdateFlow::Updating
    }

    /// Advance animations and expire the transient notice (call once per
    /// event-loop tick).
    pub fn on_tick(&mut self) {
        if self.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }

    /// Get current spinner character
    pub fn spinner_char(&self) -> char {
        SPINNER_FRAMES[self.spinner_frame]
    }
}
