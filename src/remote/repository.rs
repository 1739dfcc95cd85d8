//! Authoritative client-side copy of the ticket collection.

use chrono::{DateTime, Utc};

use crate::data::{Status, Ticket};

/// Result of a background store operation, delivered over a flow channel
/// and applied by the event loop.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// Full collection fetched; replaces the local copy wholesale.
    Loaded(Vec<Ticket>),
    LoadFailed(String),
    /// Creation confirmed by the server; a reload event follows on the
    /// same channel.
    Created { id: Option<i64> },
    CreateFailed(String),
    /// Status change confirmed by the server; a reload event follows.
    StatusConfirmed { id: i64, status: Status },
    UpdateFailed(String),
}

/// Owns the local ticket collection.
///
/// All writes go through `replace`, which happens only when a `Loaded`
/// event arrives; every other component sees read-only snapshots, so the
/// visible list never diverges from the server except during the
/// in-flight window.
#[derive(Debug, Default)]
pub struct TicketRepository {
    tickets: Vec<Ticket>,
    last_refresh: Option<DateTime<Utc>>,
}

impl TicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: i64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    /// Replace the collection with a freshly fetched snapshot.
    pub fn replace(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
        self.last_refresh = Some(Utc::now());
    }
}
