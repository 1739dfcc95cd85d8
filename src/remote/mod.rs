pub mod repository;

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::data::{Status, Ticket, TicketDraft};
use crate::error::{TicketError, TicketResult};

pub use repository::{StoreEvent, TicketRepository};

/// Shared HTTP client for all requests to enable connection pooling
pub static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(5)
        .build()
        .expect("Failed to create HTTP client")
});

/// Fetch the full ticket collection.
///
/// Transport errors and non-2xx responses both come back as `LoadFailed`;
/// the caller keeps its previous collection in either case.
pub async fn fetch_tickets(config: &Config) -> TicketResult<Vec<Ticket>> {
    let url = format!("{}/api/tickets", config.server.base_url);
    let response = HTTP_CLIENT
        .get(&url)
        .send()
        .await
        .map_err(|e| TicketError::LoadFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(TicketError::LoadFailed(format!(
            "server returned {}",
            response.status()
        )));
    }

    response
        .json::<Vec<Ticket>>()
        .await
        .map_err(|e| TicketError::LoadFailed(e.to_string()))
}

/// Submit a new ticket.
///
/// Returns the server-assigned id when the response body carries one (the
/// service answers `{"message": "Ticket created", "ticket_id": N}`); the
/// body is otherwise unconstrained beyond confirming success.
pub async fn create_ticket(
    config: &Config,
    draft: &TicketDraft,
) -> TicketResult<Option<i64>> {
    let url = format!("{}/api/tickets", config.server.base_url);
    let response = HTTP_CLIENT
        .post(&url)
        .json(draft)
        .send()
        .await
        .map_err(|e| TicketError::CreateFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(TicketError::CreateFailed(format!(
            "server returned {}",
            response.status()
        )));
    }

    let body = response
        .json::<serde_json::Value>()
        .await
        .unwrap_or(serde_json::Value::Null);
    Ok(body.get("ticket_id").and_then(|v| v.as_i64()))
}

/// Submit a single status change for one ticket.
pub async fn update_ticket_status(
    config: &Config,
    id: i64,
    status: Status,
) -> TicketResult<()> {
    let url = format!("{}/api/tickets/{}/status", config.server.base_url, id);
    let response = HTTP_CLIENT
        .patch(&url)
        .json(&serde_json::json!({ "status": status }))
        .send()
        .await
        .map_err(|e| TicketError::UpdateFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(TicketError::UpdateFailed(format!(
            "server returned {}",
            response.status()
        )));
    }

    Ok(())
}

/// Probe the service readiness endpoint (`GET /api/health`).
pub async fn check_health(config: &Config) -> TicketResult<()> {
    let url = format!("{}/api/health", config.server.base_url);
    let response = HTTP_CLIENT
        .get(&url)
        .send()
        .await
        .map_err(|e| TicketError::LoadFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(TicketError::LoadFailed(format!(
            "server returned {}",
            response.status()
        )));
    }

    Ok(())
}

/// Kick off a full reload in the background.
///
/// The returned receiver yields exactly one event: `Loaded` or
/// `LoadFailed`.
pub fn spawn_load(config: Arc<Config>) -> mpsc::Receiver<StoreEvent> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        send_reload(&config, &tx).await;
    });
    rx
}

/// Submit a draft in the background, then reload the collection so the
/// server-assigned fields (id, created_at, initial status) become visible.
///
/// Event order on the returned receiver: `CreateFailed` alone, or
/// `Created` followed by `Loaded`/`LoadFailed`.
pub fn spawn_create(config: Arc<Config>, draft: TicketDraft) -> mpsc::Receiver<StoreEvent> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        match create_ticket(&config, &draft).await {
            Ok(id) => {
                send_or_log(&tx, StoreEvent::Created { id }, "create result").await;
                send_reload(&config, &tx).await;
            }
            Err(e) => {
                send_or_log(&tx, StoreEvent::CreateFailed(e.to_string()), "create failure").await;
            }
        }
    });
    rx
}

/// Submit a status change in the background, then reload.
///
/// Event order: `UpdateFailed` alone, or `StatusConfirmed` followed by
/// `Loaded`/`LoadFailed`. The confirmation arrives before the reload so
/// an open detail view can reflect the change immediately.
pub fn spawn_status_update(
    config: Arc<Config>,
    id: i64,
    status: Status,
) -> mpsc::Receiver<StoreEvent> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        match update_ticket_status(&config, id, status).await {
            Ok(()) => {
                send_or_log(&tx, StoreEvent::StatusConfirmed { id, status }, "status result").await;
                send_reload(&config, &tx).await;
            }
            Err(e) => {
                send_or_log(&tx, StoreEvent::UpdateFailed(e.to_string()), "status failure").await;
            }
        }
    });
    rx
}

async fn send_reload(config: &Config, tx: &mpsc::Sender<StoreEvent>) {
    match fetch_tickets(config).await {
        Ok(tickets) => send_or_log(tx, StoreEvent::Loaded(tickets), "load result").await,
        Err(e) => {
            tracing::error!("Failed to fetch tickets: {}", e);
            send_or_log(tx, StoreEvent::LoadFailed(e.to_string()), "load failure").await;
        }
    }
}

/// Send a value through a channel, logging a warning if the receiver is
/// gone (the UI dropped the flow, e.g. on quit).
async fn send_or_log(tx: &mpsc::Sender<StoreEvent>, event: StoreEvent, context: &str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!("Failed to send {}: {}", context, e);
    }
}
