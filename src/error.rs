use thiserror::Error;

/// Recoverable failures surfaced to the user as a transient notice.
///
/// Every variant returns the owning flow to idle with prior state intact;
/// none are fatal. Transport errors and non-2xx responses collapse into
/// the same kind per operation.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("could not load tickets: {0}")]
    LoadFailed(String),
    #[error("could not create ticket: {0}")]
    CreateFailed(String),
    #[error("could not update status: {0}")]
    UpdateFailed(String),
    #[error("{0}")]
    Validation(String),
}

pub type TicketResult<T> = Result<T, TicketError>;
