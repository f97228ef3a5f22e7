//! Domain error taxonomy shared by every core operation.
//!
//! Absent single-entity lookups are not errors; those are modeled as
//! `Ok(None)` so callers can render a "not found" state. Everything the
//! caller must react to lands here.

use crate::models::booking::BookingStatus;
use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum Error {
    /// Input violates an entity or operation precondition. Recoverable by
    /// the caller correcting the named field; never retried automatically.
    #[display("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The operation requires an owning user context and none is present.
    #[display("not authenticated")]
    NotAuthenticated,

    /// A mutation targeted an entity that does not exist for this user.
    #[display("{entity} not found")]
    NotFound { entity: &'static str },

    /// A lifecycle transition not permitted from the current status.
    #[display("cannot {action} a {status} booking")]
    InvalidState {
        status: BookingStatus,
        action: &'static str,
    },

    /// The requested (provider, date, time) slot is at capacity.
    #[display("time slot is fully booked")]
    SlotFull,

    /// The persistence adapter failed; propagated unchanged, never retried.
    #[display("storage error: {_0}")]
    Storage(#[error(not(source))] anyhow::Error),
}

impl Error {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Storage(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
