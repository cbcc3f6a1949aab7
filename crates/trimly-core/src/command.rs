// ── Typed mutation commands ──
//
// All mutations are routed through an mpsc channel to the session's
// command processor task; results come back over a oneshot. Reads bypass
// the channel via DataStore snapshots or ad-hoc queries.

use std::sync::Arc;

use tokio::sync::oneshot;

use trimly_api::{DayOffRange, NewBarber, NewBooking};

use crate::error::CoreError;
use crate::model::{Barber, Booking, DayOff};

/// A mutation request against the backend.
#[derive(Debug, Clone)]
pub enum Command {
    /// Create a booking (public wizard or admin manual entry).
    CreateBooking(NewBooking),
    /// Delete a booking by id.
    DeleteBooking { id: i64 },
    /// Submit a day-off range; the backend expands it per day.
    AddDayOff(DayOffRange),
    /// Delete one day-off record (reactivates that single date).
    DeleteDayOff { id: i64 },
    /// Add a barber to the directory.
    AddBarber(NewBarber),
    /// Delete a barber. Irreversible.
    DeleteBarber { id: String },
    /// Delete a customer account. Irreversible.
    DeleteAccount { id: i64 },
}

/// What a successfully executed command produced.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Booking(Arc<Booking>),
    DayOffs(Vec<Arc<DayOff>>),
    Barber(Arc<Barber>),
    Deleted,
}

impl CommandResult {
    /// The stored booking, for callers that know they created one.
    pub fn into_booking(self) -> Result<Arc<Booking>, CoreError> {
        match self {
            Self::Booking(booking) => Ok(booking),
            other => Err(CoreError::Internal(format!(
                "unexpected command result: {other:?}"
            ))),
        }
    }
}

/// A command paired with its response channel.
pub(crate) struct CommandEnvelope {
    pub(crate) command: Command,
    pub(crate) response_tx: oneshot::Sender<Result<CommandResult, CoreError>>,
}
