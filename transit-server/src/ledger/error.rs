//! Booking ledger error types.

use std::fmt;

use crate::domain::TimeSlot;

/// Error from the persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or the operation failed.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
}

/// A submission was rejected because its time slot is already full.
///
/// Carries the full slot key and the configured maximum so callers can
/// present an actionable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFullError {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub time: TimeSlot,
    pub max: usize,
}

impl fmt::Display for SlotFullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" for {} → {} on {} has reached the maximum number of passengers ({})",
            self.time.label(),
            self.origin,
            self.destination,
            self.date,
            self.max
        )
    }
}

impl std::error::Error for SlotFullError {}

/// Errors from ledger operations.
///
/// Only `submit` and `clear_all` can fail; read-side operations degrade
/// to an empty collection instead of surfacing storage problems.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The candidate's time slot is at capacity. Expected and
    /// user-facing; callers must prompt for a different date or time
    /// rather than retrying.
    #[error("{0}")]
    SlotFull(#[from] SlotFullError),

    /// Writing the updated collection failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// The collection could not be serialized.
    #[error("failed to encode passenger data: {message}")]
    Encode { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_full_message_names_the_window_and_limit() {
        let err = SlotFullError {
            origin: "Accra".into(),
            destination: "Kumasi".into(),
            date: "2024-06-01".into(),
            time: TimeSlot::Morning,
            max: 5,
        };

        let msg = err.to_string();
        assert!(msg.contains("Morning (6:00 AM - 12:00 PM)"));
        assert!(msg.contains("Accra → Kumasi"));
        assert!(msg.contains("2024-06-01"));
        assert!(msg.contains("(5)"));
    }

    #[test]
    fn ledger_error_wraps_slot_full() {
        let err: LedgerError = SlotFullError {
            origin: "Accra".into(),
            destination: "Kumasi".into(),
            date: "2024-06-01".into(),
            time: TimeSlot::Evening,
            max: 5,
        }
        .into();

        assert!(matches!(err, LedgerError::SlotFull(_)));
        assert!(err.to_string().contains("Evening"));
    }
}
