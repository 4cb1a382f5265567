use thiserror::Error;

use crate::domain::models::booking::BookingStatus;

/// Typed failures of the booking engine.
///
/// Every operation either completes fully or returns one of these with the
/// store untouched; the REST layer maps each kind to a status code.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A required field was empty after trimming.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field failed its pattern check (email, phone, status).
    #[error("invalid {0} format")]
    InvalidFormat(&'static str),

    /// A field holds a syntactically valid but unacceptable value
    /// (negative price, check-out before check-in, check-in in the past).
    #[error("invalid value for {0}")]
    InvalidValue(&'static str),

    /// The requested stay shares at least one calendar day with the listed
    /// non-cancelled bookings.
    #[error("selected dates overlap with existing bookings")]
    OverlapDetected(Vec<i64>),

    /// The requested status change violates the lifecycle state machine.
    #[error("cannot change booking status from {from} to {to}")]
    IllegalTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The booking is in a status that forbids the operation.
    #[error("{0}")]
    IllegalState(&'static str),

    #[error("booking not found with id: {0}")]
    NotFound(i64),

    /// The store itself failed; nothing to do with the request.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
