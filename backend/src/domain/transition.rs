use crate::domain::error::BookingError;
use crate::domain::models::booking::BookingStatus;

/// Check whether a booking may move from `from` to `to`.
///
/// Pending can go anywhere, Confirmed can only stay put or be cancelled,
/// and Cancelled is terminal. Re-requesting the current status is a no-op
/// and allowed, except on a cancelled booking.
pub fn check_transition(from: BookingStatus, to: BookingStatus) -> Result<(), BookingError> {
    use BookingStatus::*;

    match (from, to) {
        // Cancelled is terminal, even for Cancelled -> Cancelled.
        (Cancelled, _) => Err(BookingError::IllegalTransition { from, to }),
        // A confirmed booking cannot be un-confirmed.
        (Confirmed, Pending) => Err(BookingError::IllegalTransition { from, to }),
        _ => Ok(()),
    }
}
