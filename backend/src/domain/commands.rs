//! Command types for the booking service operations.

use shared::BookingRequest;

#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub request: BookingRequest,
}

/// Edit the guest/stay/classification fields of an existing booking.
/// The booking's status and identity are never touched by this command.
#[derive(Debug, Clone)]
pub struct UpdateBookingCommand {
    pub booking_id: i64,
    pub request: BookingRequest,
}

/// Move a booking to a new lifecycle status. `status` is the raw wire
/// value; the service validates it against the closed status set.
#[derive(Debug, Clone)]
pub struct UpdateStatusCommand {
    pub booking_id: i64,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct DeleteBookingCommand {
    pub booking_id: i64,
}

#[derive(Debug, Clone)]
pub struct GetBookingCommand {
    pub booking_id: i64,
}
