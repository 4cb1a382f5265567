//! Outbound notification hook.
//!
//! The engine itself never sends anything; the REST layer calls this after
//! observing a successful status change. Wiring in a real mail sender only
//! means implementing the trait.

use tracing::info;

use crate::domain::models::booking::Booking;

pub trait BookingNotifier: Send + Sync {
    /// Called after a booking was moved to `Confirmed`.
    fn booking_confirmed(&self, booking: &Booking);

    /// Called after a booking was moved to `Cancelled`.
    fn booking_cancelled(&self, booking: &Booking);
}

/// Notifier that only logs the event. Used until SMTP delivery is wired up.
pub struct LogNotifier;

impl BookingNotifier for LogNotifier {
    fn booking_confirmed(&self, booking: &Booking) {
        info!(
            "Booking {} confirmed for stay {}..{}; would notify {}",
            booking.id, booking.check_in_date, booking.check_out_date, booking.email
        );
    }

    fn booking_cancelled(&self, booking: &Booking) {
        info!(
            "Booking {} cancelled; would notify {}",
            booking.id, booking.email
        );
    }
}
