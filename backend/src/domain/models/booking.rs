use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
///
/// `Pending` is the only status a booking can be created with. `Cancelled`
/// is terminal; the legal moves between statuses are enforced by
/// [`crate::domain::transition::check_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse from the exact wire spelling. Case-sensitive: anything other
    /// than "Pending", "Confirmed" or "Cancelled" is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(BookingStatus::Pending),
            "Confirmed" => Some(BookingStatus::Confirmed),
            "Cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model for a persisted reservation of the bookable unit.
///
/// All string fields are stored trimmed, the email lowercased. The stay
/// occupies every calendar day in `[check_in_date, check_out_date]`
/// inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub booking_type: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub arrival: NaiveTime,
    pub status: BookingStatus,
    pub total_price: f64,
}

/// A validated, normalized booking that has not been persisted yet.
/// The store assigns the identity on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub booking_type: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub arrival: NaiveTime,
    pub status: BookingStatus,
    pub total_price: f64,
}

impl NewBooking {
    /// Attach the store-assigned identity.
    pub fn into_booking(self, id: i64) -> Booking {
        Booking {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            booking_type: self.booking_type,
            country: self.country,
            city: self.city,
            address: self.address,
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            arrival: self.arrival,
            status: self.status,
            total_price: self.total_price,
        }
    }
}
