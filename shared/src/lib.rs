use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Payload for creating a booking or editing its fields.
///
/// Dates are calendar dates without a timezone; `arrival` is the expected
/// time of day the guest shows up. `status` and `total_price` are optional
/// on the wire: the backend forces new bookings to `Pending` and defaults
/// the price to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
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
    pub status: Option<String>,
    pub total_price: Option<f64>,
}

/// Request to move a booking to a new lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Error body returned by the REST layer for any failed operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
