//! Field normalization and syntactic validation for booking requests.
//!
//! Everything here is a pure function of the request: persisted state is
//! never consulted. Cross-field rules (date ordering, overlap) live in the
//! booking service.

use chrono::{NaiveDate, NaiveTime};
use shared::BookingRequest;

use crate::domain::error::BookingError;
use crate::domain::models::booking::BookingStatus;

/// A booking request with every string field trimmed and pattern-checked.
///
/// `status` and `total_price` keep their optionality; the service decides
/// whether to default them or leave the stored values alone.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBooking {
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
    pub status: Option<BookingStatus>,
    pub total_price: Option<f64>,
}

/// Validate and normalize a booking request.
///
/// Trims every string field first, then checks required fields, then the
/// per-field patterns. The email is lowercased on success.
pub fn normalize(request: &BookingRequest) -> Result<NormalizedBooking, BookingError> {
    let first_name = required("firstName", &request.first_name)?;
    let last_name = required("lastName", &request.last_name)?;
    let phone = validate_phone(required("phone", &request.phone)?)?;
    let email = validate_email(required("email", &request.email)?)?;
    let booking_type = required("bookingType", &request.booking_type)?;
    let country = required("country", &request.country)?;
    let city = required("city", &request.city)?;
    let address = required("address", &request.address)?;

    let status = match request.status.as_deref() {
        Some(value) => Some(
            BookingStatus::parse(value.trim()).ok_or(BookingError::InvalidFormat("status"))?,
        ),
        None => None,
    };

    if let Some(price) = request.total_price {
        if price < 0.0 {
            return Err(BookingError::InvalidValue("totalPrice"));
        }
    }

    Ok(NormalizedBooking {
        first_name,
        last_name,
        phone,
        email,
        booking_type,
        country,
        city,
        address,
        check_in_date: request.check_in_date,
        check_out_date: request.check_out_date,
        arrival: request.arrival,
        status,
        total_price: request.total_price,
    })
}

fn required(field: &'static str, value: &str) -> Result<String, BookingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookingError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Accepts a "local@domain" shape: a non-empty local part of letters,
/// digits and `+_.-`, then a non-empty domain. The stored value is
/// lowercased.
fn validate_email(trimmed: String) -> Result<String, BookingError> {
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'))
        }
        None => false,
    };

    if !valid {
        return Err(BookingError::InvalidFormat("email"));
    }
    Ok(trimmed.to_lowercase())
}

/// Accepts an optional leading `+` followed by 10 to 14 digits.
fn validate_phone(trimmed: String) -> Result<String, BookingError> {
    let digits = trimmed.strip_prefix('+').unwrap_or(&trimmed);
    let valid = (10..=14).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());

    if !valid {
        return Err(BookingError::InvalidFormat("phone"));
    }
    Ok(trimmed)
}
