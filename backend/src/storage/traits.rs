//! # Storage Traits
//!
//! Storage abstraction for the booking engine. The domain layer only
//! speaks to this trait, so different backends (SQLite today, anything
//! else tomorrow) can be swapped in without touching the services.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::booking::{Booking, NewBooking};

/// Trait defining the interface for booking storage operations.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a new booking and return it with its store-assigned id.
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking>;

    /// Retrieve a specific booking by id.
    async fn get_booking(&self, booking_id: i64) -> Result<Option<Booking>>;

    /// List all bookings ordered by check-in date.
    async fn list_bookings(&self) -> Result<Vec<Booking>>;

    /// Non-cancelled bookings whose stay shares at least one calendar day
    /// with the inclusive `[check_in, check_out]` range. `exclude_id`
    /// leaves one booking out of the conflict set, so an update does not
    /// collide with itself.
    async fn find_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Result<Vec<Booking>>;

    /// Overwrite an existing booking.
    async fn update_booking(&self, booking: &Booking) -> Result<()>;

    /// Delete a booking by id.
    /// Returns true if the booking was found and deleted, false otherwise.
    async fn delete_booking(&self, booking_id: i64) -> Result<bool>;
}
