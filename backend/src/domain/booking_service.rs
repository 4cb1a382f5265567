//! Booking lifecycle orchestration.
//!
//! Composes field validation, overlap detection and the status transition
//! guard into the create/update/delete/status-change operations. Every
//! operation validates fully before touching the store, so a failure never
//! leaves a partial write behind.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::domain::commands::{
    CreateBookingCommand, DeleteBookingCommand, GetBookingCommand, UpdateBookingCommand,
    UpdateStatusCommand,
};
use crate::domain::error::BookingError;
use crate::domain::models::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::{transition, validate};
use crate::storage::traits::BookingStore;

/// Service for managing the booking lifecycle
#[derive(Clone)]
pub struct BookingService<S: BookingStore> {
    store: Arc<S>,
}

impl<S: BookingStore> BookingService<S> {
    /// Create a new BookingService on top of a store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a new booking.
    ///
    /// The request is normalized, checked for conflicts against every
    /// non-cancelled stored booking, and persisted with status forced to
    /// `Pending` and the price defaulted to 0 when absent.
    pub async fn create_booking(
        &self,
        command: CreateBookingCommand,
    ) -> Result<Booking, BookingError> {
        info!(
            "Creating booking for {} {}",
            command.request.first_name.trim(),
            command.request.last_name.trim()
        );

        let normalized = validate::normalize(&command.request)?;

        // A client-supplied status was validated above but is ignored:
        // every booking starts out Pending.
        let new_booking = NewBooking {
            first_name: normalized.first_name,
            last_name: normalized.last_name,
            phone: normalized.phone,
            email: normalized.email,
            booking_type: normalized.booking_type,
            country: normalized.country,
            city: normalized.city,
            address: normalized.address,
            check_in_date: normalized.check_in_date,
            check_out_date: normalized.check_out_date,
            arrival: normalized.arrival,
            status: BookingStatus::Pending,
            total_price: normalized.total_price.unwrap_or(0.0),
        };

        self.check_no_overlap(new_booking.check_in_date, new_booking.check_out_date, None)
            .await?;
        Self::check_stay_dates(new_booking.check_in_date, new_booking.check_out_date)?;

        let booking = self.store.insert_booking(&new_booking).await?;
        info!("Created booking with ID: {}", booking.id);

        Ok(booking)
    }

    /// Edit the guest/stay/classification fields of an existing booking.
    /// Status and identity are left untouched; cancelled bookings are
    /// immutable to field edits.
    pub async fn update_booking(
        &self,
        command: UpdateBookingCommand,
    ) -> Result<Booking, BookingError> {
        info!("Updating booking with ID: {}", command.booking_id);

        let mut booking = self
            .store
            .get_booking(command.booking_id)
            .await?
            .ok_or(BookingError::NotFound(command.booking_id))?;

        if booking.status == BookingStatus::Cancelled {
            warn!("Rejected field edit on cancelled booking {}", booking.id);
            return Err(BookingError::IllegalState("cannot update cancelled booking"));
        }

        let normalized = validate::normalize(&command.request)?;

        booking.first_name = normalized.first_name;
        booking.last_name = normalized.last_name;
        booking.phone = normalized.phone;
        booking.email = normalized.email;
        booking.booking_type = normalized.booking_type;
        booking.country = normalized.country;
        booking.city = normalized.city;
        booking.address = normalized.address;
        booking.check_in_date = normalized.check_in_date;
        booking.check_out_date = normalized.check_out_date;
        booking.arrival = normalized.arrival;
        if let Some(price) = normalized.total_price {
            booking.total_price = price;
        }

        Self::check_stay_dates(booking.check_in_date, booking.check_out_date)?;
        self.check_no_overlap(
            booking.check_in_date,
            booking.check_out_date,
            Some(booking.id),
        )
        .await?;

        self.store.update_booking(&booking).await?;
        info!("Successfully updated booking with ID: {}", booking.id);

        Ok(booking)
    }

    /// Move a booking to a new lifecycle status, enforcing the transition
    /// table. Only the status is persisted.
    pub async fn update_booking_status(
        &self,
        command: UpdateStatusCommand,
    ) -> Result<Booking, BookingError> {
        info!(
            "Attempting to update booking status: ID={}, newStatus={}",
            command.booking_id, command.status
        );

        let mut booking = self
            .store
            .get_booking(command.booking_id)
            .await?
            .ok_or(BookingError::NotFound(command.booking_id))?;

        let requested = command.status.trim();
        if requested.is_empty() {
            return Err(BookingError::MissingField("status"));
        }
        let new_status =
            BookingStatus::parse(requested).ok_or(BookingError::InvalidFormat("status"))?;

        transition::check_transition(booking.status, new_status)?;

        let old_status = booking.status;
        booking.status = new_status;
        self.store.update_booking(&booking).await?;

        info!(
            "Successfully updated booking {} status from {} to {}",
            booking.id, old_status, new_status
        );

        Ok(booking)
    }

    /// Delete a booking permanently. A confirmed booking must be cancelled
    /// first, never deleted outright.
    pub async fn delete_booking(&self, command: DeleteBookingCommand) -> Result<(), BookingError> {
        info!("Attempting to delete booking with ID: {}", command.booking_id);

        let booking = self
            .store
            .get_booking(command.booking_id)
            .await?
            .ok_or(BookingError::NotFound(command.booking_id))?;

        if booking.status == BookingStatus::Confirmed {
            warn!("Rejected deletion of confirmed booking {}", booking.id);
            return Err(BookingError::IllegalState("cannot delete confirmed booking"));
        }

        self.store.delete_booking(booking.id).await?;
        info!("Successfully deleted booking with ID: {}", booking.id);

        Ok(())
    }

    /// Look up a single booking. No validation performed.
    pub async fn get_booking(
        &self,
        command: GetBookingCommand,
    ) -> Result<Option<Booking>, BookingError> {
        debug!("Fetching booking with ID: {}", command.booking_id);
        Ok(self.store.get_booking(command.booking_id).await?)
    }

    /// List all bookings. No validation performed.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        debug!("Fetching all bookings");
        Ok(self.store.list_bookings().await?)
    }

    /// Cross-field date invariants, re-checked at every write: the stay
    /// must not end before it starts, and must not start before today.
    fn check_stay_dates(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), BookingError> {
        if check_out < check_in {
            return Err(BookingError::InvalidValue("checkOutDate"));
        }
        if check_in < Local::now().date_naive() {
            return Err(BookingError::InvalidValue("checkInDate"));
        }
        Ok(())
    }

    /// Reject the range if any non-cancelled stored booking shares a
    /// calendar day with it. The read-then-write window here is racy under
    /// concurrent creates; see DESIGN.md for the deployment assumption.
    async fn check_no_overlap(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Result<(), BookingError> {
        let conflicts = self
            .store
            .find_overlapping(check_in, check_out, exclude_id)
            .await?;

        if !conflicts.is_empty() {
            let ids: Vec<i64> = conflicts.iter().map(|b| b.id).collect();
            warn!("Rejected dates {check_in}..{check_out}: conflicts with {ids:?}");
            return Err(BookingError::OverlapDetected(ids));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use chrono::{Duration, NaiveTime};
    use shared::BookingRequest;

    async fn setup_test() -> BookingService<DbConnection> {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        BookingService::new(Arc::new(db))
    }

    /// A calendar date `offset` days from today, so the check-in rule
    /// always sees future stays.
    fn day(offset: i64) -> NaiveDate {
        Local::now().date_naive() + Duration::days(offset)
    }

    fn request(check_in: NaiveDate, check_out: NaiveDate) -> BookingRequest {
        BookingRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone: "+33612345678".to_string(),
            email: "john.doe@example.com".to_string(),
            booking_type: "Standard".to_string(),
            country: "France".to_string(),
            city: "Paris".to_string(),
            address: "1 rue des Jardins".to_string(),
            check_in_date: check_in,
            check_out_date: check_out,
            arrival: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            status: None,
            total_price: None,
        }
    }

    async fn create(
        service: &BookingService<DbConnection>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Booking {
        service
            .create_booking(CreateBookingCommand {
                request: request(check_in, check_out),
            })
            .await
            .expect("Failed to create booking")
    }

    async fn set_status(
        service: &BookingService<DbConnection>,
        booking_id: i64,
        status: &str,
    ) -> Result<Booking, BookingError> {
        service
            .update_booking_status(UpdateStatusCommand {
                booking_id,
                status: status.to_string(),
            })
            .await
    }

    #[tokio::test]
    async fn test_create_booking_defaults() {
        let service = setup_test().await;

        let mut req = request(day(1), day(4));
        // A client-supplied status is validated but never stored on create.
        req.status = Some("Confirmed".to_string());
        req.total_price = None;

        let booking = service
            .create_booking(CreateBookingCommand { request: req })
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, 0.0);
    }

    #[tokio::test]
    async fn test_create_booking_normalizes_fields() {
        let service = setup_test().await;

        let mut req = request(day(1), day(4));
        req.first_name = "  John ".to_string();
        req.email = " John.Doe@EXAMPLE.com ".to_string();
        req.total_price = Some(89.5);

        let booking = service
            .create_booking(CreateBookingCommand { request: req })
            .await
            .unwrap();

        assert_eq!(booking.first_name, "John");
        assert_eq!(booking.email, "john.doe@example.com");
        assert_eq!(booking.total_price, 89.5);

        let stored = service
            .get_booking(GetBookingCommand {
                booking_id: booking.id,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, booking);
    }

    #[tokio::test]
    async fn test_create_booking_rejects_invalid_fields() {
        let service = setup_test().await;

        let mut req = request(day(1), day(4));
        req.email = "not-an-email".to_string();
        let err = service
            .create_booking(CreateBookingCommand { request: req })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidFormat("email")));

        let mut req = request(day(1), day(4));
        req.first_name = "   ".to_string();
        let err = service
            .create_booking(CreateBookingCommand { request: req })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::MissingField("firstName")));

        // Nothing was persisted by the failed attempts.
        assert!(service.list_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_booking_rejects_bad_dates() {
        let service = setup_test().await;

        let err = service
            .create_booking(CreateBookingCommand {
                request: request(day(5), day(2)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidValue("checkOutDate")));

        let err = service
            .create_booking(CreateBookingCommand {
                request: request(day(-1), day(2)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidValue("checkInDate")));

        // Same-day stays are fine: checkout equal to check-in is allowed.
        create(&service, day(1), day(1)).await;
    }

    #[tokio::test]
    async fn test_create_booking_rejects_boundary_overlap() {
        let service = setup_test().await;

        let booking_a = create(&service, day(1), day(5)).await;

        // Back-to-back turnover on the shared day is rejected.
        let err = service
            .create_booking(CreateBookingCommand {
                request: request(day(5), day(10)),
            })
            .await
            .unwrap_err();
        match err {
            BookingError::OverlapDetected(ids) => assert_eq!(ids, vec![booking_a.id]),
            other => panic!("expected OverlapDetected, got {other:?}"),
        }

        // Shifting the check-in one day later succeeds.
        create(&service, day(6), day(10)).await;
    }

    #[tokio::test]
    async fn test_cancelling_frees_the_range() {
        let service = setup_test().await;

        let booking_a = create(&service, day(1), day(5)).await;
        set_status(&service, booking_a.id, "Cancelled").await.unwrap();

        // The formerly occupied range is immediately available again.
        create(&service, day(2), day(4)).await;
    }

    #[tokio::test]
    async fn test_update_booking_fields() {
        let service = setup_test().await;

        let booking = create(&service, day(1), day(5)).await;

        let mut req = request(day(1), day(5));
        req.city = "  Lyon ".to_string();
        req.total_price = Some(250.0);
        req.status = Some("Cancelled".to_string());

        let updated = service
            .update_booking(UpdateBookingCommand {
                booking_id: booking.id,
                request: req,
            })
            .await
            .unwrap();

        assert_eq!(updated.id, booking.id);
        assert_eq!(updated.city, "Lyon");
        assert_eq!(updated.total_price, 250.0);
        // Field edits never change the status.
        assert_eq!(updated.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_booking_does_not_conflict_with_itself() {
        let service = setup_test().await;

        let booking = create(&service, day(1), day(5)).await;

        // Re-submitting the same dates must not be treated as an overlap.
        let updated = service
            .update_booking(UpdateBookingCommand {
                booking_id: booking.id,
                request: request(day(1), day(5)),
            })
            .await
            .unwrap();
        assert_eq!(updated.check_in_date, day(1));
    }

    #[tokio::test]
    async fn test_update_booking_rejects_overlap_with_others() {
        let service = setup_test().await;

        let _booking_a = create(&service, day(1), day(5)).await;
        let booking_b = create(&service, day(10), day(15)).await;

        let err = service
            .update_booking(UpdateBookingCommand {
                booking_id: booking_b.id,
                request: request(day(4), day(8)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::OverlapDetected(_)));

        // The failed update left booking B untouched.
        let stored = service
            .get_booking(GetBookingCommand {
                booking_id: booking_b.id,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.check_in_date, day(10));
    }

    #[tokio::test]
    async fn test_update_cancelled_booking_rejected() {
        let service = setup_test().await;

        let booking = create(&service, day(1), day(5)).await;
        set_status(&service, booking.id, "Cancelled").await.unwrap();

        let err = service
            .update_booking(UpdateBookingCommand {
                booking_id: booking.id,
                request: request(day(1), day(5)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::IllegalState(_)));
    }

    #[tokio::test]
    async fn test_update_nonexistent_booking() {
        let service = setup_test().await;

        let err = service
            .update_booking(UpdateBookingCommand {
                booking_id: 42,
                request: request(day(1), day(5)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_status_lifecycle() {
        let service = setup_test().await;

        let booking = create(&service, day(1), day(5)).await;

        // Pending -> Confirmed
        let confirmed = set_status(&service, booking.id, "Confirmed").await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        // Confirmed -> Pending is never allowed.
        let err = set_status(&service, booking.id, "Pending").await.unwrap_err();
        assert!(matches!(err, BookingError::IllegalTransition { .. }));

        // Confirmed -> Confirmed is an allowed no-op.
        set_status(&service, booking.id, "Confirmed").await.unwrap();

        // Confirmed -> Cancelled succeeds, and Cancelled is terminal.
        let cancelled = set_status(&service, booking.id, "Cancelled").await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        for requested in ["Pending", "Confirmed", "Cancelled"] {
            let err = set_status(&service, booking.id, requested).await.unwrap_err();
            assert!(matches!(err, BookingError::IllegalTransition { .. }));
        }
    }

    #[tokio::test]
    async fn test_status_update_validation() {
        let service = setup_test().await;

        let booking = create(&service, day(1), day(5)).await;

        let err = set_status(&service, booking.id, "  ").await.unwrap_err();
        assert!(matches!(err, BookingError::MissingField("status")));

        let err = set_status(&service, booking.id, "confirmed").await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidFormat("status")));

        let err = set_status(&service, 999, "Confirmed").await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let service = setup_test().await;

        let booking = create(&service, day(1), day(5)).await;
        set_status(&service, booking.id, "Confirmed").await.unwrap();

        // A confirmed booking cannot be deleted outright.
        let err = service
            .delete_booking(DeleteBookingCommand {
                booking_id: booking.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::IllegalState(_)));

        // Cancel it first, then deletion goes through.
        set_status(&service, booking.id, "Cancelled").await.unwrap();
        service
            .delete_booking(DeleteBookingCommand {
                booking_id: booking.id,
            })
            .await
            .unwrap();

        let gone = service
            .get_booking(GetBookingCommand {
                booking_id: booking.id,
            })
            .await
            .unwrap();
        assert!(gone.is_none());

        let err = service
            .delete_booking(DeleteBookingCommand {
                booking_id: booking.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_pending_booking_succeeds() {
        let service = setup_test().await;

        let booking = create(&service, day(1), day(5)).await;
        service
            .delete_booking(DeleteBookingCommand {
                booking_id: booking.id,
            })
            .await
            .unwrap();

        assert!(service.list_bookings().await.unwrap().is_empty());
    }
}
