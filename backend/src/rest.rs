//! HTTP surface of the booking backend.
//!
//! Handlers translate between the wire DTOs and the booking service, and
//! map each domain error kind onto a status code. No business rules live
//! here.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{BookingRequest, ErrorResponse, StatusUpdateRequest};
use tracing::info;

use crate::db::DbConnection;
use crate::domain::commands::{
    CreateBookingCommand, DeleteBookingCommand, GetBookingCommand, UpdateBookingCommand,
    UpdateStatusCommand,
};
use crate::domain::models::booking::BookingStatus;
use crate::domain::{BookingError, BookingService};
use crate::notify::BookingNotifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub booking_service: BookingService<DbConnection>,
    pub notifier: Arc<dyn BookingNotifier>,
}

impl AppState {
    pub fn new(
        booking_service: BookingService<DbConnection>,
        notifier: Arc<dyn BookingNotifier>,
    ) -> Self {
        Self {
            booking_service,
            notifier,
        }
    }
}

/// Map a domain error onto the transport.
fn error_response(err: BookingError) -> Response {
    let status = match &err {
        BookingError::MissingField(_)
        | BookingError::InvalidFormat(_)
        | BookingError::InvalidValue(_) => StatusCode::BAD_REQUEST,
        BookingError::OverlapDetected(_)
        | BookingError::IllegalTransition { .. }
        | BookingError::IllegalState(_) => StatusCode::CONFLICT,
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingError::Storage(e) => {
            tracing::error!("Storage failure: {e:?}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

/// Axum handler function for POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> impl IntoResponse {
    info!("POST /api/bookings");

    match state
        .booking_service
        .create_booking(CreateBookingCommand { request })
        .await
    {
        Ok(booking) => (StatusCode::CREATED, Json(booking)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler function for GET /api/bookings
pub async fn list_bookings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/bookings");

    match state.booking_service.list_bookings().await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler function for GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/bookings/{}", booking_id);

    match state
        .booking_service
        .get_booking(GetBookingCommand { booking_id })
        .await
    {
        Ok(Some(booking)) => (StatusCode::OK, Json(booking)).into_response(),
        Ok(None) => error_response(BookingError::NotFound(booking_id)),
        Err(e) => error_response(e),
    }
}

/// Axum handler function for PUT /api/bookings/:id
pub async fn update_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<BookingRequest>,
) -> impl IntoResponse {
    info!("PUT /api/bookings/{}", booking_id);

    match state
        .booking_service
        .update_booking(UpdateBookingCommand {
            booking_id,
            request,
        })
        .await
    {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Axum handler function for PATCH /api/bookings/:id/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
    Json(request): Json<StatusUpdateRequest>,
) -> impl IntoResponse {
    info!(
        "PATCH /api/bookings/{}/status - {}",
        booking_id, request.status
    );

    match state
        .booking_service
        .update_booking_status(UpdateStatusCommand {
            booking_id,
            status: request.status,
        })
        .await
    {
        Ok(booking) => {
            match booking.status {
                BookingStatus::Confirmed => state.notifier.booking_confirmed(&booking),
                BookingStatus::Cancelled => state.notifier.booking_cancelled(&booking),
                BookingStatus::Pending => {}
            }
            (StatusCode::OK, Json(booking)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Axum handler function for DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/bookings/{}", booking_id);

    match state
        .booking_service
        .delete_booking(DeleteBookingCommand { booking_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
