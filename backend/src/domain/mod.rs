//! Domain layer: the booking lifecycle engine and its pure helpers.

pub mod booking_service;
pub mod commands;
pub mod error;
pub mod models;
pub mod transition;
pub mod validate;

pub use booking_service::BookingService;
pub use error::BookingError;
