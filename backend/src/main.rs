use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, patch},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

mod db;
mod domain;
mod notify;
mod rest;
mod storage;

use db::DbConnection;
use domain::BookingService;
use notify::LogNotifier;
use rest::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up database");
    let db = DbConnection::init().await?;

    let booking_service = BookingService::new(Arc::new(db));
    let state = AppState::new(booking_service, Arc::new(LogNotifier));

    // CORS setup to allow a frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/bookings",
            get(rest::list_bookings).post(rest::create_booking),
        )
        .route(
            "/bookings/:id",
            get(rest::get_booking)
                .put(rest::update_booking)
                .delete(rest::delete_booking),
        )
        .route("/bookings/:id/status", patch(rest::update_booking_status));

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state);

    // Start the server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
