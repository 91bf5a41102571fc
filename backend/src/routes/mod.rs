//! Route definitions for the warehouse report server

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create application routes
pub fn app_routes() -> Router<AppState> {
    Router::new()
        // Dashboard page
        .route("/", get(handlers::show_dashboard))
        // Report data (JSON or CSV)
        .route("/report", get(handlers::get_report))
        // Health check
        .route("/health", get(handlers::health_check))
}
