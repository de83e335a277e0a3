//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`departments`] - department management
//! - [`positions`] - position management
//! - [`employees`] - employee management
//! - [`payrolls`] - payroll management
//! - [`users`] - user listing and deletion
//!
//! Handlers stay thin: they translate payloads through the wire mapper
//! and delegate to services/repositories.

pub mod convert;

pub mod health;

// Entity APIs
pub mod departments;
pub mod employees;
pub mod payrolls;
pub mod positions;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(departments::router())
        .merge(positions::router())
        .merge(employees::router())
        .merge(payrolls::router())
        .merge(users::router())
}

/// Build the application with middleware applied
pub fn build_app() -> Router<ServerState> {
    build_router()
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
}
