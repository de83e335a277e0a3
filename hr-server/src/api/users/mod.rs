//! User API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// User router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", axum::routing::delete(handler::delete))
}
