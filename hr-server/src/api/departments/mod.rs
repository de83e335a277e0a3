//! Department API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Department router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/departments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{code}", axum::routing::delete(handler::delete))
}
