//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::models::user;
use crate::db::repository::UserRepository;
use crate::domain::wire::WireDoc;
use crate::utils::AppResult;

/// List all users (password hashes never serialize)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WireDoc>>> {
    let docs = UserRepository::new(state.db.clone()).find_all_wire().await?;
    Ok(Json(convert::wire_docs(&docs, &user::SCHEMA)?))
}

/// Delete a user (refused while an employee references it)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = UserRepository::new(state.db.clone()).delete(&id).await?;
    Ok(Json(deleted))
}
