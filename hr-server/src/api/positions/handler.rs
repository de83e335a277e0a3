//! Position API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::models::position::{self, PositionCreate};
use crate::db::repository::PositionRepository;
use crate::domain::wire::WireDoc;
use crate::services;
use crate::utils::{AppError, AppResult};

/// List all positions with their departments expanded
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WireDoc>>> {
    let docs = PositionRepository::new(state.db.clone())
        .find_all_wire()
        .await?;
    Ok(Json(convert::wire_docs(&docs, &position::SCHEMA)?))
}

/// Create a new position; `department` carries the department code
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<WireDoc>> {
    let args = convert::input_args(&payload, &position::INPUT)?;
    let input: PositionCreate =
        serde_json::from_value(args).map_err(|e| AppError::validation(e.to_string()))?;

    let created = services::position::create_position(&state.db, input).await?;
    Ok(Json(convert::wire_entity(&created, &position::SCHEMA)?))
}

/// Delete a position (refused while employees are assigned to it)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = PositionRepository::new(state.db.clone()).delete(&id).await?;
    Ok(Json(deleted))
}
