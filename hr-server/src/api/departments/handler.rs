//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::models::department::{self, DepartmentCreate};
use crate::db::repository::DepartmentRepository;
use crate::domain::wire::WireDoc;
use crate::services;
use crate::utils::{AppError, AppResult};

/// List all departments
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WireDoc>>> {
    let docs = DepartmentRepository::new(state.db.clone())
        .find_all_wire()
        .await?;
    Ok(Json(convert::wire_docs(&docs, &department::SCHEMA)?))
}

/// Create a new department
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<WireDoc>> {
    let args = convert::input_args(&payload, &department::INPUT)?;
    let input: DepartmentCreate =
        serde_json::from_value(args).map_err(|e| AppError::validation(e.to_string()))?;

    let created = services::department::create_department(&state.db, input).await?;
    Ok(Json(convert::wire_entity(&created, &department::SCHEMA)?))
}

/// Delete a department by code (cascades to its positions)
pub async fn delete(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = DepartmentRepository::new(state.db.clone())
        .delete_by_code(&code)
        .await?;
    Ok(Json(deleted))
}
