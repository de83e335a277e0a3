//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::models::employee;
use crate::db::repository::EmployeeRepository;
use crate::domain::wire::WireDoc;
use crate::services::{self, employee::EmployeeCreate};
use crate::utils::{AppError, AppResult};

/// List all employees with user and position expanded
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WireDoc>>> {
    let docs = EmployeeRepository::new(state.db.clone())
        .find_all_wire()
        .await?;
    Ok(Json(convert::wire_docs(&docs, &employee::SCHEMA)?))
}

/// Get employee by employment id
pub async fn get_by_employment_id(
    State(state): State<ServerState>,
    Path(employment_id): Path<i64>,
) -> AppResult<Json<WireDoc>> {
    let found = EmployeeRepository::new(state.db.clone())
        .find_by_employment_id(employment_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", employment_id)))?;
    Ok(Json(convert::wire_entity(&found, &employee::SCHEMA)?))
}

/// Create a new employee (creates the backing user first)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<WireDoc>> {
    let args = convert::input_args(&payload, &employee::INPUT)?;
    let input: EmployeeCreate =
        serde_json::from_value(args).map_err(|e| AppError::validation(e.to_string()))?;

    let created =
        services::employee::create_employee(&state.db, state.notifier.as_ref(), input).await?;
    Ok(Json(convert::wire_entity(&created, &employee::SCHEMA)?))
}
