//! Payroll API Handlers

use axum::{Json, extract::State};
use serde_json::Value;

use crate::api::convert;
use crate::core::ServerState;
use crate::db::models::payroll::{self, Payroll};
use crate::db::models::PayrollCreate;
use crate::db::repository::PayrollRepository;
use crate::domain::wire::WireDoc;
use crate::services;
use crate::utils::{AppError, AppResult};

/// List all payrolls with the employee expanded and derived salaries
/// computed
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WireDoc>>> {
    let mut docs = PayrollRepository::new(state.db.clone())
        .find_all_wire()
        .await?;
    for doc in &mut docs {
        Payroll::splice_computed(doc)?;
    }
    Ok(Json(convert::wire_docs(&docs, &payroll::SCHEMA)?))
}

/// Create a new payroll; `employee_id` is the employment id
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<WireDoc>> {
    let args = convert::input_args(&payload, &payroll::INPUT)?;
    let input: PayrollCreate =
        serde_json::from_value(args).map_err(|e| AppError::validation(e.to_string()))?;

    let created = services::payroll::create_payroll(&state.db, input).await?;

    let mut doc = serde_json::to_value(&created)
        .map_err(|e| AppError::internal(format!("serialize payroll: {e}")))?;
    Payroll::splice_computed(&mut doc)?;
    Ok(Json(crate::domain::wire::to_wire(
        &doc,
        &payroll::SCHEMA,
        payroll::SCHEMA.wire_fields,
    )?))
}
