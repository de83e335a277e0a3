//! Department headcount maintainer
//!
//! `Department.headcount` is a denormalized count of employees assigned
//! via the department's positions. It is bumped with a single atomic
//! `UPDATE` as the last step of employee creation - not transactionally
//! with the employee write. The caller logs a failure instead of
//! unwinding the already-committed employee (see `services::employee`).

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::error::{DomainError, DomainResult};
use crate::db::models::{Department, Position};

/// Increment the headcount of the department owning `position` and
/// return the new count.
pub async fn on_employee_assigned(db: &Surreal<Db>, position: &RecordId) -> DomainResult<i64> {
    let found: Option<Position> = db
        .select(position.clone())
        .await
        .map_err(|e| failure(position.to_string(), e.to_string()))?;
    let found = found.ok_or_else(|| {
        failure(position.to_string(), "position no longer exists".to_string())
    })?;

    let department = found.department.clone();
    let mut result = db
        .query("UPDATE $department SET headcount += 1, updated_at = $now RETURN AFTER")
        .bind(("department", department.clone()))
        .bind(("now", Utc::now()))
        .await
        .map_err(|e| failure(department.to_string(), e.to_string()))?;
    let updated: Vec<Department> = result
        .take(0)
        .map_err(|e| failure(department.to_string(), e.to_string()))?;

    updated
        .into_iter()
        .next()
        .map(|d| d.headcount)
        .ok_or_else(|| failure(department.to_string(), "department no longer exists".to_string()))
}

fn failure(department: String, reason: String) -> DomainError {
    DomainError::AggregateUpdate { department, reason }
}
