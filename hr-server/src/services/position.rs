//! Position Service

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use crate::db::models::{Position, PositionCreate, PositionUpdate};
use crate::db::repository::{DepartmentRepository, PositionRepository};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::validate;

async fn resolve_department(db: &Surreal<Db>, code: &str) -> DomainResult<RecordId> {
    let department = DepartmentRepository::new(db.clone())
        .find_by_code(code)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity: "department",
            key: code.to_string(),
        })?;
    department
        .id
        .ok_or_else(|| DomainError::Database("stored department has no id".to_string()))
}

/// Create a position, resolving the owning department by code.
pub async fn create_position(db: &Surreal<Db>, input: PositionCreate) -> DomainResult<Position> {
    let department = resolve_department(db, &input.department).await?;

    let now = Utc::now();
    let position = Position {
        id: None,
        title: input.title,
        department,
        description: input.description,
        is_active: input.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    validate::validate(db, &position, true).await?;
    PositionRepository::new(db.clone()).create(&position).await
}

/// Update a position. The candidate goes back through the validation
/// engine with `is_create = false`, which is where a department change
/// is rejected as immutable.
pub async fn update_position(
    db: &Surreal<Db>,
    id: &str,
    update: PositionUpdate,
) -> DomainResult<Position> {
    let repo = PositionRepository::new(db.clone());
    let existing = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity: "position",
            key: id.to_string(),
        })?;
    let record_id = existing
        .id
        .clone()
        .ok_or_else(|| DomainError::Database("stored position has no id".to_string()))?;

    let mut candidate = existing;
    if let Some(title) = update.title {
        candidate.title = title;
    }
    if let Some(code) = update.department {
        candidate.department = resolve_department(db, &code).await?;
    }
    if let Some(description) = update.description {
        candidate.description = Some(description);
    }
    if let Some(is_active) = update.is_active {
        candidate.is_active = is_active;
    }

    validate::validate(db, &candidate, false).await?;
    repo.update(&record_id, &candidate).await
}
