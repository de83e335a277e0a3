//! Position Repository

use chrono::Utc;
use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, DomainError, DomainResult};
use crate::db::models::Position;
use crate::domain::validate::ValidationReport;

#[derive(Clone)]
pub struct PositionRepository {
    base: BaseRepository,
}

impl PositionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all positions ordered by title
    pub async fn find_all(&self) -> DomainResult<Vec<Position>> {
        let positions: Vec<Position> = self
            .base
            .db()
            .query("SELECT * FROM position ORDER BY title")
            .await?
            .take(0)?;
        Ok(positions)
    }

    /// Find position by id
    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<Position>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| DomainError::field("id", format!("Invalid ID: {id}")))?;
        let position: Option<Position> = self.base.db().select(thing).await?;
        Ok(position)
    }

    /// Persist a validated position
    pub async fn create(&self, position: &Position) -> DomainResult<Position> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE position SET
                    title = $title,
                    department = $department,
                    description = $description,
                    is_active = $is_active,
                    created_at = $created_at,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("title", position.title.clone()))
            .bind(("department", position.department.clone()))
            .bind(("description", position.description.clone()))
            .bind(("is_active", position.is_active))
            .bind(("created_at", position.created_at))
            .bind(("updated_at", position.updated_at))
            .await?;

        let created: Option<Position> = result.take(0)?;
        created.ok_or_else(|| DomainError::Database("Failed to create position".to_string()))
    }

    /// Persist a validated update, refreshing `updated_at`
    pub async fn update(&self, id: &RecordId, position: &Position) -> DomainResult<Position> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    title = $title,
                    department = $department,
                    description = $description,
                    is_active = $is_active,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("title", position.title.clone()))
            .bind(("department", position.department.clone()))
            .bind(("description", position.description.clone()))
            .bind(("is_active", position.is_active))
            .bind(("now", Utc::now()))
            .await?;

        result
            .take::<Option<Position>>(0)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "position",
                key: id.to_string(),
            })
    }

    /// Delete a position; refused while an employee references it
    pub async fn delete(&self, id: &str) -> DomainResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| DomainError::field("id", format!("Invalid ID: {id}")))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "position",
                key: id.to_string(),
            })?;

        let mut result = self
            .base
            .db()
            .query("SELECT VALUE id FROM employee WHERE position = $position LIMIT 1")
            .bind(("position", thing.clone()))
            .await?;
        let referencing: Vec<RecordId> = result.take(0)?;
        if !referencing.is_empty() {
            let mut report = ValidationReport::default();
            report.business_rule(
                "referenced",
                "Cannot delete position: employees are assigned to it",
            );
            return Err(DomainError::Validation(report));
        }

        let _: Option<Position> = self.base.db().delete(thing).await?;
        Ok(true)
    }

    /// Wire-shaped read path with the owning department expanded
    pub async fn find_all_wire(&self) -> DomainResult<Vec<Value>> {
        let docs: Vec<Value> = self
            .base
            .db()
            .query("SELECT * FROM position ORDER BY title FETCH department")
            .await?
            .take(0)?;
        Ok(docs)
    }
}
