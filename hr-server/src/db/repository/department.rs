//! Department Repository

use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, DomainError, DomainResult};
use crate::db::models::Department;
use crate::domain::validate::ValidationReport;

#[derive(Clone)]
pub struct DepartmentRepository {
    base: BaseRepository,
}

impl DepartmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all departments ordered by code
    pub async fn find_all(&self) -> DomainResult<Vec<Department>> {
        let departments: Vec<Department> = self
            .base
            .db()
            .query("SELECT * FROM department ORDER BY code")
            .await?
            .take(0)?;
        Ok(departments)
    }

    /// Find department by code
    pub async fn find_by_code(&self, code: &str) -> DomainResult<Option<Department>> {
        let code_owned = code.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM department WHERE code = $code LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let departments: Vec<Department> = result.take(0)?;
        Ok(departments.into_iter().next())
    }

    /// Persist a validated department
    pub async fn create(&self, department: &Department) -> DomainResult<Department> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE department SET
                    code = $code,
                    name = $name,
                    headcount = $headcount,
                    created_at = $created_at,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("code", department.code.clone()))
            .bind(("name", department.name.clone()))
            .bind(("headcount", department.headcount))
            .bind(("created_at", department.created_at))
            .bind(("updated_at", department.updated_at))
            .await?;

        let created: Option<Department> = result.take(0)?;
        created.ok_or_else(|| DomainError::Database("Failed to create department".to_string()))
    }

    /// Delete a department by code, cascading to its positions.
    ///
    /// Refused entirely while any employee is assigned through one of
    /// those positions - the cascade would otherwise break the
    /// position-deletion protection.
    pub async fn delete_by_code(&self, code: &str) -> DomainResult<bool> {
        let department = self
            .find_by_code(code)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "department",
                key: code.to_string(),
            })?;
        let department_id = department
            .id
            .ok_or_else(|| DomainError::Database("stored department has no id".to_string()))?;

        let mut result = self
            .base
            .db()
            .query("SELECT VALUE id FROM position WHERE department = $department")
            .bind(("department", department_id.clone()))
            .await?;
        let positions: Vec<RecordId> = result.take(0)?;

        if !positions.is_empty() {
            let mut result = self
                .base
                .db()
                .query("SELECT VALUE id FROM employee WHERE position IN $positions LIMIT 1")
                .bind(("positions", positions))
                .await?;
            let referencing: Vec<RecordId> = result.take(0)?;
            if !referencing.is_empty() {
                let mut report = ValidationReport::default();
                report.business_rule(
                    "referenced",
                    "Cannot delete department: employees are assigned to its positions",
                );
                return Err(DomainError::Validation(report));
            }

            self.base
                .db()
                .query("DELETE position WHERE department = $department")
                .bind(("department", department_id.clone()))
                .await?
                .check()?;
        }

        let _: Option<Department> = self.base.db().delete(department_id).await?;
        Ok(true)
    }

    /// Wire-shaped read path; departments carry no references, so this
    /// is a plain serialization of the typed rows.
    pub async fn find_all_wire(&self) -> DomainResult<Vec<Value>> {
        let departments = self.find_all().await?;
        departments
            .iter()
            .map(|d| {
                serde_json::to_value(d)
                    .map_err(|e| DomainError::Database(format!("serialize department: {e}")))
            })
            .collect()
    }
}
