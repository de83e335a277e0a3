//! Employee Repository

use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{BaseRepository, DomainError, DomainResult};
use crate::db::models::Employee;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees ordered by employment id
    pub async fn find_all(&self) -> DomainResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT * FROM employee ORDER BY employment_id")
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by employment id (the human-facing natural key)
    pub async fn find_by_employment_id(&self, employment_id: i64) -> DomainResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE employment_id = $employment_id LIMIT 1")
            .bind(("employment_id", employment_id))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Persist a validated employee
    pub async fn create(&self, employee: &Employee) -> DomainResult<Employee> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    employment_id = $employment_id,
                    user = $user,
                    position = $position,
                    employment_start_date = $employment_start_date,
                    employment_end_date = $employment_end_date,
                    employment_status = $employment_status,
                    phone = $phone,
                    birthdate = $birthdate,
                    father_name = $father_name,
                    child_number = $child_number,
                    created_at = $created_at,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("employment_id", employee.employment_id))
            .bind(("user", employee.user.clone()))
            .bind(("position", employee.position.position().cloned()))
            .bind(("employment_start_date", employee.employment_start_date))
            .bind(("employment_end_date", employee.employment_end_date))
            .bind(("employment_status", employee.employment_status))
            .bind(("phone", employee.phone.clone()))
            .bind(("birthdate", employee.birthdate))
            .bind(("father_name", employee.father_name.clone()))
            .bind(("child_number", employee.child_number))
            .bind(("created_at", employee.created_at))
            .bind(("updated_at", employee.updated_at))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| DomainError::Database("Failed to create employee".to_string()))
    }

    /// Wire-shaped read path with user, position and the position's
    /// department expanded
    pub async fn find_all_wire(&self) -> DomainResult<Vec<Value>> {
        let docs: Vec<Value> = self
            .base
            .db()
            .query(
                "SELECT * FROM employee ORDER BY employment_id FETCH user, position, position.department",
            )
            .await?
            .take(0)?;
        Ok(docs)
    }
}
