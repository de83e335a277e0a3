//! Payroll Repository

use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use super::{BaseRepository, DomainError, DomainResult};
use crate::db::models::Payroll;

#[derive(Clone)]
pub struct PayrollRepository {
    base: BaseRepository,
}

impl PayrollRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all payrolls
    pub async fn find_all(&self) -> DomainResult<Vec<Payroll>> {
        let payrolls: Vec<Payroll> = self
            .base
            .db()
            .query("SELECT * FROM payroll")
            .await?
            .take(0)?;
        Ok(payrolls)
    }

    /// Persist a validated payroll
    pub async fn create(&self, payroll: &Payroll) -> DomainResult<Payroll> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE payroll SET
                    employee = $employee,
                    base_salary = $base_salary,
                    insurance = $insurance,
                    tax = $tax,
                    created_at = $created_at,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("employee", payroll.employee.clone()))
            .bind(("base_salary", payroll.base_salary))
            .bind(("insurance", payroll.insurance))
            .bind(("tax", payroll.tax))
            .bind(("created_at", payroll.created_at))
            .bind(("updated_at", payroll.updated_at))
            .await?;

        let created: Option<Payroll> = result.take(0)?;
        created.ok_or_else(|| DomainError::Database("Failed to create payroll".to_string()))
    }

    /// Wire-shaped read path with the employee and its user expanded.
    /// Derived salary fields are spliced in by the caller via
    /// [`Payroll::splice_computed`].
    pub async fn find_all_wire(&self) -> DomainResult<Vec<Value>> {
        let docs: Vec<Value> = self
            .base
            .db()
            .query("SELECT * FROM payroll FETCH employee, employee.user")
            .await?
            .take(0)?;
        Ok(docs)
    }
}
