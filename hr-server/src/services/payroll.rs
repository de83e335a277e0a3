//! Payroll Service

use chrono::Utc;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::payroll::round_money;
use crate::db::models::{Payroll, PayrollCreate};
use crate::db::repository::{EmployeeRepository, PayrollRepository};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::validate;

/// Default insurance deduction (500.00)
pub const DEFAULT_INSURANCE: Decimal = Decimal::from_parts(50000, 0, 0, false, 2);
/// Default tax deduction (1500.00)
pub const DEFAULT_TAX: Decimal = Decimal::from_parts(150000, 0, 0, false, 2);

/// Create a payroll for the employee with the given employment id.
pub async fn create_payroll(db: &Surreal<Db>, input: PayrollCreate) -> DomainResult<Payroll> {
    let employee = EmployeeRepository::new(db.clone())
        .find_by_employment_id(input.employee_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity: "employee",
            key: input.employee_id.to_string(),
        })?;
    let employee_id = employee
        .id
        .ok_or_else(|| DomainError::Database("stored employee has no id".to_string()))?;

    let now = Utc::now();
    let payroll = Payroll {
        id: None,
        employee: employee_id,
        base_salary: round_money(input.base_salary),
        insurance: round_money(input.insurance.unwrap_or(DEFAULT_INSURANCE)),
        tax: round_money(input.tax.unwrap_or(DEFAULT_TAX)),
        created_at: now,
        updated_at: now,
    };

    validate::validate(db, &payroll, true).await?;
    PayrollRepository::new(db.clone()).create(&payroll).await
}
