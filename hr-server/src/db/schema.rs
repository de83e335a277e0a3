//! Store schema bootstrap
//!
//! Tables stay SCHEMALESS - the validation engine owns field shapes.
//! Unique indexes are declared here because the store is the final
//! arbiter of uniqueness; the engine's pre-checks only produce friendlier
//! errors. Index names follow `{table}_{field}` so store-level
//! violations can be mapped back to the offending field.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::domain::error::DomainResult;
use crate::domain::sequence;

/// Declare tables and unique indexes, then seed the employment id
/// counter. Idempotent; runs on every startup.
pub async fn define(db: &Surreal<Db>) -> DomainResult<()> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS department SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS department_code ON department FIELDS code UNIQUE;
        DEFINE INDEX IF NOT EXISTS department_name ON department FIELDS name UNIQUE;

        DEFINE TABLE IF NOT EXISTS position SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS position_title_department ON position FIELDS title, department UNIQUE;

        DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS employee_employment_id ON employee FIELDS employment_id UNIQUE;
        DEFINE INDEX IF NOT EXISTS employee_user ON employee FIELDS user UNIQUE;
        DEFINE INDEX IF NOT EXISTS employee_phone ON employee FIELDS phone UNIQUE;

        DEFINE TABLE IF NOT EXISTS payroll SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS payroll_employee ON payroll FIELDS employee UNIQUE;

        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS user_username ON user FIELDS username UNIQUE;

        DEFINE TABLE IF NOT EXISTS sequence SCHEMALESS;
        "#,
    )
    .await?
    .check()?;

    sequence::seed_employment_ids(db).await
}
