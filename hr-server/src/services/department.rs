//! Department Service

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Department, DepartmentCreate};
use crate::db::repository::DepartmentRepository;
use crate::domain::error::DomainResult;
use crate::domain::validate;

/// Create a department with an empty headcount.
pub async fn create_department(
    db: &Surreal<Db>,
    input: DepartmentCreate,
) -> DomainResult<Department> {
    let now = Utc::now();
    let department = Department {
        id: None,
        code: input.code,
        name: input.name,
        headcount: 0,
        created_at: now,
        updated_at: now,
    };

    validate::validate(db, &department, true).await?;
    DepartmentRepository::new(db.clone()).create(&department).await
}
