//! Employee Service
//!
//! Employee creation is the widest orchestration in the system: it
//! creates the backing user with generated credentials, allocates the
//! employment id, validates and persists the employee, fires the
//! credential notification and finally bumps the department headcount.
//!
//! Two accepted consistency gaps live here, both deliberate:
//! - a user already created is NOT rolled back when the employee itself
//!   fails validation or persistence;
//! - the headcount update runs after the committed employee write and a
//!   failure is logged, never unwound.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::notify::CredentialNotifier;
use super::user::{self, UserCreate};
use crate::db::models::{Assignment, Employee, EmploymentStatus};
use crate::db::repository::EmployeeRepository;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::{headcount, sequence, validate};

/// Create employee payload; `position` is an optional position record id.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeCreate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub employment_start_date: DateTime<Utc>,
    #[serde(default)]
    pub employment_end_date: Option<DateTime<Utc>>,
    pub phone: String,
    pub birthdate: NaiveDate,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub child_number: Option<i64>,
}

async fn resolve_position(db: &Surreal<Db>, raw: &str) -> DomainResult<RecordId> {
    let not_found = || DomainError::NotFound {
        entity: "position",
        key: raw.to_string(),
    };
    let id: RecordId = raw.parse().map_err(|_| not_found())?;
    let found: Option<crate::db::models::Position> = db.select(id.clone()).await?;
    found.ok_or_else(not_found)?;
    Ok(id)
}

/// Create an employee together with its backing user.
pub async fn create_employee(
    db: &Surreal<Db>,
    notifier: &dyn CredentialNotifier,
    input: EmployeeCreate,
) -> DomainResult<Employee> {
    let position = match &input.position {
        Some(raw) => Assignment::AssignedTo(resolve_position(db, raw).await?),
        None => Assignment::Unassigned,
    };

    let (backing_user, credentials) = user::create_user_with_generated_credentials(
        db,
        UserCreate {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
        },
    )
    .await?;
    let user_id = backing_user
        .id
        .clone()
        .ok_or_else(|| DomainError::Database("created user has no id".to_string()))?;

    let employment_id = sequence::allocate_employment_id(db).await?;

    let now = Utc::now();
    let employee = Employee {
        id: None,
        employment_id,
        user: user_id,
        position,
        employment_start_date: input.employment_start_date,
        employment_end_date: input.employment_end_date,
        employment_status: EmploymentStatus::Active,
        phone: input.phone,
        birthdate: input.birthdate,
        father_name: input.father_name,
        child_number: input.child_number.unwrap_or(0),
        created_at: now,
        updated_at: now,
    };

    validate::validate(db, &employee, true).await?;
    let created = EmployeeRepository::new(db.clone()).create(&employee).await?;

    // Fire-and-forget credential delivery.
    if let Err(e) = notifier
        .send_credentials(&backing_user.email, &credentials)
        .await
    {
        tracing::warn!(
            email = %backing_user.email,
            error = %e,
            "credential delivery failed"
        );
    }

    // Headcount maintenance is the last step and is never unwound: the
    // employee write has already committed.
    if let Assignment::AssignedTo(position) = &created.position {
        match headcount::on_employee_assigned(db, position).await {
            Ok(count) => {
                tracing::debug!(employment_id = created.employment_id, headcount = count, "headcount updated");
            }
            Err(e) => {
                tracing::error!(
                    employment_id = created.employment_id,
                    error = %e,
                    "headcount update failed after employee creation"
                );
            }
        }
    }

    Ok(created)
}
