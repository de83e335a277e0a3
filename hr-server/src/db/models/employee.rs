//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use surrealdb::RecordId;

use super::serde_helpers;
use super::{position, user};
use crate::domain::fields::{EntitySchema, FieldDef, FieldKind};
use crate::domain::sequence::EMPLOYMENT_ID_START;
use crate::domain::validate::{Validate, ValidationReport};

/// Employee ID type
pub type EmployeeId = RecordId;

/// Wire values of [`EmploymentStatus`]
pub const EMPLOYMENT_STATUS_VALUES: &[&str] = &["ACTIVE", "ON_LEAVE", "TERMINATED"];

/// Employment status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    #[default]
    Active,
    OnLeave,
    Terminated,
}

/// Position assignment state.
///
/// A positionless employee is a valid long-term state, not a
/// transitional one; the explicit variant keeps call sites from treating
/// the assignment as an incidental nullable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Assignment {
    #[default]
    Unassigned,
    AssignedTo(PositionRef),
}

/// Record link to the assigned position.
pub type PositionRef = RecordId;

impl Assignment {
    pub fn position(&self) -> Option<&RecordId> {
        match self {
            Assignment::Unassigned => None,
            Assignment::AssignedTo(id) => Some(id),
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Assignment::AssignedTo(_))
    }
}

impl Serialize for Assignment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Assignment::AssignedTo(id) => serializer.serialize_some(&id.to_string()),
            Assignment::Unassigned => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_helpers::option_record_id::deserialize(deserializer).map(|opt| match opt {
            Some(id) => Assignment::AssignedTo(id),
            None => Assignment::Unassigned,
        })
    }
}

/// Storage schema. `employment_id`, `user` and `phone` are globally
/// unique; the allocator guarantees ids start at 1000.
pub static SCHEMA: EntitySchema = EntitySchema {
    table: "employee",
    fields: &[
        FieldDef::new("id", FieldKind::Id),
        FieldDef::new("employment_id", FieldKind::Integer)
            .required()
            .unique()
            .min_int(EMPLOYMENT_ID_START),
        FieldDef::new("user", FieldKind::Reference(user::schema))
            .required()
            .unique(),
        FieldDef::new("position", FieldKind::Reference(position::schema)),
        FieldDef::new("employment_start_date", FieldKind::DateTime).required(),
        FieldDef::new("employment_end_date", FieldKind::DateTime),
        FieldDef::new("employment_status", FieldKind::Enum(EMPLOYMENT_STATUS_VALUES)),
        FieldDef::new("phone", FieldKind::String)
            .required()
            .unique()
            .regex(r"^\+[1-9]\d{1,14}$")
            .regex_message("Full international format required (+countrycode...)"),
        FieldDef::new("birthdate", FieldKind::Date).required(),
        FieldDef::new("father_name", FieldKind::String).max_length(200),
        FieldDef::new("child_number", FieldKind::Integer).min_int(0),
        FieldDef::new("created_at", FieldKind::DateTime),
        FieldDef::new("updated_at", FieldKind::DateTime),
    ],
    wire_fields: &[
        "id",
        "employment_id",
        "user",
        "position",
        "employment_start_date",
        "employment_end_date",
        "employment_status",
        "phone",
        "birthdate",
        "father_name",
        "child_number",
        "created_at",
        "updated_at",
    ],
    unique_together: &[],
};

/// Input field schema accepted by the create endpoint. The user fields
/// (`email`, `first_name`, `last_name`) back the generated-credentials
/// user created alongside the employee; `position` is an optional
/// position record id.
pub static INPUT: EntitySchema = EntitySchema {
    table: "employee",
    fields: &[
        FieldDef::new("email", FieldKind::String),
        FieldDef::new("first_name", FieldKind::String),
        FieldDef::new("last_name", FieldKind::String),
        FieldDef::new("position", FieldKind::Reference(position::schema)),
        FieldDef::new("employment_start_date", FieldKind::DateTime),
        FieldDef::new("employment_end_date", FieldKind::DateTime),
        FieldDef::new("phone", FieldKind::String),
        FieldDef::new("birthdate", FieldKind::Date),
        FieldDef::new("father_name", FieldKind::String),
        FieldDef::new("child_number", FieldKind::Integer),
    ],
    wire_fields: &[
        "email",
        "first_name",
        "last_name",
        "position",
        "employment_start_date",
        "employment_end_date",
        "phone",
        "birthdate",
        "father_name",
        "child_number",
    ],
    unique_together: &[],
};

pub fn schema() -> &'static EntitySchema {
    &SCHEMA
}

/// Employee model matching the `employee` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub employment_id: i64,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(default)]
    pub position: Assignment,
    pub employment_start_date: DateTime<Utc>,
    #[serde(default)]
    pub employment_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub employment_status: EmploymentStatus,
    pub phone: String,
    pub birthdate: NaiveDate,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub child_number: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Validate for Employee {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn business_rules(&self, report: &mut ValidationReport) {
        if let Some(end) = self.employment_end_date
            && end < self.employment_start_date
        {
            report.business_rule(
                "employment_dates",
                "Employment end date cannot be before start date",
            );
        }
        if self.birthdate > Utc::now().date_naive() {
            report.business_rule("birthdate", "Birthdate cannot be in the future");
        }
    }
}
