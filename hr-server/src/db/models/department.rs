//! Department Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::domain::fields::{EntitySchema, FieldDef, FieldKind};
use crate::domain::validate::Validate;

/// Department ID type
pub type DepartmentId = RecordId;

/// Storage schema driving validation and the wire mapper.
pub static SCHEMA: EntitySchema = EntitySchema {
    table: "department",
    fields: &[
        FieldDef::new("id", FieldKind::Id),
        FieldDef::new("code", FieldKind::String)
            .required()
            .unique()
            .max_length(10)
            .regex(r"^[A-Z0-9-]+$")
            .regex_message("Only uppercase letters, numbers and hyphens allowed"),
        FieldDef::new("name", FieldKind::String)
            .required()
            .unique()
            .max_length(100),
        FieldDef::new("headcount", FieldKind::Integer).min_int(0),
        FieldDef::new("created_at", FieldKind::DateTime),
        FieldDef::new("updated_at", FieldKind::DateTime),
    ],
    wire_fields: &["id", "code", "name", "headcount", "created_at", "updated_at"],
    unique_together: &[],
};

/// Input field schema accepted by the create endpoint.
pub static INPUT: EntitySchema = EntitySchema {
    table: "department",
    fields: &[
        FieldDef::new("code", FieldKind::String),
        FieldDef::new("name", FieldKind::String),
    ],
    wire_fields: &["code", "name"],
    unique_together: &[],
};

pub fn schema() -> &'static EntitySchema {
    &SCHEMA
}

/// Department model matching the `department` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<DepartmentId>,
    pub code: String,
    pub name: String,
    /// Denormalized count of employees assigned via this department's
    /// positions, maintained by `domain::headcount`.
    #[serde(default)]
    pub headcount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub code: String,
    pub name: String,
}

impl Validate for Department {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}
