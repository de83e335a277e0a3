//! Position Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use super::department;
use crate::domain::fields::{EntitySchema, FieldDef, FieldKind};
use crate::domain::validate::Validate;

/// Position ID type
pub type PositionId = RecordId;

/// Storage schema. The `(title, department)` pair is unique per table
/// and `department` is immutable once the position has been persisted.
pub static SCHEMA: EntitySchema = EntitySchema {
    table: "position",
    fields: &[
        FieldDef::new("id", FieldKind::Id),
        FieldDef::new("title", FieldKind::String)
            .required()
            .max_length(100),
        FieldDef::new("department", FieldKind::Reference(department::schema))
            .required()
            .immutable(),
        FieldDef::new("description", FieldKind::String),
        FieldDef::new("is_active", FieldKind::Boolean),
        FieldDef::new("created_at", FieldKind::DateTime),
        FieldDef::new("updated_at", FieldKind::DateTime),
    ],
    wire_fields: &[
        "id",
        "title",
        "department",
        "description",
        "is_active",
        "created_at",
        "updated_at",
    ],
    unique_together: &[&["title", "department"]],
};

/// Input field schema accepted by the create endpoint. `department` is
/// the owning department's code, resolved by the creation service.
pub static INPUT: EntitySchema = EntitySchema {
    table: "position",
    fields: &[
        FieldDef::new("title", FieldKind::String),
        FieldDef::new("department", FieldKind::String),
        FieldDef::new("description", FieldKind::String),
        FieldDef::new("is_active", FieldKind::Boolean),
    ],
    wire_fields: &["title", "department", "description", "is_active"],
    unique_together: &[],
};

pub fn schema() -> &'static EntitySchema {
    &SCHEMA
}

/// Position model matching the `position` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<PositionId>,
    pub title: String,
    #[serde(with = "serde_helpers::record_id")]
    pub department: RecordId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create position payload; `department` carries the department code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionCreate {
    pub title: String,
    pub department: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Update position payload; `department` carries a department code and
/// exists so that the immutability rule has something to reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Validate for Position {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}
