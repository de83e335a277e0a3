//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::ValidateEmail;

use super::serde_helpers;
use crate::domain::fields::{EntitySchema, FieldDef, FieldKind};
use crate::domain::validate::{Validate, ValidationReport};

/// User ID type
pub type UserId = RecordId;

/// Storage schema. Email is unique after normalization; usernames are
/// unique at the store level because generated usernames are never
/// collision-checked before persisting.
pub static SCHEMA: EntitySchema = EntitySchema {
    table: "user",
    fields: &[
        FieldDef::new("id", FieldKind::Id),
        FieldDef::new("email", FieldKind::String)
            .required()
            .unique()
            .max_length(254),
        FieldDef::new("username", FieldKind::String)
            .required()
            .unique()
            .max_length(150)
            .regex(r"^[\w.@+-]+$")
            .regex_message("Letters, numbers and @/./+/-/_ characters only"),
        FieldDef::new("first_name", FieldKind::String).max_length(150),
        FieldDef::new("last_name", FieldKind::String).max_length(150),
        FieldDef::new("is_verified", FieldKind::Boolean),
        FieldDef::new("is_active", FieldKind::Boolean),
        FieldDef::new("is_staff", FieldKind::Boolean),
        FieldDef::new("is_superuser", FieldKind::Boolean),
        FieldDef::new("created_at", FieldKind::DateTime),
        FieldDef::new("updated_at", FieldKind::DateTime),
    ],
    wire_fields: &[
        "id",
        "email",
        "username",
        "first_name",
        "last_name",
        "is_verified",
        "is_active",
        "is_staff",
        "is_superuser",
        "created_at",
        "updated_at",
    ],
    unique_together: &[],
};

pub fn schema() -> &'static EntitySchema {
    &SCHEMA
}

/// User model matching the `user` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_verified: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_staff: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

impl Validate for User {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn business_rules(&self, report: &mut ValidationReport) {
        if !self.email.as_str().validate_email() {
            report.field("email", "Enter a valid email address");
        }
    }
}
