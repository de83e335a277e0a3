//! User Repository

use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, DomainError, DomainResult};
use crate::db::models::User;
use crate::domain::validate::ValidationReport;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users ordered by email
    pub async fn find_all(&self) -> DomainResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY email")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by (normalized) email
    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Persist a validated user. `hash_pass` is bound explicitly because
    /// the model never serializes it.
    pub async fn create(&self, user: &User) -> DomainResult<User> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    email = $email,
                    username = $username,
                    first_name = $first_name,
                    last_name = $last_name,
                    hash_pass = $hash_pass,
                    is_verified = $is_verified,
                    is_active = $is_active,
                    is_staff = $is_staff,
                    is_superuser = $is_superuser,
                    created_at = $created_at,
                    updated_at = $updated_at
                RETURN AFTER"#,
            )
            .bind(("email", user.email.clone()))
            .bind(("username", user.username.clone()))
            .bind(("first_name", user.first_name.clone()))
            .bind(("last_name", user.last_name.clone()))
            .bind(("hash_pass", user.hash_pass.clone()))
            .bind(("is_verified", user.is_verified))
            .bind(("is_active", user.is_active))
            .bind(("is_staff", user.is_staff))
            .bind(("is_superuser", user.is_superuser))
            .bind(("created_at", user.created_at))
            .bind(("updated_at", user.updated_at))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| DomainError::Database("Failed to create user".to_string()))
    }

    /// Delete a user; refused while an employee references it
    pub async fn delete(&self, id: &str) -> DomainResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| DomainError::field("id", format!("Invalid ID: {id}")))?;

        let mut result = self
            .base
            .db()
            .query("SELECT VALUE id FROM employee WHERE user = $user LIMIT 1")
            .bind(("user", thing.clone()))
            .await?;
        let referencing: Vec<RecordId> = result.take(0)?;
        if !referencing.is_empty() {
            let mut report = ValidationReport::default();
            report.business_rule(
                "referenced",
                "Cannot delete user: an employee record references it",
            );
            return Err(DomainError::Validation(report));
        }

        let _: Option<User> = self.base.db().delete(thing).await?;
        Ok(true)
    }

    /// Wire-shaped read path; users carry no references.
    pub async fn find_all_wire(&self) -> DomainResult<Vec<Value>> {
        let users = self.find_all().await?;
        users
            .iter()
            .map(|u| {
                serde_json::to_value(u)
                    .map_err(|e| DomainError::Database(format!("serialize user: {e}")))
            })
            .collect()
    }
}
