//! User Service
//!
//! Creates users with generated credentials. Usernames are derived from
//! the person's name plus a short random suffix and are NOT
//! collision-checked here - a duplicate is caught by the store's unique
//! index at persist time.

use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::notify::Credentials;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::domain::error::DomainResult;
use crate::domain::validate;

const USERNAME_SUFFIX_LEN: usize = 4;
const PASSWORD_LEN: usize = 12;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Create user payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Generate a username from the person's name plus a random
/// lowercase-alphanumeric suffix.
pub fn generate_username(first_name: &str, last_name: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..USERNAME_SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();
    format!(
        "{}.{}{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        suffix
    )
}

/// Generate a random password drawn from letters, digits and punctuation.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

/// Normalize an email address by lowercasing it. Addresses that do not
/// split on '@' pass through unchanged; the validation engine rejects
/// them later.
pub fn normalize_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((name, domain)) => format!("{}@{}", name.to_lowercase(), domain.to_lowercase()),
        None => email.trim().to_string(),
    }
}

/// Create a user with generated credentials.
///
/// Returns the stored user together with the plaintext credentials so
/// the caller can hand them to the delivery channel; only the argon2
/// hash is persisted.
pub async fn create_user_with_generated_credentials(
    db: &Surreal<Db>,
    input: UserCreate,
) -> DomainResult<(User, Credentials)> {
    let username = generate_username(&input.first_name, &input.last_name);
    let password = generate_password();
    let hash_pass = User::hash_password(&password)
        .map_err(|e| crate::domain::error::DomainError::Database(format!("password hash: {e}")))?;

    let now = Utc::now();
    let user = User {
        id: None,
        email: normalize_email(&input.email),
        username: username.clone(),
        first_name: Some(input.first_name),
        last_name: Some(input.last_name),
        hash_pass,
        is_verified: false,
        is_active: true,
        is_staff: false,
        is_superuser: false,
        created_at: now,
        updated_at: now,
    };

    validate::validate(db, &user, true).await?;
    let created = UserRepository::new(db.clone()).create(&user).await?;

    Ok((created, Credentials { username, password }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_combines_names_and_suffix() {
        let username = generate_username("Ada", "Lovelace");
        assert!(username.starts_with("ada.lovelace"));
        let suffix = &username["ada.lovelace".len()..];
        assert_eq!(suffix.len(), USERNAME_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn password_has_expected_length() {
        let password = generate_password();
        assert_eq!(password.chars().count(), PASSWORD_LEN);
    }

    #[test]
    fn email_normalization_lowercases() {
        assert_eq!(normalize_email("Ada.Lovelace@Example.COM"), "ada.lovelace@example.com");
        assert_eq!(normalize_email("  plain  "), "plain");
    }
}
