//! User creation, normalization, uniqueness and delete-protection tests

mod common;

use common::{employee_input, mem_db, RecordingNotifier};
use hr_server::db::repository::UserRepository;
use hr_server::domain::DomainError;
use hr_server::services;
use hr_server::services::user::{create_user_with_generated_credentials, UserCreate};

fn user_input(email: &str) -> UserCreate {
    UserCreate {
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    }
}

#[tokio::test]
async fn email_is_normalized_to_lowercase() {
    let db = mem_db().await;

    let (user, credentials) =
        create_user_with_generated_credentials(&db, user_input("Ada.Lovelace@Example.COM"))
            .await
            .unwrap();

    assert_eq!(user.email, "ada.lovelace@example.com");
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert!(user.is_active);
    assert!(!user.is_verified);
    assert!(user.verify_password(&credentials.password).unwrap());
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let db = mem_db().await;

    let err = create_user_with_generated_credentials(&db, user_input("not-an-email"))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(report) => assert!(report.has_field_violation("email")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_email_is_rejected_after_normalization() {
    let db = mem_db().await;

    create_user_with_generated_credentials(&db, user_input("ada@example.com"))
        .await
        .unwrap();
    let err = create_user_with_generated_credentials(&db, user_input("ADA@EXAMPLE.COM"))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(report) => assert!(report.has_not_unique("email")),
        other => panic!("expected uniqueness error, got {other:?}"),
    }
}

#[tokio::test]
async fn user_delete_is_refused_while_an_employee_references_it() {
    let db = mem_db().await;
    let notifier = RecordingNotifier::default();

    let employee = services::employee::create_employee(
        &db,
        &notifier,
        employee_input("ada@example.com", "+14155550100", None),
    )
    .await
    .unwrap();

    let err = UserRepository::new(db.clone())
        .delete(&employee.user.to_string())
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(report) => assert!(report.has_business_rule("referenced")),
        other => panic!("expected delete refusal, got {other:?}"),
    }
}

#[tokio::test]
async fn unreferenced_user_can_be_deleted() {
    let db = mem_db().await;

    let (user, _) = create_user_with_generated_credentials(&db, user_input("ada@example.com"))
        .await
        .unwrap();

    let deleted = UserRepository::new(db.clone())
        .delete(&user.id.unwrap().to_string())
        .await
        .unwrap();
    assert!(deleted);

    let users = UserRepository::new(db.clone()).find_all().await.unwrap();
    assert!(users.is_empty());
}
