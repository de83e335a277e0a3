//! Position creation, pair uniqueness and immutability tests

mod common;

use common::{department_input, mem_db, position_input};
use hr_server::db::models::PositionUpdate;
use hr_server::domain::DomainError;
use hr_server::services;

#[tokio::test]
async fn create_position_resolves_department_by_code() {
    let db = mem_db().await;

    services::department::create_department(&db, department_input("HR-001", "Human Resources"))
        .await
        .unwrap();
    let position = services::position::create_position(&db, position_input("Recruiter", "HR-001"))
        .await
        .unwrap();

    assert_eq!(position.title, "Recruiter");
    assert_eq!(position.department.table(), "department");
    assert!(position.is_active);
}

#[tokio::test]
async fn unknown_department_code_is_not_found() {
    let db = mem_db().await;

    let err = services::position::create_position(&db, position_input("Recruiter", "NOPE"))
        .await
        .unwrap_err();

    match err {
        DomainError::NotFound { entity, key } => {
            assert_eq!(entity, "department");
            assert_eq!(key, "NOPE");
        }
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_title_in_same_department_is_rejected() {
    let db = mem_db().await;

    services::department::create_department(&db, department_input("HR-001", "Human Resources"))
        .await
        .unwrap();
    services::position::create_position(&db, position_input("Recruiter", "HR-001"))
        .await
        .unwrap();
    let err = services::position::create_position(&db, position_input("Recruiter", "HR-001"))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(report) => {
            assert!(report.has_not_unique("(title, department)"));
        }
        other => panic!("expected uniqueness error, got {other:?}"),
    }
}

#[tokio::test]
async fn same_title_in_another_department_is_allowed() {
    let db = mem_db().await;

    services::department::create_department(&db, department_input("HR-001", "Human Resources"))
        .await
        .unwrap();
    services::department::create_department(&db, department_input("ENG-001", "Engineering"))
        .await
        .unwrap();

    services::position::create_position(&db, position_input("Manager", "HR-001"))
        .await
        .unwrap();
    services::position::create_position(&db, position_input("Manager", "ENG-001"))
        .await
        .unwrap();
}

#[tokio::test]
async fn department_is_immutable_after_persist() {
    let db = mem_db().await;

    services::department::create_department(&db, department_input("HR-001", "Human Resources"))
        .await
        .unwrap();
    services::department::create_department(&db, department_input("ENG-001", "Engineering"))
        .await
        .unwrap();
    let position = services::position::create_position(&db, position_input("Recruiter", "HR-001"))
        .await
        .unwrap();
    let id = position.id.unwrap().to_string();

    let err = services::position::update_position(
        &db,
        &id,
        PositionUpdate {
            department: Some("ENG-001".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    match err {
        DomainError::Validation(report) => {
            assert!(report.has_business_rule("immutable_field"));
            assert!(report.to_string().contains("department cannot be modified"));
        }
        other => panic!("expected immutability error, got {other:?}"),
    }
}

#[tokio::test]
async fn other_fields_stay_mutable() {
    let db = mem_db().await;

    services::department::create_department(&db, department_input("HR-001", "Human Resources"))
        .await
        .unwrap();
    let position = services::position::create_position(&db, position_input("Recruiter", "HR-001"))
        .await
        .unwrap();
    let id = position.id.unwrap().to_string();

    let updated = services::position::update_position(
        &db,
        &id,
        PositionUpdate {
            title: Some("Senior Recruiter".to_string()),
            description: Some("Handles senior hires".to_string()),
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "Senior Recruiter");
    assert_eq!(updated.description.as_deref(), Some("Handles senior hires"));
    assert!(!updated.is_active);
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn keeping_the_same_department_on_update_is_allowed() {
    let db = mem_db().await;

    services::department::create_department(&db, department_input("HR-001", "Human Resources"))
        .await
        .unwrap();
    let position = services::position::create_position(&db, position_input("Recruiter", "HR-001"))
        .await
        .unwrap();
    let id = position.id.unwrap().to_string();

    services::position::update_position(
        &db,
        &id,
        PositionUpdate {
            department: Some("HR-001".to_string()),
            title: Some("Lead Recruiter".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}
