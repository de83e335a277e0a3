//! Payroll creation, derived salary arithmetic and uniqueness tests

mod common;

use std::str::FromStr;

use common::{employee_input, mem_db, RecordingNotifier};
use hr_server::db::models::PayrollCreate;
use hr_server::db::repository::PayrollRepository;
use hr_server::domain::DomainError;
use hr_server::services;
use rust_decimal::Decimal;

async fn employee_with_id(db: &surrealdb::Surreal<surrealdb::engine::local::Db>) -> i64 {
    let notifier = RecordingNotifier::default();
    services::employee::create_employee(
        db,
        &notifier,
        employee_input("ada@example.com", "+14155550100", None),
    )
    .await
    .unwrap()
    .employment_id
}

fn payroll_input(employee_id: i64, base: &str) -> PayrollCreate {
    PayrollCreate {
        employee_id,
        base_salary: Decimal::from_str(base).unwrap(),
        insurance: None,
        tax: None,
    }
}

#[tokio::test]
async fn derived_salaries_follow_the_monthly_formula() {
    let db = mem_db().await;
    let employee_id = employee_with_id(&db).await;

    let payroll = services::payroll::create_payroll(&db, payroll_input(employee_id, "100.00"))
        .await
        .unwrap();

    // Defaults: insurance 500.00, tax 1500.00.
    assert_eq!(payroll.insurance, Decimal::from_str("500.00").unwrap());
    assert_eq!(payroll.tax, Decimal::from_str("1500.00").unwrap());
    assert_eq!(payroll.gross_salary(), Decimal::from_str("3000.00").unwrap());
    assert_eq!(payroll.net_salary(), Decimal::from_str("1000.00").unwrap());
}

#[tokio::test]
async fn negative_net_salary_fails_before_persist() {
    let db = mem_db().await;
    let employee_id = employee_with_id(&db).await;

    let err = services::payroll::create_payroll(&db, payroll_input(employee_id, "50.00"))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(report) => assert!(report.has_business_rule("net_salary")),
        other => panic!("expected business rule error, got {other:?}"),
    }

    let payrolls = PayrollRepository::new(db.clone()).find_all().await.unwrap();
    assert!(payrolls.is_empty());
}

#[tokio::test]
async fn negative_base_salary_is_a_field_violation() {
    let db = mem_db().await;
    let employee_id = employee_with_id(&db).await;

    let err = services::payroll::create_payroll(&db, payroll_input(employee_id, "-1.00"))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(report) => assert!(report.has_field_violation("base_salary")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn one_payroll_per_employee() {
    let db = mem_db().await;
    let employee_id = employee_with_id(&db).await;

    services::payroll::create_payroll(&db, payroll_input(employee_id, "100.00"))
        .await
        .unwrap();
    let err = services::payroll::create_payroll(&db, payroll_input(employee_id, "120.00"))
        .await
        .unwrap_err();

    match err {
        DomainError::Validation(report) => assert!(report.has_not_unique("employee")),
        other => panic!("expected uniqueness error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_employment_id_is_not_found() {
    let db = mem_db().await;

    let err = services::payroll::create_payroll(&db, payroll_input(9999, "100.00"))
        .await
        .unwrap_err();

    match err {
        DomainError::NotFound { entity, key } => {
            assert_eq!(entity, "employee");
            assert_eq!(key, "9999");
        }
        other => panic!("expected not-found error, got {other:?}"),
    }
}

#[tokio::test]
async fn explicit_deductions_override_the_defaults() {
    let db = mem_db().await;
    let employee_id = employee_with_id(&db).await;

    let payroll = services::payroll::create_payroll(
        &db,
        PayrollCreate {
            employee_id,
            base_salary: Decimal::from_str("100.00").unwrap(),
            insurance: Some(Decimal::from_str("250.505").unwrap()),
            tax: Some(Decimal::from_str("100").unwrap()),
        },
    )
    .await
    .unwrap();

    // Inputs round to 2 decimal places, half-up.
    assert_eq!(payroll.insurance, Decimal::from_str("250.51").unwrap());
    assert_eq!(payroll.tax, Decimal::from_str("100").unwrap());
    assert_eq!(payroll.net_salary(), Decimal::from_str("2649.49").unwrap());
}
