//! Shared test fixtures: in-memory store and a recording notifier.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use hr_server::db::models::{DepartmentCreate, PositionCreate};
use hr_server::db::schema;
use hr_server::services::employee::EmployeeCreate;
use hr_server::services::{CredentialNotifier, Credentials};

/// Fresh in-memory store with the schema declared.
pub async fn mem_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.expect("open memory store");
    db.use_ns("test").use_db("test").await.expect("select ns/db");
    schema::define(&db).await.expect("define schema");
    db
}

/// Notifier that records every delivery instead of sending anything.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, Credentials)>>,
}

#[async_trait]
impl CredentialNotifier for RecordingNotifier {
    async fn send_credentials(
        &self,
        email: &str,
        credentials: &Credentials,
    ) -> anyhow::Result<()> {
        self.sent
            .lock()
            .expect("notifier lock")
            .push((email.to_string(), credentials.clone()));
        Ok(())
    }
}

pub fn department_input(code: &str, name: &str) -> DepartmentCreate {
    DepartmentCreate {
        code: code.to_string(),
        name: name.to_string(),
    }
}

pub fn position_input(title: &str, department_code: &str) -> PositionCreate {
    PositionCreate {
        title: title.to_string(),
        department: department_code.to_string(),
        description: None,
        is_active: None,
    }
}

pub fn employee_input(email: &str, phone: &str, position: Option<String>) -> EmployeeCreate {
    EmployeeCreate {
        email: email.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        position,
        employment_start_date: Utc::now(),
        employment_end_date: None,
        phone: phone.to_string(),
        birthdate: NaiveDate::from_ymd_opt(1990, 1, 15).expect("valid date"),
        father_name: Some("Byron".to_string()),
        child_number: Some(0),
    }
}
