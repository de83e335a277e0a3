//! Payroll Model
//!
//! Monetary fields use `Decimal` with 2-decimal half-up rounding; the
//! derived salaries are computed from the stored components, never
//! persisted.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use surrealdb::RecordId;

use super::serde_helpers;
use super::employee;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::{EntitySchema, FieldDef, FieldKind};
use crate::domain::validate::{Validate, ValidationReport};

/// Rounding precision for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Gross salary is the daily base rate over a 30-day month.
const GROSS_SALARY_DAYS: i64 = 30;

/// Round a monetary value to storage precision.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Storage schema. `gross_salary` and `net_salary` are derived fields:
/// they appear here so the wire field list can expose them, and are
/// spliced into read documents by [`Payroll::splice_computed`].
pub static SCHEMA: EntitySchema = EntitySchema {
    table: "payroll",
    fields: &[
        FieldDef::new("id", FieldKind::Id),
        FieldDef::new("employee", FieldKind::Reference(employee::schema))
            .required()
            .unique(),
        FieldDef::new("base_salary", FieldKind::Decimal)
            .required()
            .min_decimal("0.00"),
        FieldDef::new("insurance", FieldKind::Decimal)
            .required()
            .min_decimal("0.00"),
        FieldDef::new("tax", FieldKind::Decimal)
            .required()
            .min_decimal("0.00"),
        FieldDef::new("gross_salary", FieldKind::Decimal),
        FieldDef::new("net_salary", FieldKind::Decimal),
        FieldDef::new("created_at", FieldKind::DateTime),
        FieldDef::new("updated_at", FieldKind::DateTime),
    ],
    wire_fields: &[
        "id",
        "employee",
        "base_salary",
        "gross_salary",
        "insurance",
        "tax",
        "net_salary",
        "created_at",
        "updated_at",
    ],
    unique_together: &[],
};

/// Input field schema accepted by the create endpoint. `employee_id` is
/// the employee's employment id, resolved by the creation service.
pub static INPUT: EntitySchema = EntitySchema {
    table: "payroll",
    fields: &[
        FieldDef::new("employee_id", FieldKind::Integer),
        FieldDef::new("base_salary", FieldKind::Decimal),
        FieldDef::new("insurance", FieldKind::Decimal),
        FieldDef::new("tax", FieldKind::Decimal),
    ],
    wire_fields: &["employee_id", "base_salary", "insurance", "tax"],
    unique_together: &[],
};

pub fn schema() -> &'static EntitySchema {
    &SCHEMA
}

/// Payroll model matching the `payroll` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payroll {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    pub base_salary: Decimal,
    pub insurance: Decimal,
    pub tax: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payroll payload; `employee_id` is the employment id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCreate {
    pub employee_id: i64,
    pub base_salary: Decimal,
    #[serde(default)]
    pub insurance: Option<Decimal>,
    #[serde(default)]
    pub tax: Option<Decimal>,
}

impl Payroll {
    /// Gross salary over a 30-day month.
    pub fn gross_salary(&self) -> Decimal {
        round_money(self.base_salary * Decimal::from(GROSS_SALARY_DAYS))
    }

    /// Net salary after insurance and tax.
    pub fn net_salary(&self) -> Decimal {
        round_money(self.gross_salary() - self.insurance - self.tax)
    }

    /// Splice the derived salary fields into a read document before it
    /// goes through the wire mapper.
    pub fn splice_computed(doc: &mut Value) -> DomainResult<()> {
        let base = field_decimal(doc, "base_salary")?;
        let insurance = field_decimal(doc, "insurance")?;
        let tax = field_decimal(doc, "tax")?;

        let gross = round_money(base * Decimal::from(GROSS_SALARY_DAYS));
        let net = round_money(gross - insurance - tax);

        let Some(map) = doc.as_object_mut() else {
            return Err(DomainError::field("payroll", "expected a document"));
        };
        map.insert("gross_salary".to_string(), Value::String(gross.to_string()));
        map.insert("net_salary".to_string(), Value::String(net.to_string()));
        Ok(())
    }
}

fn field_decimal(doc: &Value, field: &str) -> DomainResult<Decimal> {
    let value = doc
        .get(field)
        .ok_or_else(|| DomainError::field(field, "missing monetary field"))?;
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| DomainError::field(field, "expected a decimal value"))
}

impl Validate for Payroll {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn business_rules(&self, report: &mut ValidationReport) {
        if self.net_salary() < Decimal::ZERO {
            report.business_rule("net_salary", "Net salary cannot be negative");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn payroll(base: &str, insurance: &str, tax: &str) -> Payroll {
        Payroll {
            id: None,
            employee: "employee:e1".parse().unwrap(),
            base_salary: Decimal::from_str(base).unwrap(),
            insurance: Decimal::from_str(insurance).unwrap(),
            tax: Decimal::from_str(tax).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn gross_is_thirty_times_base() {
        let p = payroll("100.00", "500.00", "1500.00");
        assert_eq!(p.gross_salary(), Decimal::from_str("3000.00").unwrap());
        assert_eq!(p.net_salary(), Decimal::from_str("1000.00").unwrap());
    }

    #[test]
    fn negative_net_is_a_business_rule_violation() {
        let p = payroll("10.00", "200.00", "200.00");
        assert!(p.net_salary() < Decimal::ZERO);
        let mut report = ValidationReport::default();
        p.business_rules(&mut report);
        assert!(report.has_business_rule("net_salary"));
    }

    #[test]
    fn splice_computed_adds_derived_fields() {
        let mut doc = serde_json::json!({
            "base_salary": "100.00",
            "insurance": "500.00",
            "tax": "1500.00",
        });
        Payroll::splice_computed(&mut doc).unwrap();
        assert_eq!(doc["gross_salary"], "3000.00");
        assert_eq!(doc["net_salary"], "1000.00");
    }
}
