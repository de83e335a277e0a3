//! Validation Engine
//!
//! Runs before every persist. Rules are driven by the same static
//! [`EntitySchema`] metadata the wire mapper uses, plus per-entity
//! business-rule hooks for cross-field checks. A single pass collects
//! every violation it finds instead of stopping at the first one; the
//! store's unique indexes remain the final arbiter, the lookups here
//! exist for a friendlier error.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::error::{DomainError, DomainResult};
use super::fields::{EntitySchema, FieldDef, FieldKind};
use super::wire::record_id_string;

/// A single validation violation.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Shape/format violation, recoverable by correcting the input.
    Field { field: String, message: String },
    /// Uniqueness violation, never retried automatically.
    NotUnique { field: String },
    /// Cross-field, temporal or immutability violation.
    BusinessRule { rule: String, message: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Field { field, message } => write!(f, "{field}: {message}"),
            Violation::NotUnique { field } => write!(f, "{field}: already exists"),
            Violation::BusinessRule { message, .. } => write!(f, "{message}"),
        }
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::Field {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn not_unique(&mut self, field: impl Into<String>) {
        self.violations.push(Violation::NotUnique {
            field: field.into(),
        });
    }

    pub fn business_rule(&mut self, rule: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::BusinessRule {
            rule: rule.into(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has_field_violation(&self, field: &str) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::Field { field: f, .. } if f == field))
    }

    pub fn has_not_unique(&self, field: &str) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::NotUnique { field: f } if f == field))
    }

    pub fn has_business_rule(&self, rule: &str) -> bool {
        self.violations
            .iter()
            .any(|v| matches!(v, Violation::BusinessRule { rule: r, .. } if r == rule))
    }

    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

/// Implemented by every persistable entity.
pub trait Validate: Serialize {
    fn schema() -> &'static EntitySchema
    where
        Self: Sized;

    fn record_id(&self) -> Option<&RecordId>;

    /// Cross-field/temporal checks that need typed access.
    fn business_rules(&self, _report: &mut ValidationReport) {}
}

/// Validate an entity against its declared schema and business rules.
///
/// `is_create` selects creation semantics; on update the engine also
/// compares fields marked immutable against the stored document.
/// Uniqueness lookups exclude the entity's own id.
pub async fn validate<T: Validate>(
    db: &Surreal<Db>,
    entity: &T,
    is_create: bool,
) -> DomainResult<()> {
    let schema = T::schema();
    let doc = serde_json::to_value(entity)
        .map_err(|e| DomainError::Database(format!("failed to serialize {}: {e}", schema.table)))?;
    let mut report = ValidationReport::default();

    check_fields(schema, &doc, &mut report);
    entity.business_rules(&mut report);
    if !is_create {
        check_immutable(db, schema, entity.record_id(), &doc, &mut report).await?;
    }
    check_unique(db, schema, entity.record_id(), &doc, &mut report).await?;

    report.into_result()
}

// Compiled patterns are cached per static source string.
static PATTERNS: LazyLock<Mutex<HashMap<&'static str, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn pattern(source: &'static str) -> Regex {
    let mut cache = PATTERNS.lock().expect("regex cache poisoned");
    cache
        .entry(source)
        .or_insert_with(|| Regex::new(source).expect("invalid schema regex"))
        .clone()
}

fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn check_fields(schema: &EntitySchema, doc: &Value, report: &mut ValidationReport) {
    for def in schema.fields {
        match doc.get(def.name) {
            None | Some(Value::Null) => {
                if def.required {
                    report.field(def.name, format!("{} is required", def.name));
                }
            }
            Some(value) => check_field_value(def, value, report),
        }
    }
}

fn check_field_value(def: &FieldDef, value: &Value, report: &mut ValidationReport) {
    match &def.kind {
        FieldKind::String | FieldKind::Enum(_) => {
            let Some(s) = value.as_str() else {
                report.field(def.name, "expected a string");
                return;
            };
            if def.required && s.trim().is_empty() {
                report.field(def.name, format!("{} must not be empty", def.name));
                return;
            }
            if let Some(max) = def.max_length
                && s.chars().count() > max
            {
                report.field(
                    def.name,
                    format!("{} is too long ({} chars, max {max})", def.name, s.chars().count()),
                );
            }
            if let Some(source) = def.regex
                && !pattern(source).is_match(s)
            {
                let message = def
                    .regex_message
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} has an invalid format", def.name));
                report.field(def.name, message);
            }
            if let FieldKind::Enum(values) = def.kind
                && !values.contains(&s)
            {
                report.field(
                    def.name,
                    format!("{} must be one of: {}", def.name, values.join(", ")),
                );
            }
        }
        FieldKind::Integer => {
            let Some(n) = value.as_i64() else {
                report.field(def.name, "expected an integer");
                return;
            };
            if let Some(min) = def.min_int
                && n < min
            {
                report.field(def.name, format!("{} must be at least {min}", def.name));
            }
        }
        FieldKind::Decimal => {
            let Some(d) = decimal_of(value) else {
                report.field(def.name, "expected a decimal value");
                return;
            };
            if let Some(min) = def.min_decimal {
                let min = Decimal::from_str(min).expect("invalid schema decimal");
                if d < min {
                    report.field(def.name, format!("{} must be at least {min}", def.name));
                }
            }
        }
        FieldKind::DateTime => {
            if value
                .as_str()
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                .is_none()
            {
                report.field(def.name, "expected an ISO-8601 datetime");
            }
        }
        FieldKind::Date => {
            if value
                .as_str()
                .and_then(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .is_none()
            {
                report.field(def.name, "expected a YYYY-MM-DD date");
            }
        }
        FieldKind::Reference(referenced) => {
            let table = referenced().table;
            match record_id_string(value).and_then(|s| s.parse::<RecordId>().ok()) {
                Some(id) if id.table() == table => {}
                _ => report.field(def.name, format!("must reference a {table} record")),
            }
        }
        FieldKind::List(inner) => {
            let Some(items) = value.as_array() else {
                report.field(def.name, "expected a list");
                return;
            };
            let element = FieldDef::new(def.name, **inner);
            for item in items {
                check_field_value(&element, item, report);
            }
        }
        FieldKind::Id | FieldKind::Boolean => {}
    }
}

fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

enum BindValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Record(RecordId),
}

fn bind_value(kind: &FieldKind, value: &Value) -> Option<BindValue> {
    match kind {
        FieldKind::Id | FieldKind::Reference(_) => record_id_string(value)
            .and_then(|s| s.parse::<RecordId>().ok())
            .map(BindValue::Record),
        FieldKind::Integer => value.as_i64().map(BindValue::Int),
        FieldKind::Boolean => value.as_bool().map(BindValue::Bool),
        _ => value.as_str().map(|s| BindValue::Str(s.to_string())),
    }
}

async fn find_conflicts(
    db: &Surreal<Db>,
    table: &str,
    bindings: Vec<(String, &FieldDef, &Value)>,
) -> DomainResult<Vec<RecordId>> {
    let predicate = bindings
        .iter()
        .map(|(key, def, _)| format!("{} = ${key}", def.name))
        .collect::<Vec<_>>()
        .join(" AND ");
    let sql = format!("SELECT VALUE id FROM {table} WHERE {predicate} LIMIT 2");

    let mut query = db.query(sql);
    for (key, def, value) in bindings {
        let Some(bound) = bind_value(&def.kind, value) else {
            return Ok(Vec::new());
        };
        query = match bound {
            BindValue::Str(s) => query.bind((key, s)),
            BindValue::Int(n) => query.bind((key, n)),
            BindValue::Bool(b) => query.bind((key, b)),
            BindValue::Record(id) => query.bind((key, id)),
        };
    }
    Ok(query.await?.take(0)?)
}

async fn check_unique(
    db: &Surreal<Db>,
    schema: &EntitySchema,
    own_id: Option<&RecordId>,
    doc: &Value,
    report: &mut ValidationReport,
) -> DomainResult<()> {
    for def in schema.fields.iter().filter(|d| d.unique) {
        let Some(value) = doc.get(def.name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let conflicts = find_conflicts(
            db,
            schema.table,
            vec![("value".to_string(), def, value)],
        )
        .await?;
        if conflicts.iter().any(|id| Some(id) != own_id) {
            report.not_unique(def.name);
        }
    }

    for group in schema.unique_together {
        let mut bindings = Vec::with_capacity(group.len());
        for (i, name) in group.iter().enumerate() {
            let Some(def) = schema.field(name) else {
                continue;
            };
            let value = doc.get(def.name);
            if is_missing(value) {
                bindings.clear();
                break;
            }
            let Some(value) = value else {
                continue;
            };
            bindings.push((format!("v{i}"), def, value));
        }
        if bindings.is_empty() {
            continue;
        }
        let conflicts = find_conflicts(db, schema.table, bindings).await?;
        if conflicts.iter().any(|id| Some(id) != own_id) {
            report.not_unique(format!("({})", group.join(", ")));
        }
    }

    Ok(())
}

async fn check_immutable(
    db: &Surreal<Db>,
    schema: &EntitySchema,
    own_id: Option<&RecordId>,
    doc: &Value,
    report: &mut ValidationReport,
) -> DomainResult<()> {
    if !schema.fields.iter().any(|d| d.immutable) {
        return Ok(());
    }
    let Some(id) = own_id else {
        return Ok(());
    };
    let stored: Option<Value> = db.select(id.clone()).await?;
    let Some(stored) = stored else {
        return Ok(());
    };

    for def in schema.fields.iter().filter(|d| d.immutable) {
        let incoming = normalized(&def.kind, doc.get(def.name));
        let current = normalized(&def.kind, stored.get(def.name));
        if incoming != current {
            report.business_rule(
                "immutable_field",
                format!("{} {} cannot be modified", schema.table, def.name),
            );
        }
    }
    Ok(())
}

fn normalized(kind: &FieldKind, value: Option<&Value>) -> Option<Value> {
    let value = value?;
    if value.is_null() {
        return None;
    }
    match kind {
        FieldKind::Id | FieldKind::Reference(_) => record_id_string(value).map(Value::String),
        _ => Some(value.clone()),
    }
}
