//! Dynamic wire mapper
//!
//! Schema-driven translation between stored documents and wire payloads,
//! parameterized by an explicit field list. Fields not named in the list
//! are omitted entirely; declaring a field is how it becomes visible.
//!
//! The mapper performs type-shape translation only - uniqueness and
//! business rules are the validation engine's concern.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use super::error::{DomainError, DomainResult};
use super::fields::{EntitySchema, FieldKind};
use super::validate::ValidationReport;

/// Wire representation of a document: an ordered name -> value mapping.
pub type WireDoc = Map<String, Value>;

/// Render a record id value as a `table:key` string.
///
/// Handles the plain string form (API payloads, serde-serialized models)
/// as well as SurrealDB's native `{ tb, id }` form that comes back when a
/// query result is taken as raw JSON.
pub fn record_id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            if map.len() == 2 && map.contains_key("tb") && map.contains_key("id") {
                let table = map.get("tb")?.as_str()?;
                let key = match map.get("id")? {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Object(inner) => match inner.values().next()? {
                        Value::String(s) => s.clone(),
                        Value::Number(n) => n.to_string(),
                        _ => return None,
                    },
                    _ => return None,
                };
                Some(format!("{table}:{key}"))
            } else {
                // Expanded document: fall back to its own id field.
                map.get("id").and_then(record_id_string)
            }
        }
        _ => None,
    }
}

/// Read path: map a stored document to its wire representation.
///
/// Identifiers render as strings, datetimes and dates as ISO-8601,
/// references as nested mappings built by recursively applying `to_wire`
/// with the referenced entity's own declared field list, lists
/// element-wise. Names in `fields` that the schema does not declare are
/// skipped.
pub fn to_wire(doc: &Value, schema: &EntitySchema, fields: &[&str]) -> DomainResult<WireDoc> {
    let mut out = WireDoc::new();
    for name in fields {
        let Some(def) = schema.field(name) else {
            continue;
        };
        let value = doc.get(*name).unwrap_or(&Value::Null);
        out.insert((*name).to_string(), wire_value(def.name, value, &def.kind)?);
    }
    Ok(out)
}

/// Write path: coerce a wire payload into constructor arguments.
///
/// Inverse type-shape coercions only: ISO strings are validated, decimal
/// strings or numbers are parsed to canonical form, nested reference
/// mappings collapse to their id string. Unknown payload keys are
/// ignored; missing fields are omitted (required-ness is checked by the
/// validation engine). Shape failures across the whole payload are
/// collected into a single validation report.
pub fn from_wire(payload: &WireDoc, schema: &EntitySchema, fields: &[&str]) -> DomainResult<WireDoc> {
    let mut out = WireDoc::new();
    let mut report = ValidationReport::default();
    for name in fields {
        let Some(def) = schema.field(name) else {
            continue;
        };
        let Some(value) = payload.get(*name) else {
            continue;
        };
        match intake_value(def.name, value, &def.kind) {
            Ok(coerced) => {
                out.insert((*name).to_string(), coerced);
            }
            Err(DomainError::Validation(shape)) => report.extend(shape),
            Err(other) => return Err(other),
        }
    }
    report.into_result()?;
    Ok(out)
}

fn shape(field: &str, message: &str) -> DomainError {
    DomainError::field(field, message)
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn check_datetime(field: &str, value: &Value) -> DomainResult<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| shape(field, "expected an ISO-8601 datetime string"))?;
    DateTime::parse_from_rfc3339(s)
        .map_err(|_| shape(field, "expected an ISO-8601 datetime string"))?;
    Ok(Value::String(s.to_string()))
}

fn check_date(field: &str, value: &Value) -> DomainResult<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| shape(field, "expected a YYYY-MM-DD date string"))?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| shape(field, "expected a YYYY-MM-DD date string"))?;
    Ok(Value::String(s.to_string()))
}

fn is_record_id_object(map: &Map<String, Value>) -> bool {
    map.len() == 2 && map.contains_key("tb") && map.contains_key("id")
}

fn wire_value(field: &str, value: &Value, kind: &FieldKind) -> DomainResult<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match kind {
        FieldKind::Id => record_id_string(value)
            .map(Value::String)
            .ok_or_else(|| shape(field, "invalid record id")),
        FieldKind::String | FieldKind::Enum(_) => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| shape(field, "expected a string")),
        FieldKind::Integer => value
            .as_i64()
            .map(Value::from)
            .ok_or_else(|| shape(field, "expected an integer")),
        FieldKind::Decimal => parse_decimal(value)
            .map(|d| Value::String(d.to_string()))
            .ok_or_else(|| shape(field, "expected a decimal value")),
        FieldKind::Boolean => value
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| shape(field, "expected a boolean")),
        FieldKind::DateTime => check_datetime(field, value),
        FieldKind::Date => check_date(field, value),
        FieldKind::Reference(referenced) => match value {
            // An expanded document nests via the referenced entity's own
            // declared field list; an unexpanded link degrades to its id.
            Value::Object(map) if !is_record_id_object(map) => {
                let nested = referenced();
                to_wire(value, nested, nested.wire_fields).map(Value::Object)
            }
            other => record_id_string(other)
                .map(Value::String)
                .ok_or_else(|| shape(field, "invalid reference")),
        },
        FieldKind::List(inner) => {
            let items = value
                .as_array()
                .ok_or_else(|| shape(field, "expected a list"))?;
            let mapped = items
                .iter()
                .map(|item| wire_value(field, item, inner))
                .collect::<DomainResult<Vec<_>>>()?;
            Ok(Value::Array(mapped))
        }
    }
}

fn intake_value(field: &str, value: &Value, kind: &FieldKind) -> DomainResult<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match kind {
        // References collapse to their id string on the way in.
        FieldKind::Id | FieldKind::Reference(_) => record_id_string(value)
            .map(Value::String)
            .ok_or_else(|| shape(field, "invalid reference")),
        FieldKind::String | FieldKind::Enum(_) => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| shape(field, "expected a string")),
        FieldKind::Integer => value
            .as_i64()
            .map(Value::from)
            .ok_or_else(|| shape(field, "expected an integer")),
        FieldKind::Decimal => parse_decimal(value)
            .map(|d| Value::String(d.to_string()))
            .ok_or_else(|| shape(field, "expected a decimal value")),
        FieldKind::Boolean => value
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| shape(field, "expected a boolean")),
        FieldKind::DateTime => check_datetime(field, value),
        FieldKind::Date => check_date(field, value),
        FieldKind::List(inner) => {
            let items = value
                .as_array()
                .ok_or_else(|| shape(field, "expected a list"))?;
            let mapped = items
                .iter()
                .map(|item| intake_value(field, item, inner))
                .collect::<DomainResult<Vec<_>>>()?;
            Ok(Value::Array(mapped))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::FieldDef;
    use serde_json::json;

    static CHILD: EntitySchema = EntitySchema {
        table: "child",
        fields: &[
            FieldDef::new("id", FieldKind::Id),
            FieldDef::new("name", FieldKind::String).required(),
        ],
        wire_fields: &["id", "name"],
        unique_together: &[],
    };

    fn child_schema() -> &'static EntitySchema {
        &CHILD
    }

    static PARENT: EntitySchema = EntitySchema {
        table: "parent",
        fields: &[
            FieldDef::new("id", FieldKind::Id),
            FieldDef::new("label", FieldKind::String).required(),
            FieldDef::new("count", FieldKind::Integer),
            FieldDef::new("amount", FieldKind::Decimal),
            FieldDef::new("child", FieldKind::Reference(child_schema)),
            FieldDef::new("when", FieldKind::DateTime),
            FieldDef::new("tags", FieldKind::List(&FieldKind::String)),
        ],
        wire_fields: &["id", "label", "count", "amount", "child", "when", "tags"],
        unique_together: &[],
    };

    #[test]
    fn to_wire_only_emits_declared_fields() {
        let doc = json!({
            "id": "parent:one",
            "label": "a",
            "count": 3,
            "secret": "hidden",
        });
        let out = to_wire(&doc, &PARENT, &["label", "count"]).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["label"], json!("a"));
        assert_eq!(out["count"], json!(3));
        assert!(!out.contains_key("id"));
        assert!(!out.contains_key("secret"));
    }

    #[test]
    fn to_wire_renders_native_record_id_as_string() {
        let doc = json!({
            "id": { "tb": "parent", "id": { "String": "abc123" } },
            "label": "a",
        });
        let out = to_wire(&doc, &PARENT, &["id", "label"]).unwrap();
        assert_eq!(out["id"], json!("parent:abc123"));
    }

    #[test]
    fn to_wire_expands_fetched_reference_with_child_field_list() {
        let doc = json!({
            "label": "a",
            "child": {
                "id": "child:c1",
                "name": "nested",
                "not_declared": true,
            },
        });
        let out = to_wire(&doc, &PARENT, &["label", "child"]).unwrap();
        assert_eq!(out["child"], json!({ "id": "child:c1", "name": "nested" }));
    }

    #[test]
    fn to_wire_degrades_unexpanded_reference_to_id_string() {
        let doc = json!({ "label": "a", "child": "child:c1" });
        let out = to_wire(&doc, &PARENT, &["child"]).unwrap();
        assert_eq!(out["child"], json!("child:c1"));
    }

    #[test]
    fn from_wire_collapses_nested_reference_and_parses_decimal() {
        let payload = json!({
            "label": "a",
            "amount": 100.5,
            "child": { "id": "child:c1", "name": "nested" },
            "ignored": "whatever",
        });
        let args = from_wire(
            payload.as_object().unwrap(),
            &PARENT,
            &["label", "amount", "child"],
        )
        .unwrap();
        assert_eq!(args["child"], json!("child:c1"));
        assert_eq!(args["amount"], json!("100.5"));
        assert!(!args.contains_key("ignored"));
    }

    #[test]
    fn from_wire_collects_every_shape_violation() {
        let payload = json!({ "count": "three", "when": "not-a-date" });
        let err = from_wire(payload.as_object().unwrap(), &PARENT, &["count", "when"]);
        match err {
            Err(DomainError::Validation(report)) => {
                assert_eq!(report.violations().len(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_preserves_declared_fields() {
        let doc = json!({
            "id": "parent:one",
            "label": "a",
            "count": 7,
            "amount": "100.00",
            "when": "2026-01-05T10:30:00Z",
            "tags": ["x", "y"],
        });
        let fields = &["label", "count", "amount", "when", "tags"];
        let wire = to_wire(&doc, &PARENT, fields).unwrap();
        let back = from_wire(&wire, &PARENT, fields).unwrap();
        for name in fields {
            assert_eq!(back[*name], doc[*name], "field {name} changed in round trip");
        }
    }
}
