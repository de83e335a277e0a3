//! Shared handler conversions
//!
//! Bridges between the wire mapper and the HTTP layer: every response
//! body goes through `to_wire` with the entity's declared field list,
//! every create payload through `from_wire` with the input field list.

use serde::Serialize;
use serde_json::Value;

use crate::domain::fields::EntitySchema;
use crate::domain::wire::{self, WireDoc};
use crate::utils::{AppError, AppResult};

/// Map raw store documents to wire form.
pub fn wire_docs(docs: &[Value], schema: &EntitySchema) -> AppResult<Vec<WireDoc>> {
    docs.iter()
        .map(|doc| wire::to_wire(doc, schema, schema.wire_fields).map_err(AppError::from))
        .collect()
}

/// Map a typed entity to wire form.
pub fn wire_entity<T: Serialize>(entity: &T, schema: &EntitySchema) -> AppResult<WireDoc> {
    let doc = serde_json::to_value(entity)
        .map_err(|e| AppError::internal(format!("serialize {}: {e}", schema.table)))?;
    wire::to_wire(&doc, schema, schema.wire_fields).map_err(AppError::from)
}

/// Coerce a create payload through the input field list, returning the
/// constructor-argument object for the typed input struct.
pub fn input_args(payload: &Value, input: &EntitySchema) -> AppResult<Value> {
    let object = payload
        .as_object()
        .ok_or_else(|| AppError::validation("expected a JSON object"))?;
    let args = wire::from_wire(object, input, input.wire_fields)?;
    Ok(Value::Object(args))
}
