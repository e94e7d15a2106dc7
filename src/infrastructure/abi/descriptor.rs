//! Descriptor synthesis: schemas to JSON ABI fragments

use serde_json::{json, Value};

use crate::domain::schema::{EventSchema, StructSchema};
use crate::error::{Error, Result};

/// Build a zero-argument `pure` getter whose single output is the struct as a tuple
///
/// The tuple components mirror `schema.fields` in order; the codec maps
/// decoded values back to names by position.
pub fn synthesize_getter(schema: &StructSchema) -> Result<Value> {
    if schema.fields.is_empty() {
        return Err(Error::compile(schema.getter(), "struct has no fields"));
    }

    let components: Vec<Value> = schema
        .fields
        .iter()
        .map(|field| {
            json!({
                "internalType": field.kind,
                "name": field.name,
                "type": field.kind,
            })
        })
        .collect();

    Ok(json!({
        "inputs": [],
        "name": schema.getter(),
        "outputs": [{
            "components": components,
            "internalType": format!("struct {}", schema.name),
            "name": schema.name,
            "type": "tuple",
        }],
        "stateMutability": "pure",
        "type": "function",
    }))
}

/// Build an event fragment; inputs keep declaration order and `indexed` flags
pub fn synthesize_event(schema: &EventSchema) -> Value {
    let inputs: Vec<Value> = schema
        .arguments
        .iter()
        .map(|arg| {
            json!({
                "indexed": arg.indexed,
                "internalType": arg.kind,
                "name": arg.name,
                "type": arg.kind,
            })
        })
        .collect();

    json!({
        "anonymous": false,
        "inputs": inputs,
        "name": schema.name,
        "type": "event",
    })
}

/// Wrap fragments into a JSON ABI document
pub fn document(fragments: impl IntoIterator<Item = Value>) -> Value {
    Value::Array(fragments.into_iter().collect())
}
