//! Codec binding over alloy-json-abi / alloy-dyn-abi
//!
//! A JSON ABI document is compiled once: every function output and event
//! input is resolved to a [`DynSolType`] up front, so a bad type string
//! fails at compile time rather than on first decode.

use std::collections::HashMap;

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Event, EventParam, Function, JsonAbi, Param};
use alloy_primitives::B256;
use serde_json::Value;

use crate::domain::value::{DecodedMap, DecodedValue};
use crate::error::{Error, Result};

/// A compiled JSON ABI document
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    methods: HashMap<String, MethodHandle>,
    events: HashMap<String, EventHandle>,
}

/// A function whose outputs can be decoded
#[derive(Debug, Clone)]
pub struct MethodHandle {
    function: Function,
    outputs: Vec<DynSolType>,
}

/// An event with its indexed and data types split out
#[derive(Debug, Clone)]
pub struct EventHandle {
    selector: B256,
    indexed: Vec<(EventParam, DynSolType)>,
    body: Vec<(EventParam, DynSolType)>,
}

/// Compile a JSON ABI document (an array of function/event fragments)
pub fn compile(document: Value) -> Result<CompiledSchema> {
    let text = document.to_string();
    let abi: JsonAbi =
        serde_json::from_str(&text).map_err(|e| Error::compile("schema document", e))?;

    let mut schema = CompiledSchema::default();
    for function in abi.functions() {
        let outputs = function
            .outputs
            .iter()
            .map(|param| resolve(&function.name, param))
            .collect::<Result<Vec<_>>>()?;
        schema.methods.entry(function.name.clone()).or_insert(MethodHandle {
            function: function.clone(),
            outputs,
        });
    }
    for event in abi.events() {
        let handle = EventHandle::new(event)?;
        schema.events.entry(event.name.clone()).or_insert(handle);
    }

    tracing::trace!(
        methods = schema.methods.len(),
        events = schema.events.len(),
        "compiled schema document"
    );
    Ok(schema)
}

impl CompiledSchema {
    pub fn get_method(&self, name: &str) -> Option<&MethodHandle> {
        self.methods.get(name)
    }

    pub fn take_event(&mut self, name: &str) -> Option<EventHandle> {
        self.events.remove(name)
    }
}

impl MethodHandle {
    /// Decode return data into a map keyed by output name
    pub fn decode(&self, data: &[u8]) -> Result<DecodedMap> {
        let decoded = DynSolType::Tuple(self.outputs.clone())
            .abi_decode_sequence(data)
            .map_err(Error::codec("decode method output"))?;

        let values = match decoded {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        };

        Ok(self
            .function
            .outputs
            .iter()
            .zip(values)
            .enumerate()
            .map(|(idx, (param, value))| {
                (param_name(&param.name, idx), to_decoded(value, &param.components))
            })
            .collect())
    }
}

impl EventHandle {
    fn new(event: &Event) -> Result<Self> {
        let mut indexed = Vec::new();
        let mut body = Vec::new();
        for param in &event.inputs {
            let ty: DynSolType = param
                .resolve()
                .map_err(|e| Error::compile(format!("event {}", event.name), e))?;
            if param.indexed {
                indexed.push((param.clone(), ty));
            } else {
                body.push((param.clone(), ty));
            }
        }

        Ok(Self {
            selector: event.selector(),
            indexed,
            body,
        })
    }

    /// keccak-256 of the canonical signature, matched against `topics[0]`
    pub fn identifying_hash(&self) -> B256 {
        self.selector
    }

    /// Decode log data against the non-indexed arguments
    pub fn unpack_data_into_map(&self, data: &[u8], out: &mut DecodedMap) -> Result<()> {
        if self.body.is_empty() {
            return Ok(());
        }

        let types = self.body.iter().map(|(_, ty)| ty.clone()).collect();
        let decoded = DynSolType::Tuple(types)
            .abi_decode_sequence(data)
            .map_err(Error::codec("unpack data"))?;

        let values = match decoded {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        };
        for (idx, ((param, _), value)) in self.body.iter().zip(values).enumerate() {
            out.insert(param_name(&param.name, idx), to_decoded(value, &param.components));
        }
        Ok(())
    }

    /// Decode topics after the identifying hash against the indexed arguments
    ///
    /// Reference types (strings, bytes, arrays, tuples) are stored as their
    /// keccak-256 hash, so they come back as raw 32-byte words.
    pub fn parse_topics_into_map(&self, topics: &[B256], out: &mut DecodedMap) -> Result<()> {
        if topics.len() != self.indexed.len() {
            return Err(Error::TopicCountMismatch {
                expected: self.indexed.len(),
                found: topics.len(),
            });
        }

        for (idx, ((param, ty), topic)) in self.indexed.iter().zip(topics).enumerate() {
            let value = decode_topic(ty, *topic)?;
            out.insert(param_name(&param.name, idx), to_decoded(value, &param.components));
        }
        Ok(())
    }
}

fn resolve(owner: &str, param: &Param) -> Result<DynSolType> {
    param
        .resolve()
        .map_err(|e| Error::compile(format!("{} output {}", owner, param.name), e))
}

fn decode_topic(ty: &DynSolType, topic: B256) -> Result<DynSolValue> {
    match ty {
        DynSolType::Bool
        | DynSolType::Int(_)
        | DynSolType::Uint(_)
        | DynSolType::FixedBytes(_)
        | DynSolType::Address
        | DynSolType::Function => ty
            .abi_decode(topic.as_slice())
            .map_err(Error::codec("parse topics")),
        _ => Ok(DynSolValue::FixedBytes(topic, 32)),
    }
}

fn param_name(name: &str, idx: usize) -> String {
    if name.trim().is_empty() {
        format!("arg{}", idx)
    } else {
        name.to_string()
    }
}

/// Convert a codec value, naming tuple members from `components`
fn to_decoded(value: DynSolValue, components: &[Param]) -> DecodedValue {
    match value {
        DynSolValue::Bool(b) => DecodedValue::Bool(b),
        DynSolValue::Int(i, _) => DecodedValue::Int(i),
        DynSolValue::Uint(u, _) => DecodedValue::Uint(u),
        DynSolValue::FixedBytes(word, size) => {
            DecodedValue::FixedBytes(word.as_slice()[..size.min(32)].to_vec())
        }
        DynSolValue::Address(addr) => DecodedValue::Address(addr),
        DynSolValue::Function(func) => DecodedValue::FixedBytes(func.as_slice().to_vec()),
        DynSolValue::Bytes(bytes) => DecodedValue::Bytes(bytes),
        DynSolValue::String(s) => DecodedValue::String(s),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => DecodedValue::Array(
            items
                .into_iter()
                .map(|item| to_decoded(item, components))
                .collect(),
        ),
        DynSolValue::Tuple(items) if !components.is_empty() && components.len() == items.len() => {
            DecodedValue::Struct(
                components
                    .iter()
                    .zip(items)
                    .enumerate()
                    .map(|(idx, (param, item))| {
                        (param_name(&param.name, idx), to_decoded(item, &param.components))
                    })
                    .collect(),
            )
        }
        DynSolValue::Tuple(items) => DecodedValue::Tuple(
            items
                .into_iter()
                .map(|item| to_decoded(item, &[]))
                .collect(),
        ),
    }
}
