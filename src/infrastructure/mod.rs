//! Infrastructure layer - codec integrations
//!
//! This layer contains the alloy-json-abi / alloy-dyn-abi binding used to
//! compile synthesized descriptors and decode return data and logs.

pub mod abi;

pub use abi::{decode_log_into_map, CompiledEvent, SchemaRegistry, StructDecoder};
