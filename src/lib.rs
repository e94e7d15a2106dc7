//! Decode Ethereum getter return data and event logs from a small schema DSL
//!
//! A struct definition such as
//!
//! ```text
//! struct Task {
//!     string title;
//!     address reporter;
//!     uint256[2] deadline;
//! }
//! ```
//!
//! compiles into a [`StructDecoder`] for the tuple returned by a getter, and an
//! event signature such as `event Transfer(address indexed from, address indexed
//! to, uint256 value)` decodes logs via [`decode_log_into_map`].

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::schema::{
    parse_event_signature, parse_struct_def, EventArg, EventSchema, FieldSpec, StructSchema,
};
pub use domain::value::{DecodedMap, DecodedValue};
pub use error::{Error, ParseError, Result};
pub use infrastructure::abi::{
    decode_log_into_map, CompiledEvent, SchemaRegistry, StructDecoder, StructDecoderBuilder,
};
