//! Domain models: schema DSLs and decoded values
//!
//! Nothing here touches the ABI codec; see `infrastructure::abi` for that.

pub mod schema;
pub mod value;

pub use schema::{
    parse_event_signature, parse_struct_def, EventArg, EventSchema, FieldSpec, StructSchema,
};
pub use value::{project, DecodedMap, DecodedValue};
