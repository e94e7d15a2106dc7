//! ABI infrastructure - alloy-backed descriptor compilation and decoding

pub mod codec;
pub mod descriptor;
mod decoder;
mod log;
mod registry;

pub use codec::{compile, CompiledSchema, EventHandle, MethodHandle};
pub use decoder::{StructDecoder, StructDecoderBuilder};
pub use descriptor::{synthesize_event, synthesize_getter};
pub use log::{decode_log_into_map, CompiledEvent};
pub use registry::SchemaRegistry;
