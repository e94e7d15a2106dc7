//! Error types for schema parsing, compilation and decoding

use alloy_primitives::B256;
use thiserror::Error;

/// Malformed struct-definition or event-signature text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `struct <Name>` header was found
    #[error("invalid format: missing `struct <Name>` header")]
    InvalidFormat,

    /// The header was found but no field line matched `<type> <name>`
    #[error("no fields found in struct definition")]
    NoFields,

    /// Event signature without a well-formed `( ... )` argument list
    #[error("malformed event signature: {0}")]
    MalformedSignature(String),

    /// Event name before `(` is empty or not an identifier
    #[error("invalid event name: {0:?}")]
    InvalidEventName(String),
}

/// Errors returned by decoders, compiled events and the schema registry
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The synthesized descriptor was rejected by the codec
    #[error("failed to compile {what}: {reason}")]
    Compile { what: String, reason: String },

    /// Decode attempted on a decoder built without a struct definition
    #[error("decoder not initialized: no struct definition configured")]
    NotInitialized,

    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("struct not found in decoded result: {0}")]
    StructNotFound(String),

    /// `topics[0]` does not match the event's identifying hash
    #[error("event id mismatch: expected {expected}, got {}", describe_topic(.found))]
    EventIdMismatch { expected: B256, found: Option<B256> },

    #[error("topic count mismatch: {expected} indexed arguments, {found} topics")]
    TopicCountMismatch { expected: usize, found: usize },

    #[error("no registered struct named {0}")]
    UnknownStruct(String),

    #[error("no registered event for topic {0}")]
    UnknownEvent(B256),

    /// Log without `topics[0]`, so no event can be selected for it
    #[error("log has no topics")]
    MissingTopics,

    /// Failure surfaced by the ABI codec, tagged with the failing operation
    #[error("{op}: {source}")]
    Codec {
        op: &'static str,
        #[source]
        source: alloy_dyn_abi::Error,
    },

    #[error("failed to project decoded struct: {0}")]
    Projection(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn codec(op: &'static str) -> impl FnOnce(alloy_dyn_abi::Error) -> Self {
        move |source| Self::Codec { op, source }
    }

    pub(crate) fn compile(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::Compile {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

fn describe_topic(found: &Option<B256>) -> String {
    found.map_or_else(|| "no topics".to_string(), |topic| topic.to_string())
}

pub type Result<T> = std::result::Result<T, Error>;
