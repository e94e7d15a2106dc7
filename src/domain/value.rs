//! Decoded values keyed by field or argument name

use std::collections::BTreeMap;

use alloy_primitives::{Address, I256, U256};
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Decoded values by name
pub type DecodedMap = BTreeMap<String, DecodedValue>;

/// A single decoded ABI value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Bool(bool),
    Int(I256),
    Uint(U256),
    Address(Address),
    /// `bytesN`, also used for hashed reference-type topics
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    /// Fixed or dynamic array
    Array(Vec<DecodedValue>),
    /// Tuple without component names
    Tuple(Vec<DecodedValue>),
    /// Tuple with named components
    Struct(DecodedMap),
}

impl DecodedValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DecodedValue]> {
        match self {
            Self::Array(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&DecodedMap> {
        match self {
            Self::Struct(map) => Some(map),
            _ => None,
        }
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => match i64::try_from(*i) {
                Ok(small) => serializer.serialize_i64(small),
                Err(_) => {
                    let sign = if i.is_negative() { "-" } else { "" };
                    serializer.serialize_str(&format!("{}0x{:x}", sign, i.unsigned_abs()))
                }
            },
            Self::Uint(u) => match u64::try_from(*u) {
                Ok(small) => serializer.serialize_u64(small),
                Err(_) => serializer.serialize_str(&format!("0x{:x}", u)),
            },
            Self::Address(addr) => serializer.serialize_str(&addr.to_checksum(None)),
            Self::FixedBytes(bytes) | Self::Bytes(bytes) => {
                serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
            }
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) | Self::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Struct(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Project a decoded value onto a caller-defined type by field name
///
/// Addresses arrive as checksummed hex strings, integers up to 64 bits as
/// JSON numbers and wider integers as `0x` hex strings (`-0x` when negative),
/// so targets can use `String`, `Address`, `u64` or `U256` fields.
pub fn project<T: DeserializeOwned>(value: &DecodedValue) -> Result<T, serde_json::Error> {
    let json = serde_json::to_value(value)?;
    serde_json::from_value(json)
}
