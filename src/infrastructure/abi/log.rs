//! Event log decoding: topics and data into one named map

use alloy_primitives::{B256, LogData};

use super::codec::{self, EventHandle};
use super::descriptor::{document, synthesize_event};
use crate::domain::schema::EventSchema;
use crate::domain::value::DecodedMap;
use crate::error::{Error, Result};

/// An event schema compiled for repeated log decoding
#[derive(Debug, Clone)]
pub struct CompiledEvent {
    schema: EventSchema,
    handle: EventHandle,
}

impl CompiledEvent {
    pub fn compile(schema: &EventSchema) -> Result<Self> {
        let mut compiled = codec::compile(document([synthesize_event(schema)]))?;
        let handle = compiled.take_event(&schema.name).ok_or_else(|| {
            Error::compile(
                format!("event {}", schema.name),
                "event missing from compiled document",
            )
        })?;

        Ok(Self {
            schema: schema.clone(),
            handle,
        })
    }

    pub fn schema(&self) -> &EventSchema {
        &self.schema
    }

    /// Expected value of `topics[0]`
    pub fn identifying_hash(&self) -> B256 {
        self.handle.identifying_hash()
    }

    /// Decode indexed arguments from `topics[1..]` and the rest from `data`
    pub fn decode_log(&self, log: &LogData) -> Result<DecodedMap> {
        let topics = log.topics();
        let expected = self.identifying_hash();
        match topics.first() {
            Some(first) if *first == expected => {}
            found => {
                return Err(Error::EventIdMismatch {
                    expected,
                    found: found.copied(),
                })
            }
        }

        let mut out = DecodedMap::new();
        if !log.data.is_empty() {
            self.handle.unpack_data_into_map(&log.data, &mut out)?;
        }
        self.handle.parse_topics_into_map(&topics[1..], &mut out)?;

        tracing::trace!(
            event = %self.schema.name,
            params = out.len(),
            "decoded log"
        );
        Ok(out)
    }
}

/// Compile `schema` and decode `log` against it
pub fn decode_log_into_map(schema: &EventSchema, log: &LogData) -> Result<DecodedMap> {
    CompiledEvent::compile(schema)?.decode_log(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::parse_event_signature;
    use crate::domain::value::DecodedValue;
    use alloy_primitives::{b256, Bytes, U256};

    const TRANSFER_TOPIC: B256 =
        b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

    fn transfer() -> CompiledEvent {
        let schema = parse_event_signature(
            "Transfer(address indexed from, address indexed to, uint256 value)",
        )
        .unwrap();
        CompiledEvent::compile(&schema).unwrap()
    }

    fn address_topic(byte: u8) -> B256 {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&[byte; 20]);
        B256::from(word)
    }

    #[test]
    fn test_identifying_hash() {
        assert_eq!(transfer().identifying_hash(), TRANSFER_TOPIC);
    }

    #[test]
    fn test_no_topics_is_mismatch() {
        let log = LogData::new_unchecked(vec![], Bytes::new());
        assert!(matches!(
            transfer().decode_log(&log),
            Err(Error::EventIdMismatch { found: None, .. })
        ));
    }

    #[test]
    fn test_topic_count_mismatch() {
        let log = LogData::new_unchecked(
            vec![TRANSFER_TOPIC, address_topic(1)],
            Bytes::from(U256::from(5u64).to_be_bytes::<32>().to_vec()),
        );
        assert!(matches!(
            transfer().decode_log(&log),
            Err(Error::TopicCountMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_empty_data_skips_body() {
        let log = LogData::new_unchecked(
            vec![TRANSFER_TOPIC, address_topic(1), address_topic(2)],
            Bytes::new(),
        );
        let out = transfer().decode_log(&log).unwrap();
        assert_eq!(out.len(), 2);
        assert!(!out.contains_key("value"));
        assert!(matches!(out["from"], DecodedValue::Address(_)));
    }

    #[test]
    fn test_event_without_arguments() {
        let schema = parse_event_signature("Foo()").unwrap();
        let compiled = CompiledEvent::compile(&schema).unwrap();
        let log = LogData::new_unchecked(vec![compiled.identifying_hash()], Bytes::new());
        assert!(compiled.decode_log(&log).unwrap().is_empty());
    }
}
