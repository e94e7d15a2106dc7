//! Schema registry - compiled struct decoders and events

use std::collections::HashMap;

use alloy_primitives::{B256, LogData};
use anyhow::Context;

use super::decoder::StructDecoder;
use super::log::CompiledEvent;
use crate::config::Config;
use crate::domain::schema::parse_event_signature;
use crate::domain::value::DecodedMap;
use crate::error::{Error, Result};

/// Struct decoders by struct name, events by identifying hash
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    decoders: HashMap<String, StructDecoder>,
    events: HashMap<B256, CompiledEvent>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every struct and event listed in `config`
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut registry = Self::new();
        for (idx, entry) in config.structs.iter().enumerate() {
            registry
                .insert_struct(&entry.definition)
                .with_context(|| format!("structs[{}]", idx))?;
        }
        for (idx, entry) in config.events.iter().enumerate() {
            registry
                .insert_event(&entry.signature)
                .with_context(|| format!("events[{}]: {}", idx, entry.signature))?;
        }
        tracing::debug!(
            structs = registry.decoders.len(),
            events = registry.events.len(),
            "schema registry loaded"
        );
        Ok(registry)
    }

    /// Compile and register a struct definition
    ///
    /// Returns `false` if a struct with the same name is already registered
    /// (first wins).
    pub fn insert_struct(&mut self, definition: &str) -> Result<bool> {
        let decoder = StructDecoder::from_struct_def(definition)?;
        let Some(name) = decoder.schema().map(|schema| schema.name.clone()) else {
            return Err(Error::NotInitialized);
        };
        if self.decoders.contains_key(&name) {
            tracing::warn!(%name, "struct already registered, ignoring");
            return Ok(false);
        }
        self.decoders.insert(name, decoder);
        Ok(true)
    }

    /// Compile and register an event signature
    ///
    /// Returns `false` if an event with the same identifying hash is already
    /// registered (first wins).
    pub fn insert_event(&mut self, signature: &str) -> Result<bool> {
        let schema = parse_event_signature(signature)?;
        let event = CompiledEvent::compile(&schema)?;
        let hash = event.identifying_hash();
        if self.events.contains_key(&hash) {
            tracing::warn!(
                signature = %schema.canonical_signature(),
                "event already registered, ignoring"
            );
            return Ok(false);
        }
        self.events.insert(hash, event);
        Ok(true)
    }

    pub fn decoder(&self, name: &str) -> Option<&StructDecoder> {
        self.decoders.get(name)
    }

    pub fn event(&self, hash: &B256) -> Option<&CompiledEvent> {
        self.events.get(hash)
    }

    /// Decode return data with the decoder registered under `name`
    pub fn decode(&self, name: &str, data: &[u8]) -> Result<DecodedMap> {
        self.decoder(name)
            .ok_or_else(|| Error::UnknownStruct(name.to_string()))?
            .decode(data)
    }

    /// Decode a log with the event matching its `topics[0]`
    pub fn decode_log(&self, log: &LogData) -> Result<(String, DecodedMap)> {
        let topic = log.topics().first().copied().ok_or(Error::MissingTopics)?;
        let event = self.event(&topic).ok_or(Error::UnknownEvent(topic))?;
        let decoded = event.decode_log(log)?;
        Ok((event.schema().name.clone(), decoded))
    }

    pub fn struct_names(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.decoders.len() + self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty() && self.events.is_empty()
    }
}
