//! Struct decoder: struct-definition text to named return-data decoding

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::codec::{self, CompiledSchema};
use super::descriptor::{document, synthesize_getter};
use crate::domain::schema::{parse_struct_def, StructSchema};
use crate::domain::value::{project, DecodedMap};
use crate::error::{Error, Result};

/// A struct schema together with its compiled getter
#[derive(Debug, Clone)]
struct CompiledStruct {
    schema: StructSchema,
    descriptor: Value,
    compiled: CompiledSchema,
}

/// Decodes tuple-encoded return data of a struct getter
///
/// Immutable once built, so a decoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct StructDecoder {
    inner: Option<CompiledStruct>,
}

/// Builder for [`StructDecoder`]
#[derive(Debug, Default)]
pub struct StructDecoderBuilder {
    struct_def: Option<String>,
}

impl StructDecoderBuilder {
    /// Configure the decoder from struct-definition text
    pub fn with_struct(mut self, definition: impl Into<String>) -> Self {
        self.struct_def = Some(definition.into());
        self
    }

    pub fn build(self) -> Result<StructDecoder> {
        let Some(definition) = self.struct_def else {
            return Ok(StructDecoder::default());
        };

        let schema = parse_struct_def(&definition)?;
        let descriptor = synthesize_getter(&schema)?;
        let compiled = codec::compile(document([descriptor.clone()]))?;

        tracing::debug!(
            name = %schema.name,
            fields = schema.fields.len(),
            "compiled struct decoder"
        );

        Ok(StructDecoder {
            inner: Some(CompiledStruct {
                schema,
                descriptor,
                compiled,
            }),
        })
    }
}

impl StructDecoder {
    pub fn builder() -> StructDecoderBuilder {
        StructDecoderBuilder::default()
    }

    /// Shorthand for `builder().with_struct(definition).build()`
    pub fn from_struct_def(definition: &str) -> Result<Self> {
        Self::builder().with_struct(definition).build()
    }

    pub fn schema(&self) -> Option<&StructSchema> {
        self.inner.as_ref().map(|inner| &inner.schema)
    }

    /// The synthesized getter fragment handed to the codec
    pub fn descriptor(&self) -> Option<&Value> {
        self.inner.as_ref().map(|inner| &inner.descriptor)
    }

    /// Decode return data; the struct fields sit under the struct's name
    pub fn decode(&self, data: &[u8]) -> Result<DecodedMap> {
        let inner = self.inner.as_ref().ok_or(Error::NotInitialized)?;
        let getter = inner.schema.getter();
        let method = inner
            .compiled
            .get_method(&getter)
            .ok_or(Error::MethodNotFound(getter))?;

        let decoded = method.decode(data)?;
        tracing::trace!(name = %inner.schema.name, bytes = data.len(), "decoded struct");
        Ok(decoded)
    }

    /// Decode return data and project the struct fields onto `T` by name
    pub fn decode_struct<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let mut decoded = self.decode(data)?;
        let name = self
            .schema()
            .map(|schema| schema.name.as_str())
            .ok_or(Error::NotInitialized)?;
        let value = decoded
            .remove(name)
            .ok_or_else(|| Error::StructNotFound(name.to_string()))?;

        Ok(project(&value)?)
    }
}
