//! JSON decoding of webhook bodies.
//!
//! Bodies are decoded into a [`Payload`]: the JSON object tagged with the
//! provider, the identified event and the schema it was decoded as. Typed
//! schemas are checked against their shape before the payload is returned.
//! Unknown fields are always kept and never rejected. Callers that want a
//! typed struct bind it with [`Payload::deserialize`].

use crate::{registry::Schema, Event, ParseError, ProviderKind};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// A decoded delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    provider: ProviderKind,
    event: Event,
    schema: Schema,
    body: Value,
}

impl Payload {
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// The event the body was decoded as. For reclassified GitLab deliveries
    /// this is the concrete event, not the wrapper.
    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// The decoded JSON object.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Top-level field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// RFC 6901 pointer lookup, e.g. `/repository/full_name`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.body.pointer(pointer)
    }

    /// Bind the body to a caller-defined type.
    ///
    /// # Errors
    ///
    /// [`ParseError::DecodeError`] when the body does not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ParseError> {
        <T as serde::Deserialize>::deserialize(&self.body).map_err(|source| {
            ParseError::DecodeError {
                schema: self.schema.name(),
                source,
            }
        })
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Decode a full body as `schema`.
///
/// The body must be a JSON object that fits the schema's shape; anything else
/// is a [`ParseError::DecodeError`].
pub(crate) fn decode_payload(
    provider: ProviderKind,
    event: Event,
    schema: Schema,
    body: &[u8],
) -> Result<Payload, ParseError> {
    let decode_error = |source| ParseError::DecodeError {
        schema: schema.name(),
        source,
    };
    let object: Map<String, Value> = serde_json::from_slice(body).map_err(decode_error)?;
    let body = Value::Object(object);
    schema.check(&body).map_err(decode_error)?;

    debug!(%provider, %event, %schema, "Decoded webhook payload");

    Ok(Payload {
        provider,
        event,
        schema,
        body,
    })
}

/// Decode a partial view of the body, ignoring fields `T` does not name.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    schema: &'static str,
    body: &[u8],
) -> Result<T, ParseError> {
    serde_json::from_slice(body).map_err(|source| ParseError::DecodeError { schema, source })
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
