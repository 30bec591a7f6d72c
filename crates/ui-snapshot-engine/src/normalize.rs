//! # Normalization
//!
//! Turns a component into the canonical comparison form: a `serde_json::Value`
//! built only from arrays, objects and scalars.
//!
//! The encoded tree is written to JSON text and parsed back. A stored snapshot
//! is read from that same text form, so both sides of a comparison go through
//! one canonicalization and equal values cannot differ by in-memory shape.

use serde::Deserialize;
use serde_json::Value;

use crate::component::Component;
use crate::encode::EncoderRegistry;
use crate::error::EncodeError;

pub fn normalize<C>(component: &C, encoders: &EncoderRegistry) -> Result<Value, EncodeError>
where
    C: Component + ?Sized,
{
    let encoded = encoders.encode(&component.to_raw())?;
    canonicalize(&encoded)
}

/// Round-trips a value through canonical JSON text.
pub fn canonicalize(value: &Value) -> Result<Value, EncodeError> {
    let text = serde_json::to_string(value)?;
    Ok(parse_canonical(&text)?)
}

/// Parses JSON text of any nesting depth.
pub fn parse_canonical(text: &str) -> Result<Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}
