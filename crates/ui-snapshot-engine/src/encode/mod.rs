//! # Encoding
//!
//! Lowers [`RawValue`] trees to `serde_json::Value`. Nested components are
//! expanded through their own [`Component::to_raw`](crate::component::Component::to_raw),
//! tuples become arrays, non-finite floats become `null`, and framework
//! scalars are handed to the first [`ScalarEncoder`] that claims them.

mod builtin;

pub use builtin::{ChronoEncoder, UuidEncoder};

use serde_json::{Map, Number, Value};

use crate::component::{CustomScalar, RawValue};
use crate::error::EncodeError;

/// Extension point for framework-specific scalar types.
pub trait ScalarEncoder: Send + Sync {
    /// Encodes `value`, or returns `None` if this encoder does not handle its type.
    fn encode(&self, value: &dyn CustomScalar) -> Option<Result<Value, EncodeError>>;
}

/// Ordered set of scalar encoders.
///
/// Encoders registered later are consulted first, so they can override the
/// built-in ones.
pub struct EncoderRegistry {
    encoders: Vec<Box<dyn ScalarEncoder>>,
}

impl EncoderRegistry {
    /// Registry without any encoders; every custom scalar is rejected.
    pub fn empty() -> Self {
        Self {
            encoders: Vec::new(),
        }
    }

    pub fn register(mut self, encoder: impl ScalarEncoder + 'static) -> Self {
        self.encoders.insert(0, Box::new(encoder));
        self
    }

    pub fn encode_scalar(&self, value: &dyn CustomScalar) -> Result<Value, EncodeError> {
        for encoder in &self.encoders {
            if let Some(result) = encoder.encode(value) {
                log::debug!("encoded custom scalar `{}`", value.type_name());
                return result;
            }
        }
        Err(EncodeError::UnsupportedScalar {
            type_name: value.type_name(),
        })
    }

    /// Lowers a raw tree to JSON without the canonical text round-trip.
    pub fn encode(&self, value: &RawValue) -> Result<Value, EncodeError> {
        Ok(match value {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(*b),
            RawValue::Int(i) => Value::from(*i),
            RawValue::UInt(u) => Value::from(*u),
            RawValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            RawValue::Str(s) => Value::String(s.clone()),
            RawValue::List(items) | RawValue::Tuple(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.encode(item))
                    .collect::<Result<_, _>>()?,
            ),
            RawValue::Map(entries) => {
                let mut map = Map::new();
                for (key, item) in entries {
                    map.insert(key.clone(), self.encode(item)?);
                }
                Value::Object(map)
            }
            RawValue::Component(component) => self.encode(&component.to_raw())?,
            RawValue::Custom(scalar) => self.encode_scalar(scalar.as_ref())?,
        })
    }
}

impl Default for EncoderRegistry {
    /// Registry with the built-in UUID and date/time encoders.
    fn default() -> Self {
        Self::empty().register(UuidEncoder).register(ChronoEncoder)
    }
}
