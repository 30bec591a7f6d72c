use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::ScalarEncoder;
use crate::component::CustomScalar;
use crate::error::EncodeError;

/// Hyphenated lowercase text.
pub struct UuidEncoder;

impl ScalarEncoder for UuidEncoder {
    fn encode(&self, value: &dyn CustomScalar) -> Option<Result<Value, EncodeError>> {
        let id = value.as_any().downcast_ref::<Uuid>()?;
        Some(Ok(Value::String(id.hyphenated().to_string())))
    }
}

/// ISO 8601 text for the `chrono` date and time types.
pub struct ChronoEncoder;

impl ScalarEncoder for ChronoEncoder {
    fn encode(&self, value: &dyn CustomScalar) -> Option<Result<Value, EncodeError>> {
        let any = value.as_any();
        let text = if let Some(date) = any.downcast_ref::<NaiveDate>() {
            date.format("%Y-%m-%d").to_string()
        } else if let Some(dt) = any.downcast_ref::<NaiveDateTime>() {
            dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
        } else if let Some(dt) = any.downcast_ref::<DateTime<Utc>>() {
            dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
        } else if let Some(dt) = any.downcast_ref::<DateTime<FixedOffset>>() {
            dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
        } else {
            return None;
        };
        Some(Ok(Value::String(text)))
    }
}
