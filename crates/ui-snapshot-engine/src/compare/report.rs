use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use super::path::ValuePath;

/// Shape of a normalized value, as far as the comparator cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Sequence,
    Mapping,
    Scalar,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => ValueKind::Sequence,
            Value::Object(_) => ValueKind::Mapping,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                ValueKind::Scalar
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Scalar => "scalar",
        })
    }
}

/// How the snapshot and the component differ at the reported path.
#[derive(Debug, Clone, PartialEq)]
pub enum Divergence {
    Kind {
        expected: ValueKind,
        actual: ValueKind,
    },
    /// Both sequences are kept in full; no positional alignment is attempted.
    Length {
        expected: Vec<Value>,
        actual: Vec<Value>,
    },
    /// Key sets, sorted.
    Keys {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    Value {
        expected: Value,
        actual: Value,
    },
}

impl Divergence {
    /// Keys present in the snapshot but not in the component.
    pub fn missing_keys(&self) -> Vec<&str> {
        match self {
            Divergence::Keys { expected, actual } => difference(expected, actual),
            _ => Vec::new(),
        }
    }

    /// Keys present in the component but not in the snapshot.
    pub fn unexpected_keys(&self) -> Vec<&str> {
        match self {
            Divergence::Keys { expected, actual } => difference(actual, expected),
            _ => Vec::new(),
        }
    }
}

fn difference<'a>(left: &'a [String], right: &[String]) -> Vec<&'a str> {
    let right: BTreeSet<&str> = right.iter().map(String::as_str).collect();
    left.iter()
        .map(String::as_str)
        .filter(|k| !right.contains(k))
        .collect()
}

/// First point where a component diverges from its snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchReport {
    pub path: ValuePath,
    pub divergence: Divergence,
}

fn quoted_list(keys: &[&str]) -> String {
    keys.iter()
        .map(|k| format!("{k:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snapshot mismatch at {}: ", self.path)?;
        match &self.divergence {
            Divergence::Kind { expected, actual } => {
                writeln!(f, "type differs")?;
                writeln!(f, "  snapshot:  {expected}")?;
                write!(f, "  component: {actual}")
            }
            Divergence::Length { expected, actual } => {
                writeln!(f, "length differs ({} vs {})", expected.len(), actual.len())?;
                writeln!(f, "  snapshot:  {}", Value::Array(expected.clone()))?;
                write!(f, "  component: {}", Value::Array(actual.clone()))
            }
            Divergence::Keys { .. } => {
                writeln!(f, "keys differ")?;
                writeln!(f, "  missing:    [{}]", quoted_list(&self.divergence.missing_keys()))?;
                write!(
                    f,
                    "  unexpected: [{}]",
                    quoted_list(&self.divergence.unexpected_keys())
                )
            }
            Divergence::Value { expected, actual } => {
                writeln!(f, "value differs")?;
                writeln!(f, "  snapshot:  {expected}")?;
                write!(f, "  component: {actual}")
            }
        }
    }
}
