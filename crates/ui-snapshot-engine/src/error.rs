use std::path::PathBuf;

use crate::compare::MismatchReport;

/// A component tree could not be turned into canonical JSON.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("no encoder can represent a value of type `{type_name}`")]
    UnsupportedScalar { type_name: &'static str },
    #[error("encoder for `{type_name}` failed: {message}")]
    Encoder {
        type_name: &'static str,
        message: String,
    },
    #[error("canonical JSON round-trip failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reading or writing a snapshot file failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Snapshot not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Snapshot {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to serialize snapshot {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything a snapshot assertion can fail with.
///
/// Only [`SnapshotError::Mismatch`] is a routine test failure; the other
/// variants mean the assertion itself could not be carried out.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot usage: {0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ui_snapshot_config::ConfigError),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("component could not be serialized: {0}")]
    Serialization(#[from] EncodeError),
    #[error("{0}")]
    Mismatch(Box<MismatchReport>),
}

impl SnapshotError {
    pub fn mismatch(&self) -> Option<&MismatchReport> {
        match self {
            SnapshotError::Mismatch(report) => Some(report.as_ref()),
            _ => None,
        }
    }
}
