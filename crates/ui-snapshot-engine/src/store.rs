//! # Snapshot Store
//!
//! Owns the snapshot files. One JSON file per [`SnapshotKey`], named
//! `<group>-<file_id>.json` (or `<file_id>.json` without a group) inside the
//! snapshots directory. Files are only ever created or overwritten here, never
//! deleted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{SnapshotError, StoreError};
use crate::normalize::parse_canonical;

/// Identifies exactly one snapshot file.
///
/// The file id must be unique within its group, otherwise assertions silently
/// share (and overwrite) one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    group: Option<String>,
    file_id: String,
}

impl SnapshotKey {
    pub fn new(group: Option<&str>, file_id: &str) -> Result<Self, SnapshotError> {
        if let Some(group) = group {
            validate_part("test group", group)?;
        }
        validate_part("file id", file_id)?;
        Ok(Self {
            group: group.map(str::to_string),
            file_id: file_id.to_string(),
        })
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn file_name(&self) -> String {
        match &self.group {
            Some(group) => format!("{group}-{}.json", self.file_id),
            None => format!("{}.json", self.file_id),
        }
    }
}

fn validate_part(what: &str, value: &str) -> Result<(), SnapshotError> {
    if value.trim().is_empty() {
        return Err(SnapshotError::Usage(format!("{what} must not be empty")));
    }
    if value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(SnapshotError::Usage(format!(
            "{what} {value:?} must be a single file name component"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn resolve_path(&self, key: &SnapshotKey) -> PathBuf {
        let path = self.dir.join(key.file_name());
        log::debug!("snapshot path for {:?}: {}", key.file_id(), path.display());
        path
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    pub fn read(&self, path: &Path) -> Result<Value, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
            _ => StoreError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        parse_canonical(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes `value`, replacing any existing snapshot. Creates the snapshots
    /// directory first if needed.
    pub fn write(&self, path: &Path, value: &Value) -> Result<(), StoreError> {
        let io_err = |source: io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut content = serde_json::to_string_pretty(value).map_err(|source| {
            StoreError::Encode {
                path: path.to_path_buf(),
                source,
            }
        })?;
        content.push('\n');

        fs::write(path, content).map_err(io_err)
    }
}
