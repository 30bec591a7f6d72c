#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;
use ui_snapshot_engine::{Element, RawValue, SnapshotTest, UpdateMode};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Snapshot group writing into a fresh temporary directory.
pub fn snapshot_test(group: &str, mode: UpdateMode) -> (TempDir, SnapshotTest) {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let snapshots = SnapshotTest::new(group)
        .with_snapshots_dir(dir.path())
        .with_update_mode(mode);
    (dir, snapshots)
}

/// `{type: "Div", props: {id: "x", children: [text]}}`
pub fn div_with_text(text: &str) -> Element {
    Element::new("Div")
        .prop("id", "x")
        .children(vec![RawValue::from(text)])
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
