//! Snapshot assertions for declarative UI component trees.
//!
//! A component is normalized to canonical JSON, recorded on first use and
//! compared structurally against the recorded snapshot afterwards. See
//! [`SnapshotTest`] for the entry point.

pub mod assertion;
pub mod compare;
pub mod component;
pub mod encode;
pub mod error;
pub mod normalize;
pub mod skeleton;
pub mod store;

// Re-export key types for easier usage
pub use assertion::{Outcome, SnapshotTest, UPDATE_ENV_VALUE, UPDATE_ENV_VAR, UpdateMode};
pub use compare::{Comparison, Divergence, MismatchReport, PathSegment, ValueKind, ValuePath, compare};
pub use component::{Component, CustomScalar, Element, RawValue};
pub use encode::{EncoderRegistry, ScalarEncoder};
pub use error::{EncodeError, SnapshotError, StoreError};
pub use normalize::normalize;
pub use store::{SnapshotKey, SnapshotStore};
pub use ui_snapshot_config::Config;
