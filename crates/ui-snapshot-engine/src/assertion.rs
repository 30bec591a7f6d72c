//! # Snapshot Assertions
//!
//! [`SnapshotTest`] ties normalization, storage and comparison together for
//! one test group. Each assertion ends in one of three states:
//!
//! - no snapshot yet: the component is recorded ([`Outcome::Recorded`])
//! - snapshot present, update mode on: it is overwritten ([`Outcome::Updated`])
//! - snapshot present, update mode off: it is compared ([`Outcome::Matched`]
//!   or [`SnapshotError::Mismatch`])
//!
//! ```rust,no_run
//! use ui_snapshot_engine::{Element, SnapshotTest};
//!
//! let snapshots = SnapshotTest::new("MyUnitTestCase");
//! let component = Element::new("Div")
//!     .prop("id", "test-id")
//!     .children(vec![Element::new("P").children(vec!["wow!"])]);
//!
//! snapshots.assert_snapshot_eq(&component, "my-test-unique-id");
//! ```

use std::path::{Path, PathBuf};

use ui_snapshot_config::Config;

use crate::compare::compare;
use crate::component::Component;
use crate::encode::EncoderRegistry;
use crate::error::SnapshotError;
use crate::normalize::normalize;
use crate::skeleton;
use crate::store::{SnapshotKey, SnapshotStore};

/// Environment variable that switches assertions to overwrite mode.
pub const UPDATE_ENV_VAR: &str = "UPDATE_UI_SNAPSHOTS";

/// The only value of [`UPDATE_ENV_VAR`] that enables overwrite mode.
pub const UPDATE_ENV_VALUE: &str = "TRUE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateMode {
    #[default]
    Compare,
    Overwrite,
}

impl UpdateMode {
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(UPDATE_ENV_VAR).ok().as_deref())
    }

    /// Exact, case-sensitive match; anything else (or nothing) means compare.
    pub fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some(UPDATE_ENV_VALUE) => UpdateMode::Overwrite,
            _ => UpdateMode::Compare,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No snapshot existed; one was written.
    Recorded,
    /// Update mode replaced an existing snapshot.
    Updated,
    /// The component matched its snapshot.
    Matched,
}

pub struct SnapshotTest {
    group: Option<String>,
    store: SnapshotStore,
    encoders: EncoderRegistry,
    update_mode: Option<UpdateMode>,
}

impl SnapshotTest {
    /// Snapshots named `<group>-<file_id>.json` in the default directory.
    pub fn new(group: impl Into<String>) -> Self {
        Self::with_group(Some(group.into()), &Config::default())
    }

    /// Snapshots named `<file_id>.json` in the default directory.
    pub fn ungrouped() -> Self {
        Self::with_group(None, &Config::default())
    }

    pub fn from_config(group: impl Into<String>, config: &Config) -> Self {
        Self::with_group(Some(group.into()), config)
    }

    /// Reads `ui-snapshot.toml` from the working directory, falling back to
    /// the defaults when there is none.
    pub fn discover(group: impl Into<String>) -> Result<Self, SnapshotError> {
        Self::discover_in(group, ".")
    }

    /// Like [`discover`](Self::discover), looking in `dir`. A relative
    /// `snapshots_dir` in the file is resolved against `dir`.
    pub fn discover_in(
        group: impl Into<String>,
        dir: impl AsRef<Path>,
    ) -> Result<Self, SnapshotError> {
        let dir = dir.as_ref();
        let mut config = Config::discover(dir)?.unwrap_or_default();
        config.snapshots_dir = dir.join(&config.snapshots_dir);
        log::debug!("snapshots directory {}", config.snapshots_dir.display());
        Ok(Self::from_config(group, &config))
    }

    fn with_group(group: Option<String>, config: &Config) -> Self {
        Self {
            group,
            store: SnapshotStore::new(config.snapshots_dir.clone()),
            encoders: EncoderRegistry::default(),
            update_mode: None,
        }
    }

    /// Overrides the snapshots directory for this group.
    pub fn with_snapshots_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store = SnapshotStore::new(dir);
        self
    }

    pub fn with_encoders(mut self, encoders: EncoderRegistry) -> Self {
        self.encoders = encoders;
        self
    }

    /// Pins the update mode instead of reading [`UPDATE_ENV_VAR`] on every assertion.
    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = Some(mode);
        self
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn snapshot_path(&self, file_id: &str) -> Result<PathBuf, SnapshotError> {
        let key = SnapshotKey::new(self.group.as_deref(), file_id)?;
        Ok(self.store.resolve_path(&key))
    }

    /// Runs one assertion and reports how it ended.
    pub fn check<C>(&self, component: &C, file_id: &str) -> Result<Outcome, SnapshotError>
    where
        C: Component + ?Sized,
    {
        let path = self.snapshot_path(file_id)?;
        let actual = normalize(component, &self.encoders)?;

        if !self.store.exists(&path) {
            self.store.write(&path, &actual)?;
            log::info!("recorded new snapshot {}", path.display());
            return Ok(Outcome::Recorded);
        }

        let mode = self.update_mode.unwrap_or_else(UpdateMode::from_env);
        if mode == UpdateMode::Overwrite {
            self.store.write(&path, &actual)?;
            log::info!("updated snapshot {}", path.display());
            return Ok(Outcome::Updated);
        }

        let expected = self.store.read(&path)?;
        compare(&expected, &actual).into_result().map_err(|report| {
            log::error!("{}", skeleton::render(&expected));
            SnapshotError::Mismatch(Box::new(report))
        })?;
        Ok(Outcome::Matched)
    }

    /// Like [`check`](Self::check), but panics on any failure so it can be
    /// used directly in a `#[test]`.
    #[track_caller]
    pub fn assert_snapshot_eq<C>(&self, component: &C, file_id: &str)
    where
        C: Component + ?Sized,
    {
        if let Err(err) = self.check(component, file_id) {
            panic!("{err}");
        }
    }
}
