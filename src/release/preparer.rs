//! Release workflow for a single webpackage
//!
//! # State machine
//!
//! ```text
//! Loaded --plan()--> Validated --commit_release()--> Released --commit_next_dev_version()--> NextDev
//! ```
//!
//! Every check runs before the first write, so a failure anywhere leaves
//! the manifest file exactly as it was.

use crate::core::config::ReleaseOptions;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt, VersionRole};
use crate::release::manifest::Manifest;
use crate::release::snapshot::scan_snapshot_dependencies;
use crate::release::version::{
  DevVersion, NextVersionStrategy, ReleaseVersion, derive_next_dev_version, derive_release_version,
};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
  /// Supplied by the caller (flag or release.toml)
  Provided,
  /// Computed from the manifest's current version
  Derived,
}

/// Resolved versions for one release run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleasePlan {
  pub current_version: String,
  pub release_version: ReleaseVersion,
  pub release_source: VersionSource,
  pub next_version: DevVersion,
  pub next_source: VersionSource,
  pub strategy: &'static str,
}

/// Lifecycle of a [`ReleasePreparer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreparerState {
  Loaded,
  Validated,
  Released,
  NextDev,
}

/// Resolve a package path against the current directory
pub fn resolve_package_path(path: &Path) -> ReleaseResult<PathBuf> {
  if path.as_os_str().is_empty() {
    return Err(ReleaseError::MissingPathArgument);
  }
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    let cwd = env::current_dir()
      .with_context(|| format!("Failed to resolve {} against the current directory", path.display()))?;
    Ok(cwd.join(path))
  }
}

/// Check `manifest` and resolve the release and next development versions
///
/// Fails with `UnreleasedDependencies` if any artifact refers to a snapshot,
/// and with `InvalidVersion` if a supplied version has the wrong shape or the
/// manifest's current version is not a development version.
pub fn resolve_plan(
  manifest: &Manifest,
  options: &ReleaseOptions,
  strategy: &dyn NextVersionStrategy,
) -> ReleaseResult<ReleasePlan> {
  let snapshots = scan_snapshot_dependencies(manifest.artifacts());
  if !snapshots.is_empty() {
    warn!(count = snapshots.len(), "SNAPSHOT dependencies block the release");
    return Err(ReleaseError::UnreleasedDependencies(snapshots));
  }

  let current = manifest.version();

  let (release_version, release_source) = match &options.release_version {
    Some(v) => (ReleaseVersion::parse(v, VersionRole::ProvidedRelease)?, VersionSource::Provided),
    None => (derive_release_version(current)?, VersionSource::Derived),
  };

  // Derived from the manifest's own version, not from a provided release version
  let (next_version, next_source) = match &options.next_version {
    Some(v) => (DevVersion::parse(v, VersionRole::ProvidedNext)?, VersionSource::Provided),
    None => {
      let base = derive_release_version(current)?;
      (
        derive_next_dev_version(strategy, base.as_str())?,
        VersionSource::Derived,
      )
    }
  };

  // Both versions may be provided; the manifest must still be in development
  DevVersion::parse(current, VersionRole::CurrentDevelopment)?;

  Ok(ReleasePlan {
    current_version: current.to_string(),
    release_version,
    release_source,
    next_version,
    next_source,
    strategy: strategy.name(),
  })
}

/// Prepares one webpackage directory for release
///
/// Owns the manifest loaded at construction for the duration of one workflow.
pub struct ReleasePreparer {
  package_dir: PathBuf,
  options: ReleaseOptions,
  manifest: Manifest,
  strategy: Box<dyn NextVersionStrategy>,
  plan: Option<ReleasePlan>,
  state: PreparerState,
}

impl ReleasePreparer {
  /// Load `<package_dir>/<manifest_file>`; `strategy` picks derived next versions
  pub fn open(
    package_dir: &Path,
    manifest_file: &str,
    options: ReleaseOptions,
    strategy: Box<dyn NextVersionStrategy>,
  ) -> ReleaseResult<Self> {
    let package_dir = resolve_package_path(package_dir)?;
    let manifest = Manifest::load(&package_dir.join(manifest_file))?;

    Ok(Self {
      package_dir,
      options,
      manifest,
      strategy,
      plan: None,
      state: PreparerState::Loaded,
    })
  }

  pub fn package_dir(&self) -> &Path {
    &self.package_dir
  }

  pub fn manifest(&self) -> &Manifest {
    &self.manifest
  }

  pub fn state(&self) -> PreparerState {
    self.state
  }

  /// Validate dependencies and versions without writing anything
  ///
  /// The result is cached; later commits reuse it.
  pub fn plan(&mut self) -> ReleaseResult<&ReleasePlan> {
    let plan = match self.plan.take() {
      Some(plan) => plan,
      None => {
        let plan = resolve_plan(&self.manifest, &self.options, self.strategy.as_ref())?;
        debug!(
          release = %plan.release_version,
          next = %plan.next_version,
          strategy = plan.strategy,
          "resolved release plan"
        );
        self.state = PreparerState::Validated;
        plan
      }
    };
    Ok(self.plan.insert(plan))
  }

  /// Validate, then persist the manifest with its release version
  pub fn prepare_upload(&mut self) -> ReleaseResult<ReleasePlan> {
    self.commit_release()?;
    Ok(self.plan()?.clone())
  }

  /// Set `version` to the resolved release version and write the manifest
  pub fn commit_release(&mut self) -> ReleaseResult<ReleaseVersion> {
    let release = self.plan()?.release_version.clone();
    self.write_version(release.as_str())?;
    self.state = PreparerState::Released;
    info!(version = %release, "manifest set to release version");
    Ok(release)
  }

  /// Set `version` to the next development version and write the manifest
  ///
  /// Uses the resolved plan when there is one. Otherwise the manifest is
  /// expected to hold a release version (a previous run released it) and the
  /// next version is the provided one or derived from it.
  pub fn commit_next_dev_version(&mut self) -> ReleaseResult<DevVersion> {
    let next = match &self.plan {
      Some(plan) => plan.next_version.clone(),
      None => self.resolve_next_dev_version()?,
    };
    self.write_version(next.as_str())?;
    self.state = PreparerState::NextDev;
    info!(version = %next, "manifest set to next development version");
    Ok(next)
  }

  /// Next development version for a manifest that is already released
  pub fn resolve_next_dev_version(&self) -> ReleaseResult<DevVersion> {
    let next = match &self.options.next_version {
      Some(v) => DevVersion::parse(v, VersionRole::ProvidedNext)?,
      None => derive_next_dev_version(self.strategy.as_ref(), self.manifest.version())?,
    };
    Ok(next)
  }

  fn write_version(&mut self, version: &str) -> ReleaseResult<()> {
    self.manifest.set_version(version);
    self.manifest.save()
  }
}
