//! Package context - resolve once in main.rs, pass to every command
//!
//! ```text
//! main.rs:
//!   PackageContext::build(path) -> &PackageContext
//!   |
//!   v
//! commands/prepare.rs, next_dev.rs, check.rs:
//!   fn run_*(ctx: &PackageContext, ...)
//! ```

use crate::core::config::{ReleaseConfig, ReleaseOptions};
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::release::ReleasePreparer;
use crate::release::manifest::Manifest;
use crate::release::preparer::resolve_package_path;
use crate::release::version::IncrementLastSegment;
use std::path::{Path, PathBuf};

/// Everything a command needs to know about the target webpackage
#[derive(Debug, Clone)]
pub struct PackageContext {
  /// Webpackage directory (absolute path)
  pub root: PathBuf,

  /// release.toml, or defaults when the package has none
  pub config: ReleaseConfig,
}

impl PackageContext {
  /// Resolve the package directory and load its config
  ///
  /// `None` or an empty path is `MissingPathArgument`.
  pub fn build(path: Option<&Path>) -> ReleaseResult<Self> {
    let path = path.ok_or(ReleaseError::MissingPathArgument)?;
    let root = resolve_package_path(path)?;
    let config = ReleaseConfig::load(&root)?;

    Ok(Self { root, config })
  }

  /// Absolute path of the package manifest
  pub fn manifest_path(&self) -> PathBuf {
    self.config.manifest_path(&self.root)
  }

  /// Load the manifest fresh from disk
  pub fn load_manifest(&self) -> ReleaseResult<Manifest> {
    Ok(Manifest::load(&self.manifest_path())?)
  }

  /// Create a preparer with CLI options layered over the config's pinned versions
  pub fn preparer(&self, options: ReleaseOptions) -> ReleaseResult<ReleasePreparer> {
    ReleasePreparer::open(
      &self.root,
      &self.config.release.manifest,
      options.with_defaults_from(&self.config),
      Box::new(IncrementLastSegment),
    )
  }
}
