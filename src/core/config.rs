use crate::core::error::{ConfigError, ReleaseResult};
use crate::release::manifest::MANIFEST_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Per-package configuration for webpackage-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// # Example
///
/// ```toml
/// [release]
/// manifest = "manifest.webpackage"
/// release_version = "1.0.0"
/// next_version = "1.1.0-SNAPSHOT"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub release: ReleaseSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseSection {
  /// Manifest file name inside the package directory
  #[serde(default = "default_manifest")]
  pub manifest: String,

  /// Pinned release version (overridden by --releaseVersion)
  #[serde(default)]
  pub release_version: Option<String>,

  /// Pinned next development version (overridden by --nextVersion)
  #[serde(default)]
  pub next_version: Option<String>,
}

fn default_manifest() -> String {
  MANIFEST_FILE.to_string()
}

impl Default for ReleaseSection {
  fn default() -> Self {
    Self {
      manifest: default_manifest(),
      release_version: None,
      next_version: None,
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(package_dir: &Path) -> Option<PathBuf> {
    let candidates = [
      package_dir.join("release.toml"),
      package_dir.join(".release.toml"),
      package_dir.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load the package config, or defaults when no config file exists
  pub fn load(package_dir: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(package_dir) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
      path: config_path.clone(),
      source,
    })?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Parse {
      path: config_path.clone(),
      message: e.to_string(),
    })?;

    if let Err(message) = config.release.validate() {
      return Err(ConfigError::Parse { path: config_path, message }.into());
    }

    tracing::debug!(config = %config_path.display(), "loaded release config");
    Ok(config)
  }

  /// Path of the manifest for a package directory
  pub fn manifest_path(&self, package_dir: &Path) -> PathBuf {
    package_dir.join(&self.release.manifest)
  }
}

impl ReleaseSection {
  /// The manifest must be a relative path that stays inside the package directory
  fn validate(&self) -> Result<(), String> {
    let manifest = Path::new(&self.manifest);
    let escapes = manifest
      .components()
      .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if self.manifest.is_empty() || escapes {
      return Err(format!(
        "release.manifest = \"{}\" must be a relative path inside the package directory",
        self.manifest
      ));
    }
    Ok(())
  }
}

/// Versions requested by the caller; validated by the preparer, not here
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOptions {
  pub release_version: Option<String>,
  pub next_version: Option<String>,
}

impl ReleaseOptions {
  /// Fill unset options from the pinned versions in `config`
  pub fn with_defaults_from(self, config: &ReleaseConfig) -> Self {
    Self {
      release_version: self.release_version.or_else(|| config.release.release_version.clone()),
      next_version: self.next_version.or_else(|| config.release.next_version.clone()),
    }
  }
}
