//! Release and development version strings
//!
//! Webpackage versions are not semver. Two shapes are recognised:
//!
//! - release: one or more dot separated non-negative integers (`1`, `2.3`, `1.0.0`)
//! - development: a release version followed by the literal `-SNAPSHOT` suffix
//!
//! Both are validated with anchored patterns; nothing else (pre-release tags,
//! build metadata, ranges) is accepted.

use crate::core::error::{VersionError, VersionRole};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Suffix marking an in-development version
pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

// `[0-9]` rather than `\d`: the regex crate's `\d` matches any Unicode digit.
static RELEASE_VERSION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^([0-9]+)(\.[0-9]+)*$").expect("release version pattern compiles"));

static DEV_VERSION: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^([0-9]+)(\.[0-9]+)*(-SNAPSHOT)$").expect("development version pattern compiles"));

/// True iff `version` is a release version (e.g. `1`, `2.3`, `1.0.0`)
pub fn is_release_version_format(version: &str) -> bool {
  RELEASE_VERSION.is_match(version)
}

/// True iff `version` is a development version (e.g. `1-SNAPSHOT`, `2.3-SNAPSHOT`)
pub fn is_dev_version_format(version: &str) -> bool {
  DEV_VERSION.is_match(version)
}

/// A validated release version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
  /// Validate `value`, attributing a failure to `role`
  pub fn parse(value: &str, role: VersionRole) -> Result<Self, VersionError> {
    if is_release_version_format(value) {
      Ok(Self(value.to_string()))
    } else {
      Err(VersionError::new(role, value))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// The development version of the same number (`1.2` -> `1.2-SNAPSHOT`)
  pub fn to_snapshot(&self) -> DevVersion {
    DevVersion(format!("{}{}", self.0, SNAPSHOT_SUFFIX))
  }
}

impl FromStr for ReleaseVersion {
  type Err = VersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s, VersionRole::ProvidedRelease)
  }
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A validated development (`-SNAPSHOT`) version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DevVersion(String);

impl DevVersion {
  /// Validate `value`, attributing a failure to `role`
  pub fn parse(value: &str, role: VersionRole) -> Result<Self, VersionError> {
    if is_dev_version_format(value) {
      Ok(Self(value.to_string()))
    } else {
      Err(VersionError::new(role, value))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// The version with the `-SNAPSHOT` suffix removed
  pub fn to_release(&self) -> ReleaseVersion {
    let number = self.0.strip_suffix(SNAPSHOT_SUFFIX).unwrap_or(&self.0);
    ReleaseVersion(number.to_string())
  }
}

impl FromStr for DevVersion {
  type Err = VersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s, VersionRole::ProvidedNext)
  }
}

impl fmt::Display for DevVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Policy for choosing the release that follows a given one
///
/// The next development version is always `strategy.next_release(current)`
/// with the `-SNAPSHOT` suffix appended.
pub trait NextVersionStrategy {
  /// Name shown in plans and logs
  fn name(&self) -> &'static str;

  /// Compute the release version after `current`
  fn next_release(&self, current: &ReleaseVersion) -> Result<ReleaseVersion, VersionError>;
}

/// Increment the last dot separated segment: `1.0.0` -> `1.0.1`, `1.0` -> `1.1`, `1` -> `2`
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementLastSegment;

impl NextVersionStrategy for IncrementLastSegment {
  fn name(&self) -> &'static str {
    "increment-last-segment"
  }

  fn next_release(&self, current: &ReleaseVersion) -> Result<ReleaseVersion, VersionError> {
    let version = current.as_str();
    let (head, last) = match version.rfind('.') {
      Some(pos) => version.split_at(pos + 1),
      None => ("", version),
    };

    // The segment is all ASCII digits, so parsing can only fail on overflow
    let bumped = last
      .parse::<u64>()
      .ok()
      .and_then(|n| n.checked_add(1))
      .ok_or_else(|| VersionError::overflow(version))?;

    Ok(ReleaseVersion(format!("{}{}", head, bumped)))
  }
}

/// Strip `-SNAPSHOT` from the manifest's current development version
pub fn derive_release_version(current: &str) -> Result<ReleaseVersion, VersionError> {
  DevVersion::parse(current, VersionRole::CurrentDevelopment).map(|dev| dev.to_release())
}

/// Next development version after the release version `current`
pub fn derive_next_dev_version(strategy: &dyn NextVersionStrategy, current: &str) -> Result<DevVersion, VersionError> {
  let release = ReleaseVersion::parse(current, VersionRole::BaseRelease)?;
  Ok(strategy.next_release(&release)?.to_snapshot())
}
