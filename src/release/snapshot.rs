//! Detection of dependencies that are still under development
//!
//! A webpackage can only be released when none of its artifacts refer to a
//! `-SNAPSHOT` webpackage. The scan here is pure: it reports every offending
//! reference and leaves deciding what to do about them to the caller.

use crate::release::manifest::Artifacts;
use crate::release::version::SNAPSHOT_SUFFIX;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// The dependency half of a [`SnapshotDependency`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRef {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub artifact_id: Option<String>,
  pub webpackage_id: String,
}

/// Renders as compact JSON with `artifactId` before `webpackageId`
impl fmt::Display for DependencyRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut object = Map::new();
    if let Some(artifact_id) = &self.artifact_id {
      object.insert("artifactId".to_string(), Value::String(artifact_id.clone()));
    }
    object.insert("webpackageId".to_string(), Value::String(self.webpackage_id.clone()));
    write!(f, "{}", Value::Object(object))
  }
}

/// An artifact that refers to a dependency in development
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDependency {
  /// The referring artifact
  pub artifact_id: String,
  pub dependency: DependencyRef,
}

impl fmt::Display for SnapshotDependency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Artifact: {}\tReferred Dependency: {}", self.artifact_id, self.dependency)
  }
}

/// Collect every dependency whose `webpackageId` contains `-SNAPSHOT`
///
/// Results follow artifact-type order, then artifact order, then dependency
/// order. Dependencies without a `webpackageId` are skipped.
pub fn scan_snapshot_dependencies(artifacts: &Artifacts) -> Vec<SnapshotDependency> {
  let mut found = Vec::new();

  for (_artifact_type, list) in artifacts.iter() {
    for artifact in list {
      for dep in &artifact.dependencies {
        let Some(webpackage_id) = dep.webpackage_id.as_deref() else {
          continue;
        };
        if webpackage_id.contains(SNAPSHOT_SUFFIX) {
          found.push(SnapshotDependency {
            artifact_id: artifact.artifact_id.clone(),
            dependency: DependencyRef {
              artifact_id: dep.artifact_id.clone(),
              webpackage_id: webpackage_id.to_string(),
            },
          });
        }
      }
    }
  }

  found
}

/// One tab-indented, newline-terminated line per entry
pub fn render_dependency_list(deps: &[SnapshotDependency]) -> String {
  deps.iter().map(|dep| format!("\t{}\n", dep)).collect()
}
