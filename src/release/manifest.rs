//! The `manifest.webpackage` descriptor
//!
//! The manifest is kept as a JSON document with its original key order so a
//! rewrite only changes the `version` member. Typed views of the parts the
//! release workflow reads (`version`, `artifacts`) are extracted at load time.

use crate::core::error::{ManifestError, ReleaseResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the descriptor inside a webpackage directory
pub const MANIFEST_FILE: &str = "manifest.webpackage";

/// A dependency declared by an artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
  #[serde(default)]
  pub artifact_id: Option<String>,
  /// `<name>@<version>`
  #[serde(default)]
  pub webpackage_id: Option<String>,
}

/// A named unit of the webpackage
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
  pub artifact_id: String,
  #[serde(default)]
  pub dependencies: Vec<Dependency>,
}

/// Artifacts grouped by artifact type, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
  by_type: Vec<(String, Vec<Artifact>)>,
}

impl Artifacts {
  /// Read the `artifacts` member of a manifest
  pub fn from_value(value: &Value) -> Result<Self, String> {
    let object = value
      .as_object()
      .ok_or_else(|| "expected an object keyed by artifact type".to_string())?;

    let mut by_type = Vec::with_capacity(object.len());
    for (artifact_type, list) in object {
      let artifacts = Vec::<Artifact>::deserialize(list).map_err(|e| format!("{}: {}", artifact_type, e))?;
      by_type.push((artifact_type.clone(), artifacts));
    }

    Ok(Self { by_type })
  }

  /// Iterate `(artifact type, artifacts)` pairs
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[Artifact])> {
    self.by_type.iter().map(|(ty, list)| (ty.as_str(), list.as_slice()))
  }

  /// Total number of artifacts across all types
  pub fn len(&self) -> usize {
    self.by_type.iter().map(|(_, list)| list.len()).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// A loaded `manifest.webpackage`
#[derive(Debug, Clone)]
pub struct Manifest {
  path: PathBuf,
  document: Value,
  version: String,
  artifacts: Artifacts,
}

impl Manifest {
  /// Load and validate the manifest at `path`
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| {
      if source.kind() == io::ErrorKind::NotFound {
        ManifestError::NotFound {
          path: path.to_path_buf(),
        }
      } else {
        ManifestError::Read {
          path: path.to_path_buf(),
          source,
        }
      }
    })?;

    let document: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    let version = document
      .get("version")
      .and_then(Value::as_str)
      .ok_or_else(|| ManifestError::MissingVersion {
        path: path.to_path_buf(),
      })?
      .to_string();

    let artifacts = match document.get("artifacts") {
      Some(value) => Artifacts::from_value(value).map_err(|reason| ManifestError::MalformedArtifacts {
        path: path.to_path_buf(),
        reason,
      })?,
      None => Artifacts::default(),
    };

    debug!(
      manifest = %path.display(),
      version = %version,
      artifacts = artifacts.len(),
      "loaded manifest"
    );

    Ok(Self {
      path: path.to_path_buf(),
      document,
      version,
      artifacts,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// The `name` member, if the manifest has one
  pub fn name(&self) -> Option<&str> {
    self.document.get("name").and_then(Value::as_str)
  }

  /// The current `version` member
  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn artifacts(&self) -> &Artifacts {
    &self.artifacts
  }

  /// Replace the `version` member in memory, keeping its position in the document
  pub fn set_version(&mut self, version: &str) {
    if let Value::Object(object) = &mut self.document {
      object.insert("version".to_string(), Value::String(version.to_string()));
    }
    self.version = version.to_string();
  }

  /// Serialized form: 2-space pretty JSON with a trailing newline
  pub fn to_pretty_string(&self) -> ReleaseResult<String> {
    let mut text = serde_json::to_string_pretty(&self.document)?;
    text.push('\n');
    Ok(text)
  }

  /// Rewrite the whole file from the in-memory document
  pub fn save(&self) -> ReleaseResult<()> {
    let text = self.to_pretty_string()?;
    fs::write(&self.path, text).map_err(|source| ManifestError::Write {
      path: self.path.clone(),
      source,
    })?;
    info!(manifest = %self.path.display(), version = %self.version, "wrote manifest");
    Ok(())
  }
}
