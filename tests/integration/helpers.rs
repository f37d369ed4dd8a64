//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Manifest of a webpackage under development with released dependencies only
pub const CLEAN_MANIFEST: &str = r#"{
  "name": "clean-wp",
  "groupId": "com.example",
  "version": "0.1.0-SNAPSHOT",
  "modelVersion": "9.1.1",
  "artifacts": {
    "elementaryComponents": [
      {
        "artifactId": "my-elementary",
        "dependencies": [
          {
            "webpackageId": "cubx.core.rte@2.4.0",
            "artifactId": "cubxpolymer"
          }
        ]
      }
    ],
    "utilities": [
      {
        "artifactId": "my-util"
      }
    ]
  }
}
"#;

/// Manifest with SNAPSHOT dependencies in two artifact types
pub const SNAPSHOT_DEPS_MANIFEST: &str = r#"{
  "name": "snapshot-wp",
  "groupId": "com.example",
  "version": "1.2-SNAPSHOT",
  "modelVersion": "9.1.1",
  "artifacts": {
    "elementaryComponents": [
      {
        "artifactId": "my-elementary-1",
        "dependencies": [
          {
            "webpackageId": "cubx.core.rte@2.4.0-SNAPSHOT",
            "artifactId": "cubxpolymer"
          }
        ]
      }
    ],
    "compoundComponents": [
      {
        "artifactId": "my-compound",
        "dependencies": [
          {
            "webpackageId": "com.example.charts@1.0-SNAPSHOT",
            "artifactId": "bar-chart"
          },
          {
            "webpackageId": "com.example.tables@3.0",
            "artifactId": "table"
          }
        ]
      }
    ]
  }
}
"#;

/// A webpackage directory in a temp dir
pub struct TestPackage {
  root: TempDir,
  pub path: PathBuf,
}

impl TestPackage {
  /// Create a package whose manifest.webpackage holds `manifest`
  pub fn new(manifest: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("my-webpackage");
    std::fs::create_dir_all(&path)?;
    std::fs::write(path.join("manifest.webpackage"), manifest)?;

    Ok(Self { root, path })
  }

  /// Directory that contains the package directory
  pub fn parent(&self) -> &Path {
    self.root.path()
  }

  /// Path argument for the CLI
  pub fn arg(&self) -> &str {
    self.path.to_str().unwrap()
  }

  pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(name), content)?;
    Ok(())
  }

  pub fn read_manifest(&self) -> Result<String> {
    self.read_file("manifest.webpackage")
  }

  pub fn read_file(&self, name: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(name)).with_context(|| format!("Failed to read {}", name))
  }

  /// Version field of the manifest as currently on disk
  pub fn manifest_version(&self) -> Result<String> {
    let doc: serde_json::Value = serde_json::from_str(&self.read_manifest()?)?;
    doc["version"]
      .as_str()
      .map(String::from)
      .context("manifest has no string version")
  }
}

/// Run the webpackage-release CLI; the caller checks the exit status
pub fn run_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_webpackage-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run webpackage-release")
}

/// Run the CLI and fail the test unless it exits successfully
pub fn run_release_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release(cwd, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "webpackage-release {} failed\nstdout: {}\nstderr: {}",
      args.join(" "),
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
