//! Integration tests for `webpackage-release check`

use crate::helpers::{CLEAN_MANIFEST, SNAPSHOT_DEPS_MANIFEST, TestPackage, run_release, run_release_ok, stdout};
use anyhow::Result;

#[test]
fn test_check_clean_package() -> Result<()> {
  let pkg = TestPackage::new(CLEAN_MANIFEST)?;

  let output = run_release_ok(pkg.parent(), &["check", pkg.arg()])?;
  let out = stdout(&output);
  assert!(out.contains("No SNAPSHOT dependencies found"), "stdout: {}", out);
  assert!(out.contains("2 artifact(s) checked"), "stdout: {}", out);

  Ok(())
}

#[test]
fn test_check_lists_snapshot_dependencies() -> Result<()> {
  let pkg = TestPackage::new(SNAPSHOT_DEPS_MANIFEST)?;

  let output = run_release(pkg.parent(), &["check", pkg.arg(), "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let deps = report["snapshot_dependencies"].as_array().unwrap();
  assert_eq!(deps.len(), 2);
  assert_eq!(deps[0]["artifactId"], "my-elementary-1");
  assert_eq!(deps[1]["dependency"]["webpackageId"], "com.example.charts@1.0-SNAPSHOT");
  assert_eq!(report["is_development_version"], true);

  // check never writes
  assert_eq!(pkg.read_manifest()?, SNAPSHOT_DEPS_MANIFEST);

  Ok(())
}

#[test]
fn test_check_warns_about_released_version() -> Result<()> {
  let pkg = TestPackage::new(&CLEAN_MANIFEST.replace("0.1.0-SNAPSHOT", "0.1.0"))?;

  let output = run_release_ok(pkg.parent(), &["check", pkg.arg()])?;
  assert!(stdout(&output).contains("is not a development version"));

  Ok(())
}

#[test]
fn test_check_package_without_artifacts() -> Result<()> {
  let pkg = TestPackage::new("{\n  \"name\": \"bare-wp\",\n  \"version\": \"1.0-SNAPSHOT\"\n}\n")?;

  let output = run_release_ok(pkg.parent(), &["check", pkg.arg()])?;
  assert!(stdout(&output).contains("manifest declares no artifacts"));

  Ok(())
}
