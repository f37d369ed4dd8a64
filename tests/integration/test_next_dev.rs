//! Integration tests for `webpackage-release next-dev`

use crate::helpers::{CLEAN_MANIFEST, TestPackage, run_release, run_release_ok, stdout};
use anyhow::Result;

#[test]
fn test_release_then_next_dev() -> Result<()> {
  let pkg = TestPackage::new(CLEAN_MANIFEST)?;

  run_release_ok(pkg.parent(), &["prepare", pkg.arg()])?;
  assert_eq!(pkg.manifest_version()?, "0.1.0");

  run_release_ok(pkg.parent(), &["next-dev", pkg.arg()])?;
  assert_eq!(pkg.read_manifest()?, CLEAN_MANIFEST.replace("0.1.0-SNAPSHOT", "0.1.1-SNAPSHOT"));

  Ok(())
}

#[test]
fn test_next_dev_explicit_version() -> Result<()> {
  let pkg = TestPackage::new(&CLEAN_MANIFEST.replace("0.1.0-SNAPSHOT", "0.1.0"))?;

  let output = run_release_ok(pkg.parent(), &["next-dev", pkg.arg(), "-n", "1.0.0-SNAPSHOT", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(report["current_version"], "0.1.0");
  assert_eq!(report["next_version"], "1.0.0-SNAPSHOT");
  assert_eq!(pkg.manifest_version()?, "1.0.0-SNAPSHOT");

  Ok(())
}

#[test]
fn test_next_dev_dry_run() -> Result<()> {
  let released = CLEAN_MANIFEST.replace("0.1.0-SNAPSHOT", "2.9");
  let pkg = TestPackage::new(&released)?;

  let output = run_release_ok(pkg.parent(), &["next-dev", pkg.arg(), "--dry-run"])?;
  assert!(stdout(&output).contains("Next dev: 2.10-SNAPSHOT"));
  assert_eq!(pkg.read_manifest()?, released);

  Ok(())
}

#[test]
fn test_next_dev_requires_released_manifest() -> Result<()> {
  let pkg = TestPackage::new(CLEAN_MANIFEST)?;

  let output = run_release(pkg.parent(), &["next-dev", pkg.arg()])?;
  assert_eq!(output.status.code(), Some(1));
  assert_eq!(pkg.read_manifest()?, CLEAN_MANIFEST);

  Ok(())
}
