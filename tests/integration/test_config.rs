//! Integration tests for release.toml handling

use crate::helpers::{CLEAN_MANIFEST, TestPackage, run_release, run_release_ok, stderr};
use anyhow::Result;

#[test]
fn test_config_pins_versions() -> Result<()> {
  let pkg = TestPackage::new(CLEAN_MANIFEST)?;
  pkg.write_file(
    "release.toml",
    r#"[release]
release_version = "0.1.5"
next_version = "0.2.0-SNAPSHOT"
"#,
  )?;

  run_release_ok(pkg.parent(), &["prepare", pkg.arg()])?;
  assert_eq!(pkg.manifest_version()?, "0.1.5");

  run_release_ok(pkg.parent(), &["next-dev", pkg.arg()])?;
  assert_eq!(pkg.manifest_version()?, "0.2.0-SNAPSHOT");

  Ok(())
}

#[test]
fn test_cli_flags_override_config() -> Result<()> {
  let pkg = TestPackage::new(CLEAN_MANIFEST)?;
  pkg.write_file("release.toml", "[release]\nrelease_version = \"0.1.5\"\n")?;

  run_release_ok(pkg.parent(), &["prepare", pkg.arg(), "-r", "0.1.7"])?;
  assert_eq!(pkg.manifest_version()?, "0.1.7");

  Ok(())
}

#[test]
fn test_config_custom_manifest_name() -> Result<()> {
  let pkg = TestPackage::new("{}")?;
  pkg.write_file("custom.webpackage", CLEAN_MANIFEST)?;
  pkg.write_file("release.toml", "[release]\nmanifest = \"custom.webpackage\"\n")?;

  run_release_ok(pkg.parent(), &["prepare", pkg.arg()])?;
  assert_eq!(pkg.read_file("custom.webpackage")?, CLEAN_MANIFEST.replace("0.1.0-SNAPSHOT", "0.1.0"));
  assert_eq!(pkg.read_manifest()?, "{}");

  Ok(())
}

#[test]
fn test_config_unknown_key_is_rejected() -> Result<()> {
  let pkg = TestPackage::new(CLEAN_MANIFEST)?;
  pkg.write_file("release.toml", "[release]\nrelase_version = \"0.1.5\"\n")?;

  let output = run_release(pkg.parent(), &["prepare", pkg.arg()])?;
  assert_eq!(output.status.code(), Some(1));
  assert_eq!(pkg.read_manifest()?, CLEAN_MANIFEST);

  Ok(())
}

#[test]
fn test_config_manifest_outside_package_is_rejected() -> Result<()> {
  let pkg = TestPackage::new(CLEAN_MANIFEST)?;
  std::fs::write(pkg.parent().join("outside.webpackage"), CLEAN_MANIFEST)?;
  pkg.write_file("release.toml", "[release]\nmanifest = \"../outside.webpackage\"\n")?;

  let output = run_release(pkg.parent(), &["prepare", pkg.arg()])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("inside the package directory"));
  assert_eq!(std::fs::read_to_string(pkg.parent().join("outside.webpackage"))?, CLEAN_MANIFEST);

  Ok(())
}
