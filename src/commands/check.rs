//! Check command implementation
//!
//! Reports SNAPSHOT dependencies without touching the manifest.

use crate::core::context::PackageContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::release::snapshot::scan_snapshot_dependencies;
use crate::release::version::is_dev_version_format;
use serde_json::json;

/// Run the check command
///
/// Fails with `UnreleasedDependencies` when anything is found, so the exit
/// status can gate CI.
pub fn run_check(ctx: &PackageContext, json: bool) -> ReleaseResult<()> {
  let manifest = ctx.load_manifest()?;
  let snapshots = scan_snapshot_dependencies(manifest.artifacts());

  if json {
    let report = json!({
      "package": manifest.name(),
      "manifest": manifest.path(),
      "version": manifest.version(),
      "is_development_version": is_dev_version_format(manifest.version()),
      "artifacts": manifest.artifacts().len(),
      "snapshot_dependencies": snapshots,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else if manifest.artifacts().is_empty() {
    println!("✅ No SNAPSHOT dependencies found");
    println!("   manifest declares no artifacts");
  } else if snapshots.is_empty() {
    println!("✅ No SNAPSHOT dependencies found");
    println!("   {} artifact(s) checked", manifest.artifacts().len());
  } else {
    println!("⚠️  Found {} SNAPSHOT dependency reference(s)", snapshots.len());
    println!();
    for dep in &snapshots {
      println!("   {}", dep);
    }
  }

  if !json && !is_dev_version_format(manifest.version()) {
    println!();
    println!(
      "⚠️  Manifest version {} is not a development version; `prepare` will refuse it",
      manifest.version()
    );
  }

  if snapshots.is_empty() {
    Ok(())
  } else {
    Err(ReleaseError::UnreleasedDependencies(snapshots))
  }
}
