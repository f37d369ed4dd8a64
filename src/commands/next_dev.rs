//! Next-dev command implementation
//!
//! Moves a released manifest on to its next development version.

use crate::core::config::ReleaseOptions;
use crate::core::context::PackageContext;
use crate::core::error::ReleaseResult;
use serde_json::json;

/// Run the next-dev command
pub fn run_next_dev(
  ctx: &PackageContext,
  next_version: Option<String>,
  dry_run: bool,
  json: bool,
) -> ReleaseResult<()> {
  let mut preparer = ctx.preparer(ReleaseOptions {
    release_version: None,
    next_version,
  })?;

  let current = preparer.manifest().version().to_string();
  let next = if dry_run {
    preparer.resolve_next_dev_version()?
  } else {
    preparer.commit_next_dev_version()?
  };

  if json {
    let report = json!({
      "package": preparer.manifest().name(),
      "manifest": preparer.manifest().path(),
      "dry_run": dry_run,
      "current_version": current,
      "next_version": next,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  println!("  Current:  {}", current);
  println!("  Next dev: {}", next);
  println!();

  if dry_run {
    println!("🔍 Dry-run mode (no changes applied)");
  } else {
    println!("✅ Updated {} to {}", preparer.manifest().path().display(), next);
  }

  Ok(())
}
