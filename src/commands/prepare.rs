//! Prepare command implementation
//!
//! Validates the package and sets its manifest to the release version.

use crate::core::config::ReleaseOptions;
use crate::core::context::PackageContext;
use crate::core::error::ReleaseResult;
use crate::release::ReleasePlan;
use crate::release::preparer::VersionSource;
use serde::Serialize;
use std::path::PathBuf;

/// JSON output of `prepare`
#[derive(Debug, Serialize)]
struct PrepareReport<'a> {
  package: Option<&'a str>,
  manifest: PathBuf,
  dry_run: bool,
  plan: &'a ReleasePlan,
}

/// Run the prepare command
pub fn run_prepare(
  ctx: &PackageContext,
  release_version: Option<String>,
  next_version: Option<String>,
  dry_run: bool,
  json: bool,
) -> ReleaseResult<()> {
  let mut preparer = ctx.preparer(ReleaseOptions {
    release_version,
    next_version,
  })?;

  let plan = if dry_run {
    preparer.plan()?.clone()
  } else {
    preparer.prepare_upload()?
  };

  tracing::debug!(state = ?preparer.state(), "prepare finished");

  let manifest = preparer.manifest();
  if json {
    let report = PrepareReport {
      package: manifest.name(),
      manifest: manifest.path().to_path_buf(),
      dry_run,
      plan: &plan,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  println!("📦 Release plan for '{}'", manifest.name().unwrap_or("webpackage"));
  println!();
  println!("  Current:  {}", plan.current_version);
  println!("  Release:  {} ({})", plan.release_version, describe(plan.release_source));
  println!("  Next dev: {} ({})", plan.next_version, describe_next(&plan));
  println!();

  if dry_run {
    println!("🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  println!("✅ Updated {} to {}", manifest.path().display(), plan.release_version);
  println!();
  println!("Next steps:");
  println!("  publish the webpackage, then run:");
  println!(
    "  webpackage-release next-dev -p {} -n {}",
    preparer.package_dir().display(),
    plan.next_version
  );

  Ok(())
}

fn describe(source: VersionSource) -> &'static str {
  match source {
    VersionSource::Provided => "provided",
    VersionSource::Derived => "derived",
  }
}

fn describe_next(plan: &ReleasePlan) -> String {
  match plan.next_source {
    VersionSource::Provided => "provided".to_string(),
    VersionSource::Derived => format!("derived, {}", plan.strategy),
  }
}
