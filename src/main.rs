mod commands;
mod core;
mod release;

use clap::{ArgAction, Args, Parser, Subcommand};
use crate::core::context::PackageContext;
use crate::core::error::{ReleaseError, print_error};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Prepare webpackage releases: reject SNAPSHOT dependencies, rewrite manifest versions
#[derive(Parser)]
#[command(name = "webpackage-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  /// Only log errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  quiet: bool,

  #[command(subcommand)]
  command: Commands,
}

/// The webpackage to operate on, positionally or via -p
#[derive(Args)]
struct PackageArgs {
  /// Webpackage directory containing manifest.webpackage
  #[arg(value_name = "PATH")]
  path: Option<PathBuf>,

  /// Webpackage directory (same as PATH)
  #[arg(
    short = 'p',
    long = "webpackagePath",
    visible_alias = "webpackage-path",
    value_name = "PATH",
    conflicts_with = "path"
  )]
  webpackage_path: Option<PathBuf>,
}

impl PackageArgs {
  fn path(&self) -> Option<&Path> {
    self.webpackage_path.as_deref().or(self.path.as_deref())
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Check dependencies and versions, then set the manifest to its release version
  Prepare {
    #[command(flatten)]
    package: PackageArgs,
    /// Release version to use instead of stripping -SNAPSHOT from the current version
    #[arg(short = 'r', long = "releaseVersion", visible_alias = "release-version")]
    release_version: Option<String>,
    /// Next development version to use instead of the derived one
    #[arg(short = 'n', long = "nextVersion", visible_alias = "next-version")]
    next_version: Option<String>,
    /// Show the resolved versions without writing the manifest
    #[arg(long)]
    dry_run: bool,
    /// Output the plan in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Move a released manifest to the next development version
  NextDev {
    #[command(flatten)]
    package: PackageArgs,
    /// Next development version to use instead of the derived one
    #[arg(short = 'n', long = "nextVersion", visible_alias = "next-version")]
    next_version: Option<String>,
    /// Show the next version without writing the manifest
    #[arg(long)]
    dry_run: bool,
    /// Output the result in JSON format
    #[arg(long)]
    json: bool,
  },

  /// List dependencies that still refer to SNAPSHOT versions
  Check {
    #[command(flatten)]
    package: PackageArgs,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn log_level(verbose: u8, quiet: bool) -> Level {
  if quiet {
    return Level::ERROR;
  }
  match verbose {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  }
}

/// Logs go to stderr so stdout stays clean for --json
fn init_logging(level: Level) {
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_target(false)
    .with_writer(std::io::stderr)
    .compact()
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(log_level(cli.verbose, cli.quiet));

  let result = match cli.command {
    Commands::Prepare {
      package,
      release_version,
      next_version,
      dry_run,
      json,
    } => PackageContext::build(package.path())
      .and_then(|ctx| commands::run_prepare(&ctx, release_version, next_version, dry_run, json)),
    Commands::NextDev {
      package,
      next_version,
      dry_run,
      json,
    } => {
      PackageContext::build(package.path()).and_then(|ctx| commands::run_next_dev(&ctx, next_version, dry_run, json))
    }
    Commands::Check { package, json } => {
      PackageContext::build(package.path()).and_then(|ctx| commands::run_check(&ctx, json))
    }
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  let code = err.exit_code().as_i32();
  tracing::debug!(exit_code = code, error = ?err, "release workflow failed");
  print_error(&err);
  std::process::exit(code);
}
