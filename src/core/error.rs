//! Error types for webpackage-release with contextual messages and exit codes
//!
//! Every failure of the release workflow is a [`ReleaseError`]. Library code only
//! returns these values; printing them (and choosing the process exit status) is
//! left to the binary via [`print_error`] and [`ReleaseError::exit_code`].

use crate::release::snapshot::{SnapshotDependency, render_dependency_list};
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for webpackage-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (missing path, invalid version, bad config)
  User = 1,
  /// System error (manifest I/O or parse failure)
  System = 2,
  /// Validation failure (unreleased dependencies)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for webpackage-release
#[derive(Debug)]
pub enum ReleaseError {
  /// No webpackage path was given
  MissingPathArgument,

  /// The manifest could not be read, parsed or written
  ManifestRead(ManifestError),

  /// One or more artifacts refer to `-SNAPSHOT` dependencies
  UnreleasedDependencies(Vec<SnapshotDependency>),

  /// A supplied or derived version does not have the expected shape
  InvalidVersion(VersionError),

  /// release.toml errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  ///
  /// Typed variants keep their identity; only free-form messages and raw I/O
  /// errors accumulate context lines.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(e) => ReleaseError::Message {
        message: ctx_str,
        context: Some(format!("I/O error: {}", e)),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::MissingPathArgument => ExitCode::User,
      ReleaseError::ManifestRead(_) => ExitCode::System,
      ReleaseError::UnreleasedDependencies(_) => ExitCode::Validation,
      ReleaseError::InvalidVersion(_) => ExitCode::User,
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::MissingPathArgument => Some(
        "Usage: webpackage-release prepare -p <webpackagePath> [-r <releaseVersion>] [-n <nextVersion>]".to_string(),
      ),
      ReleaseError::ManifestRead(e) => e.help_message(),
      ReleaseError::UnreleasedDependencies(_) => Some(
        "Release the listed dependencies first, then refer to their release versions (without -SNAPSHOT).".to_string(),
      ),
      ReleaseError::InvalidVersion(e) => e.help_message(),
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::MissingPathArgument => write!(f, "Missing necessary parameter \"webpackagePath\""),
      ReleaseError::ManifestRead(e) => write!(f, "{}", e),
      ReleaseError::UnreleasedDependencies(deps) => {
        write!(
          f,
          "To release a webpackage its dependencies can not be under development \
           (i.e. their version can not have the -SNAPSHOT suffix). Please review following dependencies:\n{}",
          render_dependency_list(deps)
        )
      }
      ReleaseError::InvalidVersion(e) => write!(f, "{}", e),
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::ManifestRead(e) => e.source(),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<ManifestError> for ReleaseError {
  fn from(err: ManifestError) -> Self {
    ReleaseError::ManifestRead(err)
  }
}

impl From<VersionError> for ReleaseError {
  fn from(err: VersionError) -> Self {
    ReleaseError::InvalidVersion(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

/// Manifest I/O and shape errors
#[derive(Debug)]
pub enum ManifestError {
  /// manifest.webpackage does not exist
  NotFound { path: PathBuf },

  /// Reading the file failed
  Read { path: PathBuf, source: io::Error },

  /// The file is not valid JSON
  Parse { path: PathBuf, source: serde_json::Error },

  /// The document has no string `version` member
  MissingVersion { path: PathBuf },

  /// `artifacts` is not a mapping of artifact lists
  MalformedArtifacts { path: PathBuf, reason: String },

  /// Writing the file failed
  Write { path: PathBuf, source: io::Error },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::NotFound { .. } => {
        Some("Check that the path points at a webpackage directory containing manifest.webpackage.".to_string())
      }
      ManifestError::MissingVersion { .. } => {
        Some("Add a \"version\" field with a development version, e.g. \"1.0.0-SNAPSHOT\".".to_string())
      }
      ManifestError::MalformedArtifacts { .. } => Some(
        "\"artifacts\" must map artifact types to lists of objects with \"artifactId\" and optional \"dependencies\"."
          .to_string(),
      ),
      _ => None,
    }
  }

  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ManifestError::Read { source, .. } | ManifestError::Write { source, .. } => Some(source),
      ManifestError::Parse { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::NotFound { path } => write!(f, "Manifest not found: {}", path.display()),
      ManifestError::Read { path, source } => {
        write!(f, "Failed to read manifest {}: {}", path.display(), source)
      }
      ManifestError::Parse { path, source } => {
        write!(f, "Failed to parse manifest {}: {}", path.display(), source)
      }
      ManifestError::MissingVersion { path } => {
        write!(f, "Manifest {} has no string \"version\" field", path.display())
      }
      ManifestError::MalformedArtifacts { path, reason } => {
        write!(f, "Manifest {} has malformed \"artifacts\": {}", path.display(), reason)
      }
      ManifestError::Write { path, source } => {
        write!(f, "Failed to write manifest {}: {}", path.display(), source)
      }
    }
  }
}

/// Which version was being checked when validation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRole {
  /// `--releaseVersion` or a pinned `release_version`
  ProvidedRelease,
  /// `--nextVersion` or a pinned `next_version`
  ProvidedNext,
  /// The manifest version a release is derived from (must be a development version)
  CurrentDevelopment,
  /// The version a next development version is derived from (must be a release version)
  BaseRelease,
}

/// A version string that failed format validation or derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionError {
  pub role: VersionRole,
  pub value: String,
  /// Set when the shape was fine but a numeric segment could not be incremented
  pub overflow: bool,
}

impl VersionError {
  pub fn new(role: VersionRole, value: impl Into<String>) -> Self {
    Self {
      role,
      value: value.into(),
      overflow: false,
    }
  }

  pub fn overflow(value: impl Into<String>) -> Self {
    Self {
      role: VersionRole::BaseRelease,
      value: value.into(),
      overflow: true,
    }
  }

  /// Short label used by tests and JSON output
  pub fn label(&self) -> &'static str {
    match self.role {
      VersionRole::ProvidedRelease | VersionRole::BaseRelease => "Invalid release version",
      VersionRole::ProvidedNext | VersionRole::CurrentDevelopment => "Invalid development version",
    }
  }

  fn help_message(&self) -> Option<String> {
    if self.overflow {
      return Some("Pass the next development version explicitly with --nextVersion.".to_string());
    }
    let hint = match self.role {
      VersionRole::ProvidedRelease | VersionRole::BaseRelease => "Release versions look like 1, 1.0 or 1.3.1.",
      VersionRole::ProvidedNext | VersionRole::CurrentDevelopment => {
        "Development versions look like 1-SNAPSHOT, 1.0-SNAPSHOT or 1.3.1-SNAPSHOT."
      }
    };
    Some(hint.to_string())
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.overflow {
      return write!(
        f,
        "{}: cannot increment the last segment of ({}) without overflow",
        self.label(),
        self.value
      );
    }
    match self.role {
      VersionRole::ProvidedRelease => write!(
        f,
        "{}: the provided release version ({}) can only contain numbers or numbers separated by dots",
        self.label(),
        self.value
      ),
      VersionRole::ProvidedNext => write!(
        f,
        "{}: the provided next development version ({}) can only contain numbers or dot separated numbers \
         and must end with '-SNAPSHOT'",
        self.label(),
        self.value
      ),
      VersionRole::CurrentDevelopment => write!(
        f,
        "{}: the current version of the webpackage ({}) is not a development version, it must be dot \
         separated numbers ending with '-SNAPSHOT'",
        self.label(),
        self.value
      ),
      VersionRole::BaseRelease => write!(
        f,
        "{}: ({}) is not a release version, it can only contain numbers or dot separated numbers",
        self.label(),
        self.value
      ),
    }
  }
}

impl std::error::Error for VersionError {}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// release.toml could not be read
  Read { path: PathBuf, source: io::Error },

  /// release.toml is not valid for the expected schema
  Parse { path: PathBuf, message: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Parse { .. } => Some(
        "Supported keys under [release] are: manifest, release_version, next_version.".to_string(),
      ),
      ConfigError::Read { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Read { path, source } => {
        write!(f, "Failed to read config from {}: {}", path.display(), source)
      }
      ConfigError::Parse { path, message } => {
        write!(f, "Failed to parse config from {}: {}", path.display(), message)
      }
    }
  }
}

/// Result type alias for webpackage-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
