//! CLI commands for webpackage-release
//!
//! - **prepare**: reject SNAPSHOT dependencies, resolve versions, write the release version
//! - **next-dev**: move a released manifest to the next development version
//! - **check**: list SNAPSHOT dependencies only
//!
//! All commands accept `&PackageContext` so the package path and config are resolved once.

pub mod check;
pub mod next_dev;
pub mod prepare;

pub use check::run_check;
pub use next_dev::run_next_dev;
pub use prepare::run_prepare;
