//! Core plumbing shared by all commands
//!
//! - **config**: release.toml parsing and CLI option layering
//! - **context**: resolved package directory + config, built once in main.rs
//! - **error**: error types with exit codes and contextual help messages

pub mod config;
pub mod context;
pub mod error;
