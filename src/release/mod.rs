//! Webpackage release preparation
//!
//! # Core Invariants
//!
//! 1. **No release with unreleased dependencies**
//!    - Any `webpackageId` containing `-SNAPSHOT` blocks the release
//!
//! 2. **Versions move SNAPSHOT -> release -> next SNAPSHOT**
//!    - Before release the manifest holds a development version
//!    - After release it holds a release version
//!    - After advancing it holds the next development version
//!
//! 3. **Validate everything, then write once**
//!    - The manifest is rewritten only after all checks pass
//!
//! # Architecture
//!
//! - **version**: version shapes, derivation, next-version strategy
//! - **manifest**: load / mutate / save `manifest.webpackage`
//! - **snapshot**: pure scan for `-SNAPSHOT` dependencies
//! - **preparer**: the workflow and its state machine

pub mod manifest;
pub mod preparer;
pub mod snapshot;
pub mod version;

pub use preparer::{ReleasePlan, ReleasePreparer};
