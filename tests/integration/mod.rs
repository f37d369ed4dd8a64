//! Integration tests for webpackage-release
//!
//! Each test builds a throwaway webpackage in a temp dir and drives the real binary.

mod helpers;
mod test_check;
mod test_config;
mod test_next_dev;
