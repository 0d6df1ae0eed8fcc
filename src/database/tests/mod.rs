//! Database module tests
//!
//! Contains test suites for on-disk functionality:
//! - Directory listing and file loading
//! - Per-file validation and the run report
//! - Duplicate and receiver corpus checks

#[cfg(test)]
mod corpus_tests;
#[cfg(test)]
mod database_tests;
