//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Field parser tests (DeviceMatch, DpiRange, DpiList, enumerations)
//! - Keyfile parser tests
//! - Schema registry tests
//! - Duplicate and receiver detection tests

#[cfg(test)]
mod duplicate_tests;
#[cfg(test)]
mod schema_tests;
