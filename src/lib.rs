// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ratbag device database validator
//!
//! Schema validation and corpus checks for the `.device` files that
//! describe gaming mice and keyboards to ratbagd.
//!
//! # Features
//!
//! - **Strict Parsing:** Duplicate sections or keys are errors, not overrides
//! - **Canonical Fields:** Values must be written exactly as they re-serialise
//! - **Schema Registry:** Allowed keys, required keys and exclusive pairs per driver
//! - **Corpus Checks:** Duplicate `DeviceMatch` entries and receiver IDs
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (types, field parsers, keyfile parser, schemas, corpus detectors)
//! - **`database`:** Filesystem access, per-file validation and run reports
//!
//! # Examples
//!
//! ## Validating a device directory
//!
//! ```no_run
//! use ratbag_devicedb::database::{DeviceDatabase, FileValidator};
//!
//! let database = DeviceDatabase::open("data/devices".into())?;
//! let report = FileValidator::new().validate_paths(&database.device_files()?);
//!
//! for failure in report.failures() {
//!     println!("{}: {:?}", failure.path.display(), failure.error);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Checking for duplicate matches
//!
//! ```
//! use ratbag_devicedb::core::DuplicateDetector;
//!
//! let mut detector = DuplicateDetector::new();
//! detector.add_file("a.device", "usb:046d:1234;");
//! detector.add_file("b.device", "usb:046d:1234;");
//!
//! assert_eq!(detector.duplicates().len(), 1);
//! ```

pub mod core;
pub mod database;

// Re-export commonly used types for convenience
pub use core::{DeviceFile, DeviceMatch, ParseError, ValidationError};
pub use database::{CorpusReport, DatabaseError, DeviceDatabase, FileValidator, ValidationReport};
