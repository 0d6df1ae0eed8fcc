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

//! src/core/mod.rs
//!
//! Core validation logic
//!
//! This module contains the data structures and checks for device files,
//! including:
//! - Type definitions for match entries, DPI descriptions and enumerations
//! - Field parsers with canonical-form checking
//! - A strict keyfile parser
//! - The static schema registry for every section kind
//! - Corpus-wide duplicate and receiver detection
//!
//! Nothing in here touches the filesystem, so every rule can be unit
//! tested on in-memory strings.

pub mod duplicate;
pub mod error;
pub mod fields;
pub mod parser;
pub mod receiver;
pub mod schema;
pub mod types;

pub use duplicate::{Duplicate, DuplicateDetector};
pub use error::ValidationError;
pub use parser::{parse_device_file, DeviceFile, ParseError, Section};
pub use receiver::{ReceiverDenylist, ReceiverHit};
pub use schema::{classify_section, driver_schema, SectionSchema, SectionShape};
pub use types::*;

#[cfg(test)]
mod tests;
