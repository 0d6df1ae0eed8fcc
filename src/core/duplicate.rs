// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! Duplicate `DeviceMatch` detection across the device database
//!
//! Two device files claiming the same bus/vendor/product triple make
//! ratbagd's choice of driver depend on file load order. This module finds
//! such collisions using a HashMap from match entry to the first file that
//! declared it.
//!
//! # Performance
//! - Add file: O(m) where m = number of entries in its `DeviceMatch`
//! - List duplicates: O(1), they are recorded as they are found

use serde::Serialize;
use std::collections::HashMap;

/// A `DeviceMatch` entry declared by more than one file
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Duplicate {
    /// The match entry as written in the files
    pub entry: String,

    /// File that declared the entry first
    pub first_file: String,

    /// File that declared it again
    pub second_file: String,
}

/// Detects duplicate match entries in scan order.
///
/// The index keeps the *first* file for each entry, so a third sighting
/// is reported against the original declaration.
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    /// Maps each match entry to the first file using it.
    first_seen: HashMap<String, String>,

    /// Duplicates in the order they were found.
    duplicates: Vec<Duplicate>,
}

impl DuplicateDetector {
    /// Creates a new empty detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every entry of one file's `DeviceMatch` value.
    ///
    /// Entries are compared as written. Empty entries (a trailing `;`) are
    /// skipped.
    pub fn add_file(&mut self, file_name: &str, device_match: &str) {
        for entry in device_match.split(';').filter(|e| !e.is_empty()) {
            match self.first_seen.get(entry) {
                Some(first_file) => self.duplicates.push(Duplicate {
                    entry: entry.to_string(),
                    first_file: first_file.clone(),
                    second_file: file_name.to_string(),
                }),
                None => {
                    self.first_seen
                        .insert(entry.to_string(), file_name.to_string());
                }
            }
        }
    }

    /// All duplicates found so far, in scan order.
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    /// Checks if a specific entry was declared more than once.
    pub fn is_duplicate(&self, entry: &str) -> bool {
        self.duplicates.iter().any(|d| d.entry == entry)
    }

    /// Returns the number of distinct entries seen.
    pub fn total_entries(&self) -> usize {
        self.first_seen.len()
    }

    /// Consumes the detector, returning the duplicates.
    pub fn into_duplicates(self) -> Vec<Duplicate> {
        self.duplicates
    }
}
