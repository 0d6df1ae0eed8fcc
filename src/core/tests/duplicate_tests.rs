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

use crate::core::{Duplicate, DuplicateDetector};

#[test]
fn test_no_duplicates_when_empty() {
    let detector = DuplicateDetector::new();
    assert!(detector.duplicates().is_empty());
    assert_eq!(detector.total_entries(), 0);
}

#[test]
fn test_no_duplicates_with_unique_entries() {
    let mut detector = DuplicateDetector::new();

    detector.add_file("a.device", "usb:046d:c08b");
    detector.add_file("b.device", "usb:046d:c08c;bluetooth:046d:b01a");

    assert!(detector.duplicates().is_empty());
    assert_eq!(detector.total_entries(), 3);
}

#[test]
fn test_detects_simple_duplicate() {
    let mut detector = DuplicateDetector::new();

    detector.add_file("a.device", "usb:046d:1234");
    detector.add_file("b.device", "usb:046d:1234");

    assert_eq!(
        detector.duplicates(),
        &[Duplicate {
            entry: "usb:046d:1234".to_string(),
            first_file: "a.device".to_string(),
            second_file: "b.device".to_string(),
        }]
    );
    assert!(detector.is_duplicate("usb:046d:1234"));
}

#[test]
fn test_third_sighting_reported_against_first_file() {
    let mut detector = DuplicateDetector::new();

    detector.add_file("a.device", "usb:046d:1234");
    detector.add_file("b.device", "usb:046d:1234");
    detector.add_file("c.device", "usb:046d:1234");

    let duplicates = detector.into_duplicates();
    assert_eq!(duplicates.len(), 2);
    assert!(duplicates.iter().all(|d| d.first_file == "a.device"));
    assert_eq!(duplicates[1].second_file, "c.device");
}

#[test]
fn test_trailing_semicolon_is_not_an_entry() {
    let mut detector = DuplicateDetector::new();

    detector.add_file("a.device", "usb:046d:1234;");
    detector.add_file("b.device", "usb:046d:5678;");

    assert!(detector.duplicates().is_empty());
}

#[test]
fn test_duplicate_within_one_file() {
    let mut detector = DuplicateDetector::new();

    detector.add_file("a.device", "usb:046d:1234;usb:046d:1234");

    assert_eq!(detector.duplicates().len(), 1);
    assert_eq!(detector.duplicates()[0].first_file, "a.device");
    assert_eq!(detector.duplicates()[0].second_file, "a.device");
}
