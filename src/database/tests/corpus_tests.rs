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

use super::fixtures::*;
use crate::core::ReceiverDenylist;
use crate::database::*;

/// Helper: scans every device file of a temporary database
fn scan(files: &[(&str, &str)]) -> MatchScan {
    let (_temp_dir, dir) = create_test_database(files);
    let database = DeviceDatabase::open(dir).unwrap();
    MatchScan::collect(&database.device_files().unwrap())
}

#[test]
fn test_duplicate_match_reported_once() {
    let scan = scan(&[
        ("a.device", device_file("hidpp20", "usb:046d:1234").as_str()),
        ("b.device", device_file("hidpp20", "usb:046d:1234").as_str()),
    ]);

    let report = CorpusReport::duplicates(&scan);

    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].entry, "usb:046d:1234");
    assert_eq!(report.duplicates[0].first_file, "a.device");
    assert_eq!(report.duplicates[0].second_file, "b.device");
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_unique_matches_pass() {
    let scan = scan(&[
        ("a.device", device_file("hidpp20", "usb:046d:1234;").as_str()),
        ("b.device", device_file("hidpp20", "usb:046d:5678;").as_str()),
    ]);

    let report = CorpusReport::full(&scan, &ReceiverDenylist::new());

    assert!(!report.has_failures());
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_receiver_id_flagged() {
    let scan = scan(&[
        ("unifying.device", device_file("hidpp10", "usb:046d:c52b").as_str()),
        ("g502.device", device_file("hidpp20", "usb:046d:c08b").as_str()),
    ]);

    let report = CorpusReport::receivers(&scan, &ReceiverDenylist::new());

    assert_eq!(report.receivers.len(), 1);
    assert_eq!(report.receivers[0].entry, "usb:046d:c52b");
    assert_eq!(report.receivers[0].file, "unifying.device");
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_receiver_file_is_schema_valid() {
    // The receiver check is independent of schema validation
    let (_temp_dir, dir) = create_test_database(&[(
        "unifying.device",
        device_file("hidpp10", "usb:046d:c52b").as_str(),
    )]);

    let database = DeviceDatabase::open(dir).unwrap();
    let paths = database.device_files().unwrap();

    assert!(!FileValidator::new().validate_paths(&paths).has_failures());
    assert!(CorpusReport::receivers(&MatchScan::collect(&paths), &ReceiverDenylist::new())
        .has_failures());
}

#[test]
fn test_unparsable_files_are_skipped() {
    let scan = scan(&[
        ("a.device", device_file("hidpp20", "usb:046d:1234").as_str()),
        ("b.device", "[Device]\nName=A\nName=B\n"),
        ("c.device", "[Driver/hidpp20]\nDeviceIndex=1\n"),
        ("d.device", "[Device]\nName=No match\n"),
    ]);

    assert_eq!(scan.records.len(), 1);

    let skipped: Vec<&str> = scan.skipped.iter().map(|s| s.file.as_str()).collect();
    assert_eq!(skipped, vec!["b.device", "c.device", "d.device"]);

    let report = CorpusReport::full(&scan, &ReceiverDenylist::new());
    assert!(!report.has_failures(), "Skipped files must not fail the checks");
    assert_eq!(report.skipped.len(), 3);
}

#[test]
fn test_scan_records_name_and_driver() {
    let scan = scan(&[("a.device", MINIMAL_HIDPP20)]);

    assert_eq!(scan.records[0].name.as_deref(), Some("Foo"));
    assert_eq!(scan.records[0].driver.as_deref(), Some("hidpp20"));
    assert_eq!(scan.records[0].device_match, "usb:1234:5678");
}
