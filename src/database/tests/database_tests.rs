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
use crate::core::ParseError;
use crate::database::*;
use std::fs;

#[test]
fn test_open_with_valid_directory() {
    let (_temp_dir, dir) = create_test_database(&[]);

    let database = DeviceDatabase::open(dir.clone());
    assert!(database.is_ok(), "Should open an existing directory");
    assert_eq!(database.unwrap().dir(), dir.as_path());
}

#[test]
fn test_open_with_missing_directory() {
    let (_temp_dir, dir) = create_test_database(&[]);
    let missing = dir.join("nonexistent");

    match DeviceDatabase::open(missing.clone()).unwrap_err() {
        DatabaseError::NotFound(path) => assert_eq!(path, missing),
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[test]
fn test_open_with_file_path() {
    let (_temp_dir, dir) = create_test_database(&[("a.device", MINIMAL_HIDPP20)]);

    assert!(matches!(
        DeviceDatabase::open(dir.join("a.device")),
        Err(DatabaseError::NotADirectory(_))
    ));
}

#[test]
fn test_device_files_filters_and_sorts() {
    let (_temp_dir, dir) = create_test_database(&[
        ("zowie.device", MINIMAL_HIDPP20),
        ("README.md", "not a device"),
        ("asus.device", MINIMAL_HIDPP20),
        ("logitech.device.orig", MINIMAL_HIDPP20),
    ]);
    fs::create_dir(dir.join("nested.device")).unwrap();

    let database = DeviceDatabase::open(dir).unwrap();
    let names: Vec<String> = database
        .device_files()
        .unwrap()
        .iter()
        .map(|path| file_name(path))
        .collect();

    assert_eq!(names, vec!["asus.device", "zowie.device"]);
}

#[test]
fn test_load_device_file() {
    let (_temp_dir, dir) = create_test_database(&[("a.device", MINIMAL_HIDPP20)]);

    let file = load_device_file(&dir.join("a.device")).unwrap();
    assert!(file.has_section("Device"));
    assert!(file.has_section("Driver/hidpp20"));
}

#[test]
fn test_load_missing_file() {
    let (_temp_dir, dir) = create_test_database(&[]);

    assert!(matches!(
        load_device_file(&dir.join("missing.device")),
        Err(DatabaseError::Io { .. })
    ));
}

#[test]
fn test_load_malformed_file() {
    let (_temp_dir, dir) = create_test_database(&[("a.device", "[Device]\nName=A\nName=B\n")]);

    let err = load_device_file(&dir.join("a.device")).unwrap_err();
    assert_eq!(err.kind(), "parse");
    assert!(matches!(
        err,
        DatabaseError::Parse {
            source: ParseError::DuplicateKey { line: 3, .. },
            ..
        }
    ));
}
