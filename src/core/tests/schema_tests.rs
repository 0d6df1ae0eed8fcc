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

use crate::core::{
    error::ValidationError,
    parser::parse_device_file,
    schema::*,
};

/// Helper: parses `content` and returns the named section
fn section(content: &str, name: &str) -> crate::core::parser::Section {
    parse_device_file(content)
        .unwrap()
        .section(name)
        .cloned()
        .unwrap()
}

#[test]
fn test_device_schema_accepts_minimal_section() {
    let device = section(
        "[Device]\nName=Foo\nDriver=hidpp20\nDeviceMatch=usb:1234:5678\nDeviceType=mouse\n",
        "Device",
    );
    assert!(DEVICE_SCHEMA.check(&device).is_ok());
}

#[test]
fn test_device_schema_accepts_led_types() {
    let device = section(
        "[Device]\nName=Foo\nDriver=asus\nDeviceMatch=usb:0b05:1910\nDeviceType=mouse\nLedTypes=logo;side\n",
        "Device",
    );
    assert!(DEVICE_SCHEMA.check(&device).is_ok());
}

#[test]
fn test_device_schema_missing_key() {
    let device = section("[Device]\nName=Foo\nDriver=hidpp20\nDeviceMatch=usb:1234:5678\n", "Device");
    assert_eq!(
        DEVICE_SCHEMA.check(&device),
        Err(ValidationError::MissingKey {
            section: "Device".to_string(),
            key: "DeviceType",
        })
    );
}

#[test]
fn test_unknown_key_rejected_regardless_of_value() {
    for value in ["", "1", "usb:1234:5678"] {
        let content = format!(
            "[Device]\nName=Foo\nDriver=hidpp20\nDeviceMatch=usb:1234:5678\nDeviceType=mouse\nSvg={}\n",
            value
        );
        let device = section(&content, "Device");
        assert_eq!(
            DEVICE_SCHEMA.check(&device),
            Err(ValidationError::UnknownKey {
                section: "Device".to_string(),
                key: "Svg".to_string(),
            })
        );
    }
}

#[test]
fn test_device_schema_routes_values_to_field_parsers() {
    let device = section(
        "[Device]\nName=Foo\nDriver=hidpp20\nDeviceMatch=usb:1234:5678\nDeviceType=trackball\n",
        "Device",
    );
    assert!(matches!(
        DEVICE_SCHEMA.check(&device),
        Err(ValidationError::UnknownValue { field: "DeviceType", .. })
    ));

    let device = section(
        "[Device]\nName=Foo\nDriver=hidpp20\nDeviceMatch=usb:1234:56789\nDeviceType=mouse\n",
        "Device",
    );
    assert!(matches!(
        DEVICE_SCHEMA.check(&device),
        Err(ValidationError::Format { field: "DeviceMatch", .. })
    ));
}

#[test]
fn test_dpi_range_and_list_conflict() {
    for driver in ["hidpp10", "steelseries"] {
        let name = driver_section_name(driver);
        let content = format!("[{}]\nDpiRange=100:16000@50\nDpiList=400;800\n", name);
        let driver_section = section(&content, &name);

        let schema = driver_schema(driver).unwrap();
        assert_eq!(
            schema.check(&driver_section),
            Err(ValidationError::Conflict {
                section: name.clone(),
                first: "DpiRange",
                second: "DpiList",
            }),
            "{} should reject DpiRange together with DpiList",
            driver
        );
    }
}

#[test]
fn test_hidpp10_section() {
    let ok = section(
        "[Driver/hidpp10]\nProfiles=3\nProfileType=G500\nDpiList=400;800;1600\nDeviceIndex=1\nLeds=2\n",
        "Driver/hidpp10",
    );
    assert!(HIDPP10_SCHEMA.check(&ok).is_ok());

    let bad_profiles = section("[Driver/hidpp10]\nProfiles=12\n", "Driver/hidpp10");
    assert!(matches!(
        HIDPP10_SCHEMA.check(&bad_profiles),
        Err(ValidationError::Format { field: "Profiles", .. })
    ));
}

#[test]
fn test_hidpp20_device_index() {
    let ok = section("[Driver/hidpp20]\nDeviceIndex=1\n", "Driver/hidpp20");
    assert!(HIDPP20_SCHEMA.check(&ok).is_ok());

    let zero = section("[Driver/hidpp20]\nDeviceIndex=0\n", "Driver/hidpp20");
    assert!(matches!(
        HIDPP20_SCHEMA.check(&zero),
        Err(ValidationError::Format { field: "DeviceIndex", .. })
    ));
}

#[test]
fn test_asus_section() {
    let ok = section(
        "[Driver/asus]\nButtons=8\nDpiRange=100:16000@50\nQuirks=DOUBLE_DPI;STRIX_PROFILE\nLedModes=ON;BREATHING\n",
        "Driver/asus",
    );
    assert!(ASUS_SCHEMA.check(&ok).is_ok());

    let bad = section("[Driver/asus]\nQuirks=TURBO\n", "Driver/asus");
    assert!(matches!(
        ASUS_SCHEMA.check(&bad),
        Err(ValidationError::UnknownValue { .. })
    ));
}

#[test]
fn test_steelseries_quirk() {
    let ok = section("[Driver/steelseries]\nDeviceVersion=2\nQuirk=Rival100\n", "Driver/steelseries");
    assert!(STEELSERIES_SCHEMA.check(&ok).is_ok());

    let bad = section("[Driver/steelseries]\nQuirk=Rival600\n", "Driver/steelseries");
    assert!(STEELSERIES_SCHEMA.check(&bad).is_err());
}

#[test]
fn test_classify_section() {
    assert_eq!(classify_section("Device", "hidpp20"), SectionShape::Device);
    assert_eq!(
        classify_section("Driver/hidpp20", "hidpp20"),
        SectionShape::Driver(&HIDPP20_SCHEMA)
    );
    assert_eq!(
        classify_section("Driver/roccat", "roccat"),
        SectionShape::UnsupportedDriver
    );
    assert_eq!(
        classify_section("Driver/hidpp10", "hidpp20"),
        SectionShape::Unexpected
    );
    assert_eq!(classify_section("Extra", "hidpp20"), SectionShape::Unexpected);
}

#[test]
fn test_classify_sinowealth_sections() {
    assert_eq!(
        classify_section("Driver/sinowealth/devices/A1B2", SINOWEALTH_DRIVER),
        SectionShape::SinowealthDevice { version: "A1B2" }
    );
    assert_eq!(
        classify_section("Driver/sinowealth", SINOWEALTH_DRIVER),
        SectionShape::UnsupportedDriver
    );
    assert_eq!(
        classify_section("Driver/hidpp20", SINOWEALTH_DRIVER),
        SectionShape::Unexpected
    );
    // Device sections only have meaning for the sinowealth driver
    assert_eq!(
        classify_section("Driver/sinowealth/devices/A1B2", "hidpp20"),
        SectionShape::Unexpected
    );
}

#[test]
fn test_sinowealth_device_section() {
    let name = "Driver/sinowealth/devices/A1B2";
    let ok = section(
        "[Driver/sinowealth/devices/A1B2]\nDeviceName=Glorious Model O\nLedType=RGB\nSensorType=PMW3360\n",
        name,
    );
    assert!(check_sinowealth_device(&ok, "A1B2").is_ok());

    let missing = section("[Driver/sinowealth/devices/A1B2]\nDeviceName=Glorious Model O\n", name);
    assert!(matches!(
        check_sinowealth_device(&missing, "A1B2"),
        Err(ValidationError::MissingKey { key: "LedType", .. })
    ));

    assert!(matches!(
        check_sinowealth_device(&ok, "A1B"),
        Err(ValidationError::Format { field: "firmware version", .. })
    ));
}
