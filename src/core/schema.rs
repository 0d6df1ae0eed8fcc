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

//! src/core/schema.rs
//!
//! Static schema registry for device file sections
//!
//! Every section kind has a `SectionSchema`: which keys must be present,
//! which keys may be present, which field parser checks each key, and
//! which keys exclude each other. The schemas are plain `static` data and
//! never change at runtime.
//!
//! # Whitelisting
//! Keys are validated against an allow-list. Anything not listed is an
//! `UnknownKey` error, regardless of its value. A typo such as `DpiLsit`
//! would otherwise be silently ignored by ratbagd.
//!
//! # Section shapes
//! `classify_section` maps a section name to a `SectionShape` given the
//! file's driver. The sinowealth driver keeps one device file for several
//! firmware variants, so its per-device sections are named
//! `Driver/sinowealth/devices/<version>` instead of the usual single
//! `Driver/<driver>` section. That is a separate shape, not a special
//! case on the common path.

use crate::core::error::ValidationError;
use crate::core::fields::{
    parse_asus_led_modes, parse_asus_quirks, parse_device_index, parse_device_match,
    parse_device_type, parse_dpi_list, parse_dpi_range, parse_led_types, parse_profile_type,
    parse_small_count, parse_steelseries_quirk,
};
use crate::core::parser::Section;

/// Name of the mandatory device section
pub const DEVICE_SECTION: &str = "Device";

/// Prefix of every driver section name
pub const DRIVER_SECTION_PREFIX: &str = "Driver/";

/// Prefix of the per-firmware sections used by the sinowealth driver
pub const SINOWEALTH_DEVICE_SECTION_PREFIX: &str = "Driver/sinowealth/devices/";

/// Length of the firmware version suffix of a sinowealth device section
pub const SINOWEALTH_FW_VERSION_LEN: usize = 4;

/// Driver whose device sections use the per-firmware naming scheme
pub const SINOWEALTH_DRIVER: &str = "sinowealth";

/// Field type a key's value is checked against
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Free text, never checked
    Text,
    DeviceMatch,
    DeviceType,
    LedTypes,
    DpiRange,
    DpiList,
    ProfileType,
    DeviceIndex,
    /// Decimal integer in (0, 10)
    SmallCount,
    AsusQuirks,
    AsusLedModes,
    SteelseriesQuirk,
}

impl FieldKind {
    /// Runs the matching field parser, discarding the parsed value
    pub fn check(&self, key: &'static str, value: &str) -> Result<(), ValidationError> {
        match self {
            FieldKind::Text => Ok(()),
            FieldKind::DeviceMatch => parse_device_match(value).map(drop),
            FieldKind::DeviceType => parse_device_type(value).map(drop),
            FieldKind::LedTypes => parse_led_types(value).map(drop),
            FieldKind::DpiRange => parse_dpi_range(value).map(drop),
            FieldKind::DpiList => parse_dpi_list(value).map(drop),
            FieldKind::ProfileType => parse_profile_type(value).map(drop),
            FieldKind::DeviceIndex => parse_device_index(value).map(drop),
            FieldKind::SmallCount => parse_small_count(key, value).map(drop),
            FieldKind::AsusQuirks => parse_asus_quirks(value).map(drop),
            FieldKind::AsusLedModes => parse_asus_led_modes(value).map(drop),
            FieldKind::SteelseriesQuirk => parse_steelseries_quirk(value).map(drop),
        }
    }
}

/// A permitted key and the field type of its value
#[derive(Clone, Copy, Debug)]
pub struct KeyRule {
    pub key: &'static str,
    pub kind: FieldKind,
}

const fn rule(key: &'static str, kind: FieldKind) -> KeyRule {
    KeyRule { key, kind }
}

const fn text(key: &'static str) -> KeyRule {
    KeyRule {
        key,
        kind: FieldKind::Text,
    }
}

/// Required and permitted keys of one section kind
#[derive(Debug)]
pub struct SectionSchema {
    /// Human-readable name of the section kind
    pub name: &'static str,

    /// Keys that must be present
    pub required: &'static [&'static str],

    /// Every permitted key (required ones included) with its field type
    pub keys: &'static [KeyRule],

    /// Pairs of keys that may not appear together
    pub exclusive: &'static [(&'static str, &'static str)],
}

impl SectionSchema {
    pub fn rule(&self, key: &str) -> Option<&KeyRule> {
        self.keys.iter().find(|rule| rule.key == key)
    }

    pub fn permits(&self, key: &str) -> bool {
        self.rule(key).is_some()
    }

    /// Validates one section against this schema
    ///
    /// Checks run in a fixed order and stop at the first violation:
    /// 1. Every key is permitted
    /// 2. Every required key is present
    /// 3. No mutually exclusive pair is present
    /// 4. Every value passes its field parser, in schema order
    pub fn check(&self, section: &Section) -> Result<(), ValidationError> {
        if let Some(key) = section.keys().find(|key| !self.permits(key)) {
            return Err(ValidationError::UnknownKey {
                section: section.name.clone(),
                key: key.to_string(),
            });
        }

        if let Some(key) = self.required.iter().copied().find(|key| !section.contains_key(key)) {
            return Err(ValidationError::MissingKey {
                section: section.name.clone(),
                key,
            });
        }

        for &(first, second) in self.exclusive {
            if section.contains_key(first) && section.contains_key(second) {
                return Err(ValidationError::Conflict {
                    section: section.name.clone(),
                    first,
                    second,
                });
            }
        }

        for rule in self.keys {
            if let Some(value) = section.get(rule.key) {
                rule.kind.check(rule.key, value)?;
            }
        }

        Ok(())
    }
}

pub static DEVICE_SCHEMA: SectionSchema = SectionSchema {
    name: DEVICE_SECTION,
    required: &["Name", "Driver", "DeviceMatch", "DeviceType"],
    keys: &[
        text("Name"),
        text("Driver"),
        rule("DeviceMatch", FieldKind::DeviceMatch),
        rule("DeviceType", FieldKind::DeviceType),
        rule("LedTypes", FieldKind::LedTypes),
    ],
    exclusive: &[],
};

pub static ASUS_SCHEMA: SectionSchema = SectionSchema {
    name: "asus",
    required: &[],
    keys: &[
        text("ButtonMapping"),
        text("ButtonMappingSecondary"),
        text("Buttons"),
        rule("DpiRange", FieldKind::DpiRange),
        text("Dpis"),
        text("Leds"),
        rule("LedModes", FieldKind::AsusLedModes),
        text("Profiles"),
        rule("Quirks", FieldKind::AsusQuirks),
        text("Wireless"),
    ],
    exclusive: &[],
};

pub static HIDPP10_SCHEMA: SectionSchema = SectionSchema {
    name: "hidpp10",
    required: &[],
    keys: &[
        rule("Profiles", FieldKind::SmallCount),
        rule("ProfileType", FieldKind::ProfileType),
        rule("DpiRange", FieldKind::DpiRange),
        rule("DpiList", FieldKind::DpiList),
        rule("DeviceIndex", FieldKind::DeviceIndex),
        rule("Leds", FieldKind::SmallCount),
    ],
    exclusive: &[("DpiRange", "DpiList")],
};

pub static HIDPP20_SCHEMA: SectionSchema = SectionSchema {
    name: "hidpp20",
    required: &[],
    keys: &[
        text("Buttons"),
        rule("DeviceIndex", FieldKind::DeviceIndex),
        text("Leds"),
        text("ReportRate"),
        text("Quirk"),
    ],
    exclusive: &[],
};

pub static STEELSERIES_SCHEMA: SectionSchema = SectionSchema {
    name: "steelseries",
    required: &[],
    keys: &[
        text("Buttons"),
        text("DeviceVersion"),
        rule("DpiList", FieldKind::DpiList),
        rule("DpiRange", FieldKind::DpiRange),
        text("Leds"),
        text("MacroLength"),
        rule("Quirk", FieldKind::SteelseriesQuirk),
    ],
    exclusive: &[("DpiRange", "DpiList")],
};

pub static SINOWEALTH_DEVICE_SCHEMA: SectionSchema = SectionSchema {
    name: "sinowealth device",
    required: &["DeviceName", "LedType"],
    keys: &[
        text("DeviceName"),
        text("LedType"),
        text("Buttons"),
        text("Profiles"),
        text("SensorType"),
    ],
    exclusive: &[],
};

/// Looks up the schema of a `Driver/<driver>` section
///
/// Returns `None` for drivers without a schema.
pub fn driver_schema(driver: &str) -> Option<&'static SectionSchema> {
    match driver {
        "asus" => Some(&ASUS_SCHEMA),
        "hidpp10" => Some(&HIDPP10_SCHEMA),
        "hidpp20" => Some(&HIDPP20_SCHEMA),
        "steelseries" => Some(&STEELSERIES_SCHEMA),
        _ => None,
    }
}

/// Name of the driver section a device file may carry
pub fn driver_section_name(driver: &str) -> String {
    format!("{}{}", DRIVER_SECTION_PREFIX, driver)
}

/// What a section is, given the driver of its file
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionShape<'a> {
    /// The `[Device]` section
    Device,

    /// `[Driver/<driver>]` of a driver with a schema
    Driver(&'static SectionSchema),

    /// `[Driver/<driver>]` of a driver without a schema
    UnsupportedDriver,

    /// `[Driver/sinowealth/devices/<version>]` in a sinowealth file
    SinowealthDevice { version: &'a str },

    /// Anything else: not allowed in this file
    Unexpected,
}

impl PartialEq for SectionSchema {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/// Classifies a section name for a file using `driver`
pub fn classify_section<'a>(name: &'a str, driver: &str) -> SectionShape<'a> {
    if name == DEVICE_SECTION {
        return SectionShape::Device;
    }

    if driver == SINOWEALTH_DRIVER {
        if let Some(version) = name.strip_prefix(SINOWEALTH_DEVICE_SECTION_PREFIX) {
            return SectionShape::SinowealthDevice { version };
        }
    }

    if name != driver_section_name(driver) {
        return SectionShape::Unexpected;
    }

    match driver_schema(driver) {
        Some(schema) => SectionShape::Driver(schema),
        None => SectionShape::UnsupportedDriver,
    }
}

/// Validates a sinowealth per-firmware section
///
/// The firmware version suffix must be exactly four characters long.
pub fn check_sinowealth_device(section: &Section, version: &str) -> Result<(), ValidationError> {
    if version.chars().count() != SINOWEALTH_FW_VERSION_LEN {
        return Err(ValidationError::format(
            "firmware version",
            version,
            format!(
                "section [{}] needs a {}-character suffix",
                section.name, SINOWEALTH_FW_VERSION_LEN
            ),
        ));
    }

    SINOWEALTH_DEVICE_SCHEMA.check(section)
}
