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

//! src/core/fields.rs
//!
//! Value-format checkers for typed device file fields
//!
//! Each parser decides whether one raw string conforms to one field type.
//! Acceptance means *canonical* form, not merely a successful parse: the
//! parsed value must render back to exactly the input. A value like
//! `usb:46D:C52B` names a real device but is still rejected, so the
//! database keeps a single spelling per ID.
//!
//! All functions here are pure. They never touch the filesystem and hold
//! no state between calls.

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::core::error::ValidationError;
use crate::core::types::{
    AsusLedMode, AsusQuirk, BusType, DeviceMatch, DeviceType, DpiList, DpiRange, LedType,
    ProfileType, SteelseriesQuirk,
};

/// Lowest permitted minimum of a `DpiRange`
pub const DPI_RANGE_MIN_LOWER: u32 = 0;
/// Highest permitted minimum of a `DpiRange`
pub const DPI_RANGE_MIN_UPPER: u32 = 400;
/// Lowest permitted maximum of a `DpiRange`
pub const DPI_RANGE_MAX_LOWER: u32 = 2000;
/// Highest permitted maximum of a `DpiRange`
pub const DPI_RANGE_MAX_UPPER: u32 = 36000;
/// Upper bound (inclusive) of the `DpiRange` step size
pub const DPI_RANGE_STEPS_UPPER: f64 = 100.0;
/// Upper bound (inclusive) of every `DpiList` entry
pub const DPI_LIST_MAX: u32 = 12000;

/// Characters that may not appear in a data file path
pub const ILLEGAL_FILE_NAME_CHARS: &[char] = &['[', ']', '{', '}', '(', ')'];

static DPI_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+):([0-9]+)@([0-9.]+)$").expect("DpiRange pattern should be valid regex")
});

/// Splits a `;`-separated value, skipping empty tokens
fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split(';').filter(|token| !token.is_empty())
}

/// Parses one 4-digit hex ID and checks it is already canonical
fn parse_hex_id(field: &'static str, value: &str, id: &str) -> Result<u16, ValidationError> {
    let parsed = u16::from_str_radix(id, 16)
        .map_err(|_| ValidationError::format(field, value, format!("'{}' is not a hex ID", id)))?;

    if format!("{:04x}", parsed) != id {
        return Err(ValidationError::format(
            field,
            value,
            format!("'{}' must be written as '{:04x}'", id, parsed),
        ));
    }

    Ok(parsed)
}

/// Parses a `DeviceMatch` value
///
/// Format: `bus:vid:pid[;bus:vid:pid...][;]`
///
/// Empty segments (such as the one left by a trailing `;`) are ignored.
///
/// # Example
/// ```
/// use ratbag_devicedb::core::fields::parse_device_match;
///
/// let matches = parse_device_match("usb:046d:c077;bluetooth:046d:b01a;")?;
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[1].to_string(), "bluetooth:046d:b01a");
/// # Ok::<(), ratbag_devicedb::core::ValidationError>(())
/// ```
pub fn parse_device_match(value: &str) -> Result<Vec<DeviceMatch>, ValidationError> {
    const FIELD: &str = "DeviceMatch";

    tokens(value)
        .map(|entry| {
            let parts: Vec<&str> = entry.split(':').collect();
            let [bus, vendor, product] = parts.as_slice() else {
                return Err(ValidationError::format(
                    FIELD,
                    value,
                    format!("'{}' must have exactly 3 ':'-separated parts", entry),
                ));
            };

            let bus = BusType::from_str(bus).map_err(|_| {
                ValidationError::format(FIELD, value, format!("unknown bus type '{}'", bus))
            })?;

            Ok(DeviceMatch {
                bus,
                vendor: parse_hex_id(FIELD, value, vendor)?,
                product: parse_hex_id(FIELD, value, product)?,
            })
        })
        .collect()
}

/// Parses a `DpiRange` value
///
/// Format: `min:max@steps`, e.g. `100:16000@50` or `200:8200@0.5`.
///
/// Bounds: min in [0, 400], max in [2000, 36000], steps in (0, 100].
/// The input must equal the canonical rendering of the parsed triple, so
/// `0:2000@1.0` and `0:2000@1.50` are both rejected.
pub fn parse_dpi_range(value: &str) -> Result<DpiRange, ValidationError> {
    const FIELD: &str = "DpiRange";

    let captures = DPI_RANGE_PATTERN
        .captures(value)
        .ok_or_else(|| ValidationError::format(FIELD, value, "expected 'min:max@steps'"))?;

    let number = |index: usize| captures.get(index).map(|m| m.as_str()).unwrap_or_default();

    let min: u32 = number(1)
        .parse()
        .map_err(|_| ValidationError::format(FIELD, value, "minimum is not a number"))?;
    let max: u32 = number(2)
        .parse()
        .map_err(|_| ValidationError::format(FIELD, value, "maximum is not a number"))?;
    let steps: f64 = number(3)
        .parse()
        .map_err(|_| ValidationError::format(FIELD, value, "step size is not a number"))?;

    if !(DPI_RANGE_MIN_LOWER..=DPI_RANGE_MIN_UPPER).contains(&min) {
        return Err(ValidationError::format(
            FIELD,
            value,
            format!("minimum {} outside [{}, {}]", min, DPI_RANGE_MIN_LOWER, DPI_RANGE_MIN_UPPER),
        ));
    }

    if !(DPI_RANGE_MAX_LOWER..=DPI_RANGE_MAX_UPPER).contains(&max) {
        return Err(ValidationError::format(
            FIELD,
            value,
            format!("maximum {} outside [{}, {}]", max, DPI_RANGE_MAX_LOWER, DPI_RANGE_MAX_UPPER),
        ));
    }

    if !(steps > 0.0 && steps <= DPI_RANGE_STEPS_UPPER) {
        return Err(ValidationError::format(
            FIELD,
            value,
            format!("step size {} outside (0, {}]", steps, DPI_RANGE_STEPS_UPPER),
        ));
    }

    let range = DpiRange { min, max, steps };
    let canonical = range.to_string();
    if canonical != value {
        return Err(ValidationError::format(
            FIELD,
            value,
            format!("must be written as '{}'", canonical),
        ));
    }

    Ok(range)
}

/// Parses a `DpiList` value
///
/// Format: `dpi;dpi;...[;]`. Whitespace around an entry is ignored. Every
/// entry lies in [0, 12000] and each one must be strictly greater than the
/// one before it.
pub fn parse_dpi_list(value: &str) -> Result<DpiList, ValidationError> {
    const FIELD: &str = "DpiList";

    let mut entries: Vec<&str> = value.split(';').collect();
    if entries.last().is_some_and(|last| last.is_empty()) {
        entries.pop();
    }

    let mut dpis: Vec<u32> = Vec::with_capacity(entries.len());

    for entry in entries {
        let dpi: u32 = entry.trim().parse().map_err(|_| {
            ValidationError::format(FIELD, value, format!("'{}' is not a DPI value", entry))
        })?;

        if dpi > DPI_LIST_MAX {
            return Err(ValidationError::format(
                FIELD,
                value,
                format!("{} outside [0, {}]", dpi, DPI_LIST_MAX),
            ));
        }

        if let Some(&previous) = dpis.last() {
            if dpi <= previous {
                return Err(ValidationError::Order {
                    value: value.to_string(),
                    previous,
                    current: dpi,
                });
            }
        }

        dpis.push(dpi);
    }

    Ok(DpiList(dpis))
}

/// Parses the `DeviceType` key of the `[Device]` section
pub fn parse_device_type(value: &str) -> Result<DeviceType, ValidationError> {
    value.parse()
}

/// Parses `LedTypes`, a `;`-separated list of LED zones
pub fn parse_led_types(value: &str) -> Result<Vec<LedType>, ValidationError> {
    tokens(value).map(LedType::from_str).collect()
}

/// Parses the hidpp10 `ProfileType` key
pub fn parse_profile_type(value: &str) -> Result<ProfileType, ValidationError> {
    value.parse()
}

/// Parses the asus `Quirks` key
///
/// Every `;`-separated token must be a known quirk, including empty ones.
pub fn parse_asus_quirks(value: &str) -> Result<Vec<AsusQuirk>, ValidationError> {
    value.split(';').map(AsusQuirk::from_str).collect()
}

/// Parses the asus `LedModes` key
pub fn parse_asus_led_modes(value: &str) -> Result<Vec<AsusLedMode>, ValidationError> {
    value.split(';').map(AsusLedMode::from_str).collect()
}

/// Parses the steelseries `Quirk` key (a single token)
pub fn parse_steelseries_quirk(value: &str) -> Result<SteelseriesQuirk, ValidationError> {
    value.parse()
}

/// Parses a HID++ `DeviceIndex`
///
/// The value is hexadecimal (with or without a `0x` prefix) and must lie
/// in (0, 0xFF].
pub fn parse_device_index(value: &str) -> Result<u8, ValidationError> {
    const FIELD: &str = "DeviceIndex";

    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    let index = u32::from_str_radix(digits, 16)
        .map_err(|_| ValidationError::format(FIELD, value, "not a hexadecimal number"))?;

    match u8::try_from(index) {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(ValidationError::format(FIELD, value, "must be in (0, 0xff]")),
    }
}

/// Parses a small positive count such as hidpp10 `Profiles` or `Leds`
///
/// The value must be a decimal integer in (0, 10).
pub fn parse_small_count(field: &'static str, value: &str) -> Result<u8, ValidationError> {
    let count: i64 = value
        .parse()
        .map_err(|_| ValidationError::format(field, value, "not an integer"))?;

    if !(1..10).contains(&count) {
        return Err(ValidationError::format(field, value, "must be in (0, 10)"));
    }

    Ok(count as u8)
}

/// Rejects data file paths containing brackets, braces or parentheses
///
/// These characters break the glob patterns used when the database is
/// installed.
pub fn validate_file_name(path: &str) -> Result<(), ValidationError> {
    let found: String = path
        .chars()
        .filter(|c| ILLEGAL_FILE_NAME_CHARS.contains(c))
        .collect();

    if found.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::IllegalName {
            path: path.to_string(),
            characters: found,
        })
    }
}

