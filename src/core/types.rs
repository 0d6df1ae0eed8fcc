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

//! src/core/types.rs
//!
//! Core type definitions for the device database
//!
//! This module defines the typed values that device files are checked
//! against:
//! - `DeviceMatch`: bus/vendor/product triple binding a file to hardware
//! - `DpiRange` / `DpiList`: the two ways a driver section describes DPI
//! - Closed enumerations (`DeviceType`, `LedType`, quirks, ...)
//!
//! Every type renders back to its canonical string with `Display`. The
//! field parsers rely on this to reject alternate spellings of a value.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;

/// Declares a closed set of string tokens with `FromStr` and `Display`.
///
/// Tokens are matched exactly (case-sensitive), the same way ratbagd reads
/// them from the keyfile.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Field name used in error messages
            pub const FIELD: &'static str = $field;

            /// Every accepted value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The token as written in a device file
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    _ => Err(ValidationError::UnknownValue {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

token_enum! {
    /// Bus a device is attached through
    BusType, "bus type" {
        Usb => "usb",
        Bluetooth => "bluetooth",
    }
}

token_enum! {
    /// Kind of input device described by a file
    DeviceType, "DeviceType" {
        Mouse => "mouse",
        Keyboard => "keyboard",
        Other => "other",
    }
}

token_enum! {
    /// Physical LED zones a device may advertise
    LedType, "LedTypes" {
        Logo => "logo",
        Side => "side",
        Battery => "battery",
        Dpi => "dpi",
        Switches => "switches",
    }
}

token_enum! {
    /// On-board profile layout of HID++ 1.0 mice
    ProfileType, "ProfileType" {
        G9 => "G9",
        G500 => "G500",
        G700 => "G700",
    }
}

token_enum! {
    /// Behavioural flags understood by the asus driver
    AsusQuirk, "asus quirk" {
        DoubleDpi => "DOUBLE_DPI",
        StrixProfile => "STRIX_PROFILE",
        RawBrightness => "RAW_BRIGHTNESS",
        SeparateXyDpi => "SEPARATE_XY_DPI",
        SeparateLeds => "SEPARATE_LEDS",
        ButtonsSecondary => "BUTTONS_SECONDARY",
    }
}

token_enum! {
    /// LED effects supported by the asus driver
    AsusLedMode, "asus LED mode" {
        On => "ON",
        Breathing => "BREATHING",
        Cycle => "CYCLE",
    }
}

token_enum! {
    /// Behavioural flags understood by the steelseries driver
    SteelseriesQuirk, "steelseries quirk" {
        Rival100 => "Rival100",
        SenseiRaw => "SenseiRAW",
    }
}

/// A single bus/vendor/product triple from a `DeviceMatch` value
///
/// Vendor and product IDs are stored numerically. `Display` renders the
/// canonical `bus:vvvv:pppp` form with lowercase, zero-padded hex.
///
/// # Example
/// ```
/// use ratbag_devicedb::core::types::{BusType, DeviceMatch};
///
/// let m = DeviceMatch { bus: BusType::Usb, vendor: 0x046d, product: 0xc52b };
/// assert_eq!(m.to_string(), "usb:046d:c52b");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct DeviceMatch {
    pub bus: BusType,
    pub vendor: u16,
    pub product: u16,
}

impl fmt::Display for DeviceMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:04x}:{:04x}", self.bus, self.vendor, self.product)
    }
}

/// Continuous DPI range with a fixed step size
///
/// Serialised as `min:max@steps`. Integral steps render without a
/// fractional part (`@50`, never `@50.0`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DpiRange {
    pub min: u32,
    pub max: u32,
    pub steps: f64,
}

impl fmt::Display for DpiRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@", self.min, self.max)?;

        if self.steps.fract() == 0.0 {
            write!(f, "{}", self.steps as u64)
        } else if self.steps.abs() < 1e-4 {
            // Tiny values use exponent notation, never a plain decimal
            write!(f, "{:e}", self.steps)
        } else {
            write!(f, "{}", self.steps)
        }
    }
}

/// Discrete, strictly increasing list of DPI values
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DpiList(pub Vec<u32>);

impl DpiList {
    pub fn values(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for DpiList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|dpi| dpi.to_string())
            .collect::<Vec<_>>()
            .join(";");
        f.write_str(&joined)
    }
}
