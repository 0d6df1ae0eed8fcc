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

//! Wireless receiver denylist
//!
//! Receivers (Unifying, Nano, Lightspeed, Bolt dongles) are not input
//! devices themselves. The devices paired to them are enumerated through
//! the receiver, so a device file must never match the receiver's own ID.

use serde::Serialize;
use std::fmt;

/// Logitech vendor ID
pub const LOGITECH_VENDOR_ID: u16 = 0x046d;

/// Product IDs of Logitech receivers
///
/// Sources: linux `drivers/hid/hid-ids.h`, `drivers/hid/hid-logitech-dj.c`
/// and the Solaar device list.
pub const LOGITECH_RECEIVERS: &[(u16, &str)] = &[
    (0xc50c, "S510 receiver"),
    (0xc517, "S510 receiver 2"),
    (0xc512, "Cordless Desktop LX500"),
    (0xc513, "MX3000 receiver"),
    (0xc51b, "27MHz mouse receiver"),
    (0xc52b, "Unifying receiver"),
    (0xc52f, "Nano receiver"),
    (0xc532, "Unifying receiver 2"),
    (0xc534, "Nano receiver 2"),
    (0xc539, "Lightspeed receiver 1"),
    (0xc53f, "Lightspeed receiver 1.1"),
    (0xc53a, "Powerplay receiver"),
    (0xc545, "Lightspeed receiver 1.2"),
    (0xc547, "Lightspeed receiver 1.3"),
    (0xc548, "Bolt receiver"),
];

/// A receiver ID found in a device file
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReceiverHit {
    /// The match entry as written in the file
    pub entry: String,

    /// File declaring the entry
    pub file: String,

    /// Receiver model
    pub receiver: &'static str,
}

impl fmt::Display for ReceiverHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Receiver ID {} found in file {}", self.entry, self.file)
    }
}

/// Denylist of receiver match entries, in canonical `usb:vvvv:pppp` form
#[derive(Debug)]
pub struct ReceiverDenylist {
    entries: Vec<(String, &'static str)>,
}

impl Default for ReceiverDenylist {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiverDenylist {
    /// Builds the denylist of known Logitech receivers
    pub fn new() -> Self {
        let entries = LOGITECH_RECEIVERS
            .iter()
            .map(|(product, name)| {
                (format!("usb:{:04x}:{:04x}", LOGITECH_VENDOR_ID, product), *name)
            })
            .collect();

        Self { entries }
    }

    /// Returns the receiver model if `entry` is a denylisted ID
    pub fn lookup(&self, entry: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(id, _)| id == entry)
            .map(|(_, name)| *name)
    }

    pub fn is_receiver(&self, entry: &str) -> bool {
        self.lookup(entry).is_some()
    }

    /// Checks every entry of one file's `DeviceMatch` value
    pub fn scan_file(&self, file_name: &str, device_match: &str) -> Vec<ReceiverHit> {
        device_match
            .split(';')
            .filter_map(|entry| {
                self.lookup(entry).map(|receiver| ReceiverHit {
                    entry: entry.to_string(),
                    file: file_name.to_string(),
                    receiver,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
