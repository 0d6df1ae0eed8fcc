//! Whole-database checks.
//!
//! Unlike schema validation, these checks need every file before they can
//! conclude: a duplicate only exists relative to another file. A scan
//! first collects the `DeviceMatch` value of every readable file, then
//! the duplicate and receiver analyses run over the collected set.
//!
//! Files that cannot be read or parsed, or that lack `[Device]` /
//! `DeviceMatch`, are listed as skipped. Reporting them is the job of
//! schema validation, so they never fail a corpus check on their own.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::core::duplicate::{Duplicate, DuplicateDetector};
use crate::core::receiver::{ReceiverDenylist, ReceiverHit};
use crate::core::schema::DEVICE_SECTION;
use crate::database::{file_name, load_device_file};

/// A file left out of the corpus checks
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// One file's identity as seen by the corpus checks
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchRecord {
    /// Base name of the file
    pub file: String,

    /// Raw `DeviceMatch` value
    pub device_match: String,

    /// `Name` from `[Device]`, if present
    pub name: Option<String>,

    /// `Driver` from `[Device]`, if present
    pub driver: Option<String>,
}

/// `DeviceMatch` values of every usable file, in scan order
#[derive(Clone, Debug, Default, Serialize)]
pub struct MatchScan {
    pub records: Vec<MatchRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl MatchScan {
    /// Loads every path and collects its `DeviceMatch` value
    pub fn collect(paths: &[PathBuf]) -> Self {
        let mut scan = MatchScan::default();

        for path in paths {
            let file = file_name(path);

            let parsed = match load_device_file(path) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Skipping {}: {}", file, e);
                    scan.skipped.push(SkippedFile {
                        file,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let Some(device) = parsed.section(DEVICE_SECTION) else {
                warn!("Skipping {}: no [{}] section", file, DEVICE_SECTION);
                scan.skipped.push(SkippedFile {
                    file,
                    reason: format!("missing section [{}]", DEVICE_SECTION),
                });
                continue;
            };

            let Some(device_match) = device.get("DeviceMatch") else {
                warn!("Skipping {}: no DeviceMatch", file);
                scan.skipped.push(SkippedFile {
                    file,
                    reason: "missing key 'DeviceMatch'".to_string(),
                });
                continue;
            };

            debug!("{}: DeviceMatch={}", file, device_match);
            scan.records.push(MatchRecord {
                file,
                device_match: device_match.to_string(),
                name: device.get("Name").map(str::to_string),
                driver: device.get("Driver").map(str::to_string),
            });
        }

        scan
    }

    /// Finds match entries declared by more than one file
    pub fn find_duplicates(&self) -> Vec<Duplicate> {
        let mut detector = DuplicateDetector::new();
        for record in &self.records {
            detector.add_file(&record.file, &record.device_match);
        }
        detector.into_duplicates()
    }

    /// Finds match entries naming a wireless receiver
    pub fn find_receivers(&self, denylist: &ReceiverDenylist) -> Vec<ReceiverHit> {
        self.records
            .iter()
            .flat_map(|record| denylist.scan_file(&record.file, &record.device_match))
            .collect()
    }
}

/// Results of the corpus checks that were run
#[derive(Clone, Debug, Default, Serialize)]
pub struct CorpusReport {
    pub duplicates: Vec<Duplicate>,
    pub receivers: Vec<ReceiverHit>,
    pub skipped: Vec<SkippedFile>,
}

impl CorpusReport {
    /// Runs only the duplicate check
    pub fn duplicates(scan: &MatchScan) -> Self {
        Self {
            duplicates: scan.find_duplicates(),
            receivers: Vec::new(),
            skipped: scan.skipped.clone(),
        }
    }

    /// Runs only the receiver check
    pub fn receivers(scan: &MatchScan, denylist: &ReceiverDenylist) -> Self {
        Self {
            duplicates: Vec::new(),
            receivers: scan.find_receivers(denylist),
            skipped: scan.skipped.clone(),
        }
    }

    /// Runs both checks
    pub fn full(scan: &MatchScan, denylist: &ReceiverDenylist) -> Self {
        Self {
            duplicates: scan.find_duplicates(),
            receivers: scan.find_receivers(denylist),
            skipped: scan.skipped.clone(),
        }
    }

    /// Returns true if any duplicate or receiver was found
    ///
    /// Skipped files do not count.
    pub fn has_failures(&self) -> bool {
        !self.duplicates.is_empty() || !self.receivers.is_empty()
    }

    /// Process exit code for this report (0 = clean)
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}
