//! Per-file schema validation and the run-wide report.
//!
//! The validator walks one device file through a fixed sequence of checks
//! and stops at the first violation:
//! 1. File name contains no brackets, braces or parentheses
//! 2. File reads and parses as a strict keyfile
//! 3. `[Device]` exists and matches the device schema
//! 4. No section exists that the file's driver does not allow
//! 5. The driver section (if any) matches its driver's schema
//!
//! Errors never cross file boundaries. `validate_paths` records the
//! outcome for each file and carries on, so one broken file cannot hide
//! problems in the rest of the database.
//!
//! # Example
//! ```
//! use ratbag_devicedb::core::parser::parse_device_file;
//! use ratbag_devicedb::database::FileValidator;
//!
//! let file = parse_device_file(
//!     "[Device]\nName=Foo\nDriver=hidpp20\nDeviceMatch=usb:1234:5678\nDeviceType=mouse\n",
//! )?;
//! assert!(FileValidator::new().validate_device_file(&file).is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::error::ValidationError;
use crate::core::fields::validate_file_name;
use crate::core::parser::DeviceFile;
use crate::core::schema::{
    check_sinowealth_device, classify_section, SectionShape, DEVICE_SCHEMA, DEVICE_SECTION,
};
use crate::database::error::DatabaseError;
use crate::database::load_device_file;

/// Outcome of validating one file
#[derive(Debug)]
pub struct FileReport {
    /// Path of the file as it was given
    pub path: PathBuf,

    /// First violation found, or `None` if the file passed
    pub error: Option<DatabaseError>,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

impl Serialize for FileReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileReport", 4)?;
        state.serialize_field("path", &self.path.display().to_string())?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("kind", &self.error.as_ref().map(DatabaseError::kind))?;
        state.serialize_field("message", &self.error.as_ref().map(|e| e.to_string()))?;
        state.end()
    }
}

/// Validation report for a whole run
///
/// Files appear in the order they were checked.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    /// Creates a new empty validation report
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any file failed validation
    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|file| !file.passed())
    }

    /// Files that failed, in check order
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|file| !file.passed())
    }

    /// Records the outcome of one file
    pub fn record(&mut self, path: &Path, outcome: Result<(), DatabaseError>) {
        self.files.push(FileReport {
            path: path.to_path_buf(),
            error: outcome.err(),
        });
    }

    /// Process exit code for this report (0 = all passed)
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}

/// Schema validator for device files
///
/// Holds no state of its own. All schemas are static.
#[derive(Debug, Default)]
pub struct FileValidator;

impl FileValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates an already parsed device file
    ///
    /// # Errors
    ///
    /// The first `ValidationError` found, following the order described in
    /// the module documentation.
    pub fn validate_device_file(&self, file: &DeviceFile) -> Result<(), ValidationError> {
        let device = file
            .section(DEVICE_SECTION)
            .ok_or_else(|| ValidationError::MissingSection(DEVICE_SECTION.to_string()))?;

        DEVICE_SCHEMA.check(device)?;

        // Required by the device schema, checked above
        let driver = device.get("Driver").unwrap_or_default();

        // Pass 1: section layout
        for section in file.sections() {
            if classify_section(&section.name, driver) == SectionShape::Unexpected {
                return Err(ValidationError::UnexpectedSection {
                    section: section.name.clone(),
                    driver: driver.to_string(),
                });
            }
        }

        // Pass 2: driver specific content
        for section in file.sections() {
            match classify_section(&section.name, driver) {
                SectionShape::Device | SectionShape::Unexpected => {}
                SectionShape::Driver(schema) => schema.check(section)?,
                SectionShape::UnsupportedDriver => {
                    return Err(ValidationError::UnsupportedDriver(driver.to_string()));
                }
                SectionShape::SinowealthDevice { version } => {
                    check_sinowealth_device(section, version)?
                }
            }
        }

        Ok(())
    }

    /// Validates one file on disk, including its name
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` for illegal names and schema violations,
    /// `DatabaseError::Io` and `DatabaseError::Parse` for unreadable or
    /// malformed files.
    pub fn validate_path(&self, path: &Path) -> Result<(), DatabaseError> {
        let validation_error = |source| DatabaseError::Validation {
            path: path.to_path_buf(),
            source,
        };

        validate_file_name(&path.to_string_lossy()).map_err(validation_error)?;

        let file = load_device_file(path)?;
        self.validate_device_file(&file).map_err(validation_error)
    }

    /// Validates every path, recording one outcome per file
    pub fn validate_paths(&self, paths: &[PathBuf]) -> ValidationReport {
        let mut report = ValidationReport::new();

        for path in paths {
            let outcome = self.validate_path(path);
            match &outcome {
                Ok(()) => debug!("{} passed", path.display()),
                Err(e) => debug!("{} failed: {}", path.display(), e),
            }
            report.record(path, outcome);
        }

        report
    }
}
