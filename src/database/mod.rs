//! Device database access and validation.
//!
//! This module provides read-only access to a directory of `.device`
//! files and the checks that run over it. Key features:
//!
//! - **Deterministic scans**: files are visited in file name order
//! - **Per-file isolation**: a broken file is reported, never fatal
//! - **Schema validation**: every file checked against the schema registry
//! - **Corpus checks**: duplicate and receiver detection across all files
//!
//! # Example
//!
//! ```no_run
//! use ratbag_devicedb::database::{DeviceDatabase, FileValidator};
//!
//! let database = DeviceDatabase::open("data/devices".into())?;
//! let report = FileValidator::new().validate_paths(&database.device_files()?);
//!
//! if report.has_failures() {
//!     println!("{} files failed", report.failures().count());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod corpus;
pub mod error;
pub mod validator;

pub use corpus::{CorpusReport, MatchRecord, MatchScan, SkippedFile};
pub use error::DatabaseError;
pub use validator::{FileReport, FileValidator, ValidationReport};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::parser::{parse_device_file, DeviceFile};

/// File extension of device data files.
pub const DEVICE_FILE_EXTENSION: &str = "device";

/// Read-only view of a device data directory.
#[derive(Debug)]
pub struct DeviceDatabase {
    /// Directory holding the `.device` files.
    dir: PathBuf,
}

impl DeviceDatabase {
    /// Opens a device directory.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the directory doesn't exist.
    /// Returns `DatabaseError::NotADirectory` if the path is a file.
    pub fn open(dir: PathBuf) -> Result<Self, DatabaseError> {
        if !dir.exists() {
            return Err(DatabaseError::NotFound(dir));
        }

        if !dir.is_dir() {
            return Err(DatabaseError::NotADirectory(dir));
        }

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists every `*.device` file directly inside the directory.
    ///
    /// The list is sorted by path so reports come out in the same order
    /// on every run.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Io` if the directory cannot be listed.
    pub fn device_files(&self) -> Result<Vec<PathBuf>, DatabaseError> {
        let io_error = |source| DatabaseError::Io {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && is_device_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        debug!("Found {} device files in {}", files.len(), self.dir.display());

        Ok(files)
    }
}

/// Returns true for paths ending in `.device`.
pub fn is_device_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == DEVICE_FILE_EXTENSION)
}

/// Base name of a path, as used in corpus reports.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads a device file from disk.
///
/// # Errors
///
/// Returns `DatabaseError::Io` if the file cannot be read.
pub fn read_device_file(path: &Path) -> Result<String, DatabaseError> {
    fs::read_to_string(path).map_err(|source| DatabaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and strictly parses a device file.
///
/// # Errors
///
/// Returns `DatabaseError::Io` if the file cannot be read and
/// `DatabaseError::Parse` if it is not a well-formed keyfile.
pub fn load_device_file(path: &Path) -> Result<DeviceFile, DatabaseError> {
    let content = read_device_file(path)?;

    debug!("Parsing {}", path.display());
    parse_device_file(&content).map_err(|source| DatabaseError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;
