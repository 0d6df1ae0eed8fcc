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

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::{ParseError, ValidationError};

/// Errors that can occur while loading or checking the device database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Device directory does not exist.
    #[error("Device directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Path exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// File or directory could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is not a well-formed keyfile.
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// File parsed but breaks a schema rule.
    #[error("{}: {source}", .path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl DatabaseError {
    /// Short, stable name of the error kind (used in JSON output)
    pub fn kind(&self) -> &'static str {
        match self {
            DatabaseError::NotFound(_) => "not-found",
            DatabaseError::NotADirectory(_) => "not-a-directory",
            DatabaseError::Io { .. } => "io",
            DatabaseError::Parse { .. } => "parse",
            DatabaseError::Validation { source, .. } => source.kind(),
        }
    }
}
