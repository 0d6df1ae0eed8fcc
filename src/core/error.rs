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

//! src/core/error.rs
//!
//! Semantic validation errors for device files
//!
//! Every variant is local to a single file. The file validator stops at
//! the first violation it finds and hands the error back to the caller,
//! which records it and moves on to the next file.

use thiserror::Error;

/// Schema and field-level validation errors
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Value does not match the expected shape or range
    #[error("Invalid {field} '{value}': {reason}")]
    Format {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// DPI list entries are not strictly increasing
    #[error("DpiList '{value}' is not strictly increasing ({previous} followed by {current})")]
    Order {
        value: String,
        previous: u32,
        current: u32,
    },

    /// Value is not part of a closed enumeration
    #[error("Unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },

    /// Key is not in the permitted set of its section
    #[error("Unknown key '{key}' in section [{section}]")]
    UnknownKey { section: String, key: String },

    /// Two mutually exclusive keys are both present
    #[error("Keys '{first}' and '{second}' are mutually exclusive in section [{section}]")]
    Conflict {
        section: String,
        first: &'static str,
        second: &'static str,
    },

    /// A required section is absent
    #[error("Missing section [{0}]")]
    MissingSection(String),

    /// A required key is absent
    #[error("Missing required key '{key}' in section [{section}]")]
    MissingKey { section: String, key: &'static str },

    /// Driver section present for a driver without a schema
    #[error("Unsupported driver section [Driver/{0}]")]
    UnsupportedDriver(String),

    /// Section not allowed for the file's driver
    #[error("Unexpected section [{section}] for driver '{driver}'")]
    UnexpectedSection { section: String, driver: String },

    /// File name contains characters the build system cannot handle
    #[error("Data file name '{path}' contains illegal characters: '{characters}'")]
    IllegalName { path: String, characters: String },
}

impl ValidationError {
    /// Shorthand for building a `Format` error
    pub fn format(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ValidationError::Format {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Short, stable name of the error kind (used in JSON output)
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Format { .. } => "format",
            ValidationError::Order { .. } => "order",
            ValidationError::UnknownValue { .. } => "unknown-value",
            ValidationError::UnknownKey { .. } => "unknown-key",
            ValidationError::Conflict { .. } => "conflict",
            ValidationError::MissingSection(_) => "missing-section",
            ValidationError::MissingKey { .. } => "missing-key",
            ValidationError::UnsupportedDriver(_) => "unsupported-driver",
            ValidationError::UnexpectedSection { .. } => "unexpected-section",
            ValidationError::IllegalName { .. } => "illegal-name",
        }
    }
}
