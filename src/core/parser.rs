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

//! src/core/parser.rs
//!
//! Strict keyfile parser for `.device` files
//!
//! This module turns the INI-style text of a device file into a
//! `DeviceFile`. It handles:
//! - `[Section]` headers
//! - `Key=Value` and `Key: Value` entries (first delimiter wins)
//! - Full-line comments starting with `#` or `;`
//! - Continuation lines: a line indented deeper than the entry above it
//!   extends that entry's value, joined with `\n`
//! - Line numbers for error reporting
//!
//! # Strictness
//! A duplicate section or a duplicate key inside one section is a parse
//! error, as is a key that appears before any section header. Keys keep
//! their case. No semantic checks happen here; those live in the schema
//! registry and run only after parsing succeeds.

use nom::{
    bytes::complete::{take_till1, take_until},
    character::complete::{char, one_of, space0},
    combinator::{eof, rest},
    sequence::{delimited, terminated},
    IResult, Parser,
};
use thiserror::Error;

/// Parse errors with line number context
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Key '{key}' on line {line} appears before any section header")]
    KeyOutsideSection { key: String, line: usize },

    #[error("Section [{section}] on line {line} already exists")]
    DuplicateSection { section: String, line: usize },

    #[error("Key '{key}' on line {line} already exists in section [{section}]")]
    DuplicateKey {
        section: String,
        key: String,
        line: usize,
    },
}

/// One `[Section]` of a device file
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    /// Section name without brackets
    pub name: String,

    /// Line of the section header (1-based)
    pub line: usize,

    /// Key/value entries in file order
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            line,
            entries: Vec::new(),
        }
    }

    /// Looks up a key (case-sensitive)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a continuation line to the most recent entry
    fn continue_last(&mut self, text: &str, blank_lines: usize) {
        if let Some((_, value)) = self.entries.last_mut() {
            for _ in 0..blank_lines {
                value.push('\n');
            }
            value.push('\n');
            value.push_str(text);
        }
    }

    /// Inserts a new entry, returning false if the key already exists
    pub fn insert(&mut self, key: &str, value: &str) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.entries.push((key.to_string(), value.to_string()));
        true
    }
}

/// A parsed device file: an ordered list of uniquely named sections
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceFile {
    sections: Vec<Section>,
}

impl DeviceFile {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }
}

/// A single meaningful line of a keyfile
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line<'a> {
    Header(&'a str),
    Entry { key: &'a str, value: &'a str },
}

/// Parse a complete device file
///
/// # Arguments
/// * `content` - The full file content as a string
///
/// # Returns
/// The parsed `DeviceFile`, or the first `ParseError` encountered
///
/// # Example
/// ```
/// use ratbag_devicedb::core::parser::parse_device_file;
///
/// let file = parse_device_file("[Device]\nName=Foo\nDriver=hidpp20\n")?;
/// assert_eq!(file.section("Device").and_then(|s| s.get("Driver")), Some("hidpp20"));
/// # Ok::<(), ratbag_devicedb::core::parser::ParseError>(())
/// ```
pub fn parse_device_file(content: &str) -> Result<DeviceFile, ParseError> {
    let mut file = DeviceFile::default();

    // Indentation of the last entry, while it can still be continued
    let mut entry_indent: Option<usize> = None;
    let mut blank_lines = 0;

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        // Skip comments
        let line_trimmed = line.trim();
        if line_trimmed.starts_with('#') || line_trimmed.starts_with(';') {
            continue;
        }

        // Blank lines only survive inside a continued value
        if line_trimmed.is_empty() {
            if entry_indent.is_some() {
                blank_lines += 1;
            }
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        if let (Some(entry_indent), Some(section)) = (entry_indent, file.sections.last_mut()) {
            if indent > entry_indent {
                section.continue_last(line_trimmed, blank_lines);
                blank_lines = 0;
                continue;
            }
        }
        blank_lines = 0;

        let parsed = parse_line(line_trimmed).map_err(|e| ParseError::InvalidSyntax {
            line: line_num,
            message: format!("{:?}", e),
        })?;

        match parsed {
            Line::Header(name) => {
                if file.has_section(name) {
                    return Err(ParseError::DuplicateSection {
                        section: name.to_string(),
                        line: line_num,
                    });
                }
                file.sections.push(Section::new(name, line_num));
                entry_indent = None;
            }
            Line::Entry { key, value } => {
                let Some(section) = file.sections.last_mut() else {
                    return Err(ParseError::KeyOutsideSection {
                        key: key.to_string(),
                        line: line_num,
                    });
                };

                if !section.insert(key, value) {
                    return Err(ParseError::DuplicateKey {
                        section: section.name.clone(),
                        key: key.to_string(),
                        line: line_num,
                    });
                }
                entry_indent = Some(indent);
            }
        }
    }

    Ok(file)
}

/// Parse one trimmed, non-comment line
pub fn parse_line(input: &str) -> Result<Line<'_>, nom::Err<nom::error::Error<&str>>> {
    if input.starts_with('[') {
        let (_, name) = parse_section_header(input)?;
        Ok(Line::Header(name))
    } else {
        let (_, (key, value)) = parse_entry(input)?;
        Ok(Line::Entry { key, value })
    }
}

/// Parse a section header
///
/// Format: `[Name]`, where the name is non-empty and contains no `]`
pub fn parse_section_header(input: &str) -> IResult<&str, &str> {
    let (input, name) = terminated(
        delimited(char('['), take_until("]"), char(']')),
        (space0, eof),
    )
    .parse(input)?;

    if name.trim().is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    Ok((input, name.trim()))
}

/// Parse a key/value entry
///
/// Formats supported:
/// - "Key=Value"
/// - "Key = Value"
/// - "Key: Value"
///
/// The key is everything before the first `=` or `:`, so values such as
/// `usb:046d:c52b` keep their colons.
pub fn parse_entry(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, key) = take_till1(|c: char| c == '=' || c == ':')(input)?;
    let (input, _) = one_of("=:")(input)?;
    let (input, value) = rest(input)?;

    let key = key.trim();
    if key.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    Ok((input, (key, value.trim())))
}
