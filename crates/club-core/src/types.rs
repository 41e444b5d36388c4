//! Core type definitions with validation.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client names are lowercase latin letters, digits, `_` and `-`.
static CLIENT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("client name pattern is valid"));

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The client name contains characters outside `[a-z0-9_-]`.
    #[error("invalid client name: {value:?}")]
    InvalidClientName { value: String },

    /// Table numbers start at 1.
    #[error("table number must be positive")]
    ZeroTable,
}

/// A validated client name.
///
/// Ordering is lexicographic, which is the order clients are checked out in
/// at closing time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "client name",
            });
        }
        if !CLIENT_NAME_RE.is_match(&name) {
            return Err(ValidationError::InvalidClientName { value: name });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientName> for String {
    fn from(name: ClientName) -> Self {
        name.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A 1-based table number.
///
/// Only the club knows how many tables exist; range checks against the
/// table count happen there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TableNumber(NonZeroU32);

impl TableNumber {
    pub fn new(number: u32) -> Result<Self, ValidationError> {
        NonZeroU32::new(number)
            .map(Self)
            .ok_or(ValidationError::ZeroTable)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Position of this table in a zero-based collection.
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl TryFrom<u32> for TableNumber {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableNumber> for u32 {
    fn from(table: TableNumber) -> Self {
        table.get()
    }
}

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
