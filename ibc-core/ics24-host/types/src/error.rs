//! Foundational error types shared by the core crates and host
//! implementations.

use displaydoc::Display;
use ibc_primitives::prelude::*;

/// Errors that originate from host implementations.
#[derive(Debug, Display)]
pub enum HostError {
    /// invalid data: `{description}`
    InvalidData { description: String },
    /// missing data: `{description}`
    MissingData { description: String },
    /// failed to store data: `{description}`
    FailedToStoreData { description: String },
    /// failed to retrieve data from store: `{description}`
    FailedToRetrieveFromStore { description: String },
    /// other error: `{description}`
    Other { description: String },
}

impl HostError {
    pub fn missing_data<T: ToString>(description: T) -> Self {
        Self::MissingData {
            description: description.to_string(),
        }
    }

    pub fn failed_to_store<T: ToString>(description: T) -> Self {
        Self::FailedToStoreData {
            description: description.to_string(),
        }
    }
}

/// Errors that arise when parsing identifiers.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum IdentifierError {
    /// id `{id}` has invalid length; must be between [`{min}`,`{max}`]
    InvalidLength { id: String, min: u64, max: u64 },
    /// id `{id}` can only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
    /// invalid prefix: `{prefix}`
    InvalidPrefix { prefix: String },
    /// failed to parse `{value}`: `{description}`
    FailedToParse { value: String, description: String },
}

/// Errors that occur while decoding application or wire data into domain
/// types.
#[derive(Debug, Display)]
pub enum DecodingError {
    /// identifier error: `{0}`
    Identifier(IdentifierError),
    /// invalid JSON data: `{description}`
    InvalidJson { description: String },
    /// invalid UTF-8 data: `{description}`
    InvalidUtf8 { description: String },
    /// invalid raw data: `{description}`
    InvalidRawData { description: String },
    /// missing raw data: `{description}`
    MissingRawData { description: String },
}

impl From<IdentifierError> for DecodingError {
    fn from(e: IdentifierError) -> Self {
        Self::Identifier(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IdentifierError {}

#[cfg(feature = "std")]
impl std::error::Error for DecodingError {}

#[cfg(feature = "std")]
impl std::error::Error for HostError {}
