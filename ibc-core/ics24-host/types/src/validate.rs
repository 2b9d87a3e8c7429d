use ibc_primitives::prelude::*;

use crate::error::IdentifierError as Error;
use crate::identifiers::{ChannelId, ConnectionId};

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Identifiers may only contain alphanumerics and `._+-#[]<>`. In
/// particular the path separator `/` is rejected.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    if id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        Ok(())
    } else {
        Err(Error::InvalidCharacter { id: id.into() })
    }
}

/// Checks that `id` is between `min` and `max` characters long, inclusive.
/// Empty identifiers are always rejected.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    let min = min.max(1);
    let length = id.len() as u64;
    if (min..=max).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        })
    }
}

/// Checks the identifier has the form `{name}-{u64}` without leading zeros.
pub fn validate_named_u64_index(id: &str, name: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidPrefix { prefix: id.into() };

    let number_s = id
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(invalid)?;

    if number_s.starts_with('0') && number_s.len() > 1 {
        return Err(invalid());
    }

    number_s.parse::<u64>().map(|_| ()).map_err(|_| invalid())
}

/// Port identifiers are between 2 and 128 characters.
pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 2, 128)
}

pub fn validate_channel_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 8, 64)?;
    validate_named_u64_index(id, ChannelId::prefix())
}

pub fn validate_connection_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 10, 64)?;
    validate_named_u64_index(id, ConnectionId::prefix())
}
