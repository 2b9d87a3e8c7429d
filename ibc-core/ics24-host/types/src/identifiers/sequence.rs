use ibc_primitives::prelude::*;

use crate::error::IdentifierError;

/// The sequence number of a packet. Sequences are assigned per channel
/// starting at 1 and enforce ordering among packets from the same source.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(u64);

impl core::str::FromStr for Sequence {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.parse::<u64>().map_err(|e| {
            IdentifierError::FailedToParse {
                value: s.to_string(),
                description: e.to_string(),
            }
        })?))
    }
}

impl Sequence {
    /// The first sequence handed out on a freshly registered channel.
    pub const ONE: Sequence = Sequence(1);

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the next sequence number, or `None` once `u64::MAX` has been
    /// handed out.
    pub fn checked_increment(&self) -> Option<Sequence> {
        self.0.checked_add(1).map(Sequence)
    }

    /// Encodes the sequence number into a byte array in big endian.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }
}

impl From<u64> for Sequence {
    fn from(seq: u64) -> Self {
        Sequence(seq)
    }
}

impl From<Sequence> for u64 {
    fn from(s: Sequence) -> u64 {
        s.0
    }
}

impl core::fmt::Display for Sequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}", self.0)
    }
}
