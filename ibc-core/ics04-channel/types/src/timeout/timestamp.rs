use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_primitives::{Timestamp, TimestampError};

/// Indicates a timestamp on the destination chain at or after which the
/// packet will no longer be processed, and will instead count as timed out.
///
/// On the wire a value of 0 means "not set"; the explicit `Never` variant
/// keeps that case apart from a real epoch timestamp.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TimeoutTimestamp {
    Never,
    At(Timestamp),
}

impl TimeoutTimestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Result<Self, TimestampError> {
        if nanoseconds == 0 {
            Ok(Self::Never)
        } else {
            Timestamp::from_nanoseconds(nanoseconds).map(Self::At)
        }
    }

    /// Returns the timestamp in nanoseconds, 0 when unset.
    pub fn nanoseconds(&self) -> u64 {
        match self {
            Self::At(timestamp) => timestamp.nanoseconds(),
            Self::Never => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, TimeoutTimestamp::At(_))
    }

    pub fn no_timeout() -> Self {
        Self::Never
    }

    /// Whether `timestamp` has reached the timeout.
    pub fn has_expired(&self, timestamp: &Timestamp) -> bool {
        match self {
            Self::At(timeout_timestamp) => timestamp >= timeout_timestamp,
            Self::Never => false,
        }
    }
}

impl From<Timestamp> for TimeoutTimestamp {
    fn from(timestamp: Timestamp) -> Self {
        Self::At(timestamp)
    }
}

impl Display for TimeoutTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            TimeoutTimestamp::At(timeout_timestamp) => write!(f, "{timeout_timestamp}"),
            TimeoutTimestamp::Never => write!(f, "no timeout timestamp"),
        }
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::{Deserialize, Serialize};

    use super::TimeoutTimestamp;

    impl Serialize for TimeoutTimestamp {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            self.nanoseconds().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for TimeoutTimestamp {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let nanoseconds = u64::deserialize(deserializer)?;
            TimeoutTimestamp::from_nanoseconds(nanoseconds).map_err(serde::de::Error::custom)
        }
    }
}
