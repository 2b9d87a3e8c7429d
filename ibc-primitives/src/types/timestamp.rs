//! Defines the representation of timestamps used for packet timeouts and
//! host clocks.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::num::ParseIntError;
use core::ops::{Add, Sub};
use core::str::FromStr;
use core::time::Duration;

use displaydoc::Display;
use time::error::ComponentRange;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::prelude::*;

pub const ZERO_DURATION: Duration = Duration::from_secs(0);

/// A new type wrapper over `PrimitiveDateTime` that keeps track of host and
/// counterparty clock readings. Always expressed in UTC.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u64", into = "u64")
)]
#[derive(PartialEq, Eq, Copy, Clone, Debug, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    time: PrimitiveDateTime,
}

impl Timestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Result<Self, TimestampError> {
        Self::try_from(nanoseconds)
    }

    pub fn from_unix_timestamp(secs: u64, nanos: u32) -> Result<Self, TimestampError> {
        if nanos > 999_999_999 {
            return Err(TimestampError::DateOutOfRange);
        }

        let total_nanos = i128::from(secs) * 1_000_000_000 + i128::from(nanos);

        let odt = OffsetDateTime::from_unix_timestamp_nanos(total_nanos)?;

        Self::from_utc(odt)
    }

    fn from_utc(t: OffsetDateTime) -> Result<Self, TimestampError> {
        match t.year() {
            1970..=9999 => Ok(Self {
                time: PrimitiveDateTime::new(t.date(), t.time()),
            }),
            _ => Err(TimestampError::DateOutOfRange),
        }
    }

    /// Returns a `Timestamp` representation of the current time.
    #[cfg(feature = "std")]
    pub fn now() -> Result<Self, TimestampError> {
        Self::from_utc(OffsetDateTime::now_utc())
    }

    /// Computes the duration difference of another `Timestamp` from the current
    /// one. Returns `None` if `other` is later than `self`.
    pub fn duration_since(&self, other: &Self) -> Option<Duration> {
        let duration = self.time.assume_utc() - other.time.assume_utc();
        duration.try_into().ok()
    }

    /// Convert a `Timestamp` to `u64` value in nanoseconds.
    /// ```
    /// use ibc_primitives::Timestamp;
    ///
    /// let max = u64::MAX;
    /// let tx = Timestamp::from_nanoseconds(max).unwrap();
    /// assert_eq!(tx.nanoseconds(), max);
    /// ```
    pub fn nanoseconds(self) -> u64 {
        let nanos = self.time.assume_utc().unix_timestamp_nanos();
        // Construction rejects anything before the unix epoch or beyond
        // `u64::MAX` nanoseconds.
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }
}

impl TryFrom<u64> for Timestamp {
    type Error = TimestampError;

    fn try_from(nanoseconds: u64) -> Result<Self, Self::Error> {
        let odt = OffsetDateTime::from_unix_timestamp_nanos(nanoseconds.into())?;
        Self::from_utc(odt)
    }
}

impl From<Timestamp> for u64 {
    fn from(t: Timestamp) -> Self {
        t.nanoseconds()
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(t: Timestamp) -> Self {
        t.time.assume_utc()
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nanoseconds = u64::from_str(s)?;
        Self::try_from(nanoseconds)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "Timestamp({})", self.time)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Result<Self, TimestampError>;

    fn add(self, rhs: Duration) -> Self::Output {
        let nanos = u64::try_from(rhs.as_nanos()).map_err(|_| TimestampError::TimestampOverflow)?;
        let total = self
            .nanoseconds()
            .checked_add(nanos)
            .ok_or(TimestampError::TimestampOverflow)?;
        Self::from_nanoseconds(total)
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Result<Self, TimestampError>;

    fn sub(self, rhs: Duration) -> Self::Output {
        let nanos = u64::try_from(rhs.as_nanos()).map_err(|_| TimestampError::DateOutOfRange)?;
        let total = self
            .nanoseconds()
            .checked_sub(nanos)
            .ok_or(TimestampError::DateOutOfRange)?;
        Self::from_nanoseconds(total)
    }
}

#[cfg(feature = "borsh")]
impl borsh::BorshSerialize for Timestamp {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        borsh::BorshSerialize::serialize(&self.nanoseconds(), writer)
    }
}

#[cfg(feature = "borsh")]
impl borsh::BorshDeserialize for Timestamp {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let timestamp = u64::deserialize_reader(reader)?;
        Self::from_nanoseconds(timestamp).map_err(|_| borsh::io::ErrorKind::InvalidData.into())
    }
}

#[derive(Debug, Display, derive_more::From)]
pub enum TimestampError {
    /// parsing u64 integer from string error: `{0}`
    ParseInt(ParseIntError),
    /// date out of range
    DateOutOfRange,
    /// timestamp overflow when adding a duration
    TimestampOverflow,
    /// invalid date component: `{0}`
    Conversion(ComponentRange),
}

#[cfg(feature = "std")]
impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ParseInt(e) => Some(e),
            Self::Conversion(e) => Some(e),
            _ => None,
        }
    }
}
