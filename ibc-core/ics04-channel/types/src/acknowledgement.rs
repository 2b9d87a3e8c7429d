//! Defines acknowledgement types produced by receiving modules.

use core::fmt::{Display, Error as FmtError, Formatter};

use derive_more::Into;
use ibc_primitives::prelude::*;

use super::error::PacketError;

/// Opaque acknowledgement bytes returned by the receiving module. The core
/// only requires them to be non-empty.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Into)]
pub struct Acknowledgement(Vec<u8>);

impl Acknowledgement {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl AsRef<[u8]> for Acknowledgement {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl TryFrom<Vec<u8>> for Acknowledgement {
    type Error = PacketError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(PacketError::EmptyAcknowledgement)
        } else {
            Ok(Self(bytes))
        }
    }
}

/// Convenience type for applications that acknowledge with the JSON
/// envelope `{"result":..}` on success and `{"error":..}` on failure.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcknowledgementStatus {
    /// e.g. `{"result":"AQ=="}`
    #[cfg_attr(feature = "serde", serde(rename = "result"))]
    Success(StatusValue),
    /// e.g. `{"error":"cannot unmarshal ICS-20 transfer packet data"}`
    #[cfg_attr(feature = "serde", serde(rename = "error"))]
    Error(StatusValue),
}

/// A non-empty status string.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusValue(String);

impl StatusValue {
    pub fn new(value: impl ToString) -> Result<Self, PacketError> {
        let value = value.to_string();

        if value.is_empty() {
            return Err(PacketError::EmptyAcknowledgementStatus);
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StatusValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl AcknowledgementStatus {
    pub fn success(value: StatusValue) -> Self {
        Self::Success(value)
    }

    pub fn error(value: StatusValue) -> Self {
        Self::Error(value)
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, AcknowledgementStatus::Success(_))
    }
}

impl Display for AcknowledgementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            AcknowledgementStatus::Success(v) | AcknowledgementStatus::Error(v) => write!(f, "{v}"),
        }
    }
}

impl From<AcknowledgementStatus> for Vec<u8> {
    fn from(ack: AcknowledgementStatus) -> Self {
        match ack {
            AcknowledgementStatus::Success(v) => format!(r#"{{"result":"{v}"}}"#).into(),
            AcknowledgementStatus::Error(v) => format!(r#"{{"error":"{v}"}}"#).into(),
        }
    }
}

impl From<AcknowledgementStatus> for Acknowledgement {
    fn from(ack_status: AcknowledgementStatus) -> Self {
        // Both envelopes are non-empty by construction.
        Self(ack_status.into())
    }
}
