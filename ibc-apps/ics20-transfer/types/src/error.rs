//! Defines the token transfer error type
use displaydoc::Display;
use ibc_core_channel_types::acknowledgement::StatusValue;
use ibc_core_channel_types::channel::Order;
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_host_types::identifiers::{ChannelId, PortId};
use ibc_primitives::prelude::*;
use uint::FromDecStrErr;

#[derive(Display, Debug)]
pub enum TokenTransferError {
    /// protocol error: `{0}`
    Protocol(ProtocolError),
    /// insufficient funds: tried to send `{send_attempt}`, sender only has `{available_funds}`
    InsufficientFunds {
        send_attempt: String,
        available_funds: String,
    },
    /// base denomination is empty
    EmptyBaseDenom,
    /// invalid amount error: `{0}`
    InvalidAmount(FromDecStrErr),
    /// transfer amount must be positive
    ZeroAmount,
    /// expected `{expect_order}` channel, got `{got_order}`
    ChannelNotUnordered {
        expect_order: Order,
        got_order: Order,
    },
    /// invalid channel version: expected `{expected}`, got `{actual}`
    InvalidVersion { expected: String, actual: String },
    /// channel cannot be closed
    CantCloseChannel,
    /// failed to deserialize packet data
    PacketDataDeserialization,
    /// failed to deserialize acknowledgement
    AckDeserialization,
    /// receive is not enabled
    ReceiveDisabled { reason: String },
    /// send is not enabled
    SendDisabled { reason: String },
    /// failed to parse as AccountId
    ParseAccountFailure,
    /// invalid port: `{port_id}`, expected `{exp_port_id}`
    InvalidPort {
        port_id: PortId,
        exp_port_id: PortId,
    },
    /// no capability held for channel (`{port_id}`, `{channel_id}`)
    MissingChannelCapability {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// other error: `{0}`
    Other(String),
}

#[cfg(feature = "std")]
impl std::error::Error for TokenTransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Protocol(e) => Some(e),
            Self::InvalidAmount(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtocolError> for TokenTransferError {
    fn from(err: ProtocolError) -> TokenTransferError {
        Self::Protocol(err)
    }
}

impl From<TokenTransferError> for StatusValue {
    fn from(err: TokenTransferError) -> Self {
        StatusValue::new(err.to_string()).expect("error message must not be empty")
    }
}

impl From<TokenTransferError> for PacketError {
    fn from(err: TokenTransferError) -> Self {
        PacketError::AppModule {
            description: err.to_string(),
        }
    }
}

impl From<TokenTransferError> for ChannelError {
    fn from(err: TokenTransferError) -> Self {
        ChannelError::AppModule {
            description: err.to_string(),
        }
    }
}
