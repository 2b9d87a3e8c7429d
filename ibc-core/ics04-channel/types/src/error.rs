//! Defines the main channel and packet error types

use displaydoc::Display;
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::Height;
use ibc_core_host_types::error::IdentifierError;
use ibc_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_primitives::prelude::*;
use ibc_primitives::{Timestamp, TimestampError};

use super::channel::{Counterparty, State};
use super::timeout::TimeoutHeight;
use crate::commitment::PacketCommitment;
use crate::timeout::TimeoutTimestamp;

#[derive(Debug, Display)]
pub enum ChannelError {
    /// application module error: `{description}`
    AppModule { description: String },
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// non-existent channel end: (`{port_id}`, `{channel_id}`)
    NonexistentChannel {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel end (`{port_id}`, `{channel_id}`) already exists
    ChannelAlreadyExists {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel is not open; current state is `{state}`
    ChannelNotOpen { state: State },
    /// invalid channel state transition from `{from}` to `{to}`
    InvalidStateTransition { from: State, to: State },
    /// invalid channel order type: `{actual}`
    InvalidOrderType { actual: String },
    /// invalid connection hops length: expected `{expected}`, actual `{actual}`
    InvalidConnectionHopsLength { expected: u64, actual: u64 },
    /// invalid counterparty: expected `{expected}`, actual `{actual}`
    InvalidCounterparty {
        expected: Counterparty,
        actual: Counterparty,
    },
    /// missing counterparty channel id
    MissingCounterparty,
    /// failed proof verification: `{0}`
    FailedProofVerification(ClientError),
}

#[derive(Debug, Display)]
pub enum PacketError {
    /// application module error: `{description}`
    AppModule { description: String },
    /// channel error: `{0}`
    Channel(ChannelError),
    /// packet destination (`{port_id}`, `{channel_id}`) does not match the channel's counterparty
    InvalidPacketCounterparty {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// mismatched packet sequence: expected `{expected}`, actual `{actual}`
    MismatchedPacketSequence {
        expected: Sequence,
        actual: Sequence,
    },
    /// packet with sequence `{sequence}` has already been received
    PacketAlreadyReceived { sequence: Sequence },
    /// missing packet commitment for sequence `{sequence}`
    MissingPacketCommitment { sequence: Sequence },
    /// mismatched commitments for packet `{sequence}`: expected `{expected:?}`, actual `{actual:?}`
    MismatchedPacketCommitment {
        sequence: Sequence,
        expected: PacketCommitment,
        actual: PacketCommitment,
    },
    /// packet acknowledgement for sequence `{sequence}` already exists
    DuplicateAcknowledgement { sequence: Sequence },
    /// missing acknowledgement for packet `{sequence}`
    MissingPacketAcknowledgement { sequence: Sequence },
    /// proof height `{proof_height}` for packet `{sequence}` is not above the height `{recv_proof_height}` it was received against
    StaleProofHeight {
        sequence: Sequence,
        proof_height: Height,
        recv_proof_height: Height,
    },
    /// failed packet verification for packet with sequence `{sequence}`: `{client_error}`
    FailedPacketVerification {
        sequence: Sequence,
        client_error: ClientError,
    },
    /// packet must set a timeout height, a timeout timestamp, or both
    MissingTimeout,
    /// packet with sequence `{sequence}` has already timed out on this chain
    PacketTimedOut { sequence: Sequence },
    /// packet timeout height `{timeout_height}` > chain height `{chain_height}` and timeout timestamp `{timeout_timestamp}` > chain timestamp `{chain_timestamp}`
    PacketTimeoutNotReached {
        timeout_height: TimeoutHeight,
        chain_height: Height,
        timeout_timestamp: TimeoutTimestamp,
        chain_timestamp: Timestamp,
    },
    /// packet sequence `{sequence}` was already received on the counterparty (next receive sequence `{next_seq_recv}`)
    PacketAlreadyDelivered {
        sequence: Sequence,
        next_seq_recv: Sequence,
    },
    /// invalid timeout timestamp: `{0}`
    InvalidTimeoutTimestamp(TimestampError),
    /// empty acknowledgement not allowed
    EmptyAcknowledgement,
    /// empty acknowledgement status not allowed
    EmptyAcknowledgementStatus,
}

impl From<IdentifierError> for ChannelError {
    fn from(err: IdentifierError) -> Self {
        Self::InvalidIdentifier(err)
    }
}

impl From<ChannelError> for PacketError {
    fn from(err: ChannelError) -> Self {
        Self::Channel(err)
    }
}

impl From<TimestampError> for PacketError {
    fn from(err: TimestampError) -> Self {
        Self::InvalidTimeoutTimestamp(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Channel(e) => Some(e),
            Self::FailedPacketVerification {
                client_error: e, ..
            } => Some(e),
            Self::InvalidTimeoutTimestamp(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::InvalidIdentifier(e) => Some(e),
            Self::FailedProofVerification(e) => Some(e),
            _ => None,
        }
    }
}
