//! Implementation of IBC channel ends, as described in ICS-04.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_primitives::prelude::*;
use ibc_primitives::utils::PrettySlice;

use crate::error::ChannelError;
use crate::Version;

/// A [`ChannelEnd`] along with its ID and the port it is bound to
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifiedChannelEnd {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub channel_end: ChannelEnd,
}

impl IdentifiedChannelEnd {
    pub fn new(port_id: PortId, channel_id: ChannelId, channel_end: ChannelEnd) -> Self {
        IdentifiedChannelEnd {
            port_id,
            channel_id,
            channel_end,
        }
    }
}

/// One end of a channel.
///
/// `ordering`, `remote` and `connection_hops` are fixed by the handshake;
/// the packet-relay core only ever moves `state` towards [`State::Closed`].
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    pub state: State,
    pub ordering: Order,
    pub remote: Counterparty,
    pub connection_hops: Vec<ConnectionId>,
    pub version: Version,
}

impl Display for ChannelEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "ChannelEnd {{ state: {}, ordering: {}, remote: {}, connection_hops: {}, version: {} }}",
            self.state,
            self.ordering,
            self.remote,
            PrettySlice(&self.connection_hops),
            self.version
        )
    }
}

impl ChannelEnd {
    /// Creates a new `ChannelEnd`, rejecting ends with other than exactly
    /// one connection hop.
    pub fn new(
        state: State,
        ordering: Order,
        remote: Counterparty,
        connection_hops: Vec<ConnectionId>,
        version: Version,
    ) -> Result<Self, ChannelError> {
        let channel_end = Self {
            state,
            ordering,
            remote,
            connection_hops,
            version,
        };
        channel_end.verify_connection_hops_length()?;
        Ok(channel_end)
    }

    /// Moves the channel end to `next`, enforcing the lifecycle of
    /// [`State::transition_to`].
    pub fn transition_to(&mut self, next: State) -> Result<(), ChannelError> {
        self.state = self.state.transition_to(next)?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn ordering(&self) -> &Order {
        &self.ordering
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.remote
    }

    pub fn connection_hops(&self) -> &Vec<ConnectionId> {
        &self.connection_hops
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The connection whose light client verifies counterparty proofs.
    pub fn first_hop(&self) -> Result<&ConnectionId, ChannelError> {
        self.connection_hops
            .first()
            .ok_or(ChannelError::InvalidConnectionHopsLength {
                expected: 1,
                actual: 0,
            })
    }

    /// Packet operations are gated on this check.
    pub fn verify_open(&self) -> Result<(), ChannelError> {
        if !self.is_open() {
            return Err(ChannelError::ChannelNotOpen { state: self.state });
        }
        Ok(())
    }

    pub fn verify_not_closed(&self) -> Result<(), ChannelError> {
        if self.state == State::Closed {
            return Err(ChannelError::InvalidStateTransition {
                from: self.state,
                to: State::Closed,
            });
        }
        Ok(())
    }

    /// Checks that a packet's counterparty identifiers name the remote end
    /// of this channel.
    pub fn verify_counterparty_matches(&self, expected: &Counterparty) -> Result<(), ChannelError> {
        if self.counterparty() != expected {
            return Err(ChannelError::InvalidCounterparty {
                expected: expected.clone(),
                actual: self.counterparty().clone(),
            });
        }
        Ok(())
    }

    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        if self.connection_hops.len() != 1 {
            return Err(ChannelError::InvalidConnectionHopsLength {
                expected: 1,
                actual: self.connection_hops.len() as u64,
            });
        }
        Ok(())
    }

    /// Canonical byte encoding of the channel end, used as the value of
    /// channel-end membership proofs.
    pub fn encode_vec(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }
}

#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Counterparty {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
}

impl Counterparty {
    pub fn new(port_id: PortId, channel_id: Option<ChannelId>) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }

    /// An OPEN channel always knows its counterparty channel id.
    pub fn expect_channel_id(&self) -> Result<&ChannelId, ChannelError> {
        self.channel_id().ok_or(ChannelError::MissingCounterparty)
    }
}

impl Display for Counterparty {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match &self.channel_id {
            Some(channel_id) => write!(
                f,
                "Counterparty(port_id: {}, channel_id: {})",
                self.port_id, channel_id
            ),
            None => write!(f, "Counterparty(port_id: {}, channel_id: None)", self.port_id),
        }
    }
}

/// Represents the channel ordering. Immutable once the channel exists.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Unordered,
    Ordered,
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unordered => "ORDER_UNORDERED",
            Self::Ordered => "ORDER_ORDERED",
        }
    }
}

impl FromStr for Order {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches("order_") {
            "unordered" => Ok(Self::Unordered),
            "ordered" => Ok(Self::Ordered),
            _ => Err(ChannelError::InvalidOrderType {
                actual: s.to_string(),
            }),
        }
    }
}

/// Represents the state of a [`ChannelEnd`]
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Init,
    TryOpen,
    Open,
    Closed,
}

impl State {
    pub fn as_string(&self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    pub fn is_open(self) -> bool {
        self == State::Open
    }

    /// Returns the state reached by moving to `next`.
    ///
    /// INIT and TRYOPEN only move forward through the handshake; any state
    /// other than CLOSED may close; CLOSED is terminal.
    pub fn transition_to(self, next: State) -> Result<State, ChannelError> {
        let legal = matches!(
            (self, next),
            (State::Init, State::TryOpen | State::Open | State::Closed)
                | (State::TryOpen, State::Open | State::Closed)
                | (State::Open, State::Closed)
        );

        if legal {
            Ok(next)
        } else {
            Err(ChannelError::InvalidStateTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_string())
    }
}
