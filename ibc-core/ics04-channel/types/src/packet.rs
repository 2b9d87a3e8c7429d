//! Defines the packet type
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_primitives::prelude::*;
use ibc_primitives::utils::PrettyBytes;
use ibc_primitives::Timestamp;

use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Packet receipt, used over unordered channels. Once written it is never
/// removed.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receipt {
    Ok,
}

impl Receipt {
    /// Value committed under the receipt path.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Receipt::Ok => &[1],
        }
    }
}

/// The packet type; this is what applications send to one another.
///
/// `_on_a` fields name the sending end, `_on_b` fields the receiving end.
/// The application defines the structure of `data`; the core never looks
/// inside it.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl core::fmt::Debug for Packet {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        formatter
            .debug_struct("Packet")
            .field("sequence", &self.seq_on_a)
            .field("source_port", &self.port_id_on_a)
            .field("source_channel", &self.chan_id_on_a)
            .field("destination_port", &self.port_id_on_b)
            .field("destination_channel", &self.chan_id_on_b)
            .field("data", &format_args!("{}", PrettyBytes(&self.data)))
            .field("timeout_height", &self.timeout_height_on_b)
            .field("timeout_timestamp", &self.timeout_timestamp_on_b)
            .finish()
    }
}

impl Packet {
    /// Whether the destination chain, at `dst_chain_height` and
    /// `dst_chain_ts`, has reached either of the packet's timeouts.
    ///
    /// A timed-out packet can no longer be received; the sender resolves it
    /// with a timeout instead of an acknowledgement.
    pub fn timed_out(&self, dst_chain_ts: &Timestamp, dst_chain_height: Height) -> bool {
        self.timeout_height_on_b.has_expired(dst_chain_height)
            || self.timeout_timestamp_on_b.has_expired(dst_chain_ts)
    }

    /// A packet must carry at least one timeout or it could never be
    /// reclaimed.
    pub fn has_timeout(&self) -> bool {
        self.timeout_height_on_b.is_set() || self.timeout_timestamp_on_b.is_set()
    }
}

/// Custom display output to omit the packet data
impl core::fmt::Display for Packet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}, tos:{}",
            self.seq_on_a,
            self.port_id_on_a,
            self.chan_id_on_a,
            self.port_id_on_b,
            self.chan_id_on_b,
            self.timeout_height_on_b,
            self.timeout_timestamp_on_b
        )
    }
}
