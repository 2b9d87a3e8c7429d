//! Defines the token transfer message type

use ibc_core_channel_types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core_host_types::identifiers::{ChannelId, PortId};

use crate::packet::PacketData;

/// Message used to build an ICS20 token transfer packet.
///
/// This is not a packet yet: it lacks the sequence number and the
/// destination port/channel, which the core fills in from the channel end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTransfer {
    /// the port on which the packet will be sent
    pub port_id_on_a: PortId,
    /// the channel by which the packet will be sent
    pub chan_id_on_a: ChannelId,
    /// token transfer packet data of the packet that will be sent
    pub packet_data: PacketData,
    /// Timeout height on the receiving chain.
    pub timeout_height_on_b: TimeoutHeight,
    /// Timeout timestamp on the receiving chain.
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}
