//! Events emitted by the channel core for off-chain relayers.
//!
//! Every packet event carries the packet's source and destination
//! identifiers and its sequence, so a relayer can locate the commitment,
//! receipt or acknowledgement it has to prove next.

use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_primitives::prelude::*;
use subtle_encoding::hex;

use super::acknowledgement::Acknowledgement;
use super::channel::Order;
use super::Version;
use crate::packet::Packet;

const CHANNEL_REGISTER_EVENT: &str = "channel_register";
const CHANNEL_CLOSE_INIT_EVENT: &str = "channel_close_init";
const CHANNEL_CLOSE_CONFIRM_EVENT: &str = "channel_close_confirm";
const CHANNEL_CLOSED_EVENT: &str = "channel_close";

const SEND_PACKET_EVENT: &str = "send_packet";
const RECEIVE_PACKET_EVENT: &str = "recv_packet";
const WRITE_ACK_EVENT: &str = "write_acknowledgement";
const ACK_PACKET_EVENT: &str = "acknowledge_packet";
const TIMEOUT_EVENT: &str = "timeout_packet";
const PRUNE_ACK_EVENT: &str = "prune_acknowledgement";

const PORT_ID_ATTRIBUTE_KEY: &str = "port_id";
const CHANNEL_ID_ATTRIBUTE_KEY: &str = "channel_id";
const COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY: &str = "counterparty_port_id";
const COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY: &str = "counterparty_channel_id";
const CONNECTION_ID_ATTRIBUTE_KEY: &str = "connection_id";
const VERSION_ATTRIBUTE_KEY: &str = "version";

const PKT_DATA_HEX_ATTRIBUTE_KEY: &str = "packet_data_hex";
const PKT_SEQ_ATTRIBUTE_KEY: &str = "packet_sequence";
const PKT_SRC_PORT_ATTRIBUTE_KEY: &str = "packet_src_port";
const PKT_SRC_CHANNEL_ATTRIBUTE_KEY: &str = "packet_src_channel";
const PKT_DST_PORT_ATTRIBUTE_KEY: &str = "packet_dst_port";
const PKT_DST_CHANNEL_ATTRIBUTE_KEY: &str = "packet_dst_channel";
const PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY: &str = "packet_channel_ordering";
const PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY: &str = "packet_timeout_height";
const PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY: &str = "packet_timeout_timestamp";
const PKT_ACK_HEX_ATTRIBUTE_KEY: &str = "packet_ack_hex";
const PKT_CONNECTION_ID_ATTRIBUTE_KEY: &str = "packet_connection";

/// A single key/value pair of an emitted event.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

impl<K: ToString, V: ToString> From<(K, V)> for EventAttribute {
    fn from((key, value): (K, V)) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

fn hex_string(bytes: &[u8]) -> String {
    String::from_utf8(hex::encode(bytes)).unwrap_or_default()
}

fn packet_attributes(packet: &Packet, with_data: bool) -> Vec<EventAttribute> {
    let mut attributes = Vec::with_capacity(8);
    if with_data {
        attributes.push((PKT_DATA_HEX_ATTRIBUTE_KEY, hex_string(&packet.data)).into());
    }
    attributes.push(
        (
            PKT_TIMEOUT_HEIGHT_ATTRIBUTE_KEY,
            packet.timeout_height_on_b.to_string(),
        )
            .into(),
    );
    attributes.push(
        (
            PKT_TIMEOUT_TIMESTAMP_ATTRIBUTE_KEY,
            packet.timeout_timestamp_on_b.nanoseconds(),
        )
            .into(),
    );
    attributes.push((PKT_SEQ_ATTRIBUTE_KEY, packet.seq_on_a).into());
    attributes.push((PKT_SRC_PORT_ATTRIBUTE_KEY, &packet.port_id_on_a).into());
    attributes.push((PKT_SRC_CHANNEL_ATTRIBUTE_KEY, &packet.chan_id_on_a).into());
    attributes.push((PKT_DST_PORT_ATTRIBUTE_KEY, &packet.port_id_on_b).into());
    attributes.push((PKT_DST_CHANNEL_ATTRIBUTE_KEY, &packet.chan_id_on_b).into());
    attributes
}

/// Emitted when a module sends a packet; the commitment now exists.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendPacket {
    pub packet: Packet,
    pub channel_ordering: Order,
    pub conn_id_on_a: ConnectionId,
}

impl SendPacket {
    pub fn new(packet: Packet, channel_ordering: Order, conn_id_on_a: ConnectionId) -> Self {
        Self {
            packet,
            channel_ordering,
            conn_id_on_a,
        }
    }

    pub fn seq_on_a(&self) -> &Sequence {
        &self.packet.seq_on_a
    }

    pub fn event_type(&self) -> &str {
        SEND_PACKET_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        let mut attributes = packet_attributes(&self.packet, true);
        attributes.push((PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY, self.channel_ordering).into());
        attributes.push((PKT_CONNECTION_ID_ATTRIBUTE_KEY, &self.conn_id_on_a).into());
        attributes
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivePacket {
    pub packet: Packet,
    pub channel_ordering: Order,
    pub conn_id_on_b: ConnectionId,
}

impl ReceivePacket {
    pub fn new(packet: Packet, channel_ordering: Order, conn_id_on_b: ConnectionId) -> Self {
        Self {
            packet,
            channel_ordering,
            conn_id_on_b,
        }
    }

    pub fn event_type(&self) -> &str {
        RECEIVE_PACKET_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        let mut attributes = packet_attributes(&self.packet, true);
        attributes.push((PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY, self.channel_ordering).into());
        attributes.push((PKT_CONNECTION_ID_ATTRIBUTE_KEY, &self.conn_id_on_b).into());
        attributes
    }
}

/// Carries the raw acknowledgement bytes; the store only keeps their
/// commitment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    pub conn_id_on_b: ConnectionId,
}

impl WriteAcknowledgement {
    pub fn new(packet: Packet, acknowledgement: Acknowledgement, conn_id_on_b: ConnectionId) -> Self {
        Self {
            packet,
            acknowledgement,
            conn_id_on_b,
        }
    }

    pub fn acknowledgement(&self) -> &Acknowledgement {
        &self.acknowledgement
    }

    pub fn event_type(&self) -> &str {
        WRITE_ACK_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        let mut attributes = packet_attributes(&self.packet, true);
        attributes.push(
            (
                PKT_ACK_HEX_ATTRIBUTE_KEY,
                hex_string(self.acknowledgement.as_bytes()),
            )
                .into(),
        );
        attributes.push((PKT_CONNECTION_ID_ATTRIBUTE_KEY, &self.conn_id_on_b).into());
        attributes
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcknowledgePacket {
    pub packet: Packet,
    pub channel_ordering: Order,
    pub conn_id_on_a: ConnectionId,
}

impl AcknowledgePacket {
    pub fn new(packet: Packet, channel_ordering: Order, conn_id_on_a: ConnectionId) -> Self {
        Self {
            packet,
            channel_ordering,
            conn_id_on_a,
        }
    }

    pub fn event_type(&self) -> &str {
        ACK_PACKET_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        let mut attributes = packet_attributes(&self.packet, false);
        attributes.push((PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY, self.channel_ordering).into());
        attributes.push((PKT_CONNECTION_ID_ATTRIBUTE_KEY, &self.conn_id_on_a).into());
        attributes
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeoutPacket {
    pub packet: Packet,
    pub channel_ordering: Order,
}

impl TimeoutPacket {
    pub fn new(packet: Packet, channel_ordering: Order) -> Self {
        Self {
            packet,
            channel_ordering,
        }
    }

    pub fn event_type(&self) -> &str {
        TIMEOUT_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        let mut attributes = packet_attributes(&self.packet, false);
        attributes.push((PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY, self.channel_ordering).into());
        attributes
    }
}

/// Emitted on the receiving chain when a stored acknowledgement is removed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PruneAcknowledgement {
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub sequence: Sequence,
}

impl PruneAcknowledgement {
    pub fn event_type(&self) -> &str {
        PRUNE_ACK_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        vec![
            (PORT_ID_ATTRIBUTE_KEY, &self.port_id_on_b).into(),
            (CHANNEL_ID_ATTRIBUTE_KEY, &self.chan_id_on_b).into(),
            (PKT_SEQ_ATTRIBUTE_KEY, self.sequence).into(),
        ]
    }
}

/// Identifiers shared by every channel lifecycle event.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelIds {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub counterparty_port_id: PortId,
    pub counterparty_channel_id: Option<ChannelId>,
    pub connection_id: ConnectionId,
}

impl ChannelIds {
    fn attributes(&self) -> Vec<EventAttribute> {
        vec![
            (PORT_ID_ATTRIBUTE_KEY, &self.port_id).into(),
            (CHANNEL_ID_ATTRIBUTE_KEY, &self.channel_id).into(),
            (COUNTERPARTY_PORT_ID_ATTRIBUTE_KEY, &self.counterparty_port_id).into(),
            (
                COUNTERPARTY_CHANNEL_ID_ATTRIBUTE_KEY,
                self.counterparty_channel_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            )
                .into(),
            (CONNECTION_ID_ATTRIBUTE_KEY, &self.connection_id).into(),
        ]
    }
}

/// Emitted when an already-open channel end is bootstrapped into the store.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterChannel {
    pub ids: ChannelIds,
    pub ordering: Order,
    pub version: Version,
}

impl RegisterChannel {
    pub fn event_type(&self) -> &str {
        CHANNEL_REGISTER_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        let mut attributes = self.ids.attributes();
        attributes.push((PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY, self.ordering).into());
        attributes.push((VERSION_ATTRIBUTE_KEY, &self.version).into());
        attributes
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseInit(pub ChannelIds);

impl CloseInit {
    pub fn event_type(&self) -> &str {
        CHANNEL_CLOSE_INIT_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        self.0.attributes()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseConfirm(pub ChannelIds);

impl CloseConfirm {
    pub fn event_type(&self) -> &str {
        CHANNEL_CLOSE_CONFIRM_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        self.0.attributes()
    }
}

/// Emitted when a timeout on an ordered channel forces it closed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelClosed {
    pub ids: ChannelIds,
    pub channel_ordering: Order,
}

impl ChannelClosed {
    pub fn event_type(&self) -> &str {
        CHANNEL_CLOSED_EVENT
    }

    pub fn attributes(&self) -> Vec<EventAttribute> {
        let mut attributes = self.ids.attributes();
        attributes.push((PKT_CHANNEL_ORDERING_ATTRIBUTE_KEY, self.channel_ordering).into());
        attributes
    }
}
