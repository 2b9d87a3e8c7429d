//! Message definitions for the ICS4 datagrams handled by the packet-relay
//! core: the closing handshake, channel registration and the packet
//! lifecycle.

mod acknowledgement;
mod chan_close_confirm;
mod chan_close_init;
mod chan_register;
mod prune_acknowledgement;
mod recv_packet;
mod timeout;
mod timeout_on_close;

pub use acknowledgement::*;
pub use chan_close_confirm::*;
pub use chan_close_init::*;
pub use chan_register::*;
pub use prune_acknowledgement::*;
pub use recv_packet::*;
pub use timeout::*;
pub use timeout_on_close::*;

use ibc_core_host_types::identifiers::PortId;

/// All channel messages
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ChannelMsg {
    Register(MsgChannelRegister),
    CloseInit(MsgChannelCloseInit),
    CloseConfirm(MsgChannelCloseConfirm),
}

/// All packet messages
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum PacketMsg {
    Recv(MsgRecvPacket),
    Ack(MsgAcknowledgement),
    Timeout(MsgTimeout),
    TimeoutOnClose(MsgTimeoutOnClose),
    PruneAck(MsgPruneAcknowledgement),
}

/// The port whose module must be consulted for a channel message.
pub fn channel_msg_to_port_id(msg: &ChannelMsg) -> &PortId {
    match msg {
        ChannelMsg::Register(msg) => &msg.port_id,
        ChannelMsg::CloseInit(msg) => &msg.port_id_on_a,
        ChannelMsg::CloseConfirm(msg) => &msg.port_id_on_b,
    }
}

/// The port owning the local end the packet message acts on: the receiver
/// for `Recv` and `PruneAck`, the sender otherwise.
pub fn packet_msg_to_port_id(msg: &PacketMsg) -> &PortId {
    match msg {
        PacketMsg::Recv(msg) => &msg.packet.port_id_on_b,
        PacketMsg::Ack(msg) => &msg.packet.port_id_on_a,
        PacketMsg::Timeout(msg) => &msg.packet.port_id_on_a,
        PacketMsg::TimeoutOnClose(msg) => &msg.packet.port_id_on_a,
        PacketMsg::PruneAck(msg) => &msg.port_id_on_b,
    }
}
