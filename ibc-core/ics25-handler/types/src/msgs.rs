use ibc_core_channel_types::msgs::{ChannelMsg, PacketMsg};
use ibc_primitives::Signer;

/// Enumeration of all messages that the local ICS26 module is capable of
/// routing.
///
/// Matched exhaustively by the entrypoint, so adding a variant here fails to
/// compile until a handler exists for it.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum MsgEnvelope {
    Channel(ChannelMsg),
    Packet(PacketMsg),
}

impl MsgEnvelope {
    pub fn signer(&self) -> &Signer {
        match self {
            MsgEnvelope::Channel(msg) => match msg {
                ChannelMsg::Register(msg) => &msg.signer,
                ChannelMsg::CloseInit(msg) => &msg.signer,
                ChannelMsg::CloseConfirm(msg) => &msg.signer,
            },
            MsgEnvelope::Packet(msg) => match msg {
                PacketMsg::Recv(msg) => &msg.signer,
                PacketMsg::Ack(msg) => &msg.signer,
                PacketMsg::Timeout(msg) => &msg.signer,
                PacketMsg::TimeoutOnClose(msg) => &msg.signer,
                PacketMsg::PruneAck(msg) => &msg.signer,
            },
        }
    }
}
