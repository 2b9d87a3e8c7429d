use ibc_core::channel::types::channel::{ChannelEnd, Counterparty, Order, State};
use ibc_core::channel::types::msgs::MsgChannelRegister;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::channel::types::Version;
use ibc_core::commitment_types::commitment::CommitmentProofBytes;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use typed_builder::TypedBuilder;

use crate::fixtures::core::signer::dummy_account_id;

/// Configuration of a `ChannelEnd` for building dummy channels.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = ChannelEnd))]
pub struct ChannelConfig {
    #[builder(default = State::Open)]
    pub state: State,
    #[builder(default = Order::Unordered)]
    pub ordering: Order,
    #[builder(default = PortId::transfer())]
    pub counterparty_port_id: PortId,
    #[builder(default = Some(ChannelId::zero()))]
    pub counterparty_channel_id: Option<ChannelId>,
    #[builder(default = vec![ConnectionId::zero()])]
    pub connection_hops: Vec<ConnectionId>,
    #[builder(default = Version::from("ics20-1"))]
    pub version: Version,
}

impl From<ChannelConfig> for ChannelEnd {
    fn from(config: ChannelConfig) -> Self {
        ChannelEnd::new(
            config.state,
            config.ordering,
            Counterparty::new(config.counterparty_port_id, config.counterparty_channel_id),
            config.connection_hops,
            config.version,
        )
        .expect("dummy channel end is valid")
    }
}

/// Configuration of the `Packet` type for building dummy packets.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = Packet))]
pub struct PacketConfig {
    #[builder(default = Sequence::ONE)]
    pub seq_on_a: Sequence,
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_a: ChannelId,
    #[builder(default = PortId::transfer())]
    pub port_id_on_b: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_b: ChannelId,
    #[builder(default = vec![0])]
    pub data: Vec<u8>,
    #[builder(default = TimeoutHeight::Never)]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default = TimeoutTimestamp::Never)]
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl From<PacketConfig> for Packet {
    fn from(config: PacketConfig) -> Self {
        Packet {
            seq_on_a: config.seq_on_a,
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            port_id_on_b: config.port_id_on_b,
            chan_id_on_b: config.chan_id_on_b,
            data: config.data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}

/// Configuration of a `MsgChannelRegister` that installs one end of a
/// channel between two mock chains.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = MsgChannelRegister))]
pub struct ChannelRegisterConfig {
    #[builder(default = PortId::transfer())]
    pub port_id: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id: ChannelId,
    #[builder(default = Order::Unordered)]
    pub ordering: Order,
    #[builder(default = PortId::transfer())]
    pub counterparty_port_id: PortId,
    #[builder(default = ChannelId::zero())]
    pub counterparty_chan_id: ChannelId,
    #[builder(default = ConnectionId::zero())]
    pub connection_id: ConnectionId,
    #[builder(default = Version::from("ics20-1"))]
    pub version: Version,
    #[builder(default = dummy_account_id())]
    pub signer: Signer,
}

impl From<ChannelRegisterConfig> for MsgChannelRegister {
    fn from(config: ChannelRegisterConfig) -> Self {
        MsgChannelRegister {
            port_id: config.port_id,
            chan_id: config.chan_id,
            ordering: config.ordering,
            counterparty: Counterparty::new(
                config.counterparty_port_id,
                Some(config.counterparty_chan_id),
            ),
            connection_hops: vec![config.connection_id],
            version: config.version,
            signer: config.signer,
        }
    }
}

/// Proof bytes no mock client will ever accept.
pub fn dummy_proof() -> CommitmentProofBytes {
    b"Y29uc2Vuc3VzU3RhdGUvaWJjb25lY2xpZW50LzIy"
        .to_vec()
        .try_into()
        .expect("Never fails")
}
