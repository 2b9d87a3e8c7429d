use core::str::FromStr;

use ibc_app_transfer::types::msgs::MsgTransfer;
use ibc_app_transfer::types::packet::PacketData;
use ibc_app_transfer::types::{Amount, Coin, Denom, Memo};
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use typed_builder::TypedBuilder;

use crate::fixtures::core::signer::{dummy_account_id, dummy_receiver_id};

pub fn dummy_denom() -> Denom {
    Denom::from_str("uatom").expect("Never fails")
}

/// Configuration of the `PacketData` type for building dummy transfers.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = PacketData))]
pub struct PacketDataConfig {
    #[builder(default = dummy_denom())]
    pub denom: Denom,
    #[builder(default = Amount::from(100))]
    pub amount: Amount,
    #[builder(default = dummy_account_id())]
    pub sender: Signer,
    #[builder(default = dummy_receiver_id())]
    pub receiver: Signer,
    #[builder(default = Memo::from(""))]
    pub memo: Memo,
}

impl From<PacketDataConfig> for PacketData {
    fn from(config: PacketDataConfig) -> Self {
        PacketData {
            token: Coin {
                denom: config.denom,
                amount: config.amount,
            },
            sender: config.sender,
            receiver: config.receiver,
            memo: config.memo,
        }
    }
}

/// Configuration of the `MsgTransfer` type for building dummy transfers.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = MsgTransfer))]
pub struct MsgTransferConfig {
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_a: ChannelId,
    #[builder(default = PacketDataConfig::builder().build())]
    pub packet_data: PacketData,
    #[builder(default = TimeoutHeight::Never)]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default = TimeoutTimestamp::Never)]
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl From<MsgTransferConfig> for MsgTransfer {
    fn from(config: MsgTransferConfig) -> Self {
        MsgTransfer {
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            packet_data: config.packet_data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}
