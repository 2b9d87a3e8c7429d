//! Implements the processing logic for ICS20 (token transfer) message.
mod on_recv_packet;
mod send_transfer;

pub use on_recv_packet::*;
pub use send_transfer::*;

use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::packet::PacketData;
use ibc_core::channel::types::packet::Packet;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};

pub fn refund_packet_token_execute(
    ctx_a: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let sender = data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    ctx_a.refund_coins_execute(
        &sender,
        &packet.port_id_on_a,
        &packet.chan_id_on_a,
        &data.token,
    )
}

pub fn refund_packet_token_validate(
    ctx_a: &impl TokenTransferValidationContext,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let sender = data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    ctx_a.refund_coins_validate(
        &sender,
        &packet.port_id_on_a,
        &packet.chan_id_on_a,
        &data.token,
    )
}
