use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::packet::PacketData;
use ibc_core::channel::types::packet::Packet;
use ibc_core::router::types::module::ModuleExtras;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};

/// Checks that the host would accept crediting the packet's tokens to its
/// receiver.
pub fn process_recv_packet_validate<Ctx: TokenTransferValidationContext>(
    ctx_b: &Ctx,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    ctx_b.can_receive_coins()?;

    let receiver_account: Ctx::AccountId = data
        .receiver
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    ctx_b.receive_coins_validate(
        &receiver_account,
        &packet.port_id_on_b,
        &packet.chan_id_on_b,
        &data.token,
    )
}

/// This function handles the transfer receiving logic.
///
/// Validation runs here as well: whether or not the host accepts the tokens,
/// the receive itself goes through, and a refusal is reported back to the
/// sender as an error acknowledgement so its tokens can be refunded.
pub fn process_recv_packet_execute<Ctx: TokenTransferExecutionContext>(
    ctx_b: &mut Ctx,
    packet: &Packet,
    data: &PacketData,
) -> Result<ModuleExtras, (ModuleExtras, TokenTransferError)> {
    process_recv_packet_validate(ctx_b, packet, data)
        .map_err(|token_err| (ModuleExtras::empty(), token_err))?;

    let receiver_account = data
        .receiver
        .clone()
        .try_into()
        .map_err(|_| {
            (
                ModuleExtras::empty(),
                TokenTransferError::ParseAccountFailure,
            )
        })?;

    ctx_b
        .receive_coins_execute(
            &receiver_account,
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            &data.token,
        )
        .map_err(|token_err| (ModuleExtras::empty(), token_err))?;

    Ok(ModuleExtras::empty())
}
