use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::events::TransferEvent;
use ibc_app_transfer_types::msgs::MsgTransfer;
use ibc_app_transfer_types::MODULE_ID_STR;
use ibc_core::channel::context::{SendPacketExecutionContext, SendPacketValidationContext};
use ibc_core::channel::handler::{send_packet_execute, send_packet_validate};
use ibc_core::channel::types::packet::Packet;
use ibc_core::handler::types::events::MessageEvent;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::port::ChannelCapability;
use ibc_core::primitives::prelude::*;
use ibc_core::router::types::event::ModuleEvent;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};

/// Initiate a token transfer over the channel `cap` authorizes. Equivalent to
/// calling [`send_transfer_validate`], followed by [`send_transfer_execute`].
pub fn send_transfer<SendPacketCtx, TokenCtx>(
    send_packet_ctx_a: &mut SendPacketCtx,
    token_ctx_a: &mut TokenCtx,
    cap: &ChannelCapability,
    msg: MsgTransfer,
) -> Result<Sequence, TokenTransferError>
where
    SendPacketCtx: SendPacketExecutionContext,
    TokenCtx: TokenTransferExecutionContext,
{
    send_transfer_validate(send_packet_ctx_a, token_ctx_a, cap, &msg)?;
    send_transfer_execute(send_packet_ctx_a, token_ctx_a, cap, msg)
}

/// Validates the token transfer. If this succeeds, then it is legal to initiate the transfer with [`send_transfer_execute`].
pub fn send_transfer_validate<SendPacketCtx, TokenCtx>(
    send_packet_ctx_a: &SendPacketCtx,
    token_ctx_a: &TokenCtx,
    cap: &ChannelCapability,
    msg: &MsgTransfer,
) -> Result<(), TokenTransferError>
where
    SendPacketCtx: SendPacketValidationContext,
    TokenCtx: TokenTransferValidationContext,
{
    token_ctx_a.can_send_coins()?;

    build_packet(send_packet_ctx_a, cap, msg)?;

    let sender: TokenCtx::AccountId = msg
        .packet_data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    token_ctx_a.send_coins_validate(
        &sender,
        &msg.port_id_on_a,
        &msg.chan_id_on_a,
        &msg.packet_data.token,
        &msg.packet_data.memo,
    )
}

/// Executes the token transfer. A prior call to [`send_transfer_validate`] MUST have succeeded.
pub fn send_transfer_execute<SendPacketCtx, TokenCtx>(
    send_packet_ctx_a: &mut SendPacketCtx,
    token_ctx_a: &mut TokenCtx,
    cap: &ChannelCapability,
    msg: MsgTransfer,
) -> Result<Sequence, TokenTransferError>
where
    SendPacketCtx: SendPacketExecutionContext,
    TokenCtx: TokenTransferExecutionContext,
{
    let packet = build_packet(send_packet_ctx_a, cap, &msg)?;

    let sender = msg
        .packet_data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    token_ctx_a.send_coins_execute(
        &sender,
        &msg.port_id_on_a,
        &msg.chan_id_on_a,
        &msg.packet_data.token,
        &msg.packet_data.memo,
    )?;

    let sequence = send_packet_execute(send_packet_ctx_a, cap, packet)?;

    {
        send_packet_ctx_a.log_message(format!(
            "IBC fungible token transfer: {} --({})--> {}",
            msg.packet_data.sender, msg.packet_data.token, msg.packet_data.receiver
        ))?;

        let transfer_event = TransferEvent {
            sender: msg.packet_data.sender,
            receiver: msg.packet_data.receiver,
            amount: msg.packet_data.token.amount,
            denom: msg.packet_data.token.denom,
            memo: msg.packet_data.memo,
        };
        send_packet_ctx_a.emit_ibc_event(ModuleEvent::from(transfer_event).into())?;

        send_packet_ctx_a.emit_ibc_event(MessageEvent::Module(MODULE_ID_STR.to_string()).into())?;
    }

    Ok(sequence)
}

fn build_packet<SendPacketCtx>(
    send_packet_ctx_a: &SendPacketCtx,
    cap: &ChannelCapability,
    msg: &MsgTransfer,
) -> Result<Packet, TokenTransferError>
where
    SendPacketCtx: SendPacketValidationContext,
{
    if cap.port_id() != &msg.port_id_on_a || cap.channel_id() != &msg.chan_id_on_a {
        return Err(TokenTransferError::MissingChannelCapability {
            port_id: msg.port_id_on_a.clone(),
            channel_id: msg.chan_id_on_a.clone(),
        });
    }

    Ok(send_packet_validate(
        send_packet_ctx_a,
        cap,
        msg.packet_data.encode(),
        msg.timeout_height_on_b,
        msg.timeout_timestamp_on_b,
    )?)
}
