use ibc_core_channel_types::channel::{ChannelEnd, Order, State};
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::{ChannelClosed, TimeoutPacket};
use ibc_core_channel_types::msgs::{MsgTimeout, MsgTimeoutOnClose};
use ibc_core_channel_types::packet::Packet;
use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::identifiers::Sequence;
use ibc_core_host::types::path::{ChannelEndPath, CommitmentPath, ReceiptPath, SeqRecvPath};
use ibc_core_host::{ClientKeeper, ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;
use ibc_primitives::Signer;

use super::{
    authenticate_module, channel_ids, emit_module_extras, invariant_violation,
    reverify_packet_commitment, timeout_on_close, verify_packet_commitment,
    verify_packet_counterparty,
};
use crate::timeout::{closes_channel, verify_timeout_reached};

#[derive(Clone, Debug)]
pub enum TimeoutMsgType {
    Timeout(MsgTimeout),
    TimeoutOnClose(MsgTimeoutOnClose),
}

impl TimeoutMsgType {
    fn into_packet_and_signer(self) -> (Packet, Signer) {
        match self {
            TimeoutMsgType::Timeout(msg) => (msg.packet, msg.signer),
            TimeoutMsgType::TimeoutOnClose(msg) => (msg.packet, msg.signer),
        }
    }
}

pub fn timeout_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    timeout_msg_type: TimeoutMsgType,
) -> Result<(), ProtocolError>
where
    ValCtx: ValidationContext,
{
    match &timeout_msg_type {
        TimeoutMsgType::Timeout(msg) => validate(ctx_a, module, msg),
        TimeoutMsgType::TimeoutOnClose(msg) => timeout_on_close::validate(ctx_a, module, msg),
    }?;

    let (packet, signer) = timeout_msg_type.into_packet_and_signer();

    module
        .on_timeout_packet_validate(&packet, &signer)
        .map_err(ProtocolError::PacketError)
}

pub fn timeout_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    timeout_msg_type: TimeoutMsgType,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    let (packet, signer) = timeout_msg_type.into_packet_and_signer();
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    reverify_packet_commitment(ctx_a, &packet)?;

    let (extras, cb_result) = module.on_timeout_packet_execute(&packet, &signer);

    if let Err(e) = cb_result {
        return Err(invariant_violation(format!(
            "timeout callback failed after validation for packet {}: {e}",
            packet.seq_on_a
        )));
    }

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
    ctx_a.delete_packet_commitment(&commitment_path_on_a)?;

    let closed = if closes_channel(*chan_end_on_a.ordering())
        && *chan_end_on_a.state() != State::Closed
    {
        let mut chan_end_on_a = chan_end_on_a.clone();
        chan_end_on_a.transition_to(State::Closed).map_err(|e| {
            invariant_violation(format!(
                "cannot close {}/{} after timeout: {e}",
                packet.port_id_on_a, packet.chan_id_on_a
            ))
        })?;
        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a)?;
        true
    } else {
        false
    };

    // emit events and logs
    {
        ctx_a.log_message("success: packet timeout".to_string())?;

        let ids = channel_ids(&packet.port_id_on_a, &packet.chan_id_on_a, &chan_end_on_a)?;
        let ordering = *chan_end_on_a.ordering();

        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(IbcEvent::TimeoutPacket(TimeoutPacket::new(packet, ordering)))?;

        if closed {
            ctx_a.log_message("success: channel closed after packet timeout".to_string())?;
            ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
            ctx_a.emit_ibc_event(IbcEvent::ChannelClosed(ChannelClosed {
                ids,
                channel_ordering: ordering,
            }))?;
        }

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, module: &dyn Module, msg: &MsgTimeout) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_open()?;

    authenticate_module(ctx_a, module, &packet.port_id_on_a, &packet.chan_id_on_a)?;

    verify_packet_counterparty(&chan_end_on_a, &packet.port_id_on_b, &packet.chan_id_on_b)?;

    verify_packet_commitment(ctx_a, packet)?;

    // check that timeout height or timeout timestamp has passed on the other end
    {
        let conn_id_on_a = chan_end_on_a.first_hop()?;
        let timestamp_of_b = ctx_a
            .get_client_validation_context()
            .consensus_timestamp(conn_id_on_a, &msg.proof_height_on_b)?;

        verify_timeout_reached(packet, msg.proof_height_on_b, &timestamp_of_b)?;
    }

    verify_unreceived(
        ctx_a,
        &chan_end_on_a,
        packet,
        msg.next_seq_recv_on_b,
        &msg.proof_unreceived_on_b,
        msg.proof_height_on_b,
    )
}

/// Verifies the counterparty never received `packet`.
///
/// On ordered channels the proof shows the counterparty's next receive
/// sequence, which must not have moved past the packet. On unordered
/// channels it shows the packet's receipt is absent.
pub(super) fn verify_unreceived<Ctx>(
    ctx_a: &Ctx,
    chan_end_on_a: &ChannelEnd,
    packet: &Packet,
    next_seq_recv_on_b: Sequence,
    proof_unreceived_on_b: &CommitmentProofBytes,
    proof_height_on_b: Height,
) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    let conn_id_on_a = chan_end_on_a.first_hop()?;
    let client_val_ctx_a = ctx_a.get_client_validation_context();

    let verification = match chan_end_on_a.ordering() {
        Order::Ordered => {
            if packet.seq_on_a < next_seq_recv_on_b {
                return Err(PacketError::PacketAlreadyDelivered {
                    sequence: packet.seq_on_a,
                    next_seq_recv: next_seq_recv_on_b,
                }
                .into());
            }
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);

            client_val_ctx_a.verify_membership(
                conn_id_on_a,
                proof_height_on_b,
                proof_unreceived_on_b,
                seq_recv_path_on_b.into(),
                next_seq_recv_on_b.to_vec(),
            )
        }
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

            client_val_ctx_a.verify_non_membership(
                conn_id_on_a,
                proof_height_on_b,
                proof_unreceived_on_b,
                receipt_path_on_b.into(),
            )
        }
    };

    verification.map_err(|e| PacketError::FailedPacketVerification {
        sequence: packet.seq_on_a,
        client_error: e,
    })?;

    Ok(())
}
