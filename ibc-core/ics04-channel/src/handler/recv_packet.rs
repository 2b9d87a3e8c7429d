use ibc_core_channel_types::channel::Order;
use ibc_core_channel_types::commitment::{compute_ack_commitment, compute_packet_commitment};
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::{ReceivePacket, WriteAcknowledgement};
use ibc_core_channel_types::msgs::MsgRecvPacket;
use ibc_core_channel_types::packet::Receipt;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqRecvPath};
use ibc_core_host::{ClientKeeper, ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{
    authenticate_module, emit_module_extras, invariant_violation, verify_packet_counterparty,
};
use crate::timeout::verify_not_timed_out;

pub fn recv_packet_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    msg: MsgRecvPacket,
) -> Result<(), ProtocolError>
where
    ValCtx: ValidationContext,
{
    // Note: this contains the validation for `write_acknowledgement` as well.
    validate(ctx_b, module, &msg)?;

    module
        .on_recv_packet_validate(&msg.packet, &msg.signer)
        .map_err(ProtocolError::PacketError)
}

pub fn recv_packet_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgRecvPacket,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;
    let conn_id_on_b = chan_end_on_b.first_hop()?.clone();

    // `recvPacket` core handler state changes
    match chan_end_on_b.ordering() {
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

            ctx_b.store_packet_receipt(&receipt_path_on_b, Receipt::Ok)?;
        }
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;

            if packet.seq_on_a != next_seq_recv {
                return Err(invariant_violation(format!(
                    "packet {} is no longer the next to receive ({next_seq_recv})",
                    packet.seq_on_a
                )));
            }
            let next = next_seq_recv.checked_increment().ok_or_else(|| {
                invariant_violation(format!(
                    "receive sequence overflow on {}/{}",
                    packet.port_id_on_b, packet.chan_id_on_b
                ))
            })?;

            ctx_b.store_next_sequence_recv(&seq_recv_path_on_b, next)?;
        }
    }

    let (extras, acknowledgement) = module.on_recv_packet_execute(packet, &msg.signer);

    // `writeAcknowledgement` handler state changes
    {
        let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
        let ack_commitment = compute_ack_commitment(ctx_b.commitment_hasher(), &acknowledgement);
        ctx_b.store_packet_acknowledgement(&ack_path_on_b, ack_commitment, msg.proof_height_on_a)?;
    }

    // emit events and logs
    {
        // receive packet events/logs
        ctx_b.log_message("success: packet receive".to_string())?;
        let recv_event = ReceivePacket::new(
            msg.packet.clone(),
            *chan_end_on_b.ordering(),
            conn_id_on_b.clone(),
        );
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(IbcEvent::ReceivePacket(recv_event))?;

        // write ack events/logs
        ctx_b.log_message("success: packet write acknowledgement".to_string())?;
        let write_ack_event = WriteAcknowledgement::new(msg.packet, acknowledgement, conn_id_on_b);
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(IbcEvent::WriteAcknowledgement(write_ack_event))?;

        // module specific events/logs
        emit_module_extras(ctx_b, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_b: &Ctx, module: &dyn Module, msg: &MsgRecvPacket) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    authenticate_module(ctx_b, module, &packet.port_id_on_b, &packet.chan_id_on_b)?;

    chan_end_on_b.verify_open()?;

    verify_packet_counterparty(&chan_end_on_b, &packet.port_id_on_a, &packet.chan_id_on_a)?;

    verify_not_timed_out(packet, ctx_b.host_height()?, &ctx_b.host_timestamp()?)?;

    match chan_end_on_b.ordering() {
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
            if packet.seq_on_a != next_seq_recv {
                return Err(PacketError::MismatchedPacketSequence {
                    expected: next_seq_recv,
                    actual: packet.seq_on_a,
                }
                .into());
            }
            if next_seq_recv.checked_increment().is_none() {
                return Err(invariant_violation(format!(
                    "receive sequence overflow on {}/{}",
                    packet.port_id_on_b, packet.chan_id_on_b
                )));
            }
        }
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
            if ctx_b.get_packet_receipt(&receipt_path_on_b)?.is_some() {
                return Err(PacketError::PacketAlreadyReceived {
                    sequence: packet.seq_on_a,
                }
                .into());
            }
        }
    }

    // `writeAcknowledgement` validation
    {
        let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
        if ctx_b.get_packet_acknowledgement(&ack_path_on_b)?.is_some() {
            return Err(PacketError::DuplicateAcknowledgement {
                sequence: packet.seq_on_a,
            }
            .into());
        }
    }

    // Verify proofs
    {
        let conn_id_on_b = chan_end_on_b.first_hop()?;
        let expected_commitment_on_a = compute_packet_commitment(ctx_b.commitment_hasher(), packet);
        let commitment_path_on_a =
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

        ctx_b
            .get_client_validation_context()
            .verify_membership(
                conn_id_on_b,
                msg.proof_height_on_a,
                &msg.proof_commitment_on_a,
                commitment_path_on_a.into(),
                expected_commitment_on_a.into_vec(),
            )
            .map_err(|e| PacketError::FailedPacketVerification {
                sequence: packet.seq_on_a,
                client_error: e,
            })?;
    }

    Ok(())
}
