use ibc_core_channel_types::channel::Order;
use ibc_core_channel_types::commitment::compute_ack_commitment;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::AcknowledgePacket;
use ibc_core_channel_types::msgs::MsgAcknowledgement;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{AckPath, ChannelEndPath, CommitmentPath, SeqAckPath};
use ibc_core_host::{ClientKeeper, ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{
    authenticate_module, emit_module_extras, invariant_violation, reverify_packet_commitment,
    verify_packet_commitment, verify_packet_counterparty,
};

pub fn acknowledgement_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ProtocolError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, module, &msg)?;

    module
        .on_acknowledgement_packet_validate(&msg.packet, &msg.acknowledgement, &msg.signer)
        .map_err(ProtocolError::PacketError)
}

pub fn acknowledgement_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
    let conn_id_on_a = chan_end_on_a.first_hop()?.clone();

    reverify_packet_commitment(ctx_a, packet)?;

    let next_seq_ack = match chan_end_on_a.ordering() {
        Order::Ordered => {
            let seq_ack_path_on_a = SeqAckPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
            let next = packet.seq_on_a.checked_increment().ok_or_else(|| {
                invariant_violation(format!(
                    "acknowledgement sequence overflow on {}/{}",
                    packet.port_id_on_a, packet.chan_id_on_a
                ))
            })?;
            Some((seq_ack_path_on_a, next))
        }
        Order::Unordered => None,
    };

    let (extras, cb_result) =
        module.on_acknowledgement_packet_execute(packet, &msg.acknowledgement, &msg.signer);

    if let Err(e) = cb_result {
        return Err(invariant_violation(format!(
            "acknowledgement callback failed after validation for packet {}: {e}",
            packet.seq_on_a
        )));
    }

    // apply state changes
    {
        let commitment_path_on_a =
            CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
        ctx_a.delete_packet_commitment(&commitment_path_on_a)?;

        // Note: in validation, we verified that `packet.sequence == nextSeqAck`
        if let Some((seq_ack_path_on_a, next)) = next_seq_ack {
            ctx_a.store_next_sequence_ack(&seq_ack_path_on_a, next)?;
        }
    }

    // emit events and logs
    {
        ctx_a.log_message("success: packet acknowledgement".to_string())?;

        let event = IbcEvent::AcknowledgePacket(AcknowledgePacket::new(
            msg.packet.clone(),
            *chan_end_on_a.ordering(),
            conn_id_on_a,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, module: &dyn Module, msg: &MsgAcknowledgement) -> Result<(), ProtocolError>
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

    if let Order::Ordered = chan_end_on_a.ordering() {
        let seq_ack_path_on_a = SeqAckPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let next_seq_ack = ctx_a.get_next_sequence_ack(&seq_ack_path_on_a)?;
        if packet.seq_on_a != next_seq_ack {
            return Err(PacketError::MismatchedPacketSequence {
                expected: next_seq_ack,
                actual: packet.seq_on_a,
            }
            .into());
        }
    }

    // Verify proofs
    {
        let conn_id_on_a = chan_end_on_a.first_hop()?;
        let ack_commitment = compute_ack_commitment(ctx_a.commitment_hasher(), &msg.acknowledgement);
        let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

        // Verify the proof for the packet against the chain store.
        ctx_a
            .get_client_validation_context()
            .verify_membership(
                conn_id_on_a,
                msg.proof_height_on_b,
                &msg.proof_acked_on_b,
                ack_path_on_b.into(),
                ack_commitment.into_vec(),
            )
            .map_err(|e| PacketError::FailedPacketVerification {
                sequence: packet.seq_on_a,
                client_error: e,
            })?;
    }

    Ok(())
}
