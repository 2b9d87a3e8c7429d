//! Removal of acknowledgements the counterparty no longer needs.
//!
//! Once the sending chain has processed an acknowledgement it deletes the
//! packet commitment. A proof of that deletion lets the receiving chain drop
//! its stored acknowledgement too.

use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::PruneAcknowledgement;
use ibc_core_channel_types::msgs::MsgPruneAcknowledgement;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::{AckPath, ChannelEndPath, CommitmentPath};
use ibc_core_host::{ClientKeeper, ExecutionContext, ValidationContext};
use ibc_primitives::prelude::*;

use super::invariant_violation;

pub fn prune_acknowledgement_validate<ValCtx>(
    ctx_b: &ValCtx,
    msg: &MsgPruneAcknowledgement,
) -> Result<(), ProtocolError>
where
    ValCtx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    let ack_path_on_b = AckPath::new(&msg.port_id_on_b, &msg.chan_id_on_b, msg.sequence);
    if ctx_b.get_packet_acknowledgement(&ack_path_on_b)?.is_none() {
        return Err(PacketError::MissingPacketAcknowledgement {
            sequence: msg.sequence,
        }
        .into());
    }

    // The commitment existed at the receive proof height, so only a later
    // absence shows the sender has processed the acknowledgement.
    let recv_proof_height = ctx_b
        .get_packet_acknowledgement_proof_height(&ack_path_on_b)?
        .ok_or_else(|| PacketError::MissingPacketAcknowledgement {
            sequence: msg.sequence,
        })?;
    if msg.proof_height_on_a <= recv_proof_height {
        return Err(PacketError::StaleProofHeight {
            sequence: msg.sequence,
            proof_height: msg.proof_height_on_a,
            recv_proof_height,
        }
        .into());
    }

    let conn_id_on_b = chan_end_on_b.first_hop()?;
    let port_id_on_a = chan_end_on_b.counterparty().port_id();
    let chan_id_on_a = chan_end_on_b.counterparty().expect_channel_id()?;
    let commitment_path_on_a = CommitmentPath::new(port_id_on_a, chan_id_on_a, msg.sequence);

    ctx_b
        .get_client_validation_context()
        .verify_non_membership(
            conn_id_on_b,
            msg.proof_height_on_a,
            &msg.proof_commitment_absent_on_a,
            commitment_path_on_a.into(),
        )
        .map_err(|e| PacketError::FailedPacketVerification {
            sequence: msg.sequence,
            client_error: e,
        })?;

    Ok(())
}

pub fn prune_acknowledgement_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    msg: MsgPruneAcknowledgement,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    let ack_path_on_b = AckPath::new(&msg.port_id_on_b, &msg.chan_id_on_b, msg.sequence);
    if ctx_b.get_packet_acknowledgement(&ack_path_on_b)?.is_none() {
        return Err(invariant_violation(format!(
            "acknowledgement {} vanished before it could be pruned",
            msg.sequence
        )));
    }

    ctx_b.delete_packet_acknowledgement(&ack_path_on_b)?;

    ctx_b.log_message("success: packet acknowledgement pruned".to_string())?;
    ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
    ctx_b.emit_ibc_event(IbcEvent::PruneAcknowledgement(PruneAcknowledgement {
        port_id_on_b: msg.port_id_on_b,
        chan_id_on_b: msg.chan_id_on_b,
        sequence: msg.sequence,
    }))?;

    Ok(())
}
