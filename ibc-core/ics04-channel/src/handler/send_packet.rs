use ibc_core_channel_types::commitment::compute_packet_commitment;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::SendPacket;
use ibc_core_channel_types::packet::Packet;
use ibc_core_channel_types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::identifiers::Sequence;
use ibc_core_host::types::path::{ChannelEndPath, CommitmentPath, SeqSendPath};
use ibc_core_port::ChannelCapability;
use ibc_primitives::prelude::*;

use super::invariant_violation;
use crate::context::{SendPacketExecutionContext, SendPacketValidationContext};

/// Send a packet over the channel `cap` authorizes, including all necessary
/// validation. Returns the sequence assigned to the packet.
///
/// Equivalent to calling [`send_packet_validate`], followed by [`send_packet_execute`]
pub fn send_packet(
    ctx_a: &mut impl SendPacketExecutionContext,
    cap: &ChannelCapability,
    data: Vec<u8>,
    timeout_height_on_b: TimeoutHeight,
    timeout_timestamp_on_b: TimeoutTimestamp,
) -> Result<Sequence, ProtocolError> {
    let packet = send_packet_validate(
        ctx_a,
        cap,
        data,
        timeout_height_on_b,
        timeout_timestamp_on_b,
    )?;
    send_packet_execute(ctx_a, cap, packet)
}

/// Validate that sending would succeed, and build the packet that would be
/// sent.
pub fn send_packet_validate(
    ctx_a: &impl SendPacketValidationContext,
    cap: &ChannelCapability,
    data: Vec<u8>,
    timeout_height_on_b: TimeoutHeight,
    timeout_timestamp_on_b: TimeoutTimestamp,
) -> Result<Packet, ProtocolError> {
    let port_id_on_a = cap.port_id();
    let chan_id_on_a = cap.channel_id();

    ctx_a
        .port_keeper()
        .authenticate(cap, port_id_on_a, chan_id_on_a)?;

    let chan_end_path_on_a = ChannelEndPath::new(port_id_on_a, chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_open()?;

    let counterparty = chan_end_on_a.counterparty();
    let chan_id_on_b = counterparty.expect_channel_id()?;

    let seq_send_path_on_a = SeqSendPath::new(port_id_on_a, chan_id_on_a);
    let seq_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

    if seq_on_a.checked_increment().is_none() {
        return Err(invariant_violation(format!(
            "send sequence overflow on {port_id_on_a}/{chan_id_on_a}"
        )));
    }

    let packet = Packet {
        seq_on_a,
        port_id_on_a: port_id_on_a.clone(),
        chan_id_on_a: chan_id_on_a.clone(),
        port_id_on_b: counterparty.port_id().clone(),
        chan_id_on_b: chan_id_on_b.clone(),
        data,
        timeout_height_on_b,
        timeout_timestamp_on_b,
    };

    if !packet.has_timeout() {
        return Err(PacketError::MissingTimeout.into());
    }

    Ok(packet)
}

/// Send the packet without any validation.
///
/// `packet` MUST come from a successful call to [`send_packet_validate`]
/// against the current state.
pub fn send_packet_execute(
    ctx_a: &mut impl SendPacketExecutionContext,
    cap: &ChannelCapability,
    packet: Packet,
) -> Result<Sequence, ProtocolError> {
    let seq_send_path_on_a = SeqSendPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    {
        let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

        if cap.port_id() != &packet.port_id_on_a
            || cap.channel_id() != &packet.chan_id_on_a
            || packet.seq_on_a != next_seq_send_on_a
        {
            return Err(invariant_violation(format!(
                "packet {} was not built against the current send sequence {next_seq_send_on_a}",
                packet.seq_on_a
            )));
        }

        let next = next_seq_send_on_a.checked_increment().ok_or_else(|| {
            invariant_violation(format!(
                "send sequence overflow on {}/{}",
                packet.port_id_on_a, packet.chan_id_on_a
            ))
        })?;
        ctx_a.store_next_sequence_send(&seq_send_path_on_a, next)?;
    }

    let commitment = compute_packet_commitment(ctx_a.commitment_hasher(), &packet);
    ctx_a.store_packet_commitment(
        &CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a),
        commitment,
    )?;

    // emit events and logs
    let seq_on_a = packet.seq_on_a;
    {
        let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
        let conn_id_on_a = chan_end_on_a.first_hop()?.clone();

        ctx_a.log_message("success: packet send".to_string())?;
        let event = IbcEvent::SendPacket(SendPacket::new(
            packet,
            *chan_end_on_a.ordering(),
            conn_id_on_a,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;
    }

    Ok(seq_on_a)
}
