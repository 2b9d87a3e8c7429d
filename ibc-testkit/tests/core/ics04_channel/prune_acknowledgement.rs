use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::error::PacketError;
use ibc_core::channel::types::msgs::{MsgPruneAcknowledgement, PacketMsg};
use ibc_core::channel::types::packet::Packet;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::{AckPath, CommitmentPath};
use ibc_testkit::fixtures::core::channel::PacketConfig;
use ibc_testkit::testapp::ibc::core::client_ctx::non_membership_proof;
use test_log::test;

use super::{events_since, mock_chains};

#[test]
fn prune_after_round_trip_drops_acknowledgement() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains
        .relayer
        .relay_packet(packet.clone())
        .expect("round trip succeeds");
    let ack_path = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    assert!(chains.relayer.ctx_b.provable_value(&ack_path.clone().into()).is_some());
    let events_before = chains.relayer.ctx_b.get_events().len();

    chains
        .relayer
        .prune_ack_on_b(&packet)
        .expect("acknowledgement is pruned");

    assert!(chains.relayer.ctx_b.provable_value(&ack_path.into()).is_none());
    let events = events_since(&chains.relayer.ctx_b, events_before);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(
        &events[1],
        IbcEvent::PruneAcknowledgement(e) if e.sequence == Sequence::ONE
            && e.chan_id_on_b == chains.chan_id_on_b
    ));

    let res = chains.relayer.prune_ack_on_b(&packet);
    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MissingPacketAcknowledgement { .. }))
    ));
}

#[test]
fn prune_before_sender_acknowledged_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    chains.relayer.ctx_a.advance_block();
    let before = chains.relayer.ctx_b.snapshot();

    let res = chains.relayer.prune_ack_on_b(&packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::FailedPacketVerification { .. }))
    ));
    assert_eq!(chains.relayer.ctx_b.snapshot(), before);
}

#[test]
fn prune_with_proof_from_before_the_send_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let height_before_send = chains.relayer.ctx_a.latest_height();
    let packet = chains.send(b"hello");
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    let ack_path = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    let commitment_path =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);
    let msg = MsgPruneAcknowledgement {
        port_id_on_b: packet.port_id_on_b.clone(),
        chan_id_on_b: packet.chan_id_on_b.clone(),
        sequence: packet.seq_on_a,
        proof_commitment_absent_on_a: non_membership_proof(
            height_before_send,
            commitment_path.clone().into(),
        ),
        proof_height_on_a: height_before_send,
        signer: chains.relayer.signer.clone(),
    };

    let res = chains.relayer.deliver_on_b(PacketMsg::PruneAck(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::StaleProofHeight { .. }))
    ));
    assert!(chains.relayer.ctx_b.provable_value(&ack_path.into()).is_some());
    assert!(chains
        .relayer
        .ctx_a
        .provable_value(&commitment_path.into())
        .is_some());

    let ack = chains
        .relayer
        .ctx_b
        .get_events()
        .into_iter()
        .rev()
        .find_map(|event| match event {
            IbcEvent::WriteAcknowledgement(e) => Some(e.acknowledgement().clone()),
            _ => None,
        })
        .expect("acknowledgement was written");
    chains
        .relayer
        .ack_packet_on_a(packet, ack)
        .expect("sender can still process the acknowledgement");
}

#[test]
fn prune_without_acknowledgement_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet: Packet = PacketConfig::builder()
        .seq_on_a(Sequence::from(9))
        .port_id_on_a(chains.port_id.clone())
        .chan_id_on_a(chains.chan_id_on_a.clone())
        .port_id_on_b(chains.port_id.clone())
        .chan_id_on_b(chains.chan_id_on_b.clone())
        .build();

    let res = chains.relayer.prune_ack_on_b(&packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MissingPacketAcknowledgement { .. }))
    ));
}
