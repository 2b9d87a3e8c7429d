use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::{CommitmentPath, SeqAckPath};
use ibc_testkit::testapp::ibc::applications::mock::{Callback, MOCK_ACK};
use test_log::test;

use super::{events_since, mock_chains, module_event_kinds};

#[test]
fn round_trip_clears_commitment() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    let ack = chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    let events_before = chains.relayer.ctx_a.get_events().len();

    chains
        .relayer
        .ack_packet_on_a(packet.clone(), ack)
        .expect("acknowledgement is processed");

    let ctx_a = &chains.relayer.ctx_a;
    assert!(ctx_a
        .provable_value(&CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into())
        .is_none());
    assert_eq!(
        chains.module_a.callbacks().last(),
        Some(&Callback::Ack {
            sequence: Sequence::ONE,
            acknowledgement: MOCK_ACK.to_vec(),
        })
    );

    let events = events_since(ctx_a, events_before);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(&events[1], IbcEvent::AcknowledgePacket(_)));
    assert_eq!(module_event_kinds(&events), vec!["mock_ack".to_string()]);
    assert!(ctx_a
        .get_logs()
        .contains(&"mock module: mock_ack 1".to_string()));
}

#[test]
fn ordered_acknowledgements_follow_sequence() {
    let mut chains = mock_chains(Order::Ordered);
    let first = chains.send(b"first");
    let second = chains.send(b"second");
    let ack_first = chains.relayer.recv_packet_on_b(first.clone()).expect("received");
    let ack_second = chains.relayer.recv_packet_on_b(second.clone()).expect("received");

    let res = chains
        .relayer
        .ack_packet_on_a(second.clone(), ack_second.clone());
    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MismatchedPacketSequence { .. }))
    ));

    chains
        .relayer
        .ack_packet_on_a(first, ack_first)
        .expect("first is next");
    chains
        .relayer
        .ack_packet_on_a(second, ack_second)
        .expect("second is next");

    assert_eq!(
        chains
            .relayer
            .ctx_a
            .provable_value(&SeqAckPath::new(&chains.port_id, &chains.chan_id_on_a).into()),
        Some(Sequence::from(3).to_vec())
    );
}

#[test]
fn second_acknowledgement_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    let ack = chains
        .relayer
        .relay_packet(packet.clone())
        .expect("round trip succeeds");
    let before = chains.relayer.ctx_a.snapshot();

    let res = chains.relayer.ack_packet_on_a(packet, ack);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MissingPacketCommitment { .. }))
    ));
    assert_eq!(chains.relayer.ctx_a.snapshot(), before);
}

#[test]
fn forged_acknowledgement_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    let forged = Acknowledgement::try_from(b"forged".to_vec()).expect("non-empty");

    let res = chains.relayer.ack_packet_on_a(packet.clone(), forged);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::FailedPacketVerification { .. }))
    ));
    assert!(chains
        .relayer
        .ctx_a
        .provable_value(&CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into())
        .is_some());
}

#[test]
fn acknowledgement_before_receive_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    let ack = Acknowledgement::try_from(MOCK_ACK.to_vec()).expect("non-empty");

    let res = chains.relayer.ack_packet_on_a(packet, ack);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::FailedPacketVerification { .. }))
    ));
}

#[test]
fn acknowledgement_on_closed_channel_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    let ack = chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    chains
        .relayer
        .close_init_on_a(&chains.port_id, &chains.chan_id_on_a)
        .expect("channel closes");

    let res = chains.relayer.ack_packet_on_a(packet, ack);

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::ChannelNotOpen { .. }))
    ));
}
