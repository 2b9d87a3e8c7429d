use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::error::PacketError;
use ibc_core::channel::types::msgs::PacketMsg;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::host::types::error::HostError;
use ibc_core::host::types::identifiers::{ChannelId, Sequence};
use ibc_core::host::types::path::{AckPath, ReceiptPath, SeqRecvPath};
use ibc_core::primitives::Signer;
use ibc_testkit::fixtures::core::channel::dummy_proof;
use ibc_testkit::relayer::utils::build_msg_recv_packet;
use ibc_testkit::testapp::ibc::applications::mock::{Callback, MOCK_ACK};
use rstest::*;

use super::{events_since, mock_chains, module_event_kinds};

#[test_log::test]
fn recv_packet_on_unordered_channel() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    let events_before = chains.relayer.ctx_b.get_events().len();

    let ack = chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");

    assert_eq!(ack.as_bytes(), MOCK_ACK);

    let ctx_b = &chains.relayer.ctx_b;
    assert!(ctx_b
        .provable_value(&ReceiptPath::new(&chains.port_id, &chains.chan_id_on_b, packet.seq_on_a).into())
        .is_some());
    assert!(ctx_b
        .provable_value(&AckPath::new(&chains.port_id, &chains.chan_id_on_b, packet.seq_on_a).into())
        .is_some());
    assert_eq!(
        chains.module_b.callbacks().last(),
        Some(&Callback::Recv {
            sequence: Sequence::ONE
        })
    );

    let events = events_since(ctx_b, events_before);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(&events[1], IbcEvent::ReceivePacket(_)));
    assert!(matches!(events[2], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(&events[3], IbcEvent::WriteAcknowledgement(e) if e.acknowledgement().as_bytes() == MOCK_ACK));
    assert_eq!(module_event_kinds(&events), vec!["mock_recv".to_string()]);
}

#[test_log::test]
fn replayed_packet_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    let before = chains.relayer.ctx_b.snapshot();

    let res = chains.relayer.recv_packet_on_b(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::PacketAlreadyReceived { .. }))
    ));
    assert_eq!(chains.relayer.ctx_b.snapshot(), before);
    assert_eq!(chains.module_b.callbacks().len(), 2);
}

#[test_log::test]
fn unordered_channel_accepts_any_order() {
    let mut chains = mock_chains(Order::Unordered);
    let packets: Vec<_> = (1..=3).map(|i| chains.send(&[i])).collect();

    for packet in [&packets[2], &packets[0], &packets[1]] {
        chains
            .relayer
            .recv_packet_on_b(packet.clone())
            .expect("packet is received");
    }

    let received: Vec<_> = chains
        .module_b
        .callbacks()
        .into_iter()
        .filter_map(|cb| match cb {
            Callback::Recv { sequence } => Some(sequence.value()),
            _ => None,
        })
        .collect();
    assert_eq!(received, vec![3, 1, 2]);
}

#[test_log::test]
fn ordered_channel_rejects_out_of_order_packet() {
    let mut chains = mock_chains(Order::Ordered);
    let first = chains.send(b"first");
    let second = chains.send(b"second");
    let before = chains.relayer.ctx_b.snapshot();

    let res = chains.relayer.recv_packet_on_b(second.clone());

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MismatchedPacketSequence { expected, actual }))
            if expected == Sequence::ONE && actual == Sequence::from(2)
    ));
    assert_eq!(chains.relayer.ctx_b.snapshot(), before);

    chains.relayer.recv_packet_on_b(first).expect("first is next");
    chains.relayer.recv_packet_on_b(second).expect("second is next");

    assert_eq!(
        chains
            .relayer
            .ctx_b
            .provable_value(&SeqRecvPath::new(&chains.port_id, &chains.chan_id_on_b).into()),
        Some(Sequence::from(3).to_vec())
    );
}

#[test_log::test]
fn ordered_channel_rejects_replay() {
    let mut chains = mock_chains(Order::Ordered);
    let packet = chains.send(b"hello");
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");

    let res = chains.relayer.recv_packet_on_b(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MismatchedPacketSequence { .. }))
    ));
}

#[rstest]
#[case::by_height(true)]
#[case::by_timestamp(false)]
fn expired_packet_is_rejected(#[case] by_height: bool) {
    let mut chains = mock_chains(Order::Unordered);
    let ctx_b = &chains.relayer.ctx_b;
    let (timeout_height, timeout_timestamp) = if by_height {
        (TimeoutHeight::At(ctx_b.latest_height()), TimeoutTimestamp::Never)
    } else {
        (TimeoutHeight::Never, TimeoutTimestamp::At(ctx_b.latest_timestamp()))
    };
    let packet = chains.send_with_timeout(b"late", timeout_height, timeout_timestamp);
    let before = chains.relayer.ctx_b.snapshot();

    let res = chains.relayer.recv_packet_on_b(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::PacketTimedOut { .. }))
    ));
    assert_eq!(chains.relayer.ctx_b.snapshot(), before);
}

#[test_log::test]
fn invalid_proof_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains.relayer.update_client_on_b();

    let mut msg = build_msg_recv_packet(&chains.relayer.ctx_a, packet, chains.relayer.signer.clone());
    msg.proof_commitment_on_a = dummy_proof();

    let res = chains.relayer.deliver_on_b(PacketMsg::Recv(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::FailedPacketVerification { .. }))
    ));
}

#[test_log::test]
fn tampered_packet_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let mut packet = chains.send(b"hello");
    packet.data = b"jello".to_vec();

    let res = chains.relayer.recv_packet_on_b(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::FailedPacketVerification { .. }))
    ));
    assert!(chains.module_b.callbacks().iter().all(|cb| !matches!(cb, Callback::Recv { .. })));
}

#[test_log::test]
fn packet_from_unexpected_source_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let mut packet = chains.send(b"hello");
    packet.chan_id_on_a = ChannelId::new(7);

    let res = chains.relayer.recv_packet_on_b(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::InvalidPacketCounterparty { .. }))
    ));
}

#[test_log::test]
fn module_refusal_aborts_receive() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains.module_b.configure(|b| b.reject_recv = true);
    let before = chains.relayer.ctx_b.snapshot();

    let res = chains.relayer.recv_packet_on_b(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::AppModule { .. }))
    ));
    assert_eq!(chains.relayer.ctx_b.snapshot(), before);
}

#[test_log::test]
fn custom_acknowledgement_is_stored() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains.module_b.configure(|b| b.ack = b"custom".to_vec());

    let ack = chains
        .relayer
        .recv_packet_on_b(packet)
        .expect("packet is received");

    assert_eq!(ack.as_bytes(), b"custom");
}

#[test_log::test]
fn empty_signer_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    chains.relayer.update_client_on_b();

    let msg = build_msg_recv_packet(&chains.relayer.ctx_a, packet, Signer::from(String::new()));
    let res = chains.relayer.deliver_on_b(PacketMsg::Recv(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::HostError(HostError::InvalidData { .. }))
    ));
}
