use std::time::Duration;

use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::CommitmentPath;
use ibc_testkit::testapp::ibc::applications::mock::Callback;
use rstest::*;

use super::{events_since, far_timeout, mock_chains, module_event_kinds, MockChains};

/// Sends a packet that times out two blocks into `B`'s future.
fn send_expiring(chains: &mut MockChains) -> Packet {
    let timeout_height = chains.relayer.ctx_b.latest_height().add(2);
    chains.send_with_timeout(
        b"expiring",
        TimeoutHeight::At(timeout_height),
        TimeoutTimestamp::Never,
    )
}

fn expire_on_b(chains: &mut MockChains) {
    chains.relayer.ctx_b.advance_block();
    chains.relayer.ctx_b.advance_block();
}

fn has_commitment(chains: &MockChains, packet: &Packet) -> bool {
    chains
        .relayer
        .ctx_a
        .provable_value(&CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into())
        .is_some()
}

#[test_log::test]
fn timeout_on_unordered_channel_keeps_it_open() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = send_expiring(&mut chains);
    expire_on_b(&mut chains);
    let events_before = chains.relayer.ctx_a.get_events().len();

    chains
        .relayer
        .timeout_packet_on_a(packet.clone())
        .expect("timeout is processed");

    assert!(!has_commitment(&chains, &packet));
    assert_eq!(
        chains.module_a.callbacks().last(),
        Some(&Callback::Timeout {
            sequence: Sequence::ONE
        })
    );
    let chan_end = chains
        .relayer
        .ctx_a
        .channel(&chains.port_id, &chains.chan_id_on_a)
        .expect("channel exists");
    assert!(chan_end.is_open());

    let events = events_since(&chains.relayer.ctx_a, events_before);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(&events[1], IbcEvent::TimeoutPacket(_)));
    assert!(!events.iter().any(|e| matches!(e, IbcEvent::ChannelClosed(_))));
    assert_eq!(module_event_kinds(&events), vec!["mock_timeout".to_string()]);
}

#[test_log::test]
fn timeout_on_ordered_channel_closes_it() {
    let mut chains = mock_chains(Order::Ordered);
    let packet = send_expiring(&mut chains);
    expire_on_b(&mut chains);
    let events_before = chains.relayer.ctx_a.get_events().len();

    chains
        .relayer
        .timeout_packet_on_a(packet.clone())
        .expect("timeout is processed");

    assert!(!has_commitment(&chains, &packet));
    let chan_end = chains
        .relayer
        .ctx_a
        .channel(&chains.port_id, &chains.chan_id_on_a)
        .expect("channel exists");
    assert_eq!(*chan_end.state(), State::Closed);

    let events = events_since(&chains.relayer.ctx_a, events_before);
    assert!(events.iter().any(|e| matches!(
        e,
        IbcEvent::ChannelClosed(closed) if closed.channel_ordering == Order::Ordered
    )));

    let res = chains.relayer.send_packet_on_a(
        &chains.port_id,
        &chains.chan_id_on_a,
        b"after".to_vec(),
        far_timeout(),
        TimeoutTimestamp::Never,
    );
    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::ChannelNotOpen { .. }))
    ));
}

#[test_log::test]
fn timeout_by_timestamp() {
    let mut chains = mock_chains(Order::Unordered);
    let deadline = (chains.relayer.ctx_b.latest_timestamp() + Duration::from_secs(10))
        .expect("no overflow");
    let packet = chains.send_with_timeout(
        b"expiring",
        TimeoutHeight::Never,
        TimeoutTimestamp::At(deadline),
    );

    chains.relayer.ctx_b.advance_time(Duration::from_secs(20));
    chains.relayer.ctx_b.advance_block();

    chains
        .relayer
        .timeout_packet_on_a(packet.clone())
        .expect("timeout is processed");
    assert!(!has_commitment(&chains, &packet));
}

#[rstest]
#[case::unordered(Order::Unordered)]
#[case::ordered(Order::Ordered)]
fn timeout_before_deadline_is_rejected(#[case] ordering: Order) {
    let mut chains = mock_chains(ordering);
    let packet = send_expiring(&mut chains);
    let before = chains.relayer.ctx_a.snapshot();

    let res = chains.relayer.timeout_packet_on_a(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::PacketTimeoutNotReached { .. }))
    ));
    assert_eq!(chains.relayer.ctx_a.snapshot(), before);
}

#[test_log::test]
fn received_packet_cannot_time_out_on_unordered_channel() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = send_expiring(&mut chains);
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet arrives in time");
    expire_on_b(&mut chains);

    let res = chains.relayer.timeout_packet_on_a(packet.clone());

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::FailedPacketVerification { .. }))
    ));
    assert!(has_commitment(&chains, &packet));
}

#[test_log::test]
fn received_packet_cannot_time_out_on_ordered_channel() {
    let mut chains = mock_chains(Order::Ordered);
    let packet = send_expiring(&mut chains);
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet arrives in time");
    expire_on_b(&mut chains);

    let res = chains.relayer.timeout_packet_on_a(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::PacketAlreadyDelivered { .. }))
    ));
}

#[test_log::test]
fn acknowledged_packet_cannot_time_out() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = send_expiring(&mut chains);
    chains
        .relayer
        .relay_packet(packet.clone())
        .expect("round trip succeeds");
    expire_on_b(&mut chains);

    let res = chains.relayer.timeout_packet_on_a(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MissingPacketCommitment { .. }))
    ));
}
