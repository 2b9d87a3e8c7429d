use ibc_core::channel::handler::send_packet;
use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::commitment::compute_packet_commitment;
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::client::types::Height;
use ibc_core::commitment_types::hash::Sha256Hasher;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::{CommitmentPath, SeqSendPath};
use ibc_core::port::error::PortError;
use ibc_core::router::router::Router;
use ibc_core::router::types::module::ModuleId;
use ibc_testkit::testapp::ibc::applications::mock::MOCK_MODULE_ID_STR;
use rstest::*;

use super::{events_since, far_timeout, mock_chains};

#[test_log::test]
fn send_packet_commits_and_advances_sequence() {
    let mut chains = mock_chains(Order::Unordered);
    let events_before = chains.relayer.ctx_a.get_events().len();

    let packet = chains.send(b"hello");

    assert_eq!(packet.seq_on_a, Sequence::ONE);
    assert_eq!(packet.port_id_on_b, chains.port_id);
    assert_eq!(packet.chan_id_on_b, chains.chan_id_on_b);
    assert_eq!(packet.data, b"hello".to_vec());

    let ctx_a = &chains.relayer.ctx_a;
    let stored = ctx_a
        .provable_value(
            &CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a)
                .into(),
        )
        .expect("commitment is stored");
    assert_eq!(
        stored,
        compute_packet_commitment(&Sha256Hasher, &packet).into_vec()
    );
    assert_eq!(
        ctx_a.provable_value(&SeqSendPath::new(&chains.port_id, &chains.chan_id_on_a).into()),
        Some(Sequence::from(2).to_vec())
    );

    let events = events_since(ctx_a, events_before);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(&events[1], IbcEvent::SendPacket(e) if e.packet == packet));
}

#[test_log::test]
fn sequences_are_assigned_in_order() {
    let mut chains = mock_chains(Order::Ordered);

    let sequences: Vec<_> = (0..3)
        .map(|i| chains.send(&[i]).seq_on_a)
        .collect();

    assert_eq!(
        sequences,
        vec![Sequence::from(1), Sequence::from(2), Sequence::from(3)]
    );
}

#[rstest]
#[case::height_only(far_timeout(), TimeoutTimestamp::Never)]
#[case::timestamp_only(TimeoutHeight::Never, TimeoutTimestamp::from_nanoseconds(u64::MAX).expect("valid timestamp"))]
#[case::both(
    TimeoutHeight::At(Height::new(0, 100).expect("valid height")),
    TimeoutTimestamp::from_nanoseconds(u64::MAX).expect("valid timestamp")
)]
fn send_packet_accepts_any_set_timeout(
    #[case] timeout_height_on_b: TimeoutHeight,
    #[case] timeout_timestamp_on_b: TimeoutTimestamp,
) {
    let mut chains = mock_chains(Order::Unordered);

    let packet = chains.send_with_timeout(b"data", timeout_height_on_b, timeout_timestamp_on_b);

    assert_eq!(packet.timeout_height_on_b, timeout_height_on_b);
    assert_eq!(packet.timeout_timestamp_on_b, timeout_timestamp_on_b);
}

#[test_log::test]
fn send_packet_without_timeout_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let before = chains.relayer.ctx_a.snapshot();

    let res = chains.relayer.send_packet_on_a(
        &chains.port_id,
        &chains.chan_id_on_a,
        b"data".to_vec(),
        TimeoutHeight::Never,
        TimeoutTimestamp::Never,
    );

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MissingTimeout))
    ));
    assert_eq!(chains.relayer.ctx_a.snapshot(), before);
}

#[test_log::test]
fn send_packet_on_closed_channel_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    chains
        .relayer
        .close_init_on_a(&chains.port_id, &chains.chan_id_on_a)
        .expect("channel closes");

    let res = chains.relayer.send_packet_on_a(
        &chains.port_id,
        &chains.chan_id_on_a,
        b"data".to_vec(),
        far_timeout(),
        TimeoutTimestamp::Never,
    );

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::ChannelNotOpen { .. }))
    ));
}

#[test_log::test]
fn capability_from_another_chain_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let before = chains.relayer.ctx_a.snapshot();

    let module_id = ModuleId::new(MOCK_MODULE_ID_STR.to_string());
    let foreign_cap = chains
        .relayer
        .router_b
        .get_route(&module_id)
        .and_then(|module| module.channel_capability(&chains.port_id, &chains.chan_id_on_b))
        .expect("module on B holds its capability");

    let res = send_packet(
        &mut chains.relayer.ctx_a,
        foreign_cap,
        b"data".to_vec(),
        far_timeout(),
        TimeoutTimestamp::Never,
    );

    assert!(matches!(
        res,
        Err(ProtocolError::PortError(PortError::UnauthorizedCapability { .. }))
    ));
    assert_eq!(chains.relayer.ctx_a.snapshot(), before);
}

#[test_log::test]
fn expired_timeout_is_still_sent() {
    let mut chains = mock_chains(Order::Unordered);
    // The sender does not judge its own timeouts; the packet simply times
    // out on arrival.
    let past = TimeoutHeight::At(Height::new(0, 1).expect("valid height"));
    let packet = chains.send_with_timeout(b"data", past, TimeoutTimestamp::Never);

    assert_eq!(packet.seq_on_a, Sequence::ONE);
}
