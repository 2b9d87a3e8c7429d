use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::CommitmentPath;
use ibc_testkit::testapp::ibc::applications::mock::Callback;
use rstest::*;

use super::{events_since, mock_chains};

#[rstest]
#[case::unordered(Order::Unordered, State::Open)]
#[case::ordered(Order::Ordered, State::Closed)]
fn counterparty_close_times_out_pending_packet(#[case] ordering: Order, #[case] state_after: State) {
    let mut chains = mock_chains(ordering);
    let packet = chains.send(b"stranded");
    chains
        .relayer
        .close_init_on_b(&chains.port_id, &chains.chan_id_on_b)
        .expect("B closes its end");
    let events_before = chains.relayer.ctx_a.get_events().len();

    chains
        .relayer
        .timeout_on_close_packet_on_a(packet.clone())
        .expect("timeout on close is processed");

    let ctx_a = &chains.relayer.ctx_a;
    assert!(ctx_a
        .provable_value(&CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into())
        .is_none());
    assert_eq!(
        chains.module_a.callbacks().last(),
        Some(&Callback::Timeout {
            sequence: Sequence::ONE
        })
    );
    let chan_end = ctx_a
        .channel(&chains.port_id, &chains.chan_id_on_a)
        .expect("channel exists");
    assert_eq!(*chan_end.state(), state_after);

    let events = events_since(ctx_a, events_before);
    assert!(events.iter().any(|e| matches!(e, IbcEvent::TimeoutPacket(_))));
}

#[test_log::test]
fn open_counterparty_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"pending");
    let before = chains.relayer.ctx_a.snapshot();

    let res = chains.relayer.timeout_on_close_packet_on_a(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::FailedProofVerification(_)))
    ));
    assert_eq!(chains.relayer.ctx_a.snapshot(), before);
}

#[test_log::test]
fn packet_received_before_close_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"delivered");
    chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    chains
        .relayer
        .close_init_on_b(&chains.port_id, &chains.chan_id_on_b)
        .expect("B closes its end");

    let res = chains.relayer.timeout_on_close_packet_on_a(packet);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::FailedPacketVerification { .. }))
    ));
}

#[test_log::test]
fn timeout_on_close_works_after_local_close() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"stranded");
    chains
        .relayer
        .close_init_on_a(&chains.port_id, &chains.chan_id_on_a)
        .expect("A closes its end");
    chains
        .relayer
        .close_confirm_on_b(
            &chains.port_id,
            &chains.chan_id_on_a,
            &chains.port_id,
            &chains.chan_id_on_b,
        )
        .expect("B confirms");

    chains
        .relayer
        .timeout_on_close_packet_on_a(packet)
        .expect("pending packet is reclaimed on a closed channel");
}
