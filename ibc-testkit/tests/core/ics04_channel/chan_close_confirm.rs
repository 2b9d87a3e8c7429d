use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::error::ChannelError;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_testkit::testapp::ibc::applications::mock::Callback;
use test_log::test;

use super::{events_since, mock_chains};

#[test]
fn chan_close_confirm_follows_counterparty() {
    let mut chains = mock_chains(Order::Ordered);
    chains
        .relayer
        .close_init_on_a(&chains.port_id, &chains.chan_id_on_a)
        .expect("A closes");
    let events_before = chains.relayer.ctx_b.get_events().len();

    chains
        .relayer
        .close_confirm_on_b(
            &chains.port_id,
            &chains.chan_id_on_a,
            &chains.port_id,
            &chains.chan_id_on_b,
        )
        .expect("B confirms");

    let ctx_b = &chains.relayer.ctx_b;
    let chan_end = ctx_b
        .channel(&chains.port_id, &chains.chan_id_on_b)
        .expect("channel exists");
    assert_eq!(*chan_end.state(), State::Closed);
    assert_eq!(
        chains.module_b.callbacks().last(),
        Some(&Callback::CloseConfirm {
            port_id: chains.port_id.clone(),
            channel_id: chains.chan_id_on_b.clone(),
        })
    );

    let events = events_since(ctx_b, events_before);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(&events[1], IbcEvent::CloseConfirmChannel(e) if e.0.channel_id == chains.chan_id_on_b));
}

#[test]
fn confirm_requires_counterparty_closed() {
    let mut chains = mock_chains(Order::Unordered);
    let before = chains.relayer.ctx_b.snapshot();

    let res = chains.relayer.close_confirm_on_b(
        &chains.port_id,
        &chains.chan_id_on_a,
        &chains.port_id,
        &chains.chan_id_on_b,
    );

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::FailedProofVerification(_)))
    ));
    assert_eq!(chains.relayer.ctx_b.snapshot(), before);
}

#[test]
fn confirm_twice_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    chains
        .relayer
        .close_init_on_a(&chains.port_id, &chains.chan_id_on_a)
        .expect("A closes");
    chains
        .relayer
        .close_confirm_on_b(
            &chains.port_id,
            &chains.chan_id_on_a,
            &chains.port_id,
            &chains.chan_id_on_b,
        )
        .expect("B confirms");

    let res = chains.relayer.close_confirm_on_b(
        &chains.port_id,
        &chains.chan_id_on_a,
        &chains.port_id,
        &chains.chan_id_on_b,
    );

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::InvalidStateTransition { .. }))
    ));
}
