use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::error::PacketError;
use ibc_core::channel::types::msgs::PacketMsg;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::entrypoint::{execute, validate};
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::identifiers::Sequence;
use ibc_core::host::types::path::CommitmentPath;
use ibc_testkit::relayer::utils;
use ibc_testkit::testapp::ibc::applications::mock::{Callback, MOCK_ACK};
use test_log::test;

use super::{mock_chains, MockChains};

fn has_commitment(chains: &MockChains, packet: &Packet) -> bool {
    chains
        .relayer
        .ctx_a
        .provable_value(&CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into())
        .is_some()
}

fn remove_commitment(chains: &MockChains, packet: &Packet) {
    chains
        .relayer
        .ctx_a
        .ibc_store
        .lock()
        .packet_commitment
        .get_mut(&(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone()))
        .and_then(|commitments| commitments.remove(&packet.seq_on_a))
        .expect("commitment was stored");
}

fn send_expiring(chains: &mut MockChains) -> Packet {
    let timeout_height = chains.relayer.ctx_b.latest_height().add(2);
    let packet = chains.send_with_timeout(
        b"expiring",
        TimeoutHeight::At(timeout_height),
        TimeoutTimestamp::Never,
    );
    chains.relayer.ctx_b.advance_block();
    chains.relayer.ctx_b.advance_block();
    packet
}

#[test]
fn failing_ack_callback_is_an_invariant_violation() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    let ack = chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    chains.module_a.configure(|b| b.fail_ack_execute = true);

    let err = chains
        .relayer
        .ack_packet_on_a(packet.clone(), ack)
        .expect_err("callback fails");

    assert!(err.is_invariant_violation());
    assert!(has_commitment(&chains, &packet));
}

#[test]
fn failing_timeout_callback_is_an_invariant_violation() {
    let mut chains = mock_chains(Order::Ordered);
    let packet = send_expiring(&mut chains);
    chains.module_a.configure(|b| b.fail_timeout_execute = true);

    let err = chains
        .relayer
        .timeout_packet_on_a(packet.clone())
        .expect_err("callback fails");

    assert!(err.is_invariant_violation());
    assert!(has_commitment(&chains, &packet));
    assert!(chains
        .relayer
        .ctx_a
        .channel(&chains.port_id, &chains.chan_id_on_a)
        .expect("channel exists")
        .is_open());
}

#[test]
fn commitment_removed_between_validate_and_execute_of_ack() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = chains.send(b"hello");
    let ack = chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received");
    chains.relayer.update_client_on_a();
    let msg: MsgEnvelope = PacketMsg::Ack(utils::build_msg_ack(
        &chains.relayer.ctx_b,
        packet.clone(),
        ack,
        chains.relayer.signer.clone(),
    ))
    .into();

    validate(&chains.relayer.ctx_a, &chains.relayer.router_a, msg.clone()).expect("message is valid");
    remove_commitment(&chains, &packet);
    let err = execute(&mut chains.relayer.ctx_a, &mut chains.relayer.router_a, msg)
        .expect_err("store changed under the handler");

    assert!(err.is_invariant_violation());
    assert!(!chains
        .module_a
        .callbacks()
        .iter()
        .any(|c| matches!(c, Callback::Ack { .. })));
}

#[test]
fn commitment_removed_between_validate_and_execute_of_timeout() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = send_expiring(&mut chains);
    chains.relayer.update_client_on_a();
    let msg: MsgEnvelope = PacketMsg::Timeout(utils::build_msg_timeout(
        &chains.relayer.ctx_b,
        packet.clone(),
        chains.relayer.signer.clone(),
    ))
    .into();

    validate(&chains.relayer.ctx_a, &chains.relayer.router_a, msg.clone()).expect("message is valid");
    remove_commitment(&chains, &packet);
    let err = execute(&mut chains.relayer.ctx_a, &mut chains.relayer.router_a, msg)
        .expect_err("store changed under the handler");

    assert!(err.is_invariant_violation());
}

#[test]
fn exhausted_send_sequence_is_an_invariant_violation() {
    let mut chains = mock_chains(Order::Unordered);
    chains
        .relayer
        .ctx_a
        .ibc_store
        .lock()
        .next_sequence_send
        .insert(
            (chains.port_id.clone(), chains.chan_id_on_a.clone()),
            Sequence::from(u64::MAX),
        );
    let before = chains.relayer.ctx_a.snapshot();

    let err = chains
        .relayer
        .send_packet_on_a(
            &chains.port_id,
            &chains.chan_id_on_a,
            b"last".to_vec(),
            super::far_timeout(),
            TimeoutTimestamp::Never,
        )
        .expect_err("no sequence is left");

    assert!(err.is_invariant_violation());
    assert_eq!(chains.relayer.ctx_a.snapshot(), before);
}

/// A packet ends in exactly one of acknowledged or timed out.
#[test]
fn timed_out_packet_cannot_be_acknowledged() {
    let mut chains = mock_chains(Order::Unordered);
    let packet = send_expiring(&mut chains);
    chains
        .relayer
        .timeout_packet_on_a(packet.clone())
        .expect("timeout is processed");
    let ack = Acknowledgement::try_from(MOCK_ACK.to_vec()).expect("non-empty");

    let res = chains.relayer.ack_packet_on_a(packet, ack);

    assert!(matches!(
        res,
        Err(ProtocolError::PacketError(PacketError::MissingPacketCommitment { .. }))
    ));
    let settled = chains
        .module_a
        .callbacks()
        .into_iter()
        .filter(|c| matches!(c, Callback::Timeout { .. } | Callback::Ack { .. }))
        .count();
    assert_eq!(settled, 1);
}
