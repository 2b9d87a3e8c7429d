//! Builders for the datagrams a relayer submits, with proofs read off the
//! counterparty's store.
//!
//! All functions are written in one direction: the packet travels from `A`
//! to `B`. Swap the arguments for the opposite direction.

use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::msgs::{
    MsgAcknowledgement, MsgChannelCloseConfirm, MsgPruneAcknowledgement, MsgRecvPacket,
    MsgTimeout, MsgTimeoutOnClose,
};
use ibc_core::channel::types::packet::Packet;
use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentProofBytes;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, Path, ReceiptPath, SeqRecvPath,
};
use ibc_core::primitives::Signer;

use crate::testapp::ibc::core::client_ctx::{membership_proof, non_membership_proof};
use crate::testapp::ibc::core::types::MockContext;

/// Proves whatever `ctx` currently holds at `path`: membership of the stored
/// value, or non-membership if nothing is stored.
pub fn prove(ctx: &MockContext, height: Height, path: Path) -> CommitmentProofBytes {
    match ctx.provable_value(&path) {
        Some(value) => membership_proof(height, path, &value),
        None => non_membership_proof(height, path),
    }
}

/// Advances `A` until its clock catches up with `B`'s.
pub fn sync_clock_on_a(ctx_a: &mut MockContext, ctx_b: &MockContext) {
    while ctx_b.latest_timestamp() > ctx_a.latest_timestamp() {
        ctx_a.advance_block();
    }
}

/// Records `B`'s latest consensus state in the client `A` keeps for it.
pub fn update_client_on_a(ctx_a: &mut MockContext, ctx_b: &MockContext, conn_id_on_a: &ConnectionId) {
    sync_clock_on_a(ctx_a, ctx_b);
    ctx_a.store_consensus_timestamp(conn_id_on_a, ctx_b.latest_height(), ctx_b.latest_timestamp());
}

/// `B` is told about a packet committed on `A`.
pub fn build_msg_recv_packet(ctx_a: &MockContext, packet: Packet, signer: Signer) -> MsgRecvPacket {
    let proof_height_on_a = ctx_a.latest_height();
    let proof_commitment_on_a = prove(
        ctx_a,
        proof_height_on_a,
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into(),
    );

    MsgRecvPacket {
        packet,
        proof_commitment_on_a,
        proof_height_on_a,
        signer,
    }
}

/// `A` is told that `B` wrote `acknowledgement` for the packet.
pub fn build_msg_ack(
    ctx_b: &MockContext,
    packet: Packet,
    acknowledgement: Acknowledgement,
    signer: Signer,
) -> MsgAcknowledgement {
    let proof_height_on_b = ctx_b.latest_height();
    let proof_acked_on_b = prove(
        ctx_b,
        proof_height_on_b,
        AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a).into(),
    );

    MsgAcknowledgement {
        packet,
        acknowledgement,
        proof_acked_on_b,
        proof_height_on_b,
        signer,
    }
}

/// The receive sequence `B` reports for the packet's channel, and the proof
/// that `B` has not received the packet.
fn unreceived_on_b(ctx_b: &MockContext, packet: &Packet, height: Height) -> (Sequence, CommitmentProofBytes) {
    let ordering = ctx_b
        .channel(&packet.port_id_on_b, &packet.chan_id_on_b)
        .map(|chan_end| *chan_end.ordering())
        .unwrap_or(Order::Unordered);

    let seq_recv_path: Path = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b).into();
    let next_seq_recv_on_b = ctx_b
        .provable_value(&seq_recv_path)
        .and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
        .map(|bytes| Sequence::from(u64::from_be_bytes(bytes)))
        .unwrap_or(packet.seq_on_a);

    let proof = match ordering {
        Order::Ordered => prove(ctx_b, height, seq_recv_path),
        Order::Unordered => prove(
            ctx_b,
            height,
            ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a).into(),
        ),
    };

    (next_seq_recv_on_b, proof)
}

/// `A` is told that the packet can no longer reach `B`.
pub fn build_msg_timeout(ctx_b: &MockContext, packet: Packet, signer: Signer) -> MsgTimeout {
    let proof_height_on_b = ctx_b.latest_height();
    let (next_seq_recv_on_b, proof_unreceived_on_b) = unreceived_on_b(ctx_b, &packet, proof_height_on_b);

    MsgTimeout {
        packet,
        next_seq_recv_on_b,
        proof_unreceived_on_b,
        proof_height_on_b,
        signer,
    }
}

/// `A` is told that `B` closed its end before receiving the packet.
pub fn build_msg_timeout_on_close(ctx_b: &MockContext, packet: Packet, signer: Signer) -> MsgTimeoutOnClose {
    let proof_height_on_b = ctx_b.latest_height();
    let (next_seq_recv_on_b, proof_unreceived_on_b) = unreceived_on_b(ctx_b, &packet, proof_height_on_b);
    let proof_close_on_b = prove(
        ctx_b,
        proof_height_on_b,
        ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b).into(),
    );

    MsgTimeoutOnClose {
        packet,
        next_seq_recv_on_b,
        proof_unreceived_on_b,
        proof_close_on_b,
        proof_height_on_b,
        signer,
    }
}

/// `B` is told that `A` closed its end of the channel.
pub fn build_msg_close_confirm(
    ctx_a: &MockContext,
    port_id_on_a: &PortId,
    chan_id_on_a: &ChannelId,
    port_id_on_b: PortId,
    chan_id_on_b: ChannelId,
    signer: Signer,
) -> MsgChannelCloseConfirm {
    let proof_height_on_a = ctx_a.latest_height();
    let proof_chan_end_on_a = prove(
        ctx_a,
        proof_height_on_a,
        ChannelEndPath::new(port_id_on_a, chan_id_on_a).into(),
    );

    MsgChannelCloseConfirm {
        port_id_on_b,
        chan_id_on_b,
        proof_chan_end_on_a,
        proof_height_on_a,
        signer,
    }
}

/// `B` is told that `A` has deleted the packet's commitment, so `B` may drop
/// its acknowledgement.
pub fn build_msg_prune(ctx_a: &MockContext, packet: &Packet, signer: Signer) -> MsgPruneAcknowledgement {
    let proof_height_on_a = ctx_a.latest_height();
    let proof_commitment_absent_on_a = prove(
        ctx_a,
        proof_height_on_a,
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a).into(),
    );

    MsgPruneAcknowledgement {
        port_id_on_b: packet.port_id_on_b.clone(),
        chan_id_on_b: packet.chan_id_on_b.clone(),
        sequence: packet.seq_on_a,
        proof_commitment_absent_on_a,
        proof_height_on_a,
        signer,
    }
}
