use ibc_core_channel_types::channel::ChannelEnd;
use ibc_core_channel_types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc_core_channel_types::packet::Receipt;
use ibc_core_client_types::error::ClientError;
use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_commitment_types::hash::{CommitmentHasher, Sha256Hasher};
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host_types::identifiers::{ConnectionId, Sequence};
use ibc_core_host_types::path::{
    AckPath, ChannelEndPath, CommitmentPath, Path, ReceiptPath, SeqAckPath, SeqRecvPath,
    SeqSendPath,
};
use ibc_core_port::PortKeeper;
use ibc_primitives::prelude::*;
use ibc_primitives::{Signer, Timestamp};

/// The light-client view a host keeps of its counterparties.
///
/// Each connection is backed by one client. The core never inspects proofs;
/// it only asks whether `proof` shows `path` holding `value` (or nothing) in
/// the counterparty's store at `proof_height`.
pub trait ClientKeeper {
    fn verify_membership(
        &self,
        conn_id: &ConnectionId,
        proof_height: Height,
        proof: &CommitmentProofBytes,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError>;

    fn verify_non_membership(
        &self,
        conn_id: &ConnectionId,
        proof_height: Height,
        proof: &CommitmentProofBytes,
        path: Path,
    ) -> Result<(), ClientError>;

    /// Timestamp of the counterparty's consensus state at `height`, as
    /// recorded by the client behind `conn_id`.
    fn consensus_timestamp(
        &self,
        conn_id: &ConnectionId,
        height: &Height,
    ) -> Result<Timestamp, ClientError>;

    /// The identifier the counterparty uses for its end of `conn_id`.
    fn counterparty_connection_id(&self, conn_id: &ConnectionId)
        -> Result<ConnectionId, ClientError>;
}

/// Context to be implemented by the host that provides all "read-only" methods.
///
/// Trait used for the top-level `validate` entrypoint in the `ibc-core` crate.
pub trait ValidationContext {
    type V: ClientKeeper;

    /// Retrieve the context that implements the clients' proof verification.
    fn get_client_validation_context(&self) -> &Self::V;

    /// Returns the current height of the local chain.
    fn host_height(&self) -> Result<Height, ProtocolError>;

    /// Returns the current timestamp of the local chain.
    fn host_timestamp(&self) -> Result<Timestamp, ProtocolError>;

    /// Port bindings and the capability authority.
    fn port_keeper(&self) -> &PortKeeper;

    /// Hash function used for packet and acknowledgement commitments.
    ///
    /// Both ends of a channel must agree on it.
    fn commitment_hasher(&self) -> &dyn CommitmentHasher {
        &Sha256Hasher
    }

    /// Returns the `ChannelEnd` for the given `port_id` and `chan_id`.
    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ProtocolError>;

    /// Returns the sequence number for the next packet to be sent for the given store path
    fn get_next_sequence_send(&self, seq_send_path: &SeqSendPath)
        -> Result<Sequence, ProtocolError>;

    /// Returns the sequence number for the next packet to be received for the given store path
    fn get_next_sequence_recv(&self, seq_recv_path: &SeqRecvPath)
        -> Result<Sequence, ProtocolError>;

    /// Returns the sequence number for the next packet to be acknowledged for the given store path
    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ProtocolError>;

    /// Returns the packet commitment for the given store path, if any
    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<Option<PacketCommitment>, ProtocolError>;

    /// Returns the packet receipt for the given store path, if any
    fn get_packet_receipt(&self, receipt_path: &ReceiptPath)
        -> Result<Option<Receipt>, ProtocolError>;

    /// Returns the packet acknowledgement for the given store path, if any
    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<Option<AcknowledgementCommitment>, ProtocolError>;

    /// Returns the counterparty height at which the packet behind `ack_path`
    /// was proven committed when it was received, if an acknowledgement is
    /// stored there
    fn get_packet_acknowledgement_proof_height(
        &self,
        ack_path: &AckPath,
    ) -> Result<Option<Height>, ProtocolError>;

    /// Validates the `signer` field of IBC messages, which represents the address
    /// of the user/relayer that signed the given message.
    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ProtocolError>;
}

/// Context to be implemented by the host that provides all "write-only" methods.
///
/// Trait used for the top-level `execute` and `dispatch` entrypoints in the `ibc-core` crate.
pub trait ExecutionContext: ValidationContext {
    fn port_keeper_mut(&mut self) -> &mut PortKeeper;

    /// Stores the given channel_end at a path associated with the port_id and channel_id.
    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ProtocolError>;

    /// Stores the given `nextSequenceSend` number at the given store path
    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError>;

    /// Stores the given `nextSequenceRecv` number at the given store path
    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError>;

    /// Stores the given `nextSequenceAck` number at the given store path
    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError>;

    /// Stores the given packet commitment at the given store path
    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ProtocolError>;

    /// Deletes the packet commitment at the given store path
    fn delete_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
    ) -> Result<(), ProtocolError>;

    /// Stores the given packet receipt at the given store path
    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ProtocolError>;

    /// Stores the given packet acknowledgement at the given store path, along
    /// with the counterparty height the packet commitment was proven at
    fn store_packet_acknowledgement(
        &mut self,
        ack_path: &AckPath,
        ack_commitment: AcknowledgementCommitment,
        recv_proof_height: Height,
    ) -> Result<(), ProtocolError>;

    /// Deletes the packet acknowledgement and its proof height at the given store path
    fn delete_packet_acknowledgement(&mut self, ack_path: &AckPath) -> Result<(), ProtocolError>;

    /// Emit the given IBC event
    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ProtocolError>;

    /// Log the given message.
    fn log_message(&mut self, message: String) -> Result<(), ProtocolError>;
}
