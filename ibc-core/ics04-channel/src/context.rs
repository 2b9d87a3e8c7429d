//! ICS4 (channel) context.
//!
//! Narrow views of the host context for callers that only send packets,
//! such as application modules.

use ibc_core_channel_types::channel::ChannelEnd;
use ibc_core_channel_types::commitment::PacketCommitment;
use ibc_core_commitment_types::hash::CommitmentHasher;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::identifiers::Sequence;
use ibc_core_host::types::path::{ChannelEndPath, CommitmentPath, SeqSendPath};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_port::PortKeeper;
use ibc_primitives::prelude::*;

/// Methods required in send packet validation, to be implemented by the host
pub trait SendPacketValidationContext {
    fn port_keeper(&self) -> &PortKeeper;

    fn commitment_hasher(&self) -> &dyn CommitmentHasher;

    /// Returns the ChannelEnd for the given `port_id` and `chan_id`.
    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ProtocolError>;

    fn get_next_sequence_send(&self, seq_send_path: &SeqSendPath)
        -> Result<Sequence, ProtocolError>;
}

impl<T> SendPacketValidationContext for T
where
    T: ValidationContext,
{
    fn port_keeper(&self) -> &PortKeeper {
        ValidationContext::port_keeper(self)
    }

    fn commitment_hasher(&self) -> &dyn CommitmentHasher {
        ValidationContext::commitment_hasher(self)
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ProtocolError> {
        ValidationContext::channel_end(self, channel_end_path)
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ProtocolError> {
        ValidationContext::get_next_sequence_send(self, seq_send_path)
    }
}

/// Methods required in send packet execution, to be implemented by the host
pub trait SendPacketExecutionContext: SendPacketValidationContext {
    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError>;

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ProtocolError>;

    /// Ibc events
    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ProtocolError>;

    /// Logging facility
    fn log_message(&mut self, message: String) -> Result<(), ProtocolError>;
}

impl<T> SendPacketExecutionContext for T
where
    T: ExecutionContext,
{
    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError> {
        ExecutionContext::store_next_sequence_send(self, seq_send_path, seq)
    }

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ProtocolError> {
        ExecutionContext::store_packet_commitment(self, commitment_path, commitment)
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ProtocolError> {
        ExecutionContext::emit_ibc_event(self, event)
    }

    fn log_message(&mut self, message: String) -> Result<(), ProtocolError> {
        ExecutionContext::log_message(self, message)
    }
}
