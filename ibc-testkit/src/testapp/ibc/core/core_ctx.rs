//! Implementation of the host contexts for the mock chain.

use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc_core::channel::types::error::ChannelError;
use ibc_core::channel::types::packet::Receipt;
use ibc_core::client::types::Height;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::host::types::error::HostError;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_core::host::{ExecutionContext, ValidationContext};
use ibc_core::port::PortKeeper;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::{Signer, Timestamp};

use super::types::{MockContext, PortChannelIdMap};

fn next_sequence(
    map: &PortChannelIdMap<Sequence>,
    kind: &str,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<Sequence, ProtocolError> {
    map.get(&(port_id.clone(), channel_id.clone()))
        .copied()
        .ok_or_else(|| {
            HostError::missing_data(format!(
                "next {kind} sequence for port {port_id} and channel {channel_id}"
            ))
            .into()
        })
}

impl ValidationContext for MockContext {
    type V = Self;

    fn get_client_validation_context(&self) -> &Self::V {
        self
    }

    fn host_height(&self) -> Result<Height, ProtocolError> {
        Ok(self.latest_height())
    }

    fn host_timestamp(&self) -> Result<Timestamp, ProtocolError> {
        Ok(self.latest_timestamp())
    }

    fn port_keeper(&self) -> &PortKeeper {
        &self.port_keeper
    }

    fn channel_end(&self, chan_end_path: &ChannelEndPath) -> Result<ChannelEnd, ProtocolError> {
        let port_id = &chan_end_path.0;
        let channel_id = &chan_end_path.1;

        match self
            .ibc_store
            .lock()
            .channels
            .get(&(port_id.clone(), channel_id.clone()))
        {
            Some(channel_end) => Ok(channel_end.clone()),
            None => Err(ChannelError::NonexistentChannel {
                port_id: port_id.clone(),
                channel_id: channel_id.clone(),
            }),
        }
        .map_err(ProtocolError::ChannelError)
    }

    fn get_next_sequence_send(&self, seq_send_path: &SeqSendPath) -> Result<Sequence, ProtocolError> {
        next_sequence(
            &self.ibc_store.lock().next_sequence_send,
            "send",
            &seq_send_path.0,
            &seq_send_path.1,
        )
    }

    fn get_next_sequence_recv(&self, seq_recv_path: &SeqRecvPath) -> Result<Sequence, ProtocolError> {
        next_sequence(
            &self.ibc_store.lock().next_sequence_recv,
            "receive",
            &seq_recv_path.0,
            &seq_recv_path.1,
        )
    }

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ProtocolError> {
        next_sequence(
            &self.ibc_store.lock().next_sequence_ack,
            "ack",
            &seq_ack_path.0,
            &seq_ack_path.1,
        )
    }

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<Option<PacketCommitment>, ProtocolError> {
        Ok(self
            .ibc_store
            .lock()
            .packet_commitment
            .get(&(
                commitment_path.port_id.clone(),
                commitment_path.channel_id.clone(),
            ))
            .and_then(|map| map.get(&commitment_path.sequence))
            .cloned())
    }

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath) -> Result<Option<Receipt>, ProtocolError> {
        Ok(self
            .ibc_store
            .lock()
            .packet_receipt
            .get(&(receipt_path.port_id.clone(), receipt_path.channel_id.clone()))
            .and_then(|map| map.get(&receipt_path.sequence))
            .cloned())
    }

    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<Option<AcknowledgementCommitment>, ProtocolError> {
        Ok(self
            .ibc_store
            .lock()
            .packet_acknowledgement
            .get(&(ack_path.port_id.clone(), ack_path.channel_id.clone()))
            .and_then(|map| map.get(&ack_path.sequence))
            .cloned())
    }

    fn get_packet_acknowledgement_proof_height(
        &self,
        ack_path: &AckPath,
    ) -> Result<Option<Height>, ProtocolError> {
        Ok(self
            .ibc_store
            .lock()
            .packet_ack_proof_height
            .get(&(ack_path.port_id.clone(), ack_path.channel_id.clone()))
            .and_then(|map| map.get(&ack_path.sequence))
            .copied())
    }

    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ProtocolError> {
        if signer.as_ref().trim().is_empty() {
            return Err(HostError::InvalidData {
                description: "message signer cannot be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl ExecutionContext for MockContext {
    fn port_keeper_mut(&mut self) -> &mut PortKeeper {
        &mut self.port_keeper
    }

    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ProtocolError> {
        let port_id = channel_end_path.0.clone();
        let channel_id = channel_end_path.1.clone();

        self.ibc_store
            .lock()
            .channels
            .insert((port_id, channel_id), channel_end);
        Ok(())
    }

    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError> {
        let port_id = seq_send_path.0.clone();
        let channel_id = seq_send_path.1.clone();

        self.ibc_store
            .lock()
            .next_sequence_send
            .insert((port_id, channel_id), seq);
        Ok(())
    }

    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError> {
        let port_id = seq_recv_path.0.clone();
        let channel_id = seq_recv_path.1.clone();

        self.ibc_store
            .lock()
            .next_sequence_recv
            .insert((port_id, channel_id), seq);
        Ok(())
    }

    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ProtocolError> {
        let port_id = seq_ack_path.0.clone();
        let channel_id = seq_ack_path.1.clone();

        self.ibc_store
            .lock()
            .next_sequence_ack
            .insert((port_id, channel_id), seq);
        Ok(())
    }

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ProtocolError> {
        self.ibc_store
            .lock()
            .packet_commitment
            .entry((
                commitment_path.port_id.clone(),
                commitment_path.channel_id.clone(),
            ))
            .or_default()
            .insert(commitment_path.sequence, commitment);
        Ok(())
    }

    fn delete_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
    ) -> Result<(), ProtocolError> {
        self.ibc_store
            .lock()
            .packet_commitment
            .get_mut(&(
                commitment_path.port_id.clone(),
                commitment_path.channel_id.clone(),
            ))
            .and_then(|map| map.remove(&commitment_path.sequence));
        Ok(())
    }

    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ProtocolError> {
        self.ibc_store
            .lock()
            .packet_receipt
            .entry((receipt_path.port_id.clone(), receipt_path.channel_id.clone()))
            .or_default()
            .insert(receipt_path.sequence, receipt);
        Ok(())
    }

    fn store_packet_acknowledgement(
        &mut self,
        ack_path: &AckPath,
        ack_commitment: AcknowledgementCommitment,
        recv_proof_height: Height,
    ) -> Result<(), ProtocolError> {
        let key = (ack_path.port_id.clone(), ack_path.channel_id.clone());
        let seq = ack_path.sequence;

        let mut store = self.ibc_store.lock();
        store
            .packet_acknowledgement
            .entry(key.clone())
            .or_default()
            .insert(seq, ack_commitment);
        store
            .packet_ack_proof_height
            .entry(key)
            .or_default()
            .insert(seq, recv_proof_height);
        Ok(())
    }

    fn delete_packet_acknowledgement(&mut self, ack_path: &AckPath) -> Result<(), ProtocolError> {
        let key = (ack_path.port_id.clone(), ack_path.channel_id.clone());
        let sequence = ack_path.sequence;

        let mut store = self.ibc_store.lock();
        store
            .packet_acknowledgement
            .get_mut(&key)
            .and_then(|map| map.remove(&sequence));
        store
            .packet_ack_proof_height
            .get_mut(&key)
            .and_then(|map| map.remove(&sequence));
        Ok(())
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ProtocolError> {
        self.ibc_store.lock().events.push(event);
        Ok(())
    }

    fn log_message(&mut self, message: String) -> Result<(), ProtocolError> {
        tracing::debug!(target: "ibc", "{message}");
        self.ibc_store.lock().logs.push(message);
        Ok(())
    }
}
