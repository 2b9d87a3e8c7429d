//! Types and utilities related to packet commitments.

use ibc_core_commitment_types::hash::CommitmentHasher;
use ibc_primitives::prelude::*;
use subtle_encoding::{Encoding, Hex};

use super::acknowledgement::Acknowledgement;
use crate::packet::Packet;

/// Packet commitment
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq)]
pub struct PacketCommitment(Vec<u8>);

impl PacketCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for PacketCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PacketCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Debug for PacketCommitment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let hex = Hex::lower_case()
            .encode_to_string(&self.0)
            .map_err(|_| core::fmt::Error)?;
        f.debug_tuple("PacketCommitment").field(&hex).finish()
    }
}

/// Acknowledgement commitment to be stored
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcknowledgementCommitment(Vec<u8>);

impl AcknowledgementCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for AcknowledgementCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for AcknowledgementCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Compute the commitment for a packet.
///
/// The hash input binds every field that identifies the packet: the
/// sequence, both ends' identifiers (length-prefixed), the timeout height
/// (unset is revision 0, height 0), the timeout timestamp in nanoseconds
/// (unset is 0) and the hash of the data.
pub fn compute_packet_commitment(
    hasher: &dyn CommitmentHasher,
    packet: &Packet,
) -> PacketCommitment {
    let mut hash_input = Vec::with_capacity(8 * 8 + 32 + packet_ids_len(packet));

    hash_input.extend_from_slice(&packet.seq_on_a.value().to_be_bytes());
    for id in [
        packet.port_id_on_a.as_bytes(),
        packet.chan_id_on_a.as_bytes(),
        packet.port_id_on_b.as_bytes(),
        packet.chan_id_on_b.as_bytes(),
    ] {
        hash_input.extend_from_slice(&(id.len() as u64).to_be_bytes());
        hash_input.extend_from_slice(id);
    }
    hash_input.extend_from_slice(
        &packet
            .timeout_height_on_b
            .commitment_revision_number()
            .to_be_bytes(),
    );
    hash_input.extend_from_slice(
        &packet
            .timeout_height_on_b
            .commitment_revision_height()
            .to_be_bytes(),
    );
    hash_input.extend_from_slice(&packet.timeout_timestamp_on_b.nanoseconds().to_be_bytes());
    hash_input.extend_from_slice(&hasher.hash(&packet.data));

    hasher.hash(&hash_input).into()
}

fn packet_ids_len(packet: &Packet) -> usize {
    packet.port_id_on_a.as_bytes().len()
        + packet.chan_id_on_a.as_bytes().len()
        + packet.port_id_on_b.as_bytes().len()
        + packet.chan_id_on_b.as_bytes().len()
}

/// Compute the commitment for an acknowledgement.
pub fn compute_ack_commitment(
    hasher: &dyn CommitmentHasher,
    ack: &Acknowledgement,
) -> AcknowledgementCommitment {
    hasher.hash(ack.as_ref()).into()
}
