use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_primitives::Signer;

use crate::acknowledgement::Acknowledgement;
use crate::packet::Packet;

/// Message definition for packet acknowledgements.
///
/// Relayed back to the sending chain once the receiver has written an
/// acknowledgement for `packet`.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    /// Proof of the acknowledgement commitment on the receiving chain
    pub proof_acked_on_b: CommitmentProofBytes,
    /// Height at which the proof was taken
    pub proof_height_on_b: Height,
    pub signer: Signer,
}
