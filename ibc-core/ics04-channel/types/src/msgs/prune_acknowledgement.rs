use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentProofBytes;
use ibc_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use ibc_primitives::Signer;

/// Removes an acknowledgement from the receiving chain's store once the
/// sender has processed it.
///
/// The proof shows that the packet commitment no longer exists on the
/// sending chain.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgPruneAcknowledgement {
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    pub sequence: Sequence,
    pub proof_commitment_absent_on_a: CommitmentProofBytes,
    pub proof_height_on_a: Height,
    pub signer: Signer,
}
