//! A trivially-checkable light client for the mock chain.
//!
//! A proof is only accepted if it is exactly what [`membership_proof`] or
//! [`non_membership_proof`] produces for the same height, path and value,
//! and the client has a consensus state recorded at that height.

use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::Height;
use ibc_core::commitment_types::commitment::CommitmentProofBytes;
use ibc_core::commitment_types::hash::{CommitmentHasher, Sha256Hasher};
use ibc_core::host::types::identifiers::ConnectionId;
use ibc_core::host::types::path::Path;
use ibc_core::host::ClientKeeper;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Timestamp;

use super::types::{MockClientRecord, MockContext};

const MEMBERSHIP_TAG: &[u8] = b"member";
const NON_MEMBERSHIP_TAG: &[u8] = b"absent";

fn proof_preimage(tag: &[u8], height: Height, path: Path) -> Vec<u8> {
    let mut preimage = tag.to_vec();
    preimage.extend(height.revision_number().to_be_bytes());
    preimage.extend(height.revision_height().to_be_bytes());
    preimage.extend(path.into_bytes());
    preimage.push(0);
    preimage
}

/// Proof that `path` held `value` on the counterparty at `height`.
pub fn membership_proof(height: Height, path: Path, value: &[u8]) -> CommitmentProofBytes {
    let mut preimage = proof_preimage(MEMBERSHIP_TAG, height, path);
    preimage.extend_from_slice(value);
    Sha256Hasher
        .hash(&preimage)
        .try_into()
        .expect("digest is never empty")
}

/// Proof that nothing was stored at `path` on the counterparty at `height`.
pub fn non_membership_proof(height: Height, path: Path) -> CommitmentProofBytes {
    Sha256Hasher
        .hash(&proof_preimage(NON_MEMBERSHIP_TAG, height, path))
        .try_into()
        .expect("digest is never empty")
}

impl MockContext {
    fn client_record(&self, conn_id: &ConnectionId) -> Result<&MockClientRecord, ClientError> {
        self.clients
            .get(conn_id)
            .ok_or_else(|| ClientError::UnknownConnection {
                connection_id: conn_id.clone(),
            })
    }

    fn ensure_consensus_state(&self, conn_id: &ConnectionId, height: Height) -> Result<(), ClientError> {
        self.consensus_timestamp(conn_id, &height).map(|_| ())
    }
}

impl ClientKeeper for MockContext {
    fn verify_membership(
        &self,
        conn_id: &ConnectionId,
        proof_height: Height,
        proof: &CommitmentProofBytes,
        path: Path,
        value: Vec<u8>,
    ) -> Result<(), ClientError> {
        self.ensure_consensus_state(conn_id, proof_height)?;

        let described = path.to_string();
        if membership_proof(proof_height, path, &value) != *proof {
            return Err(ClientError::FailedMembershipVerification {
                description: format!("proof does not show the expected value at {described}"),
            });
        }
        Ok(())
    }

    fn verify_non_membership(
        &self,
        conn_id: &ConnectionId,
        proof_height: Height,
        proof: &CommitmentProofBytes,
        path: Path,
    ) -> Result<(), ClientError> {
        self.ensure_consensus_state(conn_id, proof_height)?;

        let described = path.to_string();
        if non_membership_proof(proof_height, path) != *proof {
            return Err(ClientError::FailedNonMembershipVerification {
                description: format!("proof does not show {described} to be empty"),
            });
        }
        Ok(())
    }

    fn consensus_timestamp(
        &self,
        conn_id: &ConnectionId,
        height: &Height,
    ) -> Result<Timestamp, ClientError> {
        self.client_record(conn_id)?
            .consensus_timestamps
            .get(height)
            .copied()
            .ok_or(ClientError::MissingConsensusState { height: *height })
    }

    fn counterparty_connection_id(&self, conn_id: &ConnectionId) -> Result<ConnectionId, ClientError> {
        Ok(self.client_record(conn_id)?.counterparty_connection_id.clone())
    }
}
