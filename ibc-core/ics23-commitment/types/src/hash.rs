//! The collision-resistant hash behind packet and acknowledgement
//! commitments.

use ibc_primitives::prelude::*;
use sha2::{Digest, Sha256};

/// Hash function used to derive commitments. Hosts may plug in their own,
/// but both chains of a channel must agree on it.
pub trait CommitmentHasher {
    fn hash(&self, data: &[u8]) -> Vec<u8>;
}

/// SHA-256, the default commitment hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl CommitmentHasher for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }
}
