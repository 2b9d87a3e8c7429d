//! Defines the commitment error type

use displaydoc::Display;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum CommitmentError {
    /// empty commitment proof
    EmptyCommitmentProof,
}

#[cfg(feature = "std")]
impl std::error::Error for CommitmentError {}
