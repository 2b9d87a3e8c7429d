//! Defines the errors a proof oracle reports back to the channel core.

use displaydoc::Display;
use ibc_core_host_types::error::HostError;
use ibc_core_host_types::identifiers::ConnectionId;
use ibc_primitives::prelude::*;

use crate::height::Height;

#[derive(Debug, Display, derive_more::From)]
pub enum ClientError {
    /// host error: `{0}`
    Host(HostError),
    /// invalid height; cannot be zero or negative
    #[from(ignore)]
    InvalidHeight,
    /// no light client tracks connection `{connection_id}`
    #[from(ignore)]
    UnknownConnection { connection_id: ConnectionId },
    /// missing counterparty consensus state at height `{height}`
    #[from(ignore)]
    MissingConsensusState { height: Height },
    /// failed membership verification: `{description}`
    #[from(ignore)]
    FailedMembershipVerification { description: String },
    /// failed non-membership verification: `{description}`
    #[from(ignore)]
    FailedNonMembershipVerification { description: String },
}

#[cfg(feature = "std")]
impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
