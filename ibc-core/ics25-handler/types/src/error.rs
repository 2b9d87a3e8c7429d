//! Defines the top-level error type of the handlers

use derive_more::From;
use displaydoc::Display;
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_client_types::error::ClientError;
use ibc_core_host_types::error::HostError;
use ibc_core_port::error::PortError;
use ibc_core_router_types::error::RouterError;
use ibc_primitives::prelude::*;

/// Top-level error
///
/// Every variant except [`ProtocolError::InvariantViolation`] is an ordinary
/// rejection: the transition aborted and nothing was written.
#[derive(Debug, Display, From)]
pub enum ProtocolError {
    /// ICS02 Client error: {0}
    ClientError(ClientError),
    /// ICS04 Channel error: {0}
    ChannelError(ChannelError),
    /// ICS04 Packet error: {0}
    PacketError(PacketError),
    /// ICS05 Port error: {0}
    PortError(PortError),
    /// ICS26 Routing error: {0}
    RouterError(RouterError),
    /// ICS24 Host error: {0}
    HostError(HostError),
    /// invariant violation, ledger state may be corrupt: `{description}`
    #[from(ignore)]
    InvariantViolation { description: String },
}

impl ProtocolError {
    pub fn invariant_violation(description: impl ToString) -> Self {
        Self::InvariantViolation {
            description: description.to_string(),
        }
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ClientError(e) => Some(e),
            Self::ChannelError(e) => Some(e),
            Self::PacketError(e) => Some(e),
            Self::PortError(e) => Some(e),
            Self::RouterError(e) => Some(e),
            Self::HostError(e) => Some(e),
            Self::InvariantViolation { .. } => None,
        }
    }
}
