use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_core_host_types::identifiers::{ChannelId, PortId};

/// Authority to open channels on a port.
///
/// Neither `Clone` nor constructible outside this crate.
#[derive(Debug, PartialEq, Eq)]
pub struct PortCapability {
    pub(crate) authority: u64,
    pub(crate) port_id: PortId,
}

impl PortCapability {
    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }
}

impl Display for PortCapability {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "ports/{}", self.port_id)
    }
}

/// Authority to send, receive and close on a single channel end.
#[derive(Debug, PartialEq, Eq)]
pub struct ChannelCapability {
    pub(crate) authority: u64,
    pub(crate) port_id: PortId,
    pub(crate) channel_id: ChannelId,
}

impl ChannelCapability {
    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }
}

impl Display for ChannelCapability {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "capabilities/ports/{}/channels/{}",
            self.port_id, self.channel_id
        )
    }
}
