use displaydoc::Display;
use ibc_core_host_types::identifiers::{ChannelId, PortId};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum PortError {
    /// port `{port_id}` is unknown
    UnknownPort { port_id: PortId },
    /// port `{port_id}` is already bound
    PortAlreadyBound { port_id: PortId },
    /// capability is not authorized for (`{port_id}`, `{channel_id}`)
    UnauthorizedCapability {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// port capability is not authorized for `{port_id}`
    UnauthorizedPortCapability { port_id: PortId },
    /// a capability for channel (`{port_id}`, `{channel_id}`) was already minted
    ChannelCapabilityExists {
        port_id: PortId,
        channel_id: ChannelId,
    },
}

#[cfg(feature = "std")]
impl std::error::Error for PortError {}
