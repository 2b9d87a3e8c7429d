use core::sync::atomic::{AtomicU64, Ordering};

use ibc_core_host_types::identifiers::{ChannelId, PortId};
use ibc_core_router_types::module::ModuleId;
use ibc_primitives::prelude::*;

use crate::capability::{ChannelCapability, PortCapability};
use crate::error::PortError;

/// Distinct for every keeper in the process, so tokens minted by one chain's
/// keeper never authenticate against another's.
static NEXT_AUTHORITY: AtomicU64 = AtomicU64::new(1);

/// Binds ports to their owning modules and mints the capabilities that
/// authorize use of them.
///
/// The binding table is written once per port and only read afterwards.
#[derive(Debug)]
pub struct PortKeeper {
    authority: u64,
    bindings: BTreeMap<PortId, ModuleId>,
    channels: BTreeSet<(PortId, ChannelId)>,
}

impl Default for PortKeeper {
    fn default() -> Self {
        Self::new()
    }
}

impl PortKeeper {
    pub fn new() -> Self {
        Self {
            authority: NEXT_AUTHORITY.fetch_add(1, Ordering::Relaxed),
            bindings: BTreeMap::new(),
            channels: BTreeSet::new(),
        }
    }

    /// Binds `port_id` to `module_id` and returns the port's capability.
    pub fn bind_port(
        &mut self,
        port_id: PortId,
        module_id: ModuleId,
    ) -> Result<PortCapability, PortError> {
        if self.bindings.contains_key(&port_id) {
            return Err(PortError::PortAlreadyBound { port_id });
        }
        self.bindings.insert(port_id.clone(), module_id);

        Ok(PortCapability {
            authority: self.authority,
            port_id,
        })
    }

    /// Returns the module a port is bound to.
    pub fn lookup_module(&self, port_id: &PortId) -> Result<&ModuleId, PortError> {
        self.bindings
            .get(port_id)
            .ok_or_else(|| PortError::UnknownPort {
                port_id: port_id.clone(),
            })
    }

    pub fn is_bound(&self, port_id: &PortId) -> bool {
        self.bindings.contains_key(port_id)
    }

    pub fn authenticate_port(&self, cap: &PortCapability, port_id: &PortId) -> Result<(), PortError> {
        if cap.authority == self.authority && &cap.port_id == port_id && self.is_bound(port_id) {
            Ok(())
        } else {
            Err(PortError::UnauthorizedPortCapability {
                port_id: port_id.clone(),
            })
        }
    }

    /// Checks that `cap` was minted by this keeper for exactly
    /// (`port_id`, `channel_id`).
    pub fn authenticate(
        &self,
        cap: &ChannelCapability,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(), PortError> {
        let authorized = cap.authority == self.authority
            && &cap.port_id == port_id
            && &cap.channel_id == channel_id
            && self
                .channels
                .contains(&(port_id.clone(), channel_id.clone()));

        if authorized {
            Ok(())
        } else {
            Err(PortError::UnauthorizedCapability {
                port_id: port_id.clone(),
                channel_id: channel_id.clone(),
            })
        }
    }

    /// Fails if [`Self::new_channel_capability`] would fail.
    pub fn validate_new_channel_capability(
        &self,
        port_cap: &PortCapability,
        channel_id: &ChannelId,
    ) -> Result<(), PortError> {
        self.authenticate_port(port_cap, &port_cap.port_id)?;

        if self
            .channels
            .contains(&(port_cap.port_id.clone(), channel_id.clone()))
        {
            return Err(PortError::ChannelCapabilityExists {
                port_id: port_cap.port_id.clone(),
                channel_id: channel_id.clone(),
            });
        }

        Ok(())
    }

    /// Mints the one capability for `channel_id` on the port `port_cap`
    /// authorizes.
    pub fn new_channel_capability(
        &mut self,
        port_cap: &PortCapability,
        channel_id: ChannelId,
    ) -> Result<ChannelCapability, PortError> {
        self.validate_new_channel_capability(port_cap, &channel_id)?;

        self.channels
            .insert((port_cap.port_id.clone(), channel_id.clone()));

        Ok(ChannelCapability {
            authority: self.authority,
            port_id: port_cap.port_id.clone(),
            channel_id,
        })
    }
}
