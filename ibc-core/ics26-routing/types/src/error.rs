use displaydoc::Display;
use ibc_core_host_types::error::HostError;
use ibc_primitives::prelude::*;

use crate::module::ModuleId;

/// Error type for the router module.
#[derive(Debug, Display, derive_more::From)]
pub enum RouterError {
    /// host error: `{0}`
    Host(HostError),
    /// module `{module_id}` is not registered with the router
    MissingModule { module_id: ModuleId },
}

#[cfg(feature = "std")]
impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
