use alloc::sync::Arc;

use ibc_app_transfer::module::{RecvFailurePolicy, TransferModule};
use ibc_app_transfer::types::error::TokenTransferError;
use ibc_app_transfer::types::MODULE_ID_STR;
use ibc_core::host::types::identifiers::PortId;
use ibc_core::port::error::PortError;
use ibc_core::port::PortKeeper;
use ibc_core::primitives::prelude::*;
use ibc_core::router::module::Module;
use ibc_core::router::types::module::ModuleId;

use crate::testapp::ibc::applications::mock::{MockModule, MockModuleHandle, MOCK_MODULE_ID_STR};
use crate::testapp::ibc::applications::transfer::types::MockTokenContext;

/// Holds the modules of one mock chain, keyed by module id.
///
/// Which port belongs to which module is recorded by the chain's
/// [`PortKeeper`], not here.
#[derive(Debug, Default)]
pub struct MockRouter {
    pub router: BTreeMap<ModuleId, Arc<dyn Module>>,
}

impl MockRouter {
    /// A router with the token transfer module bound to the `transfer` port
    /// of `port_keeper`.
    pub fn new_with_transfer(
        port_keeper: &mut PortKeeper,
        token_ctx: MockTokenContext,
        policy: RecvFailurePolicy,
    ) -> Result<Self, TokenTransferError> {
        let mut router = Self::default();

        let transfer_mod = TransferModule::bind(port_keeper, token_ctx, policy)?;
        router
            .add_route(ModuleId::new(MODULE_ID_STR.to_string()), transfer_mod)
            .expect("Never fails");

        Ok(router)
    }

    /// A router with a [`MockModule`] bound to `port_id`, along with the
    /// handle to inspect and steer the module.
    pub fn new_with_mock(
        port_keeper: &mut PortKeeper,
        port_id: PortId,
    ) -> Result<(Self, MockModuleHandle), PortError> {
        let mut router = Self::default();

        let mock_mod = MockModule::bind(port_keeper, port_id)?;
        let handle = mock_mod.handle();
        router
            .add_route(ModuleId::new(MOCK_MODULE_ID_STR.to_string()), mock_mod)
            .expect("Never fails");

        Ok((router, handle))
    }

    pub fn add_route(
        &mut self,
        module_id: ModuleId,
        module: impl Module + 'static,
    ) -> Result<(), String> {
        match self.router.insert(module_id, Arc::new(module)) {
            None => Ok(()),
            Some(_) => Err("Duplicate module_id".to_owned()),
        }
    }
}
