//! Defines the `Router`, which holds the modules that ports are bound to

use ibc_core_router_types::module::ModuleId;

use crate::module::Module;

/// Router as defined in ICS-26.
///
/// Which module owns a port is recorded by the host's
/// [`PortKeeper`](ibc_core_port::PortKeeper); the router only hands out the
/// module registered under that id.
pub trait Router {
    /// Returns a reference to a `Module` registered against the specified `ModuleId`
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module>;

    /// Returns a mutable reference to a `Module` registered against the specified `ModuleId`
    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module>;
}
