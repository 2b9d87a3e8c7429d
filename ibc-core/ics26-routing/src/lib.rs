//! ICS-26: Routing. Connects application modules to the packet-relay core
//! through the [`Module`](module::Module) callback trait.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]


pub mod module;
pub mod router;

/// Re-export of ICS 26 routing types from `ibc-core-router-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_core_router_types::*;
}
