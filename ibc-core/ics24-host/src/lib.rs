//! ICS-24: Host requirements. Provides the traits a host chain implements
//! so the packet-relay handlers can read and write its IBC state.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]


mod context;

pub use context::*;

/// Re-export of ICS 24 host types from `ibc-core-host-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_core_host_types::*;
}
