//! Implementation of the [fungible token transfer
//! module](https://github.com/cosmos/ibc/blob/main/spec/app/ics-020-fungible-token-transfer/README.md)
//! (ICS-20) on top of the packet-relay core.
//!
//! The module owns its port and channel capabilities; moving value is left to
//! the host behind [`context::TokenTransferExecutionContext`].
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::disallowed_methods, clippy::disallowed_types))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

pub mod context;
pub mod handler;
pub mod module;

/// Re-exports the implementation of the IBC [fungible token
/// transfer](https://github.com/cosmos/ibc/blob/main/spec/app/ics-020-fungible-token-transfer/README.md)
/// (ICS-20) data structures.
pub mod types {
    #[doc(inline)]
    pub use ibc_app_transfer_types::*;
}
