//! Exposes the entry points of the packet-relay core. These entry points
//! route each incoming channel or packet message to the module bound to its
//! port and run the matching handler's validation and execution logic.
//!
//! When processing a given message `M`, if any method in this library returns
//! an error, the runtime is expected to rollback all state modifications made
//! to the context (e.g. [`ExecutionContext`](ibc_core_host::ExecutionContext))
//! while processing `M`. Validation reads only, so a failed `validate` leaves
//! nothing to roll back.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

pub mod entrypoint;

/// Re-export IBC handler types from `ibc-core-handler-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_core_handler_types::*;
}
