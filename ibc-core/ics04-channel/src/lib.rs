//! ICS-04: Channel & Packet Semantics. Implements the packet-relay core:
//! sending, receiving, acknowledging and timing out packets, and closing
//! channels, on top of the host's stores and proof oracle.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]


pub mod context;
pub mod handler;
pub mod timeout;

/// Re-export of ICS 04 data structures from `ibc-core-channel-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_core_channel_types::*;
}
