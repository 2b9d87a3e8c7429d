//! ICS-05: Port allocation and capability authentication.
//!
//! A port is bound to exactly one module. Binding mints a
//! [`PortCapability`]; registering a channel on that port mints a
//! [`ChannelCapability`]. Neither token can be cloned or constructed outside
//! this crate, so holding one is the only way to act on a port or channel.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]


#[cfg(feature = "std")]
extern crate std;

mod capability;
pub mod error;
mod keeper;

pub use capability::{ChannelCapability, PortCapability};
pub use keeper::PortKeeper;
