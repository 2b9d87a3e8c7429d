//! ICS-02: Client types exposed to the channel core. Light-client
//! verification itself lives behind the host's proof oracle.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;

mod height;
pub use height::*;
