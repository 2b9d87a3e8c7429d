//! In-memory hosts, mock proofs, mock application modules and relayer
//! helpers for exercising the packet-relay core end to end.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

extern crate alloc;

pub mod fixtures;
pub mod relayer;
pub mod testapp;
pub mod utils;
