//! Packet timeouts. A packet may carry a height timeout, a timestamp
//! timeout, or both, measured on the destination chain.

mod height;
mod timestamp;

pub use height::*;
pub use timestamp::*;
