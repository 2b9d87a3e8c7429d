//! Timeout rules.
//!
//! A packet is resolved by exactly one of an acknowledgement or a timeout.
//! The receiving chain refuses packets whose timeout it has reached, and the
//! sending chain only accepts a timeout once the counterparty, as seen by
//! its light client, has reached it. Both sides use the same inclusive
//! comparison, so no height or time admits both outcomes.

use ibc_core_channel_types::channel::Order;
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::packet::Packet;
use ibc_core_client_types::Height;
use ibc_primitives::Timestamp;

/// Receiving side: fails if the packet can no longer be received at the
/// given host height and time.
pub fn verify_not_timed_out(
    packet: &Packet,
    host_height: Height,
    host_timestamp: &Timestamp,
) -> Result<(), PacketError> {
    if packet.timed_out(host_timestamp, host_height) {
        return Err(PacketError::PacketTimedOut {
            sequence: packet.seq_on_a,
        });
    }
    Ok(())
}

/// Sending side: fails unless the counterparty had reached the packet's
/// timeout height or timestamp at `counterparty_height`.
pub fn verify_timeout_reached(
    packet: &Packet,
    counterparty_height: Height,
    counterparty_timestamp: &Timestamp,
) -> Result<(), PacketError> {
    if !packet.timed_out(counterparty_timestamp, counterparty_height) {
        return Err(PacketError::PacketTimeoutNotReached {
            timeout_height: packet.timeout_height_on_b,
            chain_height: counterparty_height,
            timeout_timestamp: packet.timeout_timestamp_on_b,
            chain_timestamp: *counterparty_timestamp,
        });
    }
    Ok(())
}

/// Ordered channels cannot skip a lost packet, so a timeout closes them.
pub fn closes_channel(ordering: Order) -> bool {
    match ordering {
        Order::Ordered => true,
        Order::Unordered => false,
    }
}
