//! The callbacks an application module exposes to the packet-relay core.

use core::fmt::Debug;

use ibc_core_channel_types::acknowledgement::Acknowledgement;
use ibc_core_channel_types::channel::{Counterparty, Order};
use ibc_core_channel_types::error::{ChannelError, PacketError};
use ibc_core_channel_types::packet::Packet;
use ibc_core_channel_types::Version;
use ibc_core_host_types::identifiers::{ChannelId, PortId};
use ibc_core_port::{ChannelCapability, PortCapability};
use ibc_core_router_types::module::ModuleExtras;
use ibc_primitives::Signer;

/// An application bound to one or more ports.
///
/// The core calls these synchronously, inline with the state transition it
/// is performing. `*_validate` callbacks run before anything is written;
/// `*_execute` callbacks run once the core has committed to the transition.
pub trait Module: Debug {
    /// The capability this module received when it bound `port_id`.
    fn port_capability(&self, port_id: &PortId) -> Option<&PortCapability>;

    /// The capability this module holds for the channel end, if it owns it.
    fn channel_capability(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Option<&ChannelCapability>;

    /// Takes ownership of a freshly minted channel capability.
    fn claim_channel_capability(&mut self, capability: ChannelCapability);

    fn on_chan_register_validate(
        &self,
        _order: Order,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        _version: &Version,
    ) -> Result<(), ChannelError> {
        Ok(())
    }

    fn on_chan_close_init_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ChannelError> {
        Ok(())
    }

    fn on_chan_close_init_execute(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        Ok(ModuleExtras::empty())
    }

    fn on_chan_close_confirm_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ChannelError> {
        Ok(())
    }

    fn on_chan_close_confirm_execute(
        &mut self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        Ok(ModuleExtras::empty())
    }

    /// Lets a module refuse a packet outright, aborting the receive with no
    /// receipt written.
    ///
    /// Modules that turn processing failures into error acknowledgements
    /// leave this as is.
    fn on_recv_packet_validate(&self, _packet: &Packet, _relayer: &Signer) -> Result<(), PacketError> {
        Ok(())
    }

    /// Processes the packet and returns the acknowledgement to store.
    ///
    /// Failures are reported inside the acknowledgement; the receipt is
    /// recorded either way.
    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement);

    fn on_acknowledgement_packet_validate(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), PacketError>;

    /// Must not fail once the matching `*_validate` call succeeded; a
    /// failure here aborts the transition as an invariant violation.
    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>);

    fn on_timeout_packet_validate(&self, packet: &Packet, relayer: &Signer) -> Result<(), PacketError>;

    /// Must not fail once the matching `*_validate` call succeeded.
    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>);
}
