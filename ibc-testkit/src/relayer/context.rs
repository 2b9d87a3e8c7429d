use ibc_core::channel::handler::send_packet;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelCloseInit, PacketMsg};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::channel::types::Version;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_core::host::ValidationContext;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::router::Router;

use crate::fixtures::core::channel::ChannelRegisterConfig;
use crate::fixtures::core::signer::dummy_account_id;
use crate::relayer::utils;
use crate::testapp::ibc::core::router::MockRouter;
use crate::testapp::ibc::core::types::MockContext;

/// Two mock chains joined by a connection, each with its own modules, and
/// the relayer operations that carry datagrams between them.
#[derive(Debug)]
pub struct RelayerContext {
    pub ctx_a: MockContext,
    pub router_a: MockRouter,
    pub ctx_b: MockContext,
    pub router_b: MockRouter,
    pub conn_id_on_a: ConnectionId,
    pub conn_id_on_b: ConnectionId,
    pub signer: Signer,
}

impl RelayerContext {
    /// Connects `ctx_a` and `ctx_b` and brings both clients up to date.
    pub fn new(ctx_a: MockContext, router_a: MockRouter, ctx_b: MockContext, router_b: MockRouter) -> Self {
        let conn_id_on_a = ConnectionId::new(0);
        let conn_id_on_b = ConnectionId::new(1);

        let mut relayer = Self {
            ctx_a: ctx_a.with_client(conn_id_on_a.clone(), conn_id_on_b.clone()),
            router_a,
            ctx_b: ctx_b.with_client(conn_id_on_b.clone(), conn_id_on_a.clone()),
            router_b,
            conn_id_on_a,
            conn_id_on_b,
            signer: dummy_account_id(),
        };
        relayer.update_client_on_a();
        relayer.update_client_on_b();
        relayer
    }

    pub fn update_client_on_a(&mut self) {
        utils::update_client_on_a(&mut self.ctx_a, &self.ctx_b, &self.conn_id_on_a);
    }

    pub fn update_client_on_b(&mut self) {
        utils::update_client_on_a(&mut self.ctx_b, &self.ctx_a, &self.conn_id_on_b);
    }

    pub fn deliver_on_a(&mut self, msg: impl Into<MsgEnvelope>) -> Result<(), ProtocolError> {
        self.ctx_a.deliver(&mut self.router_a, msg.into())
    }

    pub fn deliver_on_b(&mut self, msg: impl Into<MsgEnvelope>) -> Result<(), ProtocolError> {
        self.ctx_b.deliver(&mut self.router_b, msg.into())
    }

    /// Registers both ends of a channel between the modules bound to
    /// `port_id_on_a` and `port_id_on_b`.
    pub fn register_channel(
        &mut self,
        port_id_on_a: &PortId,
        chan_id_on_a: &ChannelId,
        port_id_on_b: &PortId,
        chan_id_on_b: &ChannelId,
        ordering: Order,
        version: Version,
    ) {
        let msg_for_a = ChannelRegisterConfig::builder()
            .port_id(port_id_on_a.clone())
            .chan_id(chan_id_on_a.clone())
            .ordering(ordering)
            .counterparty_port_id(port_id_on_b.clone())
            .counterparty_chan_id(chan_id_on_b.clone())
            .connection_id(self.conn_id_on_a.clone())
            .version(version.clone())
            .signer(self.signer.clone())
            .build();

        let msg_for_b = ChannelRegisterConfig::builder()
            .port_id(port_id_on_b.clone())
            .chan_id(chan_id_on_b.clone())
            .ordering(ordering)
            .counterparty_port_id(port_id_on_a.clone())
            .counterparty_chan_id(chan_id_on_a.clone())
            .connection_id(self.conn_id_on_b.clone())
            .version(version)
            .signer(self.signer.clone())
            .build();

        self.deliver_on_a(ChannelMsg::Register(msg_for_a))
            .expect("channel registers on A");
        self.deliver_on_b(ChannelMsg::Register(msg_for_b))
            .expect("channel registers on B");
    }

    /// Sends `data` from the module owning the channel end on `A`, and
    /// returns the committed packet.
    pub fn send_packet_on_a(
        &mut self,
        port_id_on_a: &PortId,
        chan_id_on_a: &ChannelId,
        data: Vec<u8>,
        timeout_height_on_b: TimeoutHeight,
        timeout_timestamp_on_b: TimeoutTimestamp,
    ) -> Result<Packet, ProtocolError> {
        let module_id = ValidationContext::port_keeper(&self.ctx_a)
            .lookup_module(port_id_on_a)?
            .clone();
        let cap = self
            .router_a
            .get_route(&module_id)
            .and_then(|module| module.channel_capability(port_id_on_a, chan_id_on_a))
            .expect("module holds the channel capability");

        send_packet(
            &mut self.ctx_a,
            cap,
            data,
            timeout_height_on_b,
            timeout_timestamp_on_b,
        )?;
        self.ctx_a.advance_block();

        let Some(IbcEvent::SendPacket(send_event)) = self.ctx_a.get_events().last().cloned() else {
            panic!("unexpected event")
        };
        Ok(send_event.packet)
    }

    /// `B` receives the packet. Returns `B`'s acknowledgement.
    pub fn recv_packet_on_b(&mut self, packet: Packet) -> Result<Acknowledgement, ProtocolError> {
        self.update_client_on_b();
        let msg = utils::build_msg_recv_packet(&self.ctx_a, packet, self.signer.clone());
        self.deliver_on_b(PacketMsg::Recv(msg))?;

        let acknowledgement = self
            .ctx_b
            .get_events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                IbcEvent::WriteAcknowledgement(e) => Some(e.acknowledgement().clone()),
                _ => None,
            })
            .expect("acknowledgement was written");
        Ok(acknowledgement)
    }

    /// `A` processes `B`'s acknowledgement of the packet.
    pub fn ack_packet_on_a(
        &mut self,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), ProtocolError> {
        self.update_client_on_a();
        let msg = utils::build_msg_ack(&self.ctx_b, packet, acknowledgement, self.signer.clone());
        self.deliver_on_a(PacketMsg::Ack(msg))
    }

    /// `A` reclaims the packet after it timed out on `B`.
    pub fn timeout_packet_on_a(&mut self, packet: Packet) -> Result<(), ProtocolError> {
        self.update_client_on_a();
        let msg = utils::build_msg_timeout(&self.ctx_b, packet, self.signer.clone());
        self.deliver_on_a(PacketMsg::Timeout(msg))
    }

    /// `A` reclaims the packet after `B` closed its end of the channel.
    pub fn timeout_on_close_packet_on_a(&mut self, packet: Packet) -> Result<(), ProtocolError> {
        self.update_client_on_a();
        let msg = utils::build_msg_timeout_on_close(&self.ctx_b, packet, self.signer.clone());
        self.deliver_on_a(PacketMsg::TimeoutOnClose(msg))
    }

    /// `A` closes its end of the channel.
    pub fn close_init_on_a(&mut self, port_id_on_a: &PortId, chan_id_on_a: &ChannelId) -> Result<(), ProtocolError> {
        let msg = MsgChannelCloseInit {
            port_id_on_a: port_id_on_a.clone(),
            chan_id_on_a: chan_id_on_a.clone(),
            signer: self.signer.clone(),
        };
        self.deliver_on_a(ChannelMsg::CloseInit(msg))
    }

    pub fn close_init_on_b(&mut self, port_id_on_b: &PortId, chan_id_on_b: &ChannelId) -> Result<(), ProtocolError> {
        let msg = MsgChannelCloseInit {
            port_id_on_a: port_id_on_b.clone(),
            chan_id_on_a: chan_id_on_b.clone(),
            signer: self.signer.clone(),
        };
        self.deliver_on_b(ChannelMsg::CloseInit(msg))
    }

    /// `B` closes its end after `A` closed the other one.
    pub fn close_confirm_on_b(
        &mut self,
        port_id_on_a: &PortId,
        chan_id_on_a: &ChannelId,
        port_id_on_b: &PortId,
        chan_id_on_b: &ChannelId,
    ) -> Result<(), ProtocolError> {
        self.update_client_on_b();
        let msg = utils::build_msg_close_confirm(
            &self.ctx_a,
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b.clone(),
            chan_id_on_b.clone(),
            self.signer.clone(),
        );
        self.deliver_on_b(ChannelMsg::CloseConfirm(msg))
    }

    /// `B` drops its acknowledgement of a packet `A` has finished with.
    pub fn prune_ack_on_b(&mut self, packet: &Packet) -> Result<(), ProtocolError> {
        self.update_client_on_b();
        let msg = utils::build_msg_prune(&self.ctx_a, packet, self.signer.clone());
        self.deliver_on_b(PacketMsg::PruneAck(msg))
    }

    /// Full round trip: `B` receives the packet and `A` processes the
    /// acknowledgement.
    pub fn relay_packet(&mut self, packet: Packet) -> Result<Acknowledgement, ProtocolError> {
        let acknowledgement = self.recv_packet_on_b(packet.clone())?;
        self.ack_packet_on_a(packet, acknowledgement.clone())?;
        Ok(acknowledgement)
    }
}
