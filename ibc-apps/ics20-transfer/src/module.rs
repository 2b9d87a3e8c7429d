//! The transfer application as a [`Module`] the packet-relay core routes to.

use core::fmt::Debug;

use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::events::{AckEvent, AckStatusEvent, RecvEvent, TimeoutEvent};
use ibc_app_transfer_types::msgs::MsgTransfer;
use ibc_app_transfer_types::packet::PacketData;
use ibc_app_transfer_types::{ack_success_b64, MODULE_ID_STR, VERSION};
use ibc_core::channel::context::SendPacketExecutionContext;
use ibc_core::channel::handler::{chan_close_init, recv_packet_execute, recv_packet_validate};
use ibc_core::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::channel::types::msgs::{MsgChannelCloseInit, MsgRecvPacket};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::host::ExecutionContext;
use ibc_core::port::{ChannelCapability, PortCapability, PortKeeper};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::module::Module;
use ibc_core::router::types::module::{ModuleExtras, ModuleId};

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use crate::handler::{
    process_recv_packet_execute, process_recv_packet_validate, refund_packet_token_execute,
    refund_packet_token_validate, send_transfer,
};

/// What the transfer module does with a packet it cannot process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecvFailurePolicy {
    /// Receive the packet anyway and answer with an error acknowledgement,
    /// so the sender refunds. The channel stays open.
    #[default]
    ErrorAcknowledgement,
    /// Refuse the packet outright; the module then closes its channel end
    /// through [`TransferModule::recv_transfer_or_close`].
    CloseChannel,
}

/// Result of [`TransferModule::recv_transfer_or_close`].
#[derive(Debug)]
pub enum RecvOutcome {
    Received,
    ChannelClosed { reason: ProtocolError },
}

/// The ICS-20 module: host token hooks plus the capabilities it was granted.
#[derive(Debug)]
pub struct TransferModule<Ctx> {
    token_ctx: Ctx,
    policy: RecvFailurePolicy,
    port_caps: BTreeMap<PortId, PortCapability>,
    channel_caps: BTreeMap<(PortId, ChannelId), ChannelCapability>,
}

impl<Ctx> TransferModule<Ctx>
where
    Ctx: TokenTransferExecutionContext + Debug,
{
    /// Binds the port named by `token_ctx` and returns the module holding
    /// its capability.
    pub fn bind(
        port_keeper: &mut PortKeeper,
        token_ctx: Ctx,
        policy: RecvFailurePolicy,
    ) -> Result<Self, TokenTransferError> {
        let port_id = token_ctx.get_port()?;
        let port_cap = port_keeper
            .bind_port(port_id.clone(), ModuleId::new(MODULE_ID_STR.to_string()))
            .map_err(ProtocolError::from)?;

        let mut port_caps = BTreeMap::new();
        port_caps.insert(port_id, port_cap);

        Ok(Self {
            token_ctx,
            policy,
            port_caps,
            channel_caps: BTreeMap::new(),
        })
    }

    pub fn policy(&self) -> RecvFailurePolicy {
        self.policy
    }

    pub fn token_ctx(&self) -> &Ctx {
        &self.token_ctx
    }

    /// Sends `msg` over a channel this module owns.
    pub fn send_transfer(
        &mut self,
        send_packet_ctx_a: &mut impl SendPacketExecutionContext,
        msg: MsgTransfer,
    ) -> Result<Sequence, TokenTransferError> {
        let cap = self
            .channel_caps
            .get(&(msg.port_id_on_a.clone(), msg.chan_id_on_a.clone()))
            .ok_or_else(|| TokenTransferError::MissingChannelCapability {
                port_id: msg.port_id_on_a.clone(),
                channel_id: msg.chan_id_on_a.clone(),
            })?;

        send_transfer(send_packet_ctx_a, &mut self.token_ctx, cap, msg)
    }

    /// Delivers a relayed packet to this module.
    ///
    /// Under [`RecvFailurePolicy::CloseChannel`] a packet the module refuses
    /// closes the receiving channel end instead; nothing else is written.
    /// Every other failure is returned as is.
    pub fn recv_transfer_or_close<ExecCtx>(
        &mut self,
        ctx_b: &mut ExecCtx,
        msg: MsgRecvPacket,
    ) -> Result<RecvOutcome, ProtocolError>
    where
        ExecCtx: ExecutionContext,
    {
        match recv_packet_validate(ctx_b, self, msg.clone()) {
            Ok(()) => {
                recv_packet_execute(ctx_b, self, msg)?;
                Ok(RecvOutcome::Received)
            }
            Err(reason @ ProtocolError::PacketError(PacketError::AppModule { .. }))
                if self.policy == RecvFailurePolicy::CloseChannel =>
            {
                tracing::warn!(%reason, "closing transfer channel after refused packet");

                let close_msg = MsgChannelCloseInit {
                    port_id_on_a: msg.packet.port_id_on_b,
                    chan_id_on_a: msg.packet.chan_id_on_b,
                    signer: msg.signer,
                };
                chan_close_init(ctx_b, self, close_msg)?;

                Ok(RecvOutcome::ChannelClosed { reason })
            }
            Err(e) => Err(e),
        }
    }

    fn decode_and_check_recv(&self, packet: &Packet) -> Result<(), TokenTransferError> {
        let data = PacketData::decode(&packet.data)?;
        process_recv_packet_validate(&self.token_ctx, packet, &data)
    }
}

impl<Ctx> Module for TransferModule<Ctx>
where
    Ctx: TokenTransferExecutionContext + Debug,
{
    fn port_capability(&self, port_id: &PortId) -> Option<&PortCapability> {
        self.port_caps.get(port_id)
    }

    fn channel_capability(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Option<&ChannelCapability> {
        self.channel_caps
            .get(&(port_id.clone(), channel_id.clone()))
    }

    fn claim_channel_capability(&mut self, capability: ChannelCapability) {
        let key = (
            capability.port_id().clone(),
            capability.channel_id().clone(),
        );
        self.channel_caps.insert(key, capability);
    }

    fn on_chan_register_validate(
        &self,
        order: Order,
        port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<(), ChannelError> {
        on_chan_register_validate(&self.token_ctx, order, port_id, version)
            .map_err(ChannelError::from)
    }

    fn on_chan_close_init_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
    ) -> Result<(), ChannelError> {
        match self.policy {
            RecvFailurePolicy::CloseChannel => Ok(()),
            RecvFailurePolicy::ErrorAcknowledgement => {
                Err(TokenTransferError::CantCloseChannel.into())
            }
        }
    }

    fn on_chan_close_init_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.on_chan_close_init_validate(port_id, channel_id)?;

        Ok(ModuleExtras {
            events: Vec::new(),
            log: vec![format!("transfer channel {port_id}/{channel_id} closed")],
        })
    }

    fn on_recv_packet_validate(&self, packet: &Packet, _relayer: &Signer) -> Result<(), PacketError> {
        match self.policy {
            RecvFailurePolicy::ErrorAcknowledgement => Ok(()),
            RecvFailurePolicy::CloseChannel => Ok(self.decode_and_check_recv(packet)?),
        }
    }

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement) {
        on_recv_packet_execute(&mut self.token_ctx, packet)
    }

    fn on_acknowledgement_packet_validate(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), PacketError> {
        Ok(on_acknowledgement_packet_validate(
            &self.token_ctx,
            packet,
            acknowledgement,
            relayer,
        )?)
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let (extras, res) =
            on_acknowledgement_packet_execute(&mut self.token_ctx, packet, acknowledgement, relayer);
        (extras, res.map_err(PacketError::from))
    }

    fn on_timeout_packet_validate(&self, packet: &Packet, relayer: &Signer) -> Result<(), PacketError> {
        Ok(on_timeout_packet_validate(&self.token_ctx, packet, relayer)?)
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let (extras, res) = on_timeout_packet_execute(&mut self.token_ctx, packet, relayer);
        (extras, res.map_err(PacketError::from))
    }
}

pub fn on_chan_register_validate(
    ctx: &impl TokenTransferValidationContext,
    order: Order,
    port_id: &PortId,
    version: &Version,
) -> Result<(), TokenTransferError> {
    if order != Order::Unordered {
        return Err(TokenTransferError::ChannelNotUnordered {
            expect_order: Order::Unordered,
            got_order: order,
        });
    }
    let bound_port = ctx.get_port()?;
    if port_id != &bound_port {
        return Err(TokenTransferError::InvalidPort {
            port_id: port_id.clone(),
            exp_port_id: bound_port,
        });
    }

    if version.as_str() != VERSION {
        return Err(TokenTransferError::InvalidVersion {
            expected: VERSION.to_string(),
            actual: version.to_string(),
        });
    }

    Ok(())
}

pub fn on_recv_packet_execute(
    ctx_b: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
) -> (ModuleExtras, Acknowledgement) {
    let data = match PacketData::decode(&packet.data) {
        Ok(data) => data,
        Err(err) => {
            let ack = AcknowledgementStatus::error(err.into());
            return (ModuleExtras::empty(), ack.into());
        }
    };

    let (mut extras, ack) = match process_recv_packet_execute(ctx_b, packet, &data) {
        Ok(extras) => (extras, AcknowledgementStatus::success(ack_success_b64())),
        Err((extras, error)) => (extras, AcknowledgementStatus::error(error.into())),
    };

    let recv_event = RecvEvent {
        sender: data.sender,
        receiver: data.receiver,
        denom: data.token.denom,
        amount: data.token.amount,
        memo: data.memo,
        success: ack.is_successful(),
    };
    extras.events.push(recv_event.into());

    (extras, ack.into())
}

pub fn on_acknowledgement_packet_validate<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    _relayer: &Signer,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let data = PacketData::decode(&packet.data)?;

    let acknowledgement = serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
        .map_err(|_| TokenTransferError::AckDeserialization)?;

    if !acknowledgement.is_successful() {
        refund_packet_token_validate(ctx, packet, &data)?;
    }

    Ok(())
}

pub fn on_acknowledgement_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    _relayer: &Signer,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let data = match PacketData::decode(&packet.data) {
        Ok(data) => data,
        Err(err) => return (ModuleExtras::empty(), Err(err)),
    };

    let Ok(acknowledgement) =
        serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
    else {
        return (
            ModuleExtras::empty(),
            Err(TokenTransferError::AckDeserialization),
        );
    };

    if !acknowledgement.is_successful() {
        if let Err(err) = refund_packet_token_execute(ctx, packet, &data) {
            return (ModuleExtras::empty(), Err(err));
        }
    }

    let ack_event = AckEvent {
        sender: data.sender,
        receiver: data.receiver,
        denom: data.token.denom,
        amount: data.token.amount,
        memo: data.memo,
        acknowledgement: acknowledgement.clone(),
    };

    let extras = ModuleExtras {
        events: vec![ack_event.into(), AckStatusEvent { acknowledgement }.into()],
        log: Vec::new(),
    };

    (extras, Ok(()))
}

pub fn on_timeout_packet_validate<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
    _relayer: &Signer,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let data = PacketData::decode(&packet.data)?;

    refund_packet_token_validate(ctx, packet, &data)
}

pub fn on_timeout_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    _relayer: &Signer,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let data = match PacketData::decode(&packet.data) {
        Ok(data) => data,
        Err(err) => return (ModuleExtras::empty(), Err(err)),
    };

    if let Err(err) = refund_packet_token_execute(ctx, packet, &data) {
        return (ModuleExtras::empty(), Err(err));
    }

    let timeout_event = TimeoutEvent {
        refund_receiver: data.sender,
        refund_denom: data.token.denom,
        refund_amount: data.token.amount,
        memo: data.memo,
    };

    let extras = ModuleExtras {
        events: vec![timeout_event.into()],
        log: Vec::new(),
    };

    (extras, Ok(()))
}
