//! This module implements the processing logic for ICS4 (channel) messages.
mod acknowledgement;
mod chan_close_confirm;
mod chan_close_init;
mod chan_register;
mod prune_acknowledgement;
mod recv_packet;
mod send_packet;
mod timeout;
mod timeout_on_close;

pub use acknowledgement::*;
pub use chan_close_confirm::*;
pub use chan_close_init::*;
pub use chan_register::*;
pub use prune_acknowledgement::*;
pub use recv_packet::*;
pub use send_packet::*;
pub use timeout::*;

use ibc_core_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_core_channel_types::commitment::{compute_packet_commitment, PacketCommitment};
use ibc_core_channel_types::error::PacketError;
use ibc_core_channel_types::events::ChannelIds;
use ibc_core_channel_types::packet::Packet;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::IbcEvent;
use ibc_core_host::types::identifiers::{ChannelId, PortId};
use ibc_core_host::types::path::CommitmentPath;
use ibc_core_host::{ClientKeeper, ExecutionContext, ValidationContext};
use ibc_core_port::error::PortError;
use ibc_core_router::module::Module;
use ibc_core_router::types::module::ModuleExtras;
use ibc_primitives::prelude::*;

/// Checks that `module` holds the capability the port keeper minted for
/// (`port_id`, `channel_id`).
pub(crate) fn authenticate_module<Ctx>(
    ctx: &Ctx,
    module: &dyn Module,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    let cap = module.channel_capability(port_id, channel_id).ok_or_else(|| {
        PortError::UnauthorizedCapability {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
    })?;

    ctx.port_keeper().authenticate(cap, port_id, channel_id)?;

    Ok(())
}

pub(crate) fn emit_module_extras<Ctx>(ctx: &mut Ctx, extras: ModuleExtras) -> Result<(), ProtocolError>
where
    Ctx: ExecutionContext,
{
    for module_event in extras.events {
        ctx.emit_ibc_event(IbcEvent::Module(module_event))?;
    }

    for log_message in extras.log {
        ctx.log_message(log_message)?;
    }

    Ok(())
}

/// Builds the error for a state that validation should have made
/// impossible, and records it.
pub(crate) fn invariant_violation(description: impl ToString) -> ProtocolError {
    let description = description.to_string();
    tracing::error!(%description, "invariant violation");
    ProtocolError::invariant_violation(description)
}

/// The stored commitment for `packet`, which must exist and match the
/// packet exactly.
pub(crate) fn verify_packet_commitment<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
) -> Result<PacketCommitment, ProtocolError>
where
    Ctx: ValidationContext,
{
    let commitment_path =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    let stored = ctx.get_packet_commitment(&commitment_path)?.ok_or(
        PacketError::MissingPacketCommitment {
            sequence: packet.seq_on_a,
        },
    )?;

    let expected = compute_packet_commitment(ctx.commitment_hasher(), packet);
    if stored != expected {
        return Err(PacketError::MismatchedPacketCommitment {
            sequence: packet.seq_on_a,
            expected,
            actual: stored,
        }
        .into());
    }

    Ok(stored)
}

/// Same check as [`verify_packet_commitment`], for the execute phase where a
/// failure means the store changed under us.
pub(crate) fn reverify_packet_commitment<Ctx>(ctx: &Ctx, packet: &Packet) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    match verify_packet_commitment(ctx, packet) {
        Ok(_) => Ok(()),
        Err(e) => Err(invariant_violation(format!(
            "packet {} no longer matches its commitment: {e}",
            packet.seq_on_a
        ))),
    }
}

/// The destination of a packet must be the channel end's counterparty.
pub(crate) fn verify_packet_counterparty(
    chan_end: &ChannelEnd,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<(), PacketError> {
    let counterparty = chan_end.counterparty();
    if counterparty.port_id() != port_id || counterparty.channel_id() != Some(channel_id) {
        return Err(PacketError::InvalidPacketCounterparty {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        });
    }
    Ok(())
}

/// What the counterparty should have stored for its end once it closed the
/// channel whose local end is `chan_end` at (`port_id`, `channel_id`).
pub(crate) fn expected_closed_counterparty<Ctx>(
    ctx: &Ctx,
    chan_end: &ChannelEnd,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<ChannelEnd, ProtocolError>
where
    Ctx: ValidationContext,
{
    let conn_id = chan_end.first_hop()?;
    let counterparty_conn_id = ctx
        .get_client_validation_context()
        .counterparty_connection_id(conn_id)?;

    Ok(ChannelEnd::new(
        State::Closed,
        *chan_end.ordering(),
        Counterparty::new(port_id.clone(), Some(channel_id.clone())),
        vec![counterparty_conn_id],
        chan_end.version().clone(),
    )?)
}

pub(crate) fn channel_ids(
    port_id: &PortId,
    channel_id: &ChannelId,
    chan_end: &ChannelEnd,
) -> Result<ChannelIds, ProtocolError> {
    Ok(ChannelIds {
        port_id: port_id.clone(),
        channel_id: channel_id.clone(),
        counterparty_port_id: chan_end.counterparty().port_id().clone(),
        counterparty_channel_id: chan_end.counterparty().channel_id().cloned(),
        connection_id: chan_end.first_hop()?.clone(),
    })
}
