//! Protocol logic specific to ICS4 messages of type `MsgChannelRegister`.
//!
//! Registration bootstraps a channel end that is already open on both
//! chains, standing in for the opening handshake.

use ibc_core_channel_types::channel::{ChannelEnd, State};
use ibc_core_channel_types::error::ChannelError;
use ibc_core_channel_types::events::{ChannelIds, RegisterChannel};
use ibc_core_channel_types::msgs::MsgChannelRegister;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::identifiers::Sequence;
use ibc_core_host::types::path::{ChannelEndPath, SeqAckPath, SeqRecvPath, SeqSendPath};
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_port::error::PortError;
use ibc_core_port::PortCapability;
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

/// Registers the channel end and hands its capability to `module`.
pub fn chan_register<ExecCtx>(
    ctx: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelRegister,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    chan_register_validate(ctx, module, msg.clone())?;
    chan_register_execute(ctx, module, msg)
}

pub fn chan_register_validate<ValCtx>(
    ctx: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelRegister,
) -> Result<(), ProtocolError>
where
    ValCtx: ValidationContext,
{
    ctx.validate_message_signer(&msg.signer)?;

    let port_cap = port_capability(module, &msg)?;
    ctx.port_keeper()
        .validate_new_channel_capability(port_cap, &msg.chan_id)?;

    let chan_end_path = ChannelEndPath::new(&msg.port_id, &msg.chan_id);
    match ctx.channel_end(&chan_end_path) {
        Ok(_) => {
            return Err(ChannelError::ChannelAlreadyExists {
                port_id: msg.port_id,
                channel_id: msg.chan_id,
            }
            .into())
        }
        Err(ProtocolError::ChannelError(ChannelError::NonexistentChannel { .. })) => {}
        Err(e) => return Err(e),
    }

    let chan_end = new_channel_end(&msg)?;
    chan_end.counterparty().expect_channel_id()?;

    module.on_chan_register_validate(
        msg.ordering,
        &msg.port_id,
        &msg.chan_id,
        &msg.counterparty,
        &msg.version,
    )?;

    Ok(())
}

pub fn chan_register_execute<ExecCtx>(
    ctx: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelRegister,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    let chan_cap = {
        let port_cap = port_capability(module, &msg)?;
        ctx.port_keeper_mut()
            .new_channel_capability(port_cap, msg.chan_id.clone())?
    };

    let chan_end = new_channel_end(&msg)?;
    let chan_end_path = ChannelEndPath::new(&msg.port_id, &msg.chan_id);

    // state changes
    {
        ctx.store_channel(&chan_end_path, chan_end.clone())?;
        ctx.store_next_sequence_send(&SeqSendPath::new(&msg.port_id, &msg.chan_id), Sequence::ONE)?;
        ctx.store_next_sequence_recv(&SeqRecvPath::new(&msg.port_id, &msg.chan_id), Sequence::ONE)?;
        ctx.store_next_sequence_ack(&SeqAckPath::new(&msg.port_id, &msg.chan_id), Sequence::ONE)?;
    }

    module.claim_channel_capability(chan_cap);

    // emit events and logs
    {
        ctx.log_message("success: channel register".to_string())?;

        let core_event = RegisterChannel {
            ids: ChannelIds {
                port_id: msg.port_id,
                channel_id: msg.chan_id,
                counterparty_port_id: chan_end.counterparty().port_id().clone(),
                counterparty_channel_id: chan_end.counterparty().channel_id().cloned(),
                connection_id: chan_end.first_hop()?.clone(),
            },
            ordering: msg.ordering,
            version: msg.version,
        };
        ctx.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx.emit_ibc_event(IbcEvent::RegisterChannel(core_event))?;
    }

    Ok(())
}

fn port_capability<'m>(
    module: &'m dyn Module,
    msg: &MsgChannelRegister,
) -> Result<&'m PortCapability, PortError> {
    module
        .port_capability(&msg.port_id)
        .ok_or_else(|| PortError::UnauthorizedPortCapability {
            port_id: msg.port_id.clone(),
        })
}

fn new_channel_end(msg: &MsgChannelRegister) -> Result<ChannelEnd, ChannelError> {
    ChannelEnd::new(
        State::Open,
        msg.ordering,
        msg.counterparty.clone(),
        msg.connection_hops.clone(),
        msg.version.clone(),
    )
}
