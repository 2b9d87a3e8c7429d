//! Protocol logic specific to ICS4 messages of type `MsgChannelCloseInit`.
use ibc_core_channel_types::channel::State;
use ibc_core_channel_types::events::CloseInit;
use ibc_core_channel_types::msgs::MsgChannelCloseInit;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{authenticate_module, channel_ids, emit_module_extras};

/// Closes the channel end `module` owns, including all necessary validation.
///
/// This is how an application gives up on a channel of its own accord.
pub fn chan_close_init<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelCloseInit,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    chan_close_init_validate(ctx_a, module, msg.clone())?;
    chan_close_init_execute(ctx_a, module, msg)
}

pub fn chan_close_init_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelCloseInit,
) -> Result<(), ProtocolError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, module, &msg)?;

    module.on_chan_close_init_validate(&msg.port_id_on_a, &msg.chan_id_on_a)?;

    Ok(())
}

pub fn chan_close_init_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelCloseInit,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    let extras = module.on_chan_close_init_execute(&msg.port_id_on_a, &msg.chan_id_on_a)?;
    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // state changes
    {
        let mut chan_end_on_a = chan_end_on_a.clone();
        chan_end_on_a.transition_to(State::Closed)?;

        ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a)?;
    }

    // emit events and logs
    {
        ctx_a.log_message("success: channel close init".to_string())?;

        let core_event = CloseInit(channel_ids(
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            &chan_end_on_a,
        )?);
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(IbcEvent::CloseInitChannel(core_event))?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, module: &dyn Module, msg: &MsgChannelCloseInit) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let chan_end_path_on_a = ChannelEndPath::new(&msg.port_id_on_a, &msg.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    // Validate that the channel end is in a state where it can be closed.
    chan_end_on_a.verify_not_closed()?;

    authenticate_module(ctx_a, module, &msg.port_id_on_a, &msg.chan_id_on_a)?;

    chan_end_on_a.first_hop()?;

    Ok(())
}
