//! Protocol logic specific to processing ICS4 messages of type `MsgChannelCloseConfirm`.
use ibc_core_channel_types::channel::State;
use ibc_core_channel_types::error::ChannelError;
use ibc_core_channel_types::events::CloseConfirm;
use ibc_core_channel_types::msgs::MsgChannelCloseConfirm;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::events::{IbcEvent, MessageEvent};
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ClientKeeper, ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::{authenticate_module, channel_ids, emit_module_extras, expected_closed_counterparty};

pub fn chan_close_confirm_validate<ValCtx>(
    ctx_b: &ValCtx,
    module: &dyn Module,
    msg: MsgChannelCloseConfirm,
) -> Result<(), ProtocolError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_b, module, &msg)?;

    module.on_chan_close_confirm_validate(&msg.port_id_on_b, &msg.chan_id_on_b)?;

    Ok(())
}

pub fn chan_close_confirm_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgChannelCloseConfirm,
) -> Result<(), ProtocolError>
where
    ExecCtx: ExecutionContext,
{
    let extras = module.on_chan_close_confirm_execute(&msg.port_id_on_b, &msg.chan_id_on_b)?;
    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    // state changes
    {
        let mut chan_end_on_b = chan_end_on_b.clone();
        chan_end_on_b.transition_to(State::Closed)?;

        ctx_b.store_channel(&chan_end_path_on_b, chan_end_on_b)?;
    }

    // emit events and logs
    {
        ctx_b.log_message("success: channel close confirm".to_string())?;

        let core_event = CloseConfirm(channel_ids(
            &msg.port_id_on_b,
            &msg.chan_id_on_b,
            &chan_end_on_b,
        )?);
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(IbcEvent::CloseConfirmChannel(core_event))?;

        emit_module_extras(ctx_b, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_b: &Ctx, module: &dyn Module, msg: &MsgChannelCloseConfirm) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    ctx_b.validate_message_signer(&msg.signer)?;

    // Retrieve the old channel end and validate it against the message.
    let chan_end_path_on_b = ChannelEndPath::new(&msg.port_id_on_b, &msg.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    // Validate that the channel end is in a state where it can be closed.
    chan_end_on_b.verify_not_closed()?;

    authenticate_module(ctx_b, module, &msg.port_id_on_b, &msg.chan_id_on_b)?;

    // Verify proofs
    {
        let conn_id_on_b = chan_end_on_b.first_hop()?;
        let port_id_on_a = chan_end_on_b.counterparty().port_id();
        let chan_id_on_a = chan_end_on_b.counterparty().expect_channel_id()?;

        let expected_chan_end_on_a =
            expected_closed_counterparty(ctx_b, &chan_end_on_b, &msg.port_id_on_b, &msg.chan_id_on_b)?;
        let chan_end_path_on_a = ChannelEndPath::new(port_id_on_a, chan_id_on_a);

        // Verify the proof for the channel state against the expected channel end.
        ctx_b
            .get_client_validation_context()
            .verify_membership(
                conn_id_on_b,
                msg.proof_height_on_a,
                &msg.proof_chan_end_on_a,
                chan_end_path_on_a.into(),
                expected_chan_end_on_a.encode_vec(),
            )
            .map_err(ChannelError::FailedProofVerification)?;
    }

    Ok(())
}
