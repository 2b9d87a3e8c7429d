use ibc_core_channel::handler::{
    acknowledgement_packet_execute, acknowledgement_packet_validate, chan_close_confirm_execute,
    chan_close_confirm_validate, chan_close_init_execute, chan_close_init_validate,
    chan_register_execute, chan_register_validate, prune_acknowledgement_execute,
    prune_acknowledgement_validate, recv_packet_execute, recv_packet_validate,
    timeout_packet_execute, timeout_packet_validate, TimeoutMsgType,
};
use ibc_core_channel::types::msgs::{
    channel_msg_to_port_id, packet_msg_to_port_id, ChannelMsg, PacketMsg,
};
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_handler_types::msgs::MsgEnvelope;
use ibc_core_host::types::identifiers::PortId;
use ibc_core_host::{ExecutionContext, ValidationContext};
use ibc_core_router::module::Module;
use ibc_core_router::router::Router;
use ibc_core_router::types::error::RouterError;
use ibc_core_router::types::module::ModuleId;

/// Entrypoint which performs both validation and message execution
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ProtocolError>
where
    Ctx: ExecutionContext,
{
    validate(ctx, router, msg.clone())?;
    execute(ctx, router, msg)
}

/// Entrypoint which only performs message validation
///
/// If a transaction contains `n` messages `m_1` ... `m_n`, then
/// they MUST be processed as follows:
///     validate(m_1), execute(m_1), ..., validate(m_n), execute(m_n)
/// That is, the state transition of message `i` must be applied before
/// message `i+1` is validated. This is equivalent to calling
/// `dispatch()` on each successively.
pub fn validate<Ctx>(ctx: &Ctx, router: &impl Router, msg: MsgEnvelope) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    match msg {
        MsgEnvelope::Channel(msg) => {
            let module = route(ctx, router, channel_msg_to_port_id(&msg))?;

            match msg {
                ChannelMsg::Register(msg) => chan_register_validate(ctx, module, msg),
                ChannelMsg::CloseInit(msg) => chan_close_init_validate(ctx, module, msg),
                ChannelMsg::CloseConfirm(msg) => chan_close_confirm_validate(ctx, module, msg),
            }
        }
        MsgEnvelope::Packet(msg) => {
            let module = route(ctx, router, packet_msg_to_port_id(&msg))?;

            match msg {
                PacketMsg::Recv(msg) => recv_packet_validate(ctx, module, msg),
                PacketMsg::Ack(msg) => acknowledgement_packet_validate(ctx, module, msg),
                PacketMsg::Timeout(msg) => {
                    timeout_packet_validate(ctx, module, TimeoutMsgType::Timeout(msg))
                }
                PacketMsg::TimeoutOnClose(msg) => {
                    timeout_packet_validate(ctx, module, TimeoutMsgType::TimeoutOnClose(msg))
                }
                PacketMsg::PruneAck(msg) => prune_acknowledgement_validate(ctx, &msg),
            }
        }
    }
}

/// Entrypoint which only performs message execution
pub fn execute<Ctx>(
    ctx: &mut Ctx,
    router: &mut impl Router,
    msg: MsgEnvelope,
) -> Result<(), ProtocolError>
where
    Ctx: ExecutionContext,
{
    match msg {
        MsgEnvelope::Channel(msg) => {
            let module = route_mut(ctx, router, channel_msg_to_port_id(&msg))?;

            match msg {
                ChannelMsg::Register(msg) => chan_register_execute(ctx, module, msg),
                ChannelMsg::CloseInit(msg) => chan_close_init_execute(ctx, module, msg),
                ChannelMsg::CloseConfirm(msg) => chan_close_confirm_execute(ctx, module, msg),
            }
        }
        MsgEnvelope::Packet(msg) => {
            let module = route_mut(ctx, router, packet_msg_to_port_id(&msg))?;

            match msg {
                PacketMsg::Recv(msg) => recv_packet_execute(ctx, module, msg),
                PacketMsg::Ack(msg) => acknowledgement_packet_execute(ctx, module, msg),
                PacketMsg::Timeout(msg) => {
                    timeout_packet_execute(ctx, module, TimeoutMsgType::Timeout(msg))
                }
                PacketMsg::TimeoutOnClose(msg) => {
                    timeout_packet_execute(ctx, module, TimeoutMsgType::TimeoutOnClose(msg))
                }
                PacketMsg::PruneAck(msg) => prune_acknowledgement_execute(ctx, msg),
            }
        }
    }
}

/// The id of the module the port keeper bound `port_id` to.
fn module_id<Ctx>(ctx: &Ctx, port_id: &PortId) -> Result<ModuleId, ProtocolError>
where
    Ctx: ValidationContext,
{
    Ok(ctx.port_keeper().lookup_module(port_id)?.clone())
}

fn route<'r, Ctx>(
    ctx: &Ctx,
    router: &'r impl Router,
    port_id: &PortId,
) -> Result<&'r dyn Module, ProtocolError>
where
    Ctx: ValidationContext,
{
    let module_id = module_id(ctx, port_id)?;
    router
        .get_route(&module_id)
        .ok_or(RouterError::MissingModule { module_id }.into())
}

fn route_mut<'r, Ctx>(
    ctx: &Ctx,
    router: &'r mut impl Router,
    port_id: &PortId,
) -> Result<&'r mut dyn Module, ProtocolError>
where
    Ctx: ValidationContext,
{
    let module_id = module_id(ctx, port_id)?;
    router
        .get_route_mut(&module_id)
        .ok_or(RouterError::MissingModule { module_id }.into())
}
