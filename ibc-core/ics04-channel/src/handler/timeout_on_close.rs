use ibc_core_channel_types::error::ChannelError;
use ibc_core_channel_types::msgs::MsgTimeoutOnClose;
use ibc_core_handler_types::error::ProtocolError;
use ibc_core_host::types::path::ChannelEndPath;
use ibc_core_host::{ClientKeeper, ValidationContext};
use ibc_core_router::module::Module;
use ibc_primitives::prelude::*;

use super::timeout::verify_unreceived;
use super::{
    authenticate_module, expected_closed_counterparty, verify_packet_commitment,
    verify_packet_counterparty,
};

/// The local end may be in any state: the counterparty closing is what
/// makes the packet undeliverable, whatever its timeout says.
pub(super) fn validate<Ctx>(
    ctx_a: &Ctx,
    module: &dyn Module,
    msg: &MsgTimeoutOnClose,
) -> Result<(), ProtocolError>
where
    Ctx: ValidationContext,
{
    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    authenticate_module(ctx_a, module, &packet.port_id_on_a, &packet.chan_id_on_a)?;

    verify_packet_counterparty(&chan_end_on_a, &packet.port_id_on_b, &packet.chan_id_on_b)?;

    verify_packet_commitment(ctx_a, packet)?;

    // Verify the counterparty channel end is closed
    {
        let conn_id_on_a = chan_end_on_a.first_hop()?;
        let expected_chan_end_on_b = expected_closed_counterparty(
            ctx_a,
            &chan_end_on_a,
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
        )?;
        let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);

        ctx_a
            .get_client_validation_context()
            .verify_membership(
                conn_id_on_a,
                msg.proof_height_on_b,
                &msg.proof_close_on_b,
                chan_end_path_on_b.into(),
                expected_chan_end_on_b.encode_vec(),
            )
            .map_err(ChannelError::FailedProofVerification)?;
    }

    verify_unreceived(
        ctx_a,
        &chan_end_on_a,
        packet,
        msg.next_seq_recv_on_b,
        &msg.proof_unreceived_on_b,
        msg.proof_height_on_b,
    )
}
