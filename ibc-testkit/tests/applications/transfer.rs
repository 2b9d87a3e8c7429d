use ibc_app_transfer::handler::send_transfer;
use ibc_app_transfer::module::{RecvFailurePolicy, RecvOutcome, TransferModule};
use ibc_app_transfer::types::error::TokenTransferError;
use ibc_app_transfer::types::msgs::MsgTransfer;
use ibc_app_transfer::types::{Amount, MODULE_ID_STR, VERSION};
use ibc_core::channel::handler::chan_register;
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Order, State};
use ibc_core::channel::types::error::ChannelError;
use ibc_core::channel::types::msgs::ChannelMsg;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::TimeoutHeight;
use ibc_core::channel::types::Version;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::router::router::Router;
use ibc_core::router::types::module::ModuleId;
use ibc_testkit::fixtures::applications::transfer::{dummy_denom, MsgTransferConfig, PacketDataConfig};
use ibc_testkit::fixtures::core::channel::ChannelRegisterConfig;
use ibc_testkit::fixtures::core::signer::{dummy_account_id, dummy_receiver_id};
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::relayer::utils;
use ibc_testkit::testapp::ibc::applications::transfer::types::MockTokenContext;
use ibc_testkit::testapp::ibc::core::router::MockRouter;
use ibc_testkit::testapp::ibc::core::types::MockContext;
use test_log::test;

const INITIAL_BALANCE: u64 = 1_000;

struct TransferChains {
    relayer: RelayerContext,
    token_ctx_a: MockTokenContext,
    token_ctx_b: MockTokenContext,
    chan_id_on_a: ChannelId,
    chan_id_on_b: ChannelId,
}

fn sender() -> String {
    dummy_account_id().to_string()
}

fn receiver() -> String {
    dummy_receiver_id().to_string()
}

fn escrow_on_a(chains: &TransferChains) -> String {
    MockTokenContext::escrow_account(&PortId::transfer(), &chains.chan_id_on_a)
}

/// Both chains run the transfer module under `policy`, joined by a
/// registered `transfer` channel. The sender is funded on `A`.
fn transfer_chains(policy: RecvFailurePolicy) -> TransferChains {
    let token_ctx_a =
        MockTokenContext::default().with_balance(&sender(), &dummy_denom(), INITIAL_BALANCE);
    let token_ctx_b = MockTokenContext::default();

    let mut ctx_a = MockContext::default();
    let router_a = MockRouter::new_with_transfer(&mut ctx_a.port_keeper, token_ctx_a.clone(), policy)
        .expect("transfer port is free");
    let mut ctx_b = MockContext::default();
    let router_b = MockRouter::new_with_transfer(&mut ctx_b.port_keeper, token_ctx_b.clone(), policy)
        .expect("transfer port is free");

    let chan_id_on_a = ChannelId::new(0);
    let chan_id_on_b = ChannelId::new(1);
    let mut relayer = RelayerContext::new(ctx_a, router_a, ctx_b, router_b);
    relayer.register_channel(
        &PortId::transfer(),
        &chan_id_on_a,
        &PortId::transfer(),
        &chan_id_on_b,
        Order::Unordered,
        Version::from(VERSION),
    );

    TransferChains {
        relayer,
        token_ctx_a,
        token_ctx_b,
        chan_id_on_a,
        chan_id_on_b,
    }
}

fn transfer_msg(chains: &TransferChains, amount: u64, timeout_height_on_b: TimeoutHeight) -> MsgTransfer {
    MsgTransferConfig::builder()
        .chan_id_on_a(chains.chan_id_on_a.clone())
        .packet_data(PacketDataConfig::builder().amount(Amount::from(amount)).build())
        .timeout_height_on_b(timeout_height_on_b)
        .build()
}

/// Submits `msg` on `A` through the transfer module's channel capability
/// and returns the committed packet.
fn transfer_on_a(chains: &mut TransferChains, msg: MsgTransfer) -> Result<Packet, TokenTransferError> {
    let cap = chains
        .relayer
        .router_a
        .get_route(&ModuleId::new(MODULE_ID_STR.to_string()))
        .and_then(|module| module.channel_capability(&msg.port_id_on_a, &msg.chan_id_on_a))
        .expect("transfer module owns the channel");

    send_transfer(&mut chains.relayer.ctx_a, &mut chains.token_ctx_a, cap, msg)?;
    chains.relayer.ctx_a.advance_block();

    let packet = chains
        .relayer
        .ctx_a
        .get_events()
        .into_iter()
        .rev()
        .find_map(|event| match event {
            IbcEvent::SendPacket(e) => Some(e.packet),
            _ => None,
        })
        .expect("packet was sent");
    Ok(packet)
}

fn far_timeout(chains: &TransferChains) -> TimeoutHeight {
    TimeoutHeight::At(chains.relayer.ctx_b.latest_height().add(1_000))
}

fn ack_is_error(ack: &Acknowledgement) -> bool {
    let status: serde_json::Value = serde_json::from_slice(ack.as_bytes()).expect("ack is JSON");
    status.get("error").is_some()
}

#[test]
fn transfer_escrows_then_mints_on_receiver() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);
    let msg = transfer_msg(&chains, 100, far_timeout(&chains));

    let packet = transfer_on_a(&mut chains, msg).expect("transfer is sent");

    let denom = dummy_denom();
    assert_eq!(chains.token_ctx_a.balance(&sender(), &denom), Amount::from(900));
    assert_eq!(
        chains.token_ctx_a.balance(&escrow_on_a(&chains), &denom),
        Amount::from(100)
    );

    let ack = chains
        .relayer
        .relay_packet(packet)
        .expect("round trip succeeds");

    assert_eq!(ack.as_bytes(), br#"{"result":"AQ=="}"#.as_slice());
    assert_eq!(chains.token_ctx_b.balance(&receiver(), &denom), Amount::from(100));
    // A successful acknowledgement leaves the tokens escrowed.
    assert_eq!(
        chains.token_ctx_a.balance(&escrow_on_a(&chains), &denom),
        Amount::from(100)
    );
}

#[test]
fn refused_packet_is_refunded_through_error_acknowledgement() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);
    chains.token_ctx_b.set_receive_enabled(false);
    let msg = transfer_msg(&chains, 100, far_timeout(&chains));
    let packet = transfer_on_a(&mut chains, msg).expect("transfer is sent");

    let ack = chains
        .relayer
        .recv_packet_on_b(packet.clone())
        .expect("packet is received with an error acknowledgement");
    assert!(ack_is_error(&ack));

    let denom = dummy_denom();
    assert_eq!(chains.token_ctx_b.balance(&receiver(), &denom), Amount::from(0));
    assert!(chains
        .relayer
        .ctx_b
        .channel(&PortId::transfer(), &chains.chan_id_on_b)
        .expect("channel exists")
        .is_open());

    chains
        .relayer
        .ack_packet_on_a(packet, ack)
        .expect("error acknowledgement is processed");

    assert_eq!(
        chains.token_ctx_a.balance(&sender(), &denom),
        Amount::from(INITIAL_BALANCE)
    );
    assert_eq!(
        chains.token_ctx_a.balance(&escrow_on_a(&chains), &denom),
        Amount::from(0)
    );
}

#[test]
fn timed_out_transfer_is_refunded() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);
    let timeout_height = chains.relayer.ctx_b.latest_height().add(2);
    let msg = transfer_msg(&chains, 250, TimeoutHeight::At(timeout_height));
    let packet = transfer_on_a(&mut chains, msg).expect("transfer is sent");
    chains.relayer.ctx_b.advance_block();
    chains.relayer.ctx_b.advance_block();

    chains
        .relayer
        .timeout_packet_on_a(packet)
        .expect("timeout is processed");

    let denom = dummy_denom();
    assert_eq!(
        chains.token_ctx_a.balance(&sender(), &denom),
        Amount::from(INITIAL_BALANCE)
    );
    assert_eq!(chains.token_ctx_b.balance(&receiver(), &denom), Amount::from(0));
}

#[test]
fn transfer_beyond_balance_is_rejected() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);
    let events_before = chains.relayer.ctx_a.get_events().len();
    let msg = transfer_msg(&chains, INITIAL_BALANCE + 1, far_timeout(&chains));

    let res = transfer_on_a(&mut chains, msg);

    assert!(matches!(res, Err(TokenTransferError::InsufficientFunds { .. })));
    assert_eq!(chains.relayer.ctx_a.get_events().len(), events_before);
    assert_eq!(
        chains.token_ctx_a.balance(&sender(), &dummy_denom()),
        Amount::from(INITIAL_BALANCE)
    );
}

#[test]
fn transfer_while_sending_disabled_is_rejected() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);
    chains.token_ctx_a.set_send_enabled(false);
    let msg = transfer_msg(&chains, 100, far_timeout(&chains));

    let res = transfer_on_a(&mut chains, msg);

    assert!(matches!(res, Err(TokenTransferError::SendDisabled { .. })));
    assert_eq!(
        chains.token_ctx_a.balance(&sender(), &dummy_denom()),
        Amount::from(INITIAL_BALANCE)
    );
}

#[test]
fn transfer_without_timeout_is_rejected() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);
    let msg = transfer_msg(&chains, 100, TimeoutHeight::Never);

    let res = transfer_on_a(&mut chains, msg);

    assert!(res.is_err());
    assert_eq!(
        chains.token_ctx_a.balance(&sender(), &dummy_denom()),
        Amount::from(INITIAL_BALANCE)
    );
}

#[test]
fn transfer_channels_must_be_unordered() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);
    let msg = ChannelRegisterConfig::builder()
        .chan_id(ChannelId::new(9))
        .ordering(Order::Ordered)
        .connection_id(chains.relayer.conn_id_on_a.clone())
        .build();

    let res = chains.relayer.deliver_on_a(ChannelMsg::Register(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::AppModule { .. }))
    ));
}

#[test]
fn error_acknowledgement_policy_keeps_channel_open() {
    let mut chains = transfer_chains(RecvFailurePolicy::ErrorAcknowledgement);

    let res = chains
        .relayer
        .close_init_on_a(&PortId::transfer(), &chains.chan_id_on_a);

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::AppModule { .. }))
    ));
}

#[test]
fn close_channel_policy_closes_on_refused_packet() {
    let token_ctx_a =
        MockTokenContext::default().with_balance(&sender(), &dummy_denom(), INITIAL_BALANCE);
    let token_ctx_b = MockTokenContext::default();
    token_ctx_b.set_receive_enabled(false);

    let mut ctx_a = MockContext::default();
    let router_a = MockRouter::new_with_transfer(
        &mut ctx_a.port_keeper,
        token_ctx_a.clone(),
        RecvFailurePolicy::CloseChannel,
    )
    .expect("transfer port is free");
    let mut ctx_b = MockContext::default();
    let mut module_b = TransferModule::bind(
        &mut ctx_b.port_keeper,
        token_ctx_b.clone(),
        RecvFailurePolicy::CloseChannel,
    )
    .expect("transfer port is free");
    assert_eq!(module_b.policy(), RecvFailurePolicy::CloseChannel);

    let chan_id_on_a = ChannelId::new(0);
    let chan_id_on_b = ChannelId::new(1);
    let mut chains = TransferChains {
        relayer: RelayerContext::new(ctx_a, router_a, ctx_b, MockRouter::default()),
        token_ctx_a,
        token_ctx_b,
        chan_id_on_a: chan_id_on_a.clone(),
        chan_id_on_b: chan_id_on_b.clone(),
    };

    let register_on_a = ChannelRegisterConfig::builder()
        .chan_id(chan_id_on_a.clone())
        .counterparty_chan_id(chan_id_on_b.clone())
        .connection_id(chains.relayer.conn_id_on_a.clone())
        .build();
    chains
        .relayer
        .deliver_on_a(ChannelMsg::Register(register_on_a))
        .expect("channel registers on A");
    let register_on_b = ChannelRegisterConfig::builder()
        .chan_id(chan_id_on_b.clone())
        .counterparty_chan_id(chan_id_on_a)
        .connection_id(chains.relayer.conn_id_on_b.clone())
        .build();
    chan_register(&mut chains.relayer.ctx_b, &mut module_b, register_on_b)
        .expect("channel registers on B");

    let msg = transfer_msg(&chains, 100, far_timeout(&chains));
    let packet = transfer_on_a(&mut chains, msg).expect("transfer is sent");

    chains.relayer.update_client_on_b();
    let recv_msg = utils::build_msg_recv_packet(
        &chains.relayer.ctx_a,
        packet.clone(),
        chains.relayer.signer.clone(),
    );
    let outcome = module_b
        .recv_transfer_or_close(&mut chains.relayer.ctx_b, recv_msg)
        .expect("refusal is handled by closing");

    assert!(matches!(outcome, RecvOutcome::ChannelClosed { .. }));
    let chan_end_on_b = chains
        .relayer
        .ctx_b
        .channel(&PortId::transfer(), &chan_id_on_b)
        .expect("channel exists");
    assert_eq!(*chan_end_on_b.state(), State::Closed);
    assert!(!chains
        .relayer
        .ctx_b
        .get_events()
        .iter()
        .any(|e| matches!(e, IbcEvent::WriteAcknowledgement(_))));
    assert_eq!(
        module_b.token_ctx().balance(&receiver(), &dummy_denom()),
        Amount::from(0)
    );

    // The closed end no longer carries transfers from B either.
    let msg_back = MsgTransferConfig::builder()
        .chan_id_on_a(chan_id_on_b.clone())
        .timeout_height_on_b(far_timeout(&chains))
        .build();
    let res = module_b.send_transfer(&mut chains.relayer.ctx_b, msg_back);
    assert!(matches!(
        res,
        Err(TokenTransferError::Protocol(ProtocolError::ChannelError(
            ChannelError::ChannelNotOpen { .. }
        )))
    ));

    // The sender reclaims its tokens once B's end is closed.
    chains
        .relayer
        .timeout_on_close_packet_on_a(packet)
        .expect("timeout on close is processed");
    assert_eq!(
        chains.token_ctx_a.balance(&sender(), &dummy_denom()),
        Amount::from(INITIAL_BALANCE)
    );
}

#[test]
fn module_sends_only_over_channels_it_owns() {
    let mut ctx = MockContext::default();
    let mut module = TransferModule::bind(
        &mut ctx.port_keeper,
        MockTokenContext::default().with_balance(&sender(), &dummy_denom(), INITIAL_BALANCE),
        RecvFailurePolicy::default(),
    )
    .expect("transfer port is free");
    assert_eq!(module.policy(), RecvFailurePolicy::ErrorAcknowledgement);

    let msg = MsgTransferConfig::builder()
        .chan_id_on_a(ChannelId::new(5))
        .timeout_height_on_b(TimeoutHeight::At(ctx.latest_height().add(10)))
        .build();
    let res = module.send_transfer(&mut ctx, msg);

    assert!(matches!(
        res,
        Err(TokenTransferError::MissingChannelCapability { .. })
    ));
    assert_eq!(
        module.token_ctx().balance(&sender(), &dummy_denom()),
        Amount::from(INITIAL_BALANCE)
    );
}
