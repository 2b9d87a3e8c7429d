use ibc_core::channel::handler::chan_register_validate;
use ibc_core::channel::types::channel::{ChannelEnd, Counterparty, Order, State};
use ibc_core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc_core::channel::types::error::ChannelError;
use ibc_core::channel::types::msgs::{ChannelMsg, MsgChannelRegister};
use ibc_core::channel::types::packet::Receipt;
use ibc_core::channel::types::Version;
use ibc_core::client::types::Height;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::{IbcEvent, MessageEvent};
use ibc_core::host::types::error::HostError;
use ibc_core::host::types::identifiers::{ChannelId, PortId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_core::host::ValidationContext;
use ibc_core::port::error::PortError;
use ibc_core::port::PortKeeper;
use ibc_core::primitives::{Signer, Timestamp};
use ibc_core::router::router::Router;
use ibc_core::router::types::module::ModuleId;
use ibc_testkit::fixtures::core::channel::ChannelRegisterConfig;
use ibc_testkit::testapp::ibc::applications::mock::{Callback, MOCK_MODULE_ID_STR};
use ibc_testkit::testapp::ibc::core::types::MockContext;
use rstest::*;

use super::{events_since, mock_chains, MockChains};

fn register_msg(chains: &MockChains, chan_id: ChannelId, ordering: Order) -> MsgChannelRegister {
    ChannelRegisterConfig::builder()
        .port_id(chains.port_id.clone())
        .chan_id(chan_id)
        .ordering(ordering)
        .counterparty_port_id(chains.port_id.clone())
        .counterparty_chan_id(ChannelId::new(7))
        .connection_id(chains.relayer.conn_id_on_a.clone())
        .version(Version::from("mock-1"))
        .build()
}

#[rstest]
#[case::unordered(Order::Unordered)]
#[case::ordered(Order::Ordered)]
fn chan_register_opens_channel(#[case] ordering: Order) {
    let mut chains = mock_chains(Order::Unordered);
    let chan_id = ChannelId::new(5);
    let events_before = chains.relayer.ctx_a.get_events().len();

    let msg = register_msg(&chains, chan_id.clone(), ordering);
    chains
        .relayer
        .deliver_on_a(ChannelMsg::Register(msg))
        .expect("channel registers");

    let ctx_a = &chains.relayer.ctx_a;
    let chan_end = ctx_a
        .channel(&chains.port_id, &chan_id)
        .expect("channel exists");
    assert_eq!(*chan_end.state(), State::Open);
    assert_eq!(*chan_end.ordering(), ordering);
    assert_eq!(chan_end.counterparty().channel_id(), Some(&ChannelId::new(7)));

    for path in [
        SeqSendPath::new(&chains.port_id, &chan_id).into(),
        SeqRecvPath::new(&chains.port_id, &chan_id).into(),
        SeqAckPath::new(&chains.port_id, &chan_id).into(),
    ] {
        assert_eq!(ctx_a.provable_value(&path), Some(Sequence::ONE.to_vec()));
    }

    assert_eq!(
        chains.module_a.callbacks().last(),
        Some(&Callback::Register {
            port_id: chains.port_id.clone(),
            channel_id: chan_id.clone(),
        })
    );

    let events = events_since(ctx_a, events_before);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], IbcEvent::Message(MessageEvent::Channel)));
    assert!(matches!(
        &events[1],
        IbcEvent::RegisterChannel(e) if e.ids.channel_id == chan_id && e.ordering == ordering
    ));
}

#[test_log::test]
fn registered_channel_cannot_be_registered_again() {
    let mut chains = mock_chains(Order::Unordered);
    let before = chains.relayer.ctx_a.snapshot();

    let msg = register_msg(&chains, chains.chan_id_on_a.clone(), Order::Ordered);
    let res = chains.relayer.deliver_on_a(ChannelMsg::Register(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::PortError(PortError::ChannelCapabilityExists { .. }))
    ));
    assert_eq!(chains.relayer.ctx_a.snapshot(), before);
}

#[test_log::test]
fn module_can_refuse_registration() {
    let mut chains = mock_chains(Order::Unordered);
    chains.module_a.configure(|b| b.reject_register = true);
    let chan_id = ChannelId::new(5);

    let msg = register_msg(&chains, chan_id.clone(), Order::Unordered);
    let res = chains.relayer.deliver_on_a(ChannelMsg::Register(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::AppModule { .. }))
    ));
    assert!(chains.relayer.ctx_a.channel(&chains.port_id, &chan_id).is_none());

    // The rejected id is still free once the module accepts channels again.
    chains.module_a.configure(|b| b.reject_register = false);
    let msg = register_msg(&chains, chan_id, Order::Unordered);
    chains
        .relayer
        .deliver_on_a(ChannelMsg::Register(msg))
        .expect("channel registers");
}

#[test_log::test]
fn unbound_port_is_rejected() {
    let mut chains = mock_chains(Order::Unordered);
    let unbound = PortId::new("unbound".to_string()).expect("valid port id");

    let msg = ChannelRegisterConfig::builder()
        .port_id(unbound)
        .chan_id(ChannelId::new(5))
        .build();
    let res = chains.relayer.deliver_on_a(ChannelMsg::Register(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::PortError(PortError::UnknownPort { .. }))
    ));
}

#[test_log::test]
fn counterparty_channel_id_is_required() {
    let mut chains = mock_chains(Order::Unordered);

    let msg = MsgChannelRegister {
        counterparty: Counterparty::new(chains.port_id.clone(), None),
        ..register_msg(&chains, ChannelId::new(5), Order::Unordered)
    };
    let res = chains.relayer.deliver_on_a(ChannelMsg::Register(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::MissingCounterparty))
    ));
}

#[rstest]
#[case::no_hops(0)]
#[case::two_hops(2)]
fn exactly_one_connection_hop_is_required(#[case] hops: usize) {
    let mut chains = mock_chains(Order::Unordered);

    let msg = MsgChannelRegister {
        connection_hops: vec![chains.relayer.conn_id_on_a.clone(); hops],
        ..register_msg(&chains, ChannelId::new(5), Order::Unordered)
    };
    let res = chains.relayer.deliver_on_a(ChannelMsg::Register(msg));

    assert!(matches!(
        res,
        Err(ProtocolError::ChannelError(ChannelError::InvalidConnectionHopsLength {
            expected: 1,
            ..
        }))
    ));
}

/// A host whose channel store cannot be read.
struct UnreadableChannels<'a>(&'a MockContext);

impl ValidationContext for UnreadableChannels<'_> {
    type V = MockContext;

    fn get_client_validation_context(&self) -> &Self::V {
        self.0
    }

    fn host_height(&self) -> Result<Height, ProtocolError> {
        ValidationContext::host_height(self.0)
    }

    fn host_timestamp(&self) -> Result<Timestamp, ProtocolError> {
        ValidationContext::host_timestamp(self.0)
    }

    fn port_keeper(&self) -> &PortKeeper {
        ValidationContext::port_keeper(self.0)
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ProtocolError> {
        Err(HostError::FailedToRetrieveFromStore {
            description: format!("channel store offline at {channel_end_path}"),
        }
        .into())
    }

    fn get_next_sequence_send(&self, path: &SeqSendPath) -> Result<Sequence, ProtocolError> {
        self.0.get_next_sequence_send(path)
    }

    fn get_next_sequence_recv(&self, path: &SeqRecvPath) -> Result<Sequence, ProtocolError> {
        self.0.get_next_sequence_recv(path)
    }

    fn get_next_sequence_ack(&self, path: &SeqAckPath) -> Result<Sequence, ProtocolError> {
        self.0.get_next_sequence_ack(path)
    }

    fn get_packet_commitment(
        &self,
        path: &CommitmentPath,
    ) -> Result<Option<PacketCommitment>, ProtocolError> {
        self.0.get_packet_commitment(path)
    }

    fn get_packet_receipt(&self, path: &ReceiptPath) -> Result<Option<Receipt>, ProtocolError> {
        self.0.get_packet_receipt(path)
    }

    fn get_packet_acknowledgement(
        &self,
        path: &AckPath,
    ) -> Result<Option<AcknowledgementCommitment>, ProtocolError> {
        self.0.get_packet_acknowledgement(path)
    }

    fn get_packet_acknowledgement_proof_height(
        &self,
        path: &AckPath,
    ) -> Result<Option<Height>, ProtocolError> {
        self.0.get_packet_acknowledgement_proof_height(path)
    }

    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ProtocolError> {
        self.0.validate_message_signer(signer)
    }
}

#[test_log::test]
fn channel_store_failure_is_not_read_as_absence() {
    let chains = mock_chains(Order::Unordered);
    let module = chains
        .relayer
        .router_a
        .get_route(&ModuleId::new(MOCK_MODULE_ID_STR.to_string()))
        .expect("mock module is routed");
    let msg = register_msg(&chains, ChannelId::new(5), Order::Unordered);

    let res = chan_register_validate(&UnreadableChannels(&chains.relayer.ctx_a), module, msg);

    assert!(matches!(
        res,
        Err(ProtocolError::HostError(HostError::FailedToRetrieveFromStore { .. }))
    ));
}
