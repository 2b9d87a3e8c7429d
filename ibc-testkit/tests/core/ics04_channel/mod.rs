pub mod acknowledgement;
pub mod chan_close_confirm;
pub mod chan_register;
pub mod invariants;
pub mod prune_acknowledgement;
pub mod recv_packet;
pub mod send_packet;
pub mod timeout;
pub mod timeout_on_close;

use ibc_core::channel::types::channel::Order;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_core::channel::types::Version;
use ibc_core::client::types::Height;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_testkit::relayer::context::RelayerContext;
use ibc_testkit::testapp::ibc::applications::mock::MockModuleHandle;
use ibc_testkit::testapp::ibc::core::router::MockRouter;
use ibc_testkit::testapp::ibc::core::types::MockContext;

/// Two mock chains with a [`MockModule`] bound to the `mock` port on each,
/// and a registered channel between them.
///
/// [`MockModule`]: ibc_testkit::testapp::ibc::applications::mock::MockModule
pub struct MockChains {
    pub relayer: RelayerContext,
    pub module_a: MockModuleHandle,
    pub module_b: MockModuleHandle,
    pub port_id: PortId,
    pub chan_id_on_a: ChannelId,
    pub chan_id_on_b: ChannelId,
}

pub fn mock_port_id() -> PortId {
    PortId::new("mock".to_string()).expect("valid port id")
}

/// A timeout height neither chain reaches in a test.
pub fn far_timeout() -> TimeoutHeight {
    TimeoutHeight::At(Height::new(0, 1_000).expect("valid height"))
}

/// The channel ids differ on each side, so swapped ids are caught.
pub fn mock_chains(ordering: Order) -> MockChains {
    let port_id = mock_port_id();
    let chan_id_on_a = ChannelId::new(0);
    let chan_id_on_b = ChannelId::new(1);

    let mut ctx_a = MockContext::default();
    let (router_a, module_a) =
        MockRouter::new_with_mock(&mut ctx_a.port_keeper, port_id.clone()).expect("port is free");

    let mut ctx_b = MockContext::default();
    let (router_b, module_b) =
        MockRouter::new_with_mock(&mut ctx_b.port_keeper, port_id.clone()).expect("port is free");

    let mut relayer = RelayerContext::new(ctx_a, router_a, ctx_b, router_b);
    relayer.register_channel(
        &port_id,
        &chan_id_on_a,
        &port_id,
        &chan_id_on_b,
        ordering,
        Version::from("mock-1"),
    );

    MockChains {
        relayer,
        module_a,
        module_b,
        port_id,
        chan_id_on_a,
        chan_id_on_b,
    }
}

impl MockChains {
    /// Sends `data` from `A`, with a timeout that is never reached.
    pub fn send(&mut self, data: &[u8]) -> Packet {
        self.send_with_timeout(data, far_timeout(), TimeoutTimestamp::Never)
    }

    pub fn send_with_timeout(
        &mut self,
        data: &[u8],
        timeout_height_on_b: TimeoutHeight,
        timeout_timestamp_on_b: TimeoutTimestamp,
    ) -> Packet {
        self.relayer
            .send_packet_on_a(
                &self.port_id,
                &self.chan_id_on_a,
                data.to_vec(),
                timeout_height_on_b,
                timeout_timestamp_on_b,
            )
            .expect("packet is sent")
    }
}

/// The events emitted since the first `skip` of them.
pub fn events_since(ctx: &MockContext, skip: usize) -> Vec<IbcEvent> {
    ctx.get_events().into_iter().skip(skip).collect()
}

/// The kinds of the module events among `events`, in order.
pub fn module_event_kinds(events: &[IbcEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            IbcEvent::Module(e) => Some(e.kind.clone()),
            _ => None,
        })
        .collect()
}
