//! Implementation of a global context mock. Used in testing handlers of all IBC modules.

use alloc::sync::Arc;
use core::time::Duration;

use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc_core::channel::types::packet::Receipt;
use ibc_core::client::types::Height;
use ibc_core::entrypoint::dispatch;
use ibc_core::handler::types::error::ProtocolError;
use ibc_core::handler::types::events::IbcEvent;
use ibc_core::handler::types::msgs::MsgEnvelope;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core::host::types::path::Path;
use ibc_core::port::PortKeeper;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Timestamp;
use ibc_core::router::router::Router;
use parking_lot::Mutex;

use crate::fixtures::core::context::MockContextConfig;

pub const DEFAULT_BLOCK_TIME_SECS: u64 = 3;

pub type PortChannelIdMap<V> = BTreeMap<(PortId, ChannelId), V>;

/// An object that stores all IBC related data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockIbcStore {
    /// All the channels in the store.
    pub channels: PortChannelIdMap<ChannelEnd>,

    /// Tracks the sequence number for the next packet to be sent.
    pub next_sequence_send: PortChannelIdMap<Sequence>,

    /// Tracks the sequence number for the next packet to be received.
    pub next_sequence_recv: PortChannelIdMap<Sequence>,

    /// Tracks the sequence number for the next packet to be acknowledged.
    pub next_sequence_ack: PortChannelIdMap<Sequence>,

    pub packet_acknowledgement: PortChannelIdMap<BTreeMap<Sequence, AcknowledgementCommitment>>,

    /// Counterparty height each stored acknowledgement's packet was proven at
    pub packet_ack_proof_height: PortChannelIdMap<BTreeMap<Sequence, Height>>,

    /// Constant-size commitments to packets data fields
    pub packet_commitment: PortChannelIdMap<BTreeMap<Sequence, PacketCommitment>>,

    /// Used by unordered channel
    pub packet_receipt: PortChannelIdMap<BTreeMap<Sequence, Receipt>>,

    /// Emitted IBC events in order
    pub events: Vec<IbcEvent>,

    /// Logs of the IBC module
    pub logs: Vec<String>,
}

impl MockIbcStore {
    /// The bytes a counterparty would prove under `path`, or `None` if
    /// nothing is stored there.
    pub fn provable_value(&self, path: &Path) -> Option<Vec<u8>> {
        match path {
            Path::Ports(_) => None,
            Path::ChannelEnd(p) => self
                .channels
                .get(&(p.0.clone(), p.1.clone()))
                .map(ChannelEnd::encode_vec),
            Path::SeqSend(p) => self
                .next_sequence_send
                .get(&(p.0.clone(), p.1.clone()))
                .map(Sequence::to_vec),
            Path::SeqRecv(p) => self
                .next_sequence_recv
                .get(&(p.0.clone(), p.1.clone()))
                .map(Sequence::to_vec),
            Path::SeqAck(p) => self
                .next_sequence_ack
                .get(&(p.0.clone(), p.1.clone()))
                .map(Sequence::to_vec),
            Path::Commitment(p) => self
                .packet_commitment
                .get(&(p.port_id.clone(), p.channel_id.clone()))
                .and_then(|m| m.get(&p.sequence))
                .map(|c| c.clone().into_vec()),
            Path::Ack(p) => self
                .packet_acknowledgement
                .get(&(p.port_id.clone(), p.channel_id.clone()))
                .and_then(|m| m.get(&p.sequence))
                .map(|c| c.clone().into_vec()),
            Path::Receipt(p) => self
                .packet_receipt
                .get(&(p.port_id.clone(), p.channel_id.clone()))
                .and_then(|m| m.get(&p.sequence))
                .map(|r| r.as_bytes().to_vec()),
        }
    }
}

/// What this chain's light client knows about the chain at the other end
/// of a connection.
#[derive(Clone, Debug)]
pub struct MockClientRecord {
    pub counterparty_connection_id: ConnectionId,

    /// Counterparty consensus timestamps, indexed by counterparty height.
    pub consensus_timestamps: BTreeMap<Height, Timestamp>,
}

/// A context implementing the dependencies necessary for testing any IBC module.
#[derive(Debug)]
pub struct MockContext {
    /// The current height of the host chain.
    pub latest_height: Height,

    /// The timestamp of the block at `latest_height`.
    pub latest_timestamp: Timestamp,

    /// Average time duration between blocks
    pub block_time: Duration,

    /// Port bindings and capability authority.
    pub port_keeper: PortKeeper,

    /// Light clients of counterparties, one per connection.
    pub clients: BTreeMap<ConnectionId, MockClientRecord>,

    /// An object that stores all IBC related data.
    pub ibc_store: Arc<Mutex<MockIbcStore>>,
}

/// Returns a MockContext with bare minimum initialization: no clients and no
/// channels are present, and the chain has Height(5). Use the `with_*`
/// methods to populate it.
impl Default for MockContext {
    fn default() -> Self {
        MockContextConfig::builder().build()
    }
}

/// Implementation of internal interface for use in testing. The methods in this interface should
/// _not_ be accessible to any Ics handler.
impl MockContext {
    pub fn latest_height(&self) -> Height {
        self.latest_height
    }

    pub fn latest_timestamp(&self) -> Timestamp {
        self.latest_timestamp
    }

    /// Commits the current block and starts the next one.
    pub fn advance_block(&mut self) {
        self.latest_height = self.latest_height.increment();
        self.latest_timestamp = (self.latest_timestamp + self.block_time).expect("no overflow");
    }

    pub fn advance_block_up_to(mut self, target_height: Height) -> Self {
        if target_height.revision_number() != self.latest_height.revision_number() {
            panic!("Cannot advance history of the chain to a different revision number!")
        } else if target_height.revision_height() < self.latest_height.revision_height() {
            panic!("Cannot rewind history of the chain to a smaller revision height!")
        } else {
            while self.latest_height.revision_height() < target_height.revision_height() {
                self.advance_block()
            }
        }
        self
    }

    /// Moves the clock forward without producing a block.
    pub fn advance_time(&mut self, duration: Duration) {
        self.latest_timestamp = (self.latest_timestamp + duration).expect("no overflow");
    }

    /// Associates a light client of the counterparty with `conn_id`.
    pub fn with_client(mut self, conn_id: ConnectionId, counterparty_conn_id: ConnectionId) -> Self {
        self.clients.insert(
            conn_id,
            MockClientRecord {
                counterparty_connection_id: counterparty_conn_id,
                consensus_timestamps: BTreeMap::new(),
            },
        );
        self
    }

    /// Records the counterparty consensus state at `height`, as a client
    /// update would.
    pub fn store_consensus_timestamp(
        &mut self,
        conn_id: &ConnectionId,
        height: Height,
        timestamp: Timestamp,
    ) {
        self.clients
            .get_mut(conn_id)
            .expect("client exists")
            .consensus_timestamps
            .insert(height, timestamp);
    }

    pub fn with_channel(self, port_id: PortId, chan_id: ChannelId, channel_end: ChannelEnd) -> Self {
        self.ibc_store
            .lock()
            .channels
            .insert((port_id, chan_id), channel_end);
        self
    }

    /// A datagram passes all validation and is executed: also advances the
    /// host chain by one block.
    pub fn deliver(
        &mut self,
        router: &mut impl Router,
        msg: MsgEnvelope,
    ) -> Result<(), ProtocolError> {
        dispatch(self, router, msg)?;
        self.advance_block();
        Ok(())
    }

    pub fn provable_value(&self, path: &Path) -> Option<Vec<u8>> {
        self.ibc_store.lock().provable_value(path)
    }

    pub fn channel(&self, port_id: &PortId, chan_id: &ChannelId) -> Option<ChannelEnd> {
        self.ibc_store
            .lock()
            .channels
            .get(&(port_id.clone(), chan_id.clone()))
            .cloned()
    }

    pub fn get_events(&self) -> Vec<IbcEvent> {
        self.ibc_store.lock().events.clone()
    }

    pub fn get_logs(&self) -> Vec<String> {
        self.ibc_store.lock().logs.clone()
    }

    /// Snapshot of the whole store, for asserting that a failed transition
    /// left it untouched.
    pub fn snapshot(&self) -> MockIbcStore {
        self.ibc_store.lock().clone()
    }
}
