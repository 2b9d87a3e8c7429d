use ibc_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_primitives::prelude::*;
use ibc_primitives::Signer;

use crate::channel::{Counterparty, Order};
use crate::Version;

/// Installs a channel end that was opened out of band.
///
/// The opening handshake lives outside this core; hosts use this datagram
/// to seed an `Open` channel end together with its sequence counters.
#[derive(borsh::BorshSerialize, borsh::BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgChannelRegister {
    pub port_id: PortId,
    pub chan_id: ChannelId,
    pub ordering: Order,
    pub counterparty: Counterparty,
    pub connection_hops: Vec<ConnectionId>,
    pub version: Version,
    pub signer: Signer,
}
