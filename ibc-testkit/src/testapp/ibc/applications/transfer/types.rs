use alloc::sync::Arc;

use ibc_app_transfer::types::{Amount, Denom};
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::prelude::*;
use parking_lot::Mutex;

/// Balances of the mock bank, keyed by account and denomination.
pub type Ledger = BTreeMap<(String, Denom), Amount>;

#[derive(Debug)]
pub(super) struct MockBank {
    pub(super) ledger: Ledger,
    pub(super) send_enabled: bool,
    pub(super) receive_enabled: bool,
}

/// A toy bank backing the token transfer module.
///
/// Outgoing tokens are moved into a per-channel escrow account; incoming
/// tokens are minted to the receiver. Clones share the same bank, so a test
/// can keep one to inspect balances after handing another to the module.
#[derive(Clone, Debug)]
pub struct MockTokenContext {
    pub(super) port_id: PortId,
    pub(super) bank: Arc<Mutex<MockBank>>,
}

impl Default for MockTokenContext {
    fn default() -> Self {
        Self {
            port_id: PortId::transfer(),
            bank: Arc::new(Mutex::new(MockBank {
                ledger: Ledger::new(),
                send_enabled: true,
                receive_enabled: true,
            })),
        }
    }
}

impl MockTokenContext {
    pub fn escrow_account(port_id: &PortId, channel_id: &ChannelId) -> String {
        format!("escrow/{port_id}/{channel_id}")
    }

    pub fn with_balance(self, account: &str, denom: &Denom, amount: impl Into<Amount>) -> Self {
        self.bank
            .lock()
            .ledger
            .insert((account.to_string(), denom.clone()), amount.into());
        self
    }

    pub fn balance(&self, account: &str, denom: &Denom) -> Amount {
        self.bank
            .lock()
            .ledger
            .get(&(account.to_string(), denom.clone()))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_receive_enabled(&self, enabled: bool) {
        self.bank.lock().receive_enabled = enabled;
    }

    pub fn set_send_enabled(&self, enabled: bool) {
        self.bank.lock().send_enabled = enabled;
    }
}
