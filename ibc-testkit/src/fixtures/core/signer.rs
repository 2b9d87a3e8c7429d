use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;

/// Returns a dummy bech32 account ID, for testing purposes only!
pub fn dummy_account_id() -> Signer {
    "cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng".to_string().into()
}

/// A second account, for transfers that need distinct parties.
pub fn dummy_receiver_id() -> Signer {
    "cosmos1lk9a7d8q6t4x3w9k2c5h0f8y7v6u5r4e3n2m1p".to_string().into()
}
