//! Defines the host hooks the transfer module moves value through

use ibc_app_transfer_types::error::TokenTransferError;
use ibc_app_transfer_types::{Coin, Memo};
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::Signer;

/// Methods required in token transfer validation, to be implemented by the host
///
/// How a transfer is backed (escrow, burn, mint or a plain ledger entry) is
/// the host's business. The module only decides *when* value moves.
pub trait TokenTransferValidationContext {
    type AccountId: TryFrom<Signer>;

    /// get_port returns the portID for the transfer module.
    fn get_port(&self) -> Result<PortId, TokenTransferError>;

    /// Returns Ok() if the host chain supports sending coins.
    fn can_send_coins(&self) -> Result<(), TokenTransferError>;

    /// Returns Ok() if the host chain supports receiving coins.
    fn can_receive_coins(&self) -> Result<(), TokenTransferError>;

    /// Validates that `coin` can be taken from `from_account` for a transfer
    /// out over (`port_id`, `channel_id`).
    fn send_coins_validate(
        &self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
        memo: &Memo,
    ) -> Result<(), TokenTransferError>;

    /// Validates that `coin`, arriving over (`port_id`, `channel_id`), can be
    /// credited to `to_account`.
    fn receive_coins_validate(
        &self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    /// Validates that a failed transfer's `coin` can be returned to its sender.
    fn refund_coins_validate(
        &self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;
}

/// Methods required in token transfer execution, to be implemented by the host
pub trait TokenTransferExecutionContext: TokenTransferValidationContext {
    fn send_coins_execute(
        &mut self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
        memo: &Memo,
    ) -> Result<(), TokenTransferError>;

    fn receive_coins_execute(
        &mut self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;

    fn refund_coins_execute(
        &mut self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError>;
}
