use ibc_app_transfer::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use ibc_app_transfer::types::error::TokenTransferError;
use ibc_app_transfer::types::{Amount, Coin, Memo};
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;

use super::types::{Ledger, MockTokenContext};

fn debit(ledger: &Ledger, account: &str, coin: &Coin) -> Result<Amount, TokenTransferError> {
    let available = ledger
        .get(&(account.to_string(), coin.denom.clone()))
        .copied()
        .unwrap_or_default();

    available
        .checked_sub(coin.amount)
        .ok_or_else(|| TokenTransferError::InsufficientFunds {
            send_attempt: coin.to_string(),
            available_funds: format!("{available}{}", coin.denom),
        })
}

fn credit(ledger: &Ledger, account: &str, coin: &Coin) -> Result<Amount, TokenTransferError> {
    ledger
        .get(&(account.to_string(), coin.denom.clone()))
        .copied()
        .unwrap_or_default()
        .checked_add(coin.amount)
        .ok_or_else(|| TokenTransferError::Other(format!("balance overflow for {account}")))
}

impl MockTokenContext {
    /// Checks that `coin` can move from `from` to `to`, and moves it if
    /// `commit` is set.
    fn transfer(&self, from: &str, to: &str, coin: &Coin, commit: bool) -> Result<(), TokenTransferError> {
        let mut bank = self.bank.lock();
        let from_balance = debit(&bank.ledger, from, coin)?;
        let to_balance = credit(&bank.ledger, to, coin)?;

        if commit {
            bank.ledger
                .insert((from.to_string(), coin.denom.clone()), from_balance);
            bank.ledger
                .insert((to.to_string(), coin.denom.clone()), to_balance);
        }
        Ok(())
    }

    fn mint(&self, to: &str, coin: &Coin, commit: bool) -> Result<(), TokenTransferError> {
        let mut bank = self.bank.lock();
        let to_balance = credit(&bank.ledger, to, coin)?;

        if commit {
            bank.ledger
                .insert((to.to_string(), coin.denom.clone()), to_balance);
        }
        Ok(())
    }
}

impl TokenTransferValidationContext for MockTokenContext {
    type AccountId = Signer;

    fn get_port(&self) -> Result<PortId, TokenTransferError> {
        Ok(self.port_id.clone())
    }

    fn can_send_coins(&self) -> Result<(), TokenTransferError> {
        if self.bank.lock().send_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::SendDisabled {
                reason: "sending is turned off on this chain".to_string(),
            })
        }
    }

    fn can_receive_coins(&self) -> Result<(), TokenTransferError> {
        if self.bank.lock().receive_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::ReceiveDisabled {
                reason: "receiving is turned off on this chain".to_string(),
            })
        }
    }

    fn send_coins_validate(
        &self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
        _memo: &Memo,
    ) -> Result<(), TokenTransferError> {
        let escrow = Self::escrow_account(port_id, channel_id);
        self.transfer(from_account.as_ref(), &escrow, coin, false)
    }

    fn receive_coins_validate(
        &self,
        to_account: &Self::AccountId,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.mint(to_account.as_ref(), coin, false)
    }

    fn refund_coins_validate(
        &self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        let escrow = Self::escrow_account(port_id, channel_id);
        self.transfer(&escrow, to_account.as_ref(), coin, false)
    }
}

impl TokenTransferExecutionContext for MockTokenContext {
    fn send_coins_execute(
        &mut self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
        _memo: &Memo,
    ) -> Result<(), TokenTransferError> {
        let escrow = Self::escrow_account(port_id, channel_id);
        self.transfer(from_account.as_ref(), &escrow, coin, true)
    }

    fn receive_coins_execute(
        &mut self,
        to_account: &Self::AccountId,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        self.mint(to_account.as_ref(), coin, true)
    }

    fn refund_coins_execute(
        &mut self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &Coin,
    ) -> Result<(), TokenTransferError> {
        let escrow = Self::escrow_account(port_id, channel_id);
        self.transfer(&escrow, to_account.as_ref(), coin, true)
    }
}
