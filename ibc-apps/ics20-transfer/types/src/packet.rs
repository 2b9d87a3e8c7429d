//! Contains the `PacketData` type that defines the structure of token transfers' packet bytes
//!
//! On the wire the packet data is the ICS-20 JSON object
//! `{"denom":..,"amount":..,"sender":..,"receiver":..,"memo":..}`. The core
//! never looks inside it; [`PacketData::encode`] and [`PacketData::decode`]
//! are the only way in and out.

use core::str::FromStr;

use ibc_primitives::prelude::*;
use ibc_primitives::Signer;
use serde::{Deserialize, Serialize};

use super::error::TokenTransferError;
use super::{Amount, Coin, Denom, Memo};

/// Defines the structure of token transfers' packet bytes
#[derive(Serialize, Deserialize)]
#[serde(try_from = "RawPacketData", into = "RawPacketData")]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketData {
    pub token: Coin,
    pub sender: Signer,
    pub receiver: Signer,
    pub memo: Memo,
}

impl PacketData {
    pub fn encode(&self) -> Vec<u8> {
        // Serializing plain strings into a Vec cannot fail.
        serde_json::to_vec(&RawPacketData::from(self.clone())).unwrap_or_default()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TokenTransferError> {
        serde_json::from_slice(bytes).map_err(|_| TokenTransferError::PacketDataDeserialization)
    }
}

#[derive(Serialize, Deserialize)]
struct RawPacketData {
    denom: String,
    amount: String,
    sender: String,
    receiver: String,
    #[serde(default)]
    memo: String,
}

impl TryFrom<RawPacketData> for PacketData {
    type Error = TokenTransferError;

    fn try_from(raw_pkt_data: RawPacketData) -> Result<Self, Self::Error> {
        let denom = Denom::from_str(&raw_pkt_data.denom)?;
        let amount = Amount::from_str(&raw_pkt_data.amount)?;
        if amount.is_zero() {
            return Err(TokenTransferError::ZeroAmount);
        }
        if raw_pkt_data.sender.is_empty() || raw_pkt_data.receiver.is_empty() {
            return Err(TokenTransferError::ParseAccountFailure);
        }
        Ok(Self {
            token: Coin { denom, amount },
            sender: raw_pkt_data.sender.into(),
            receiver: raw_pkt_data.receiver.into(),
            memo: raw_pkt_data.memo.into(),
        })
    }
}

impl From<PacketData> for RawPacketData {
    fn from(pkt_data: PacketData) -> Self {
        Self {
            denom: pkt_data.token.denom.to_string(),
            amount: pkt_data.token.amount.to_string(),
            sender: pkt_data.sender.to_string(),
            receiver: pkt_data.receiver.to_string(),
            memo: pkt_data.memo.to_string(),
        }
    }
}
