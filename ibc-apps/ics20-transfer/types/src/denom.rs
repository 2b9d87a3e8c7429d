//! Defines the token denomination type
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_primitives::prelude::*;

use crate::error::TokenTransferError;

/// A token denomination, as named by the chain that minted it.
///
/// The transfer module carries it verbatim; how a denomination maps to
/// escrowed or minted balances is up to the host.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Denom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TokenTransferError::EmptyBaseDenom);
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for Denom {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}
