//! Defines the memo type, which represents the string that users can include
//! with a Fungible Token Transfer

use core::fmt::{self, Display};

use ibc_primitives::prelude::*;

/// Represents the token transfer memo
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memo(String);

impl AsRef<str> for Memo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Memo {
    fn from(memo: String) -> Self {
        Self(memo)
    }
}

impl From<&str> for Memo {
    fn from(memo: &str) -> Self {
        Self(memo.to_string())
    }
}
