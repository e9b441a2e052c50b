//! Accounting type of a balances container

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of ledger account, ordered the way reports list them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Permanent, debit nature
    Asset,
    /// Permanent, credit nature
    Liability,
    /// Flow, credit nature
    Incoming,
    /// Flow, debit nature
    Outgoing,
}

impl AccountType {
    /// Derive the type from the credit-nature and permanence flags
    pub fn from_flags(credit: bool, permanent: bool) -> Self {
        match (permanent, credit) {
            (true, false) => Self::Asset,
            (true, true) => Self::Liability,
            (false, true) => Self::Incoming,
            (false, false) => Self::Outgoing,
        }
    }

    /// Position used when sorting containers
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Asset => 0,
            Self::Liability => 1,
            Self::Incoming => 2,
            Self::Outgoing => 3,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset => write!(f, "Asset"),
            Self::Liability => write!(f, "Liability"),
            Self::Incoming => write!(f, "Incoming"),
            Self::Outgoing => write!(f, "Outgoing"),
        }
    }
}
