//! Raw balance-query payload
//!
//! Mirrors the JSON document returned by the balance-query service. Monetary
//! fields arrive as decimal strings and are parsed straight into `Money`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::account_type::AccountType;
use super::balance::BalancePoint;
use super::money::Money;
use super::periodicity::Periodicity;

/// One response of the balance-query service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesPayload {
    #[serde(default)]
    pub account_balances: Vec<ContainerPayload>,

    #[serde(default)]
    pub group_balances: Vec<ContainerPayload>,

    #[serde(default)]
    pub periodicity: Periodicity,
}

/// Balances of one account or group, groups also nesting their children
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPayload {
    pub name: String,

    /// Service-normalized name, recomputed locally when absent
    #[serde(default)]
    pub normalized_name: Option<String>,

    #[serde(default)]
    pub credit: bool,

    #[serde(default)]
    pub permanent: bool,

    #[serde(default, rename = "type")]
    pub account_type: Option<AccountType>,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub cumulative_balance: Money,

    #[serde(default)]
    pub cumulative_credit: Money,

    #[serde(default)]
    pub cumulative_debit: Money,

    #[serde(default)]
    pub period_balance: Money,

    #[serde(default)]
    pub period_credit: Money,

    #[serde(default)]
    pub period_debit: Money,

    #[serde(default)]
    pub balances: Vec<BalancePoint>,

    #[serde(default)]
    pub account_balances: Vec<ContainerPayload>,

    #[serde(default)]
    pub group_balances: Vec<ContainerPayload>,
}

impl BalancesPayload {
    /// Parse a payload from JSON text
    pub fn from_json(json: &str) -> crate::error::BalancesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ContainerPayload {
    /// Create a payload with only a name and flags, handy for building trees by hand
    pub fn new(name: impl Into<String>, credit: bool, permanent: bool) -> Self {
        Self {
            name: name.into(),
            credit,
            permanent,
            ..Self::default()
        }
    }

    /// Set the raw cumulative balance
    pub fn with_cumulative_balance(mut self, balance: Money) -> Self {
        self.cumulative_balance = balance;
        self
    }

    /// Set the raw period balance
    pub fn with_period_balance(mut self, balance: Money) -> Self {
        self.period_balance = balance;
        self
    }

    /// Append a balance point
    pub fn with_point(mut self, point: BalancePoint) -> Self {
        self.balances.push(point);
        self
    }

    /// Set a custom property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Append a direct account child
    pub fn with_account(mut self, account: ContainerPayload) -> Self {
        self.account_balances.push(account);
        self
    }

    /// Append a sub-group child
    pub fn with_group(mut self, group: ContainerPayload) -> Self {
        self.group_balances.push(group);
        self
    }
}
