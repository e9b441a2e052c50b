//! Balances containers
//!
//! A container is one node of the balance-aggregation tree: either an
//! account (leaf) or a group (branch). Both carry the same aggregate totals
//! and balance points; groups also list their children. Containers live in
//! the arena of a [`BalancesReport`](crate::reports::BalancesReport) and
//! refer to each other through [`ContainerId`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::account_type::AccountType;
use super::balance::BalancePoint;
use super::money::Money;
use super::payload::ContainerPayload;
use crate::config::BookSettings;
use crate::display::format_value;
use crate::error::BalancesResult;

/// Index of a container inside its report's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ContainerId(pub(crate) usize);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Aggregate period and cumulative amounts of a container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub cumulative_balance: Money,
    pub cumulative_credit: Money,
    pub cumulative_debit: Money,
    pub period_balance: Money,
    pub period_credit: Money,
    pub period_debit: Money,
}

impl Totals {
    fn from_payload(payload: &ContainerPayload) -> Self {
        Self {
            cumulative_balance: payload.cumulative_balance,
            cumulative_credit: payload.cumulative_credit,
            cumulative_debit: payload.cumulative_debit,
            period_balance: payload.period_balance,
            period_credit: payload.period_credit,
            period_debit: payload.period_debit,
        }
    }

    /// Add every field of `other`
    pub fn merge(&mut self, other: &Totals) -> BalancesResult<()> {
        self.cumulative_balance = self.cumulative_balance.plus(other.cumulative_balance)?;
        self.cumulative_credit = self.cumulative_credit.plus(other.cumulative_credit)?;
        self.cumulative_debit = self.cumulative_debit.plus(other.cumulative_debit)?;
        self.period_balance = self.period_balance.plus(other.period_balance)?;
        self.period_credit = self.period_credit.plus(other.period_credit)?;
        self.period_debit = self.period_debit.plus(other.period_debit)?;
        Ok(())
    }

    /// Subtract every field of `other`
    pub fn unmerge(&mut self, other: &Totals) -> BalancesResult<()> {
        self.cumulative_balance = self.cumulative_balance.minus(other.cumulative_balance)?;
        self.cumulative_credit = self.cumulative_credit.minus(other.cumulative_credit)?;
        self.cumulative_debit = self.cumulative_debit.minus(other.cumulative_debit)?;
        self.period_balance = self.period_balance.minus(other.period_balance)?;
        self.period_credit = self.period_credit.minus(other.period_credit)?;
        self.period_debit = self.period_debit.minus(other.period_debit)?;
        Ok(())
    }
}

/// Children of a group: sub-groups and direct accounts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupChildren {
    pub subgroups: Vec<ContainerId>,
    pub accounts: Vec<ContainerId>,
}

impl GroupChildren {
    /// Sub-groups first, then direct accounts
    pub fn all(&self) -> Vec<ContainerId> {
        self.subgroups
            .iter()
            .chain(self.accounts.iter())
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.subgroups.is_empty() && self.accounts.is_empty()
    }
}

/// Leaf or branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    Account,
    Group(GroupChildren),
}

/// One node of the balance-aggregation tree
#[derive(Debug, Clone)]
pub struct BalancesContainer {
    pub(crate) name: String,
    pub(crate) normalized_name: String,
    pub(crate) credit: bool,
    pub(crate) permanent: bool,
    pub(crate) account_type: AccountType,
    pub(crate) totals: Totals,
    pub(crate) balances: Vec<BalancePoint>,
    pub(crate) properties: BTreeMap<String, String>,
    pub(crate) parent: Option<ContainerId>,
    pub(crate) kind: ContainerKind,
}

impl BalancesContainer {
    /// Create a detached container from its payload, without children
    pub(crate) fn from_payload(payload: &ContainerPayload, kind: ContainerKind) -> Self {
        let normalized_name = payload
            .normalized_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| normalize_name(&payload.name));
        let mut balances = payload.balances.clone();
        balances.sort_by_key(|b| b.fuzzy_date);

        Self {
            name: payload.name.clone(),
            normalized_name,
            credit: payload.credit,
            permanent: payload.permanent,
            account_type: payload
                .account_type
                .unwrap_or_else(|| AccountType::from_flags(payload.credit, payload.permanent)),
            totals: Totals::from_payload(payload),
            balances,
            properties: payload.properties.clone(),
            parent: None,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    /// Whether this container has credit nature
    pub fn is_credit(&self) -> bool {
        self.credit
    }

    /// Whether balances carry over between periods
    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn is_from_account(&self) -> bool {
        matches!(self.kind, ContainerKind::Account)
    }

    pub fn is_from_group(&self) -> bool {
        matches!(self.kind, ContainerKind::Group(_))
    }

    pub fn kind(&self) -> &ContainerKind {
        &self.kind
    }

    /// Parent group, `None` for roots and detached accounts
    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    /// Whether this group currently aggregates at least one sub-group
    pub fn has_subgroups(&self) -> bool {
        match &self.kind {
            ContainerKind::Group(children) => !children.subgroups.is_empty(),
            ContainerKind::Account => false,
        }
    }

    /// Children ids, sub-groups first; always empty for accounts
    pub fn children(&self) -> Vec<ContainerId> {
        match &self.kind {
            ContainerKind::Group(children) => children.all(),
            ContainerKind::Account => Vec::new(),
        }
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Balance points in fuzzy-date order
    pub fn balances(&self) -> &[BalancePoint] {
        &self.balances
    }

    /// Custom properties
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// First non-empty property among `keys`
    pub fn property(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.properties.get(*key))
            .map(String::as_str)
            .find(|value| !value.trim().is_empty())
    }

    /// Apply the credit-nature sign convention to a raw amount
    pub fn representative(&self, raw: Money) -> Money {
        if self.credit {
            raw
        } else {
            -raw
        }
    }

    /// Cumulative balance, sign-adjusted for display
    pub fn cumulative_balance(&self) -> Money {
        self.representative(self.totals.cumulative_balance)
    }

    pub fn cumulative_balance_raw(&self) -> Money {
        self.totals.cumulative_balance
    }

    /// Period balance, sign-adjusted for display
    pub fn period_balance(&self) -> Money {
        self.representative(self.totals.period_balance)
    }

    pub fn period_balance_raw(&self) -> Money {
        self.totals.period_balance
    }

    pub fn cumulative_credit(&self) -> Money {
        self.totals.cumulative_credit
    }

    pub fn cumulative_debit(&self) -> Money {
        self.totals.cumulative_debit
    }

    pub fn period_credit(&self) -> Money {
        self.totals.period_credit
    }

    pub fn period_debit(&self) -> Money {
        self.totals.period_debit
    }

    pub fn cumulative_balance_text(&self, settings: &BookSettings) -> String {
        format_value(self.cumulative_balance(), settings)
    }

    pub fn cumulative_balance_raw_text(&self, settings: &BookSettings) -> String {
        format_value(self.cumulative_balance_raw(), settings)
    }

    pub fn period_balance_text(&self, settings: &BookSettings) -> String {
        format_value(self.period_balance(), settings)
    }

    pub fn period_balance_raw_text(&self, settings: &BookSettings) -> String {
        format_value(self.period_balance_raw(), settings)
    }

    /// Fold a leaf's totals and points into this container
    pub(crate) fn absorb(&mut self, totals: &Totals, points: &[BalancePoint]) -> BalancesResult<()> {
        self.totals.merge(totals)?;
        for point in points {
            match self
                .balances
                .iter_mut()
                .find(|b| b.fuzzy_date == point.fuzzy_date)
            {
                Some(existing) => existing.merge(point)?,
                None => self.insert_point(point.clone()),
            }
        }
        Ok(())
    }

    /// Take a leaf's totals and points back out of this container
    pub(crate) fn release(&mut self, totals: &Totals, points: &[BalancePoint]) -> BalancesResult<()> {
        self.totals.unmerge(totals)?;
        for point in points {
            match self
                .balances
                .iter_mut()
                .find(|b| b.fuzzy_date == point.fuzzy_date)
            {
                Some(existing) => existing.unmerge(point)?,
                None => self.insert_point(point.negated()),
            }
        }
        Ok(())
    }

    fn insert_point(&mut self, point: BalancePoint) {
        let position = self
            .balances
            .partition_point(|b| b.fuzzy_date < point.fuzzy_date);
        self.balances.insert(position, point);
    }
}

impl fmt::Display for BalancesContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Normalize a container name for lookups
///
/// Strips accents, lowercases, trims and turns whitespace runs into `_`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::new();
    let mut pending_separator = false;
    for ch in name.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('_');
        }
        pending_separator = false;
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(name: &str, credit: bool, cumulative: &str) -> BalancesContainer {
        let payload = ContainerPayload::new(name, credit, false)
            .with_cumulative_balance(Money::parse(cumulative).unwrap());
        BalancesContainer::from_payload(&payload, ContainerKind::Account)
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Cash  "), "cash");
        assert_eq!(normalize_name("Bank  Account"), "bank_account");
        assert_eq!(normalize_name("Alimentação"), "alimentacao");
    }

    #[test]
    fn test_debit_nature_is_negated() {
        let c = account("Expenses", false, "100.00");
        assert_eq!(c.cumulative_balance(), Money::from(dec!(-100.00)));
        assert_eq!(c.cumulative_balance_raw(), Money::from(dec!(100.00)));
    }

    #[test]
    fn test_credit_nature_keeps_sign() {
        let c = account("Income", true, "500.00");
        assert_eq!(c.cumulative_balance(), Money::from(dec!(500)));
        assert_eq!(c.period_balance(), Money::zero());
    }

    #[test]
    fn test_account_has_no_children() {
        let c = account("Cash", false, "1");
        assert!(c.children().is_empty());
        assert!(!c.has_subgroups());
        assert!(c.is_from_account());
    }

    #[test]
    fn test_normalized_name_from_payload_wins() {
        let mut payload = ContainerPayload::new("Cash Box", false, true);
        payload.normalized_name = Some("cash_box_1".into());
        let c = BalancesContainer::from_payload(&payload, ContainerKind::Account);
        assert_eq!(c.normalized_name(), "cash_box_1");
        assert_eq!(c.account_type(), AccountType::Asset);
    }

    #[test]
    fn test_property_lookup() {
        let payload = ContainerPayload::new("Cash", false, true)
            .with_property("code", "")
            .with_property("alt_code", "1.1");
        let c = BalancesContainer::from_payload(&payload, ContainerKind::Account);
        assert_eq!(c.property(&["code", "alt_code"]), Some("1.1"));
        assert_eq!(c.property(&["missing"]), None);
    }

    #[test]
    fn test_absorb_merges_by_fuzzy_date() {
        let mut group = account("Group", false, "10");
        let mut p1 = BalancePoint::new(2023, 1, 0);
        p1.cumulative_balance = Money::from(dec!(10));
        group.balances.push(p1.clone());

        let mut p2 = BalancePoint::new(2023, 2, 0);
        p2.cumulative_balance = Money::from(dec!(3));
        let leaf = account("Leaf", false, "5");
        group
            .absorb(&leaf.totals, &[p1.clone(), p2.clone()])
            .unwrap();

        assert_eq!(group.cumulative_balance_raw(), Money::from(dec!(15)));
        assert_eq!(group.balances().len(), 2);
        assert_eq!(group.balances()[0].cumulative_balance, Money::from(dec!(20)));
        assert_eq!(group.balances()[1].fuzzy_date, 20230200);

        group.release(&leaf.totals, &[p1, p2]).unwrap();
        assert_eq!(group.cumulative_balance_raw(), Money::from(dec!(10)));
        assert_eq!(group.balances()[0].cumulative_balance, Money::from(dec!(10)));
        assert_eq!(group.balances()[1].cumulative_balance, Money::zero());
    }
}
