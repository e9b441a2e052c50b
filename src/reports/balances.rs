//! Balances Report
//!
//! Holds the container tree parsed from one balance-query response. The
//! containers live in an arena owned by the report; parent and child links
//! are [`ContainerId`] indices into it.
//!
//! Every mutation bumps the report generation. Per-group name indexes record
//! the generation they were built at and are rebuilt lazily when stale.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Index;

use crate::config::BookSettings;
use crate::error::{BalancesError, BalancesResult};
use crate::models::{
    normalize_name, BalancePoint, BalancesContainer, BalancesPayload, ContainerId, ContainerKind,
    ContainerPayload, GroupChildren, Periodicity, Totals,
};

use super::table::BalancesTableBuilder;

/// Name index of one group's descendants
#[derive(Debug, Clone)]
struct NameIndex {
    generation: u64,
    names: HashMap<String, ContainerId>,
}

/// What a leaf contributes to the groups it is added to or removed from
#[derive(Debug, Clone)]
struct LeafSnapshot {
    id: ContainerId,
    name: String,
    totals: Totals,
    balances: Vec<BalancePoint>,
}

/// The root collection of containers of one query response
#[derive(Debug)]
pub struct BalancesReport {
    containers: Vec<BalancesContainer>,
    root_accounts: Vec<ContainerId>,
    root_groups: Vec<ContainerId>,
    periodicity: Periodicity,
    generation: u64,
    name_indexes: RefCell<HashMap<ContainerId, NameIndex>>,
}

impl BalancesReport {
    /// Build the container tree from a query payload
    pub fn from_payload(payload: &BalancesPayload) -> Self {
        let mut report = Self {
            containers: Vec::new(),
            root_accounts: Vec::new(),
            root_groups: Vec::new(),
            periodicity: payload.periodicity,
            generation: 0,
            name_indexes: RefCell::new(HashMap::new()),
        };

        for account in &payload.account_balances {
            let id = report.insert_account_node(account, None);
            report.root_accounts.push(id);
        }
        for group in &payload.group_balances {
            let id = report.insert_group_node(group, None);
            report.root_groups.push(id);
        }

        tracing::info!(
            accounts = report.root_accounts.len(),
            groups = report.root_groups.len(),
            containers = report.containers.len(),
            periodicity = %report.periodicity,
            "parsed balances report"
        );
        report
    }

    /// Parse a query payload from JSON text
    pub fn from_json(json: &str) -> BalancesResult<Self> {
        let payload = BalancesPayload::from_json(json)?;
        Ok(Self::from_payload(&payload))
    }

    fn push(&mut self, container: BalancesContainer) -> ContainerId {
        let id = ContainerId(self.containers.len());
        self.containers.push(container);
        id
    }

    fn insert_account_node(
        &mut self,
        payload: &ContainerPayload,
        parent: Option<ContainerId>,
    ) -> ContainerId {
        let mut container = BalancesContainer::from_payload(payload, ContainerKind::Account);
        container.parent = parent;
        self.push(container)
    }

    fn insert_group_node(
        &mut self,
        payload: &ContainerPayload,
        parent: Option<ContainerId>,
    ) -> ContainerId {
        let mut container = BalancesContainer::from_payload(
            payload,
            ContainerKind::Group(GroupChildren::default()),
        );
        container.parent = parent;
        let id = self.push(container);

        let subgroups: Vec<ContainerId> = payload
            .group_balances
            .iter()
            .map(|group| self.insert_group_node(group, Some(id)))
            .collect();
        let accounts: Vec<ContainerId> = payload
            .account_balances
            .iter()
            .map(|account| self.insert_account_node(account, Some(id)))
            .collect();

        self.containers[id.0].kind = ContainerKind::Group(GroupChildren {
            subgroups,
            accounts,
        });
        id
    }

    /// Place a detached account in the arena so it can be added to groups
    pub fn insert_account(&mut self, payload: &ContainerPayload) -> ContainerId {
        self.insert_account_node(payload, None)
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Current mutation generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get a container by id
    pub fn container(&self, id: ContainerId) -> Option<&BalancesContainer> {
        self.containers.get(id.0)
    }

    fn get(&self, id: ContainerId) -> BalancesResult<&BalancesContainer> {
        self.containers.get(id.0).ok_or_else(|| {
            BalancesError::InvalidArgument(format!("unknown container {}", id))
        })
    }

    /// Root containers: accounts first, then groups
    pub fn balances_containers(&self) -> Vec<ContainerId> {
        self.root_accounts
            .iter()
            .chain(self.root_groups.iter())
            .copied()
            .collect()
    }

    pub fn root_accounts(&self) -> &[ContainerId] {
        &self.root_accounts
    }

    pub fn root_groups(&self) -> &[ContainerId] {
        &self.root_groups
    }

    /// Find a root container by name
    ///
    /// Only roots are scanned, and a miss is `None` rather than an error.
    pub fn balances_container(&self, name: &str) -> Option<ContainerId> {
        let normalized = normalize_name(name);
        self.balances_containers()
            .into_iter()
            .find(|id| self[*id].normalized_name == normalized)
    }

    /// Whether exactly one root group is present
    pub fn has_only_one_group_container(&self) -> bool {
        self.root_groups.len() == 1
    }

    /// Children of a container, sub-groups first
    pub fn children(&self, id: ContainerId) -> Vec<ContainerId> {
        self[id].children()
    }

    /// Depth of a container, roots are at depth 0
    pub fn depth(&self, id: ContainerId) -> usize {
        let mut depth = 0;
        let mut current = self[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self[parent].parent;
        }
        depth
    }

    /// Look up a container by name starting at `id`
    ///
    /// An account matches only itself. A group searches all of its
    /// descendants and fails when it has no children at all.
    pub fn find_in(&self, id: ContainerId, name: &str) -> BalancesResult<ContainerId> {
        let container = self.get(id)?;
        let normalized = normalize_name(name);

        let children = match &container.kind {
            ContainerKind::Account => {
                return if container.normalized_name == normalized {
                    Ok(id)
                } else {
                    Err(BalancesError::container_not_found(name, &container.name))
                };
            }
            ContainerKind::Group(children) => children,
        };

        if children.is_empty() {
            return Err(BalancesError::container_not_found(name, &container.name));
        }

        let mut indexes = self.name_indexes.borrow_mut();
        let stale = indexes
            .get(&id)
            .map_or(true, |index| index.generation != self.generation);
        if stale {
            let mut names = HashMap::new();
            self.index_descendants(id, &mut names);
            tracing::debug!(
                group = %container.name,
                entries = names.len(),
                generation = self.generation,
                "rebuilt group name index"
            );
            indexes.insert(
                id,
                NameIndex {
                    generation: self.generation,
                    names,
                },
            );
        }

        indexes
            .get(&id)
            .and_then(|index| index.names.get(&normalized).copied())
            .ok_or_else(|| BalancesError::container_not_found(name, &container.name))
    }

    /// Pre-order walk, the first container seen under a name wins
    fn index_descendants(&self, id: ContainerId, names: &mut HashMap<String, ContainerId>) {
        for child in self[id].children() {
            names
                .entry(self[child].normalized_name.clone())
                .or_insert(child);
            if self[child].is_from_group() {
                self.index_descendants(child, names);
            }
        }
    }

    /// Add an account's balances to a group and to all of its ancestors
    ///
    /// Adding an account whose name is already a direct child of a group
    /// without sub-groups is a no-op for that group and all of its ancestors.
    ///
    /// A failure partway up the ancestor chain leaves the levels below it
    /// already mutated; the report should be discarded in that case.
    pub fn add_balances_container(
        &mut self,
        group: ContainerId,
        account: ContainerId,
    ) -> BalancesResult<()> {
        let leaf = self.leaf_snapshot(group, account)?;
        let result = self.propagate_add(group, &leaf);
        self.generation += 1;
        result
    }

    /// Remove an account's balances from a group and from all of its ancestors
    ///
    /// Same failure semantics as [`add_balances_container`](Self::add_balances_container).
    pub fn remove_balances_container(
        &mut self,
        group: ContainerId,
        account: ContainerId,
    ) -> BalancesResult<()> {
        let leaf = self.leaf_snapshot(group, account)?;
        let result = self.propagate_remove(group, &leaf);
        self.generation += 1;
        result
    }

    fn leaf_snapshot(&self, group: ContainerId, account: ContainerId) -> BalancesResult<LeafSnapshot> {
        let target = self.get(group)?;
        if target.is_from_account() {
            return Err(BalancesError::container_must_be_from_group(&target.name));
        }
        let leaf = self.get(account)?;
        if leaf.is_from_group() {
            return Err(BalancesError::container_must_be_from_account(&leaf.name));
        }
        Ok(LeafSnapshot {
            id: account,
            name: leaf.name.clone(),
            totals: leaf.totals.clone(),
            balances: leaf.balances.clone(),
        })
    }

    fn direct_account_position(&self, group: ContainerId, name: &str) -> Option<usize> {
        match &self[group].kind {
            ContainerKind::Group(children) => children
                .accounts
                .iter()
                .position(|id| self[*id].name == name),
            ContainerKind::Account => None,
        }
    }

    fn propagate_add(&mut self, group: ContainerId, leaf: &LeafSnapshot) -> BalancesResult<()> {
        let has_subgroups = self[group].has_subgroups();
        let eligible = has_subgroups || self.direct_account_position(group, &leaf.name).is_none();
        if !eligible {
            tracing::debug!(
                group = %self[group].name,
                account = %leaf.name,
                "account already present, skipping add"
            );
            return Ok(());
        }

        self.containers[group.0].absorb(&leaf.totals, &leaf.balances)?;

        if !has_subgroups {
            let child = self.attach(group, leaf.id);
            let credit = self[group].credit;
            self.containers[child.0].credit = credit;
            if let ContainerKind::Group(children) = &mut self.containers[group.0].kind {
                children.accounts.push(child);
            }
        }

        tracing::debug!(
            group = %self[group].name,
            account = %leaf.name,
            "added account balances"
        );

        match self[group].parent {
            Some(parent) => self.propagate_add(parent, leaf),
            None => Ok(()),
        }
    }

    fn propagate_remove(&mut self, group: ContainerId, leaf: &LeafSnapshot) -> BalancesResult<()> {
        let has_subgroups = self[group].has_subgroups();
        let position = if has_subgroups {
            None
        } else {
            self.direct_account_position(group, &leaf.name)
        };
        if !has_subgroups && position.is_none() {
            tracing::debug!(
                group = %self[group].name,
                account = %leaf.name,
                "account not present, skipping remove"
            );
            return Ok(());
        }

        self.containers[group.0].release(&leaf.totals, &leaf.balances)?;

        if let Some(position) = position {
            if let ContainerKind::Group(children) = &mut self.containers[group.0].kind {
                let removed = children.accounts.remove(position);
                self.containers[removed.0].parent = None;
            }
        }

        tracing::debug!(
            group = %self[group].name,
            account = %leaf.name,
            "removed account balances"
        );

        match self[group].parent {
            Some(parent) => self.propagate_remove(parent, leaf),
            None => Ok(()),
        }
    }

    /// Give the leaf a place under `group`, copying it if it already lives elsewhere
    fn attach(&mut self, group: ContainerId, account: ContainerId) -> ContainerId {
        let is_root = self.root_accounts.contains(&account);
        if self[account].parent.is_none() && !is_root {
            self.containers[account.0].parent = Some(group);
            return account;
        }
        let mut copy = self[account].clone();
        copy.parent = Some(group);
        self.push(copy)
    }

    /// Start a table over every root container
    pub fn create_table<'a>(&'a self, settings: &'a BookSettings) -> BalancesTableBuilder<'a> {
        BalancesTableBuilder::new(self, self.balances_containers(), settings)
    }

    /// Start a table over a single container
    pub fn create_container_table<'a>(
        &'a self,
        id: ContainerId,
        settings: &'a BookSettings,
    ) -> BalancesTableBuilder<'a> {
        BalancesTableBuilder::new(self, vec![id], settings)
    }
}

impl Index<ContainerId> for BalancesReport {
    type Output = BalancesContainer;

    fn index(&self, id: ContainerId) -> &Self::Output {
        &self.containers[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn point(year: i32, month: u32, cumulative: &str, period: &str) -> BalancePoint {
        let mut p = BalancePoint::new(year, month, 0);
        p.cumulative_balance = money(cumulative);
        p.period_balance = money(period);
        p
    }

    fn leaf(name: &str, cumulative: &str) -> ContainerPayload {
        ContainerPayload::new(name, false, false)
            .with_cumulative_balance(money(cumulative))
            .with_period_balance(money(cumulative))
    }

    /// Expenses(debit) -> [Food 100, Rent 50] with monthly points
    fn expenses_report() -> BalancesReport {
        let food = leaf("Food", "100.00")
            .with_point(point(2023, 1, "60.00", "60.00"))
            .with_point(point(2023, 2, "100.00", "40.00"));
        let rent = leaf("Rent", "50.00")
            .with_point(point(2023, 1, "50.00", "50.00"))
            .with_point(point(2023, 2, "50.00", "0.00"));
        let mut expenses = ContainerPayload::new("Expenses", false, false)
            .with_cumulative_balance(money("150.00"))
            .with_period_balance(money("150.00"))
            .with_point(point(2023, 1, "110.00", "110.00"))
            .with_point(point(2023, 2, "150.00", "40.00"))
            .with_account(food)
            .with_account(rent);
        expenses.normalized_name = Some("expenses".into());

        BalancesReport::from_payload(&BalancesPayload {
            account_balances: vec![leaf("Cash", "10.00")],
            group_balances: vec![expenses],
            periodicity: Periodicity::Monthly,
        })
    }

    /// Root -> Mid -> Deep -> Salary
    fn nested_report() -> BalancesReport {
        let salary = ContainerPayload::new("Salary", true, false)
            .with_cumulative_balance(money("1000"))
            .with_point(point(2023, 1, "1000", "1000"));
        let deep = ContainerPayload::new("Deep", true, false)
            .with_cumulative_balance(money("1000"))
            .with_point(point(2023, 1, "1000", "1000"))
            .with_account(salary);
        let mid = ContainerPayload::new("Mid", true, false)
            .with_cumulative_balance(money("1000"))
            .with_point(point(2023, 1, "1000", "1000"))
            .with_group(deep);
        let root = ContainerPayload::new("Root", true, false)
            .with_cumulative_balance(money("1000"))
            .with_point(point(2023, 1, "1000", "1000"))
            .with_group(mid);

        BalancesReport::from_payload(&BalancesPayload {
            account_balances: vec![],
            group_balances: vec![root],
            periodicity: Periodicity::Monthly,
        })
    }

    fn assert_rollup(report: &BalancesReport, group: ContainerId) {
        let children = report.children(group);
        let c = &report[group];
        let sum = |f: fn(&BalancesContainer) -> Money| -> Money {
            children.iter().map(|id| f(&report[*id])).sum()
        };
        assert_eq!(c.cumulative_balance_raw(), sum(|c| c.cumulative_balance_raw()));
        assert_eq!(c.period_balance_raw(), sum(|c| c.period_balance_raw()));
        assert_eq!(c.cumulative_credit(), sum(|c| c.cumulative_credit()));
        assert_eq!(c.cumulative_debit(), sum(|c| c.cumulative_debit()));
        assert_eq!(c.period_credit(), sum(|c| c.period_credit()));
        assert_eq!(c.period_debit(), sum(|c| c.period_debit()));

        let fields: [(&str, fn(&BalancePoint) -> Money); 6] = [
            ("cumulative_balance", |p| p.cumulative_balance),
            ("period_balance", |p| p.period_balance),
            ("cumulative_credit", |p| p.cumulative_credit),
            ("cumulative_debit", |p| p.cumulative_debit),
            ("period_credit", |p| p.period_credit),
            ("period_debit", |p| p.period_debit),
        ];
        for bucket in c.balances() {
            for (field, get) in fields {
                let expected: Money = children
                    .iter()
                    .flat_map(|id| report[*id].balances())
                    .filter(|p| p.fuzzy_date == bucket.fuzzy_date)
                    .map(get)
                    .sum();
                assert_eq!(get(bucket), expected, "{} of bucket {}", field, bucket.fuzzy_date);
            }
        }
        for child in children {
            if report[child].is_from_group() {
                assert_rollup(report, child);
            }
        }
    }

    #[test]
    fn test_parse_tree() {
        let report = expenses_report();
        assert_eq!(report.root_accounts().len(), 1);
        assert_eq!(report.root_groups().len(), 1);
        assert!(report.has_only_one_group_container());

        let expenses = report.root_groups()[0];
        assert_eq!(report.depth(expenses), 0);
        let children = report.children(expenses);
        assert_eq!(children.len(), 2);
        assert_eq!(report.depth(children[0]), 1);
        assert_eq!(report[children[0]].parent(), Some(expenses));
        assert_rollup(&report, expenses);
    }

    #[test]
    fn test_roots_accounts_then_groups() {
        let report = expenses_report();
        let roots = report.balances_containers();
        assert_eq!(report[roots[0]].name(), "Cash");
        assert_eq!(report[roots[1]].name(), "Expenses");
    }

    #[test]
    fn test_report_lookup_scans_roots_only() {
        let report = expenses_report();
        assert!(report.balances_container("EXPENSES").is_some());
        assert!(report.balances_container("cash").is_some());
        // Food is nested, the report-level lookup does not descend
        assert!(report.balances_container("Food").is_none());
    }

    #[test]
    fn test_group_lookup_is_recursive() {
        let report = nested_report();
        let root = report.root_groups()[0];
        let salary = report.find_in(root, "salary").unwrap();
        assert_eq!(report[salary].name(), "Salary");
        assert_eq!(report.depth(salary), 3);
        let mid = report.find_in(root, "Mid").unwrap();
        assert_eq!(report[mid].name(), "Mid");
    }

    #[test]
    fn test_group_lookup_failure_names_query_and_group() {
        let report = expenses_report();
        let expenses = report.root_groups()[0];
        let err = report.find_in(expenses, "Nonexistent").unwrap_err();
        assert!(err.is_not_found());
        let message = err.to_string();
        assert!(message.contains("Nonexistent"));
        assert!(message.contains("Expenses"));
    }

    #[test]
    fn test_empty_group_lookup_fails() {
        let report = BalancesReport::from_payload(&BalancesPayload {
            group_balances: vec![ContainerPayload::new("Empty", false, false)],
            ..BalancesPayload::default()
        });
        let empty = report.root_groups()[0];
        assert!(report.find_in(empty, "anything").unwrap_err().is_not_found());
    }

    #[test]
    fn test_account_lookup_matches_itself() {
        let report = expenses_report();
        let cash = report.root_accounts()[0];
        assert_eq!(report.find_in(cash, " CASH ").unwrap(), cash);
        assert!(report.find_in(cash, "Food").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_to_flat_group() {
        let mut report = expenses_report();
        let expenses = report.root_groups()[0];
        let travel = report.insert_account(&leaf("Travel", "25.00"));

        report.add_balances_container(expenses, travel).unwrap();

        assert_eq!(report[expenses].cumulative_balance_raw(), money("175.00"));
        assert_eq!(report.children(expenses).len(), 3);
        assert_eq!(report[travel].parent(), Some(expenses));
        assert_rollup(&report, expenses);
    }

    #[test]
    fn test_add_forces_group_credit_nature() {
        let mut report = expenses_report();
        let expenses = report.root_groups()[0];
        let mut payload = leaf("Refunds", "5");
        payload.credit = true;
        let refunds = report.insert_account(&payload);

        report.add_balances_container(expenses, refunds).unwrap();
        assert!(!report[refunds].is_credit());
    }

    #[test]
    fn test_add_duplicate_name_is_ignored() {
        let mut report = expenses_report();
        let expenses = report.root_groups()[0];
        let dup = report.insert_account(&leaf("Food", "999"));

        report.add_balances_container(expenses, dup).unwrap();
        assert_eq!(report[expenses].cumulative_balance_raw(), money("150.00"));
        assert_eq!(report.children(expenses).len(), 2);
    }

    #[test]
    fn test_add_then_remove_restores_totals() {
        let mut report = expenses_report();
        let expenses = report.root_groups()[0];
        let before_totals = report[expenses].totals().clone();
        let before_points = report[expenses].balances().to_vec();

        let travel = report.insert_account(
            &leaf("Travel", "25.00").with_point(point(2023, 2, "25.00", "25.00")),
        );
        report.add_balances_container(expenses, travel).unwrap();
        assert_eq!(report[expenses].balances()[1].cumulative_balance, money("175.00"));

        report.remove_balances_container(expenses, travel).unwrap();
        assert_eq!(report[expenses].totals(), &before_totals);
        assert_eq!(report[expenses].balances(), before_points.as_slice());
        assert_eq!(report.children(expenses).len(), 2);
        assert_eq!(report[travel].parent(), None);
    }

    #[test]
    fn test_add_propagates_to_ancestors() {
        let mut report = nested_report();
        let root = report.root_groups()[0];
        let deep = report.find_in(root, "Deep").unwrap();
        let bonus = report.insert_account(
            &ContainerPayload::new("Bonus", true, false)
                .with_cumulative_balance(money("200"))
                .with_point(point(2023, 1, "200", "200"))
                .with_point(point(2023, 2, "200", "0")),
        );

        report.add_balances_container(deep, bonus).unwrap();

        for name in ["Deep", "Mid"] {
            let id = report.find_in(root, name).unwrap();
            assert_eq!(report[id].cumulative_balance_raw(), money("1200"), "{}", name);
        }
        assert_eq!(report[root].cumulative_balance_raw(), money("1200"));
        assert_eq!(report[root].balances().len(), 2);
        assert_rollup(&report, root);

        // The new account is reachable through the rebuilt index
        assert_eq!(report.find_in(root, "bonus").unwrap(), bonus);
    }

    #[test]
    fn test_add_and_remove_on_group_with_subgroups() {
        let mut report = nested_report();
        let root = report.root_groups()[0];
        let mid = report.find_in(root, "Mid").unwrap();
        let mut payload = ContainerPayload::new("Tips", false, false)
            .with_cumulative_balance(money("15"))
            .with_point(point(2023, 1, "15", "15"));
        payload.period_debit = money("15");
        let tips = report.insert_account(&payload);

        report.add_balances_container(root, tips).unwrap();

        // absorbed into the totals without becoming a child
        assert_eq!(report[root].cumulative_balance_raw(), money("1015"));
        assert_eq!(report[root].period_debit(), money("15"));
        assert_eq!(report[root].balances()[0].cumulative_balance, money("1015"));
        assert_eq!(report.children(root), vec![mid]);
        assert_eq!(report[mid].cumulative_balance_raw(), money("1000"));
        assert!(!report[tips].is_credit());
        assert_eq!(report[tips].parent(), None);
        assert_rollup(&report, mid);

        report.remove_balances_container(root, tips).unwrap();
        assert_eq!(report[root].cumulative_balance_raw(), money("1000"));
        assert_eq!(report[root].period_debit(), Money::zero());
        assert_eq!(report[root].balances()[0].cumulative_balance, money("1000"));
        assert_eq!(report.children(root), vec![mid]);
        assert_rollup(&report, root);
    }

    #[test]
    fn test_duplicate_add_leaves_ancestors_untouched() {
        let mut report = nested_report();
        let root = report.root_groups()[0];
        let deep = report.find_in(root, "Deep").unwrap();
        let dup = report.insert_account(
            &ContainerPayload::new("Salary", true, false).with_cumulative_balance(money("5")),
        );

        report.add_balances_container(deep, dup).unwrap();
        assert_eq!(report[deep].cumulative_balance_raw(), money("1000"));
        assert_eq!(report[root].cumulative_balance_raw(), money("1000"));
        assert_rollup(&report, root);
    }

    #[test]
    fn test_remove_propagates_to_ancestors() {
        let mut report = nested_report();
        let root = report.root_groups()[0];
        let deep = report.find_in(root, "Deep").unwrap();
        let salary = report.find_in(root, "Salary").unwrap();

        report.remove_balances_container(deep, salary).unwrap();

        assert_eq!(report[root].cumulative_balance_raw(), Money::zero());
        assert!(report.children(deep).is_empty());
        assert_rollup(&report, root);
        assert!(report.find_in(root, "Salary").unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_absent_account_is_ignored() {
        let mut report = expenses_report();
        let expenses = report.root_groups()[0];
        let ghost = report.insert_account(&leaf("Ghost", "5"));

        report.remove_balances_container(expenses, ghost).unwrap();
        assert_eq!(report[expenses].cumulative_balance_raw(), money("150.00"));
    }

    #[test]
    fn test_add_root_account_copies_it() {
        let mut report = expenses_report();
        let expenses = report.root_groups()[0];
        let cash = report.root_accounts()[0];

        report.add_balances_container(expenses, cash).unwrap();

        assert_eq!(report[cash].parent(), None);
        let copy = report.find_in(expenses, "Cash").unwrap();
        assert_ne!(copy, cash);
        assert_eq!(report[copy].parent(), Some(expenses));
        assert_eq!(report[expenses].cumulative_balance_raw(), money("160.00"));
    }

    #[test]
    fn test_add_group_is_invalid_argument() {
        let mut report = nested_report();
        let root = report.root_groups()[0];
        let mid = report.find_in(root, "Mid").unwrap();
        let err = report.add_balances_container(root, mid).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_add_into_account_is_invalid_argument() {
        let mut report = expenses_report();
        let cash = report.root_accounts()[0];
        let other = report.insert_account(&leaf("Other", "1"));
        let err = report.add_balances_container(cash, other).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("container must be from group"));
        let err = report.remove_balances_container(cash, other).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_mutation_bumps_generation() {
        let mut report = expenses_report();
        let expenses = report.root_groups()[0];
        assert_eq!(report.generation(), 0);
        let travel = report.insert_account(&leaf("Travel", "1"));
        report.add_balances_container(expenses, travel).unwrap();
        assert_eq!(report.generation(), 1);
    }

    #[test]
    fn test_representative_sign_on_groups() {
        let report = expenses_report();
        let expenses = report.root_groups()[0];
        assert_eq!(report[expenses].cumulative_balance(), Money::from(dec!(-150)));
    }

    #[test]
    fn test_from_json() {
        let report = BalancesReport::from_json(
            r#"{"periodicity":"YEARLY","accountBalances":[{"name":"Cash","cumulativeBalance":"1.5"}]}"#,
        )
        .unwrap();
        assert_eq!(report.periodicity(), Periodicity::Yearly);
        let cash = report.balances_container("cash").unwrap();
        assert_eq!(report[cash].cumulative_balance_raw(), money("1.5"));
    }
}
