//! Flattening of the container tree into report rows
//!
//! Produces an ordered list of [`FlatRow`]s, each pointing at a container
//! and carrying the indentation its display name should get. The tree itself
//! is never modified.

use std::cmp::Ordering;

use crate::models::{BalancesContainer, ContainerId, ContainerKind};

use super::balances::BalancesReport;

/// Spaces per indentation level
pub const INDENT_WIDTH: usize = 4;

/// How far containers are expanded when flattening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Only the given containers
    #[default]
    Off,
    /// Children of each group, without the group row itself
    Single,
    /// Every group while it has sub-groups, never accounts
    AllGroups,
    /// Every account below the given containers, never groups
    AllAccounts,
    /// Groups and accounts down to the given depth
    Depth(usize),
}

/// One flattened container reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow {
    pub id: ContainerId,
    pub indent: usize,
}

impl FlatRow {
    /// Display name of the row, indented
    pub fn display_name(&self, report: &BalancesReport) -> String {
        format!(
            "{}{}",
            " ".repeat(self.indent * INDENT_WIDTH),
            report[self.id].name()
        )
    }
}

/// Result of a flattening pass
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    pub rows: Vec<FlatRow>,
    /// Property keys seen on the emitted containers, in first-seen order
    pub property_keys: Vec<String>,
}

/// Report ordering: permanent first, nested first, by type, then by name
pub fn compare_containers(a: &BalancesContainer, b: &BalancesContainer) -> Ordering {
    b.is_permanent()
        .cmp(&a.is_permanent())
        .then_with(|| b.parent().is_some().cmp(&a.parent().is_some()))
        .then_with(|| a.account_type().ordinal().cmp(&b.account_type().ordinal()))
        .then_with(|| {
            a.normalized_name()
                .to_lowercase()
                .cmp(&b.normalized_name().to_lowercase())
        })
}

/// Flatten `roots` according to `expansion`
pub fn flatten(
    report: &BalancesReport,
    roots: &[ContainerId],
    expansion: Expansion,
    include_properties: bool,
) -> Flattened {
    let mut rows = Vec::new();
    match expansion {
        Expansion::Off => rows.extend(roots.iter().map(|id| FlatRow { id: *id, indent: 0 })),
        Expansion::AllAccounts => {
            let mut leaves = Vec::new();
            for root in roots {
                collect_accounts(report, *root, &mut leaves);
            }
            leaves.sort_by(|a, b| compare_containers(&report[*a], &report[*b]));
            rows.extend(leaves.into_iter().map(|id| FlatRow { id, indent: 0 }));
        }
        Expansion::AllGroups => {
            for root in roots {
                collect_groups(report, *root, 0, &mut rows);
            }
        }
        Expansion::Single => {
            for root in roots {
                if report[*root].is_from_group() {
                    collect_to_depth(report, *root, 0, 1, true, &mut rows);
                } else {
                    rows.push(FlatRow { id: *root, indent: 0 });
                }
            }
        }
        Expansion::Depth(max_depth) => {
            for root in roots {
                collect_to_depth(report, *root, 0, max_depth, false, &mut rows);
            }
        }
    }

    let property_keys = if include_properties {
        collect_property_keys(report, &rows)
    } else {
        Vec::new()
    };

    tracing::debug!(
        ?expansion,
        rows = rows.len(),
        properties = property_keys.len(),
        "flattened containers"
    );
    Flattened {
        rows,
        property_keys,
    }
}

fn sorted_children(report: &BalancesReport, id: ContainerId) -> Vec<ContainerId> {
    let mut children = report.children(id);
    children.sort_by(|a, b| compare_containers(&report[*a], &report[*b]));
    children
}

fn collect_accounts(report: &BalancesReport, id: ContainerId, out: &mut Vec<ContainerId>) {
    if report[id].is_from_account() {
        out.push(id);
        return;
    }
    for child in report.children(id) {
        collect_accounts(report, child, out);
    }
}

fn collect_groups(report: &BalancesReport, id: ContainerId, depth: usize, out: &mut Vec<FlatRow>) {
    let container = &report[id];
    if !container.is_from_group() {
        return;
    }
    out.push(FlatRow { id, indent: depth });
    if container.has_subgroups() {
        if let ContainerKind::Group(children) = container.kind() {
            for child in &children.subgroups {
                collect_groups(report, *child, depth + 1, out);
            }
        }
    }
}

fn collect_to_depth(
    report: &BalancesReport,
    id: ContainerId,
    depth: usize,
    max_depth: usize,
    skip_root: bool,
    out: &mut Vec<FlatRow>,
) {
    if depth > max_depth {
        return;
    }
    if !(skip_root && depth == 0) {
        let indent = if skip_root { depth - 1 } else { depth };
        out.push(FlatRow { id, indent });
    }
    for child in sorted_children(report, id) {
        collect_to_depth(report, child, depth + 1, max_depth, skip_root, out);
    }
}

fn collect_property_keys(report: &BalancesReport, rows: &[FlatRow]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        for key in report[row.id].properties().keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}
