//! Core data models for balances-report
//!
//! This module contains the data structures of the balance-aggregation
//! domain: decimal amounts, balance points, containers and the raw payload
//! they are parsed from.

pub mod account_type;
pub mod balance;
pub mod container;
pub mod money;
pub mod payload;
pub mod periodicity;

pub use account_type::AccountType;
pub use balance::BalancePoint;
pub use container::{
    normalize_name, BalancesContainer, ContainerId, ContainerKind, GroupChildren, Totals,
};
pub use money::{Money, ToMoney};
pub use payload::{BalancesPayload, ContainerPayload};
pub use periodicity::Periodicity;
