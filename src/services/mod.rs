//! Service layer for balances-report
//!
//! The service layer sits between the balance query collaborator and the
//! report tree, turning fetched payloads into `BalancesReport`s.

pub mod balances;

pub use balances::{BalancesService, BalancesSource, InMemorySource, JsonFileSource};
