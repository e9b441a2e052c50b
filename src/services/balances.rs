//! Balances service
//!
//! Fetches balance query results from a `BalancesSource` and builds
//! reports from them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BalancesError, BalancesResult};
use crate::models::BalancesPayload;
use crate::reports::BalancesReport;

/// Anything that answers a balances query with a payload
pub trait BalancesSource {
    fn fetch_balances(&self, query: &str) -> BalancesResult<BalancesPayload>;
}

/// Source reading payload files, the query being a path relative to a base directory
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    base_dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a query to the payload file it names
    pub fn resolve(&self, query: &str) -> PathBuf {
        let path = Path::new(query);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl BalancesSource for JsonFileSource {
    fn fetch_balances(&self, query: &str) -> BalancesResult<BalancesPayload> {
        let path = self.resolve(query);
        tracing::debug!(path = %path.display(), "reading balances payload");
        let contents = fs::read_to_string(&path)
            .map_err(|e| BalancesError::Io(format!("{}: {}", path.display(), e)))?;
        BalancesPayload::from_json(&contents)
    }
}

/// Source answering every query with the same payload
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    payload: BalancesPayload,
}

impl InMemorySource {
    pub fn new(payload: BalancesPayload) -> Self {
        Self { payload }
    }
}

impl BalancesSource for InMemorySource {
    fn fetch_balances(&self, _query: &str) -> BalancesResult<BalancesPayload> {
        Ok(self.payload.clone())
    }
}

/// Service for building balances reports
pub struct BalancesService<S: BalancesSource> {
    source: S,
}

impl<S: BalancesSource> BalancesService<S> {
    /// Create a new balances service
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run a query and build its report
    pub fn report(&self, query: &str) -> BalancesResult<BalancesReport> {
        let payload = self.source.fetch_balances(query)?;
        Ok(BalancesReport::from_payload(&payload))
    }
}
