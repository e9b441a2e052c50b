//! Time granularity of a balance query

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bucket size of the balance points returned by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Periodicity {
    Daily,
    /// Monthly buckets (default)
    #[default]
    Monthly,
    Yearly,
}

impl Periodicity {
    /// Default strftime pattern for dates at this granularity
    pub fn date_pattern(&self) -> &'static str {
        match self {
            Self::Daily => "%Y-%m-%d",
            Self::Monthly => "%Y-%m",
            Self::Yearly => "%Y",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "DAILY"),
            Self::Monthly => write!(f, "MONTHLY"),
            Self::Yearly => write!(f, "YEARLY"),
        }
    }
}
