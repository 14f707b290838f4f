//! Coarse workload classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workload band derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WorkloadLevel {
    /// Score below the medium threshold.
    Low,
    /// Score from the medium threshold up to, but excluding, the high
    /// threshold.
    Medium,
    /// Score at or above the high threshold.
    High,
}

impl WorkloadLevel {
    /// Returns the display label reported to callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for WorkloadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
