//! Engine configuration.
//!
//! Collects the policy constants of the task and workload services into one
//! serialisable value. Every field is optional in JSON and falls back to the
//! defaults used by the services themselves.

use crate::task::domain::{
    AssignmentPolicy, CapacityEnforcement, StatusUpdatePolicy, TaskPriority,
};
use crate::workload::domain::WorkloadPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON or has unknown fields.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The active-task cap is zero.
    #[error("active task cap must be at least 1")]
    ZeroActiveTaskCap,

    /// The medium threshold is not below the high threshold.
    #[error("medium threshold {medium} must be below high threshold {high}")]
    InvertedThresholds {
        /// Configured medium threshold.
        medium: u32,
        /// Configured high threshold.
        high: u32,
    },

    /// A priority weight is zero.
    #[error("weight for {0} priority must be positive")]
    ZeroWeight(TaskPriority),
}

/// Policy configuration for the assignment, lifecycle and workload services.
///
/// # Examples
///
/// ```
/// use foreman::config::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{"assignment": {"active_task_cap": 3}}"#)?;
/// assert_eq!(config.assignment.active_task_cap, 3);
/// assert_eq!(config.workload.high_threshold, 10);
/// # Ok::<(), foreman::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Task creation policy.
    pub assignment: AssignmentPolicy,
    /// Assignee status update policy.
    pub status_updates: StatusUpdatePolicy,
    /// Workload scoring policy.
    pub workload: WorkloadPolicy,
}

impl EngineConfig {
    /// Creates a configuration that reproduces the permissive behaviour of
    /// earlier deployments: check-then-act capacity counting and unchecked
    /// status updates.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            assignment: AssignmentPolicy {
                enforcement: CapacityEnforcement::Soft,
                ..AssignmentPolicy::default()
            },
            status_updates: StatusUpdatePolicy::Unrestricted,
            workload: WorkloadPolicy::default(),
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the validation
    /// variants described on [`EngineConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`EngineConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks the policy constants for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroActiveTaskCap`],
    /// [`ConfigError::InvertedThresholds`] or [`ConfigError::ZeroWeight`]
    /// when the corresponding constant is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assignment.active_task_cap == 0 {
            return Err(ConfigError::ZeroActiveTaskCap);
        }

        let WorkloadPolicy {
            weights,
            medium_threshold,
            high_threshold,
        } = self.workload;
        if medium_threshold >= high_threshold {
            return Err(ConfigError::InvertedThresholds {
                medium: medium_threshold,
                high: high_threshold,
            });
        }

        for priority in [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low] {
            if weights.weight(priority) == 0 {
                return Err(ConfigError::ZeroWeight(priority));
            }
        }
        Ok(())
    }
}
