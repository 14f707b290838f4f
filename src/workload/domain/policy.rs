//! Priority weights and level thresholds.

use super::{WorkloadLevel, WorkloadReport};
use crate::task::domain::{Task, TaskPriority};
use serde::{Deserialize, Serialize};

/// Default score at which the workload becomes [`WorkloadLevel::Medium`].
pub const DEFAULT_MEDIUM_THRESHOLD: u32 = 5;

/// Default score at which the workload becomes [`WorkloadLevel::High`].
pub const DEFAULT_HIGH_THRESHOLD: u32 = 10;

/// Score contributed by one active task of each priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    /// Weight of a high-priority task.
    pub high: u32,
    /// Weight of a medium-priority task.
    pub medium: u32,
    /// Weight of a low-priority task.
    pub low: u32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            high: 3,
            medium: 2,
            low: 1,
        }
    }
}

impl PriorityWeights {
    /// Returns the weight for `priority`.
    #[must_use]
    pub const fn weight(&self, priority: TaskPriority) -> u32 {
        match priority {
            TaskPriority::High => self.high,
            TaskPriority::Medium => self.medium,
            TaskPriority::Low => self.low,
        }
    }
}

/// Scoring policy applied by the workload service.
///
/// # Examples
///
/// ```
/// use foreman::workload::domain::{WorkloadLevel, WorkloadPolicy};
///
/// let policy = WorkloadPolicy::default();
/// assert_eq!(policy.classify(4), WorkloadLevel::Low);
/// assert_eq!(policy.classify(5), WorkloadLevel::Medium);
/// assert_eq!(policy.classify(10), WorkloadLevel::High);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadPolicy {
    /// Per-priority task weights.
    pub weights: PriorityWeights,
    /// Lowest score classified as medium.
    pub medium_threshold: u32,
    /// Lowest score classified as high.
    pub high_threshold: u32,
}

impl Default for WorkloadPolicy {
    fn default() -> Self {
        Self {
            weights: PriorityWeights::default(),
            medium_threshold: DEFAULT_MEDIUM_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

impl WorkloadPolicy {
    /// Maps a score onto its workload band.
    #[must_use]
    pub const fn classify(&self, score: u32) -> WorkloadLevel {
        if score >= self.high_threshold {
            WorkloadLevel::High
        } else if score >= self.medium_threshold {
            WorkloadLevel::Medium
        } else {
            WorkloadLevel::Low
        }
    }

    /// Scores the active tasks in `tasks`.
    ///
    /// Completed and overdue tasks contribute nothing.
    #[must_use]
    pub fn assess<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> WorkloadReport {
        let (score, active_tasks) = tasks
            .into_iter()
            .filter(|task| task.is_active())
            .fold((0_u32, 0_usize), |(total, count), task| {
                (
                    total.saturating_add(self.weights.weight(task.priority())),
                    count.saturating_add(1),
                )
            });
        WorkloadReport::new(score, self.classify(score), active_tasks)
    }
}
