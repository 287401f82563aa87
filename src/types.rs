//! Core types for score-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;

/// Opaque identifier for a remotely stored object
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    /// Create a new ObjectId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one partition job
///
/// A job either completes with the paths it newly wrote, or fails with the
/// error that aborted it. Objects that were already on disk are excluded
/// from `files`, so only the count of newly fetched files is meaningful.
#[derive(Debug)]
pub enum JobOutcome {
    /// The job downloaded every object it was responsible for
    Completed {
        /// Zero-based index of the partition this job processed
        index: usize,
        /// Local paths written by this job, in partition record order
        files: Vec<PathBuf>,
    },
    /// The job aborted on its first error; remaining objects were not attempted
    Failed {
        /// Zero-based index of the partition this job processed
        index: usize,
        /// The job-level failure (an [`Error::JobFailed`] wrapping the cause)
        error: Error,
    },
}

impl JobOutcome {
    /// Zero-based index of the partition this outcome belongs to
    pub fn index(&self) -> usize {
        match self {
            JobOutcome::Completed { index, .. } | JobOutcome::Failed { index, .. } => *index,
        }
    }
}

/// Aggregated result of one `download_all` run
///
/// Outcomes are recorded in completion order, which is unspecified relative
/// to partition order.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Per-job outcomes in the order the jobs finished
    pub outcomes: Vec<JobOutcome>,
}

impl BatchSummary {
    /// Number of jobs that completed successfully
    pub fn completed_jobs(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, JobOutcome::Completed { .. }))
            .count()
    }

    /// Number of jobs that failed
    pub fn failed_jobs(&self) -> usize {
        self.outcomes.len() - self.completed_jobs()
    }

    /// Total count of newly fetched files across all completed jobs
    pub fn files_fetched(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                JobOutcome::Completed { files, .. } => files.len(),
                JobOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Iterate over the failed jobs and their errors
    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.outcomes.iter().filter_map(|o| match o {
            JobOutcome::Failed { index, error } => Some((*index, error)),
            JobOutcome::Completed { .. } => None,
        })
    }
}
