//! Error types for score-dl
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (partitioning, storage protocol, manifest I/O)
//! - Per-partition failure wrapping so a batch run can report which unit of
//!   work failed without losing the underlying cause

use thiserror::Error;

/// Result type alias for score-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for score-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "endpoint")
        key: Option<String>,
    },

    /// Partition request that cannot produce valid windows
    ///
    /// Raised up front whenever the per-partition size computes to zero
    /// (zero requested, or more partitions than records), instead of letting
    /// the window loop degenerate.
    #[error(
        "invalid partition size: {records} records cannot be split into windows of {size_per_partition}"
    )]
    InvalidPartitionSize {
        /// Number of records in the manifest being partitioned
        records: usize,
        /// The per-partition record count that was computed or requested
        size_per_partition: usize,
    },

    /// Storage protocol error (resolve or transfer)
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Manifest does not have the expected shape
    #[error("invalid manifest: {0}")]
    Manifest(String),

    /// Delimited-table read/write error
    #[error("manifest I/O error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A partition job failed; wraps the underlying error with the job identity
    #[error("partition {index} failed: {source}")]
    JobFailed {
        /// Zero-based index of the partition whose job failed
        index: usize,
        /// The error that aborted the job
        #[source]
        source: Box<Error>,
    },
}

/// Storage protocol errors (metadata resolve and object transfer)
#[derive(Debug, Error)]
pub enum StorageError {
    /// The bearer credential was rejected by the storage server
    #[error("authentication failed for object {object_id}")]
    AuthenticationFailed {
        /// The object id whose metadata request was rejected
        object_id: String,
    },

    /// The storage server returned no usable parts for the object
    #[error("object {object_id} not found: {reason}")]
    ObjectNotFound {
        /// The object id that could not be resolved
        object_id: String,
        /// Why resolution failed (missing, empty parts, malformed document)
        reason: String,
    },

    /// The streamed byte transfer to disk failed
    #[error("transfer failed for object {object_id}: {reason}")]
    Transfer {
        /// The object id being fetched when the transfer failed
        object_id: String,
        /// The transport or I/O fault that aborted the transfer
        reason: String,
    },
}

impl Error {
    /// Wrap this error as a job-level failure owned by the given partition.
    pub fn into_job_failure(self, index: usize) -> Self {
        Error::JobFailed {
            index,
            source: Box::new(self),
        }
    }
}
