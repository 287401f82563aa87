//! Skip-aware batch downloader split into focused submodules.
//!
//! The `ScoreDownloader` struct and its methods are organized by concern:
//! - [`transfer`] - Sequential skip-aware download of an object id list
//! - [`job`] - One partition's unit of work
//! - [`batch`] - Fan-out of partition jobs and outcome aggregation

mod batch;
mod job;
mod transfer;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use job::PartitionJob;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{ObjectStore, ScoreClient};
use crate::types::ObjectId;

/// Skip-aware downloader for Score object storage (cloneable - the store is Arc-wrapped)
///
/// Composes an [`ObjectStore`] with the download directory and checks local
/// presence before any network work, which makes re-runs resumable: objects
/// already on disk are never resolved or fetched again.
#[derive(Clone)]
pub struct ScoreDownloader {
    /// Resolve-and-fetch client (trait object for pluggable implementations)
    pub(crate) store: Arc<dyn ObjectStore>,
    /// Directory downloaded objects are written to
    pub(crate) download_dir: PathBuf,
}

impl ScoreDownloader {
    /// Create a downloader backed by a [`ScoreClient`] built from `config`
    ///
    /// Validates the configuration and ensures the download directory exists.
    pub async fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        tokio::fs::create_dir_all(&config.download.download_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "failed to create download directory '{}': {}",
                        config.download.download_dir.display(),
                        e
                    ),
                ))
            })?;

        Ok(Self {
            store: Arc::new(ScoreClient::new(&config.storage)),
            download_dir: config.download.download_dir.clone(),
        })
    }

    /// Create a downloader over an explicit object store
    ///
    /// The seam used by tests to inject fakes; the directory is not created.
    pub fn with_store(store: Arc<dyn ObjectStore>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            download_dir: download_dir.into(),
        }
    }

    /// Deterministic local path for an object: `{download_dir}/{object_id}`
    pub fn target_path(&self, object_id: &ObjectId) -> PathBuf {
        self.download_dir.join(object_id.as_str())
    }

    /// True iff the object's target path already exists on disk
    pub fn is_present(&self, object_id: &ObjectId) -> bool {
        self.target_path(object_id).exists()
    }
}
