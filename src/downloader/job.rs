//! One partition's unit of work.

use std::path::PathBuf;

use super::ScoreDownloader;
use crate::error::Result;
use crate::partition::Partition;
use crate::types::ObjectId;

/// The unit of work for one partition
///
/// Filters the partition's object ids to those not already on disk, then
/// downloads exactly that subset sequentially. Already-present objects are
/// silently excluded from the returned path list, so callers cannot
/// distinguish "already had it" from "not requested"; only the count of
/// newly fetched files is meaningful.
#[derive(Clone, Debug)]
pub struct PartitionJob {
    index: usize,
    object_ids: Vec<ObjectId>,
}

impl PartitionJob {
    /// Create a job for the given partition index and object ids
    pub fn new(index: usize, object_ids: Vec<ObjectId>) -> Self {
        Self { index, object_ids }
    }

    /// Create the job responsible for `partition`
    pub fn from_partition(partition: &Partition) -> Self {
        Self::new(partition.index(), partition.object_ids())
    }

    /// Zero-based index of the partition this job processes
    pub fn index(&self) -> usize {
        self.index
    }

    /// Run the job to completion
    ///
    /// Fail-fast: the first resolve or fetch error abandons the job's
    /// remaining objects and surfaces as [`Error::JobFailed`](crate::error::Error::JobFailed)
    /// carrying this partition's index.
    pub async fn run(&self, downloader: &ScoreDownloader) -> Result<Vec<PathBuf>> {
        let pending: Vec<ObjectId> = self
            .object_ids
            .iter()
            .filter(|id| !downloader.is_present(id))
            .cloned()
            .collect();

        let skipped = self.object_ids.len() - pending.len();
        if skipped > 0 {
            tracing::info!(
                partition = self.index,
                skipped,
                pending = pending.len(),
                "Skipping objects already on disk"
            );
        }

        downloader
            .download(&pending)
            .await
            .map_err(|e| e.into_job_failure(self.index))
    }
}
