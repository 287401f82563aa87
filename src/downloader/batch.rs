//! Fan-out of partition jobs and outcome aggregation.

use futures::stream::{self, StreamExt};

use super::{PartitionJob, ScoreDownloader};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::partition::partition_by_number;
use crate::types::{BatchSummary, JobOutcome};

impl ScoreDownloader {
    /// Partition `manifest` and download every partition in parallel
    ///
    /// Splits the manifest into at most `number_of_partitions` contiguous
    /// partitions, dispatches one [`PartitionJob`] per partition onto a pool
    /// of exactly `number_of_partitions` workers, and collects outcomes as
    /// jobs finish. A failing job is recorded and logged with its partition
    /// identity; its siblings are never cancelled. Returns once every job has
    /// completed or failed.
    ///
    /// There is no global timeout and no retry. Re-running against the same
    /// download directory resumes naturally: objects already on disk are
    /// skipped by the presence check.
    ///
    /// Partitioning errors (zero or over-large partition requests) propagate
    /// before any job is spawned.
    pub async fn download_all(
        &self,
        manifest: &Manifest,
        number_of_partitions: usize,
    ) -> Result<BatchSummary> {
        let partitions = partition_by_number(manifest, number_of_partitions)?;
        tracing::info!(
            records = manifest.len(),
            partitions = partitions.len(),
            workers = number_of_partitions,
            "Dispatching partition jobs"
        );

        let outcomes: Vec<JobOutcome> = stream::iter(partitions)
            .map(|partition| {
                let downloader = self.clone();
                let job = PartitionJob::from_partition(&partition);
                async move {
                    match job.run(&downloader).await {
                        Ok(files) => {
                            tracing::info!(
                                partition = job.index(),
                                files = files.len(),
                                "Partition job completed"
                            );
                            JobOutcome::Completed {
                                index: job.index(),
                                files,
                            }
                        }
                        Err(error) => {
                            tracing::error!(
                                partition = job.index(),
                                error = %error,
                                "Partition job failed"
                            );
                            JobOutcome::Failed {
                                index: job.index(),
                                error,
                            }
                        }
                    }
                }
            })
            .buffer_unordered(number_of_partitions)
            .collect()
            .await;

        let summary = BatchSummary { outcomes };
        tracing::info!(
            completed = summary.completed_jobs(),
            failed = summary.failed_jobs(),
            files_fetched = summary.files_fetched(),
            "Batch run finished"
        );
        Ok(summary)
    }
}
