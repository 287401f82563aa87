//! Partitioning of an ordered manifest into contiguous windows
//!
//! Splits a manifest into near-equal contiguous groups that are processed as
//! independent units of work. Every partition except the last holds exactly
//! the requested number of records; the last absorbs the remainder, so its
//! length is always at least the requested size.

use crate::error::{Error, Result};
use crate::manifest::{Manifest, ManifestRecord};
use crate::types::ObjectId;

/// A contiguous, non-overlapping slice of a manifest, tagged with a zero-based index
///
/// The ordered concatenation of all partitions of a manifest reconstructs the
/// manifest exactly: no record is duplicated, dropped, or reordered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    index: usize,
    records: Vec<ManifestRecord>,
}

impl Partition {
    /// Zero-based position of this partition within the run
    pub fn index(&self) -> usize {
        self.index
    }

    /// The records in this partition, in manifest order
    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    /// Number of records in this partition
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True iff the partition holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Object ids of this partition's records, in partition order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.records.iter().map(|r| r.object_id.clone()).collect()
    }
}

/// Split `manifest` into contiguous windows of `size_per_partition` records.
///
/// Every partition except the last has exactly `size_per_partition` records.
/// When the window after the current one would run past the final record, the
/// current window is widened to absorb the remainder, so the final partition
/// holds between `size_per_partition` and `2 * size_per_partition - 1` records.
///
/// An empty manifest yields no partitions. `size_per_partition == 0` is
/// rejected with [`Error::InvalidPartitionSize`] before any window is walked.
///
/// Pure and idempotent: the same inputs always produce identical partitions.
pub fn partition_by_size(
    manifest: &Manifest,
    size_per_partition: usize,
) -> Result<Vec<Partition>> {
    if size_per_partition == 0 {
        return Err(Error::InvalidPartitionSize {
            records: manifest.len(),
            size_per_partition,
        });
    }

    let records = manifest.records();
    let total = records.len();
    let mut partitions = Vec::new();
    let mut start = 0;

    while start < total {
        // Widen the current window to the end whenever the next window
        // could not be filled completely.
        let end = if total - start < 2 * size_per_partition {
            total
        } else {
            start + size_per_partition
        };
        partitions.push(Partition {
            index: partitions.len(),
            records: records[start..end].to_vec(),
        });
        start = end;
    }

    Ok(partitions)
}

/// Split `manifest` into roughly `number_of_partitions` contiguous groups.
///
/// Computes `size_per_partition = len / number_of_partitions` (floor) and
/// delegates to [`partition_by_size`]. The produced count is a target, not a
/// guarantee: remainder absorption means callers must not assume it equals
/// the request.
///
/// `number_of_partitions == 0`, or a request exceeding the record count
/// (which would compute a window size of zero), is rejected with
/// [`Error::InvalidPartitionSize`].
pub fn partition_by_number(
    manifest: &Manifest,
    number_of_partitions: usize,
) -> Result<Vec<Partition>> {
    if number_of_partitions == 0 {
        return Err(Error::InvalidPartitionSize {
            records: manifest.len(),
            size_per_partition: 0,
        });
    }

    let size_per_partition = manifest.len() / number_of_partitions;
    partition_by_size(manifest, size_per_partition)
}
