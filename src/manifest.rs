//! Score manifest records and delimited-table I/O
//!
//! A manifest is an ordered set of object metadata rows. The downloader only
//! reads `storage_site` and `object_id`; the remaining columns are reserved
//! for a later enrichment step and are carried through as empty fields.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::partition::{Partition, partition_by_number};
use crate::types::ObjectId;

/// Column header carrying the object id in source tables handed to
/// [`Manifest::convert_from_source`]
const SOURCE_OBJECT_ID_COLUMN: &str = "xml_object_id";

/// One row of a score manifest
///
/// Only `storage_site` and `object_id` are ever read by the download
/// pipeline. Every other column is a placeholder populated by an external
/// enrichment step; it is preserved as an empty field and never interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Storage site code, passed through unchanged
    pub storage_site: String,

    /// Reserved for enrichment
    #[serde(default)]
    pub file_id: String,

    /// Opaque identifier of the stored object
    pub object_id: ObjectId,

    /// Reserved for enrichment
    #[serde(default)]
    pub file_format: String,

    /// Reserved for enrichment
    #[serde(default)]
    pub file_name: String,

    /// Reserved for enrichment
    #[serde(default)]
    pub file_size: String,

    /// Reserved for enrichment
    #[serde(default)]
    pub md5_sum: String,

    /// Reserved for enrichment
    #[serde(default)]
    pub index_object_id: String,

    /// Reserved for enrichment
    #[serde(rename = "donor_id/donor_count", default)]
    pub donor: String,

    /// Reserved for enrichment
    #[serde(rename = "project_id/project_count", default)]
    pub project: String,

    /// Reserved for enrichment
    #[serde(default)]
    pub study: String,
}

impl ManifestRecord {
    /// Create a record with the given site and object id and every
    /// enrichment column empty
    pub fn new(storage_site: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            storage_site: storage_site.into(),
            file_id: String::new(),
            object_id: ObjectId::new(object_id),
            file_format: String::new(),
            file_name: String::new(),
            file_size: String::new(),
            md5_sum: String::new(),
            index_object_id: String::new(),
            donor: String::new(),
            project: String::new(),
            study: String::new(),
        }
    }
}

/// An ordered, finite sequence of manifest records
///
/// Order is stable and meaningful: partition slicing depends on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    records: Vec<ManifestRecord>,
}

impl Manifest {
    /// Build a manifest from records already in order
    pub fn from_records(records: Vec<ManifestRecord>) -> Self {
        Self { records }
    }

    /// The records in manifest order
    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True iff the manifest holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Object ids of all records, in manifest order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.records.iter().map(|r| r.object_id.clone()).collect()
    }

    /// Read a score manifest from a delimited file, preserving row order
    pub fn from_tsv_path(path: &Path, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_path(path)?;

        require_columns(reader.headers()?, &["storage_site", "object_id"], path)?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(Self { records })
    }

    /// Reshape a source table into a score manifest
    ///
    /// The source must carry `storage_site` and `xml_object_id` columns; any
    /// other columns are ignored. The result has one record per source row,
    /// in source order, with all enrichment columns empty.
    pub fn convert_from_source(path: &Path, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        require_columns(&headers, &["storage_site", SOURCE_OBJECT_ID_COLUMN], path)?;
        let site_idx = column_index(&headers, "storage_site");
        let object_idx = column_index(&headers, SOURCE_OBJECT_ID_COLUMN);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let storage_site = row.get(site_idx).unwrap_or_default();
            let object_id = row.get(object_idx).unwrap_or_default();
            records.push(ManifestRecord::new(storage_site, object_id));
        }
        Ok(Self { records })
    }
}

/// Write one partition to `{dir}/manifest.{index}.txt`
///
/// Creates `dir` (and any missing parents) as needed. Returns the resolved
/// path of the written file.
pub fn write_partition(partition: &Partition, dir: &Path, delimiter: u8) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to create manifest directory '{}': {}", dir.display(), e),
        ))
    })?;

    let path = dir.join(format!("manifest.{}.txt", partition.index()));
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(&path)?;
    for record in partition.records() {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let resolved = path.canonicalize().unwrap_or(path);
    tracing::info!(
        path = %resolved.display(),
        partition = partition.index(),
        records = partition.len(),
        "Wrote partition manifest"
    );
    Ok(resolved)
}

/// Partition `manifest` and write each partition to `dir`
///
/// Equivalent to [`partition_by_number`] followed by [`write_partition`] for
/// every produced partition. Returns the written paths in partition order.
pub fn write_all_partitions(
    manifest: &Manifest,
    dir: &Path,
    number_of_partitions: usize,
    delimiter: u8,
) -> Result<Vec<PathBuf>> {
    let partitions = partition_by_number(manifest, number_of_partitions)?;
    let mut paths = Vec::with_capacity(partitions.len());
    for partition in &partitions {
        paths.push(write_partition(partition, dir, delimiter)?);
    }
    tracing::info!(manifests = paths.len(), dir = %dir.display(), "Wrote all partition manifests");
    Ok(paths)
}

fn require_columns(headers: &csv::StringRecord, wanted: &[&str], path: &Path) -> Result<()> {
    for column in wanted {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::Manifest(format!(
                "'{}' is missing required column '{}'",
                path.display(),
                column
            )));
        }
    }
    Ok(())
}

fn column_index(headers: &csv::StringRecord, column: &str) -> usize {
    headers
        .iter()
        .position(|h| h == column)
        .unwrap_or_default()
}
