//! # score-dl
//!
//! Manifest partitioning and parallel batch downloads from Score object storage.
//!
//! ## Design Philosophy
//!
//! score-dl is designed to be:
//! - **Skip-aware** - objects already on disk are never fetched again, so
//!   interrupted runs resume for free
//! - **Partition-parallel** - a manifest is split into contiguous partitions
//!   and each partition downloads on its own worker; downloads inside one
//!   partition stay strictly sequential
//! - **Failure-isolating** - a failing partition degrades the run but never
//!   aborts its siblings
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use score_dl::{Config, DownloadConfig, Manifest, ScoreDownloader, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         storage: StorageConfig {
//!             endpoint: "https://storage.example.org".to_string(),
//!             access_token: "my-token".to_string(),
//!         },
//!         download: DownloadConfig::default(),
//!     };
//!
//!     let manifest = Manifest::from_tsv_path(
//!         "manifest.txt".as_ref(),
//!         config.download.manifest_delimiter,
//!     )?;
//!
//!     let downloader = ScoreDownloader::new(&config).await?;
//!     let summary = downloader
//!         .download_all(&manifest, config.download.partitions)
//!         .await?;
//!
//!     println!(
//!         "{} files fetched, {} partitions failed",
//!         summary.files_fetched(),
//!         summary.failed_jobs()
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Skip-aware batch downloader (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Manifest records and delimited-table I/O
pub mod manifest;
/// Partitioning of ordered manifests into contiguous windows
pub mod partition;
/// Remote storage protocol (resolve and transfer)
pub mod storage;
/// Core types and batch summaries
pub mod types;

// Re-export commonly used types
pub use config::{Config, DownloadConfig, StorageConfig};
pub use downloader::{PartitionJob, ScoreDownloader};
pub use error::{Error, Result, StorageError};
pub use manifest::{Manifest, ManifestRecord, write_all_partitions, write_partition};
pub use partition::{Partition, partition_by_number, partition_by_size};
pub use storage::{ObjectStore, ScoreClient};
pub use types::{BatchSummary, JobOutcome, ObjectId};
