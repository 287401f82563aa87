//! Configuration types for score-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Storage server connection settings
///
/// Groups the settings needed to reach the Score metadata endpoint.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the storage server (e.g., "https://storage.example.org")
    pub endpoint: String,

    /// Bearer credential sent with every metadata request
    pub access_token: String,
}

/// Download behavior configuration (directories, fan-out width, manifest format)
///
/// Groups settings related to how objects are fetched and where manifests
/// and downloaded objects land. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Download directory for fetched objects (default: "./downloads")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Directory partition manifests are written to (default: "./manifests")
    #[serde(default = "default_manifest_dir")]
    pub manifest_dir: PathBuf,

    /// Number of partitions — and therefore parallel workers — per batch run (default: 5)
    ///
    /// One worker processes one partition; fan-out width is coupled to this
    /// value rather than configured independently.
    #[serde(default = "default_partitions")]
    pub partitions: usize,

    /// Field delimiter for manifest files (default: tab)
    #[serde(default = "default_delimiter")]
    pub manifest_delimiter: u8,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            manifest_dir: default_manifest_dir(),
            partitions: default_partitions(),
            manifest_delimiter: default_delimiter(),
        }
    }
}

/// Main configuration for [`ScoreDownloader`](crate::downloader::ScoreDownloader)
///
/// Fields are organized into logical sub-configs:
/// - [`storage`](StorageConfig) — endpoint and credential
/// - [`download`](DownloadConfig) — directories, partition count, manifest format
///
/// Sub-config fields are flattened for serialization, so the JSON/TOML format
/// stays flat (no nesting). Configuration is injected into constructors at
/// startup; there is no process-wide mutable state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Storage server connection settings
    #[serde(flatten)]
    pub storage: StorageConfig,

    /// Download behavior settings
    #[serde(flatten)]
    pub download: DownloadConfig,
}

impl Config {
    /// Validate the configuration, returning the first problem found
    ///
    /// Checks that the endpoint parses as an absolute URL, the token is
    /// non-empty, and the partition count is positive.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.storage.endpoint).map_err(|e| Error::Config {
            message: format!("invalid endpoint URL '{}': {}", self.storage.endpoint, e),
            key: Some("endpoint".to_string()),
        })?;

        if self.storage.access_token.is_empty() {
            return Err(Error::Config {
                message: "access token must not be empty".to_string(),
                key: Some("access_token".to_string()),
            });
        }

        if self.download.partitions == 0 {
            return Err(Error::Config {
                message: "partition count must be positive".to_string(),
                key: Some("partitions".to_string()),
            });
        }

        Ok(())
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_manifest_dir() -> PathBuf {
    PathBuf::from("./manifests")
}

fn default_partitions() -> usize {
    5
}

fn default_delimiter() -> u8 {
    b'\t'
}
