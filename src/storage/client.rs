//! HTTP client for the Score storage protocol

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::ObjectStore;
use crate::config::StorageConfig;
use crate::error::{Error, Result, StorageError};
use crate::types::ObjectId;

/// Metadata document returned by the storage server for a download request
#[derive(Debug, Deserialize)]
struct ObjectSpec {
    #[serde(default)]
    parts: Vec<ObjectPart>,
}

/// One part of a stored object; carries the pre-signed transfer URL
#[derive(Debug, Deserialize)]
struct ObjectPart {
    url: String,
}

/// HTTP client implementing the storage server's resolve/transfer protocol
///
/// Holds the endpoint base URL and the bearer credential; cheap to clone.
#[derive(Clone)]
pub struct ScoreClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl ScoreClient {
    /// Create a client for the given storage settings
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        }
    }

    /// Resolve an object id to its transfer URL via the authenticated
    /// metadata call
    ///
    /// Issues `GET {endpoint}/download/{object_id}?offset=0&length=-1&external=true`
    /// with a bearer header and returns the URL of the first part. Objects
    /// with more than one part are not supported; only `parts[0]` is ever
    /// fetched.
    pub async fn resolve(&self, object_id: &ObjectId) -> Result<String> {
        let request_url = format!("{}/download/{}", self.endpoint, object_id);
        let response = self
            .http
            .get(&request_url)
            .query(&[("offset", "0"), ("length", "-1"), ("external", "true")])
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StorageError::AuthenticationFailed {
                object_id: object_id.to_string(),
            }
            .into());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::ObjectNotFound {
                object_id: object_id.to_string(),
                reason: "object is not known to the storage server".to_string(),
            }
            .into());
        }
        let response = response.error_for_status()?;

        let spec: ObjectSpec = response.json().await.map_err(|e| {
            Error::Storage(StorageError::ObjectNotFound {
                object_id: object_id.to_string(),
                reason: format!("malformed object document: {e}"),
            })
        })?;

        let part_count = spec.parts.len();
        let first = spec
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::ObjectNotFound {
                object_id: object_id.to_string(),
                reason: "no parts returned".to_string(),
            })?;
        if part_count > 1 {
            tracing::warn!(
                object_id = %object_id,
                parts = part_count,
                "Object has multiple parts; only the first will be fetched"
            );
        }

        tracing::debug!(object_id = %object_id, "Resolved object to transfer URL");
        Ok(first.url)
    }

    /// Stream the resource at `url` to `dest` in chunks
    ///
    /// The transfer URL is pre-signed, so no auth header is sent. Any
    /// existing file at `dest` is overwritten. Zero-length keep-alive chunks
    /// are skipped. On failure a partial file may remain at `dest`; a later
    /// run's presence check will treat it as complete.
    pub async fn fetch(&self, object_id: &ObjectId, url: &str, dest: &Path) -> Result<u64> {
        let transfer = |reason: String| {
            Error::Storage(StorageError::Transfer {
                object_id: object_id.to_string(),
                reason,
            })
        };

        let mut response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transfer(e.to_string()))?;
        if !response.status().is_success() {
            return Err(transfer(format!(
                "transfer URL answered HTTP {}",
                response.status()
            )));
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| transfer(format!("failed to create '{}': {}", dest.display(), e)))?;

        let mut bytes_written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| transfer(e.to_string()))?
        {
            if chunk.is_empty() {
                // keep-alive chunk
                continue;
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| transfer(format!("write to '{}' failed: {}", dest.display(), e)))?;
            bytes_written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| transfer(e.to_string()))?;

        tracing::debug!(
            object_id = %object_id,
            bytes = bytes_written,
            path = %dest.display(),
            "Object transfer complete"
        );
        Ok(bytes_written)
    }
}

#[async_trait]
impl ObjectStore for ScoreClient {
    async fn resolve(&self, object_id: &ObjectId) -> Result<String> {
        ScoreClient::resolve(self, object_id).await
    }

    async fn fetch(&self, object_id: &ObjectId, url: &str, dest: &Path) -> Result<u64> {
        ScoreClient::fetch(self, object_id, url, dest).await
    }
}
