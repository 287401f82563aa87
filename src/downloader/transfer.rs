//! Sequential skip-aware download of an object id list.

use std::path::PathBuf;

use super::ScoreDownloader;
use crate::error::Result;
use crate::types::ObjectId;

impl ScoreDownloader {
    /// Download every object in `object_ids`, strictly in input order
    ///
    /// Each id is resolved to a transfer URL and fetched to its
    /// [`target_path`](ScoreDownloader::target_path) before the next id is
    /// touched; there is no concurrency inside this call. Returns the written
    /// paths in input order.
    ///
    /// An empty slice is a successful no-op: no resolve or fetch is issued
    /// and an empty list is returned. The first resolve or fetch error aborts
    /// the remaining ids.
    pub async fn download(&self, object_ids: &[ObjectId]) -> Result<Vec<PathBuf>> {
        if object_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::with_capacity(object_ids.len());
        for object_id in object_ids {
            let url = self.store.resolve(object_id).await?;
            let dest = self.target_path(object_id);
            let bytes = self.store.fetch(object_id, &url, &dest).await?;
            tracing::debug!(object_id = %object_id, bytes, "Fetched object");
            paths.push(dest);
        }
        Ok(paths)
    }
}
