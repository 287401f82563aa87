//! Shared test helpers for exercising the download pipeline without a network.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result, StorageError};
use crate::storage::ObjectStore;
use crate::types::ObjectId;

/// In-memory [`ObjectStore`] that records every call and writes a small
/// payload per fetched object.
///
/// Ids listed in `fail_resolve` / `fail_fetch` produce storage errors.
#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) resolve_calls: AtomicUsize,
    pub(crate) fetch_calls: AtomicUsize,
    pub(crate) fetched_ids: Mutex<Vec<String>>,
    pub(crate) fail_resolve: HashSet<String>,
    pub(crate) fail_fetch: HashSet<String>,
}

impl FakeStore {
    pub(crate) fn failing_resolve(ids: &[&str]) -> Self {
        Self {
            fail_resolve: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn failing_fetch(ids: &[&str]) -> Self {
        Self {
            fail_fetch: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn resolves(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn resolve(&self, object_id: &ObjectId) -> Result<String> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve.contains(object_id.as_str()) {
            // reqwest::Error has no public constructor, so simulated
            // transport failures surface as a storage error instead.
            return Err(Error::Storage(StorageError::ObjectNotFound {
                object_id: object_id.to_string(),
                reason: "simulated resolve failure".to_string(),
            }));
        }
        Ok(format!("https://signed.example/{object_id}"))
    }

    async fn fetch(&self, object_id: &ObjectId, _url: &str, dest: &Path) -> Result<u64> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.contains(object_id.as_str()) {
            return Err(Error::Storage(StorageError::Transfer {
                object_id: object_id.to_string(),
                reason: "simulated transfer fault".to_string(),
            }));
        }
        let payload = format!("payload:{object_id}");
        tokio::fs::write(dest, &payload).await?;
        self.fetched_ids
            .lock()
            .unwrap()
            .push(object_id.to_string());
        Ok(payload.len() as u64)
    }
}
