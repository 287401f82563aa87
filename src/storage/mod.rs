//! Remote storage protocol — object resolution and streamed transfer
//!
//! The storage server speaks a two-step protocol: an authenticated metadata
//! call translates an object id into a time-limited pre-signed URL, and an
//! unauthenticated GET on that URL streams the object's bytes. The
//! [`ObjectStore`] trait is the seam between the download pipeline and the
//! wire; [`ScoreClient`] is the HTTP implementation.

mod client;

pub use client::ScoreClient;

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::types::ObjectId;

/// Resolve-and-fetch interface over the remote object store
///
/// Implementations must be shareable across concurrently running partition
/// jobs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Resolve an object id to a concrete, time-limited download URL
    async fn resolve(&self, object_id: &ObjectId) -> Result<String>;

    /// Stream the resource at `url` to `dest`, returning the bytes written
    ///
    /// Overwrites any existing file at `dest`.
    async fn fetch(&self, object_id: &ObjectId, url: &str, dest: &Path) -> Result<u64>;
}
