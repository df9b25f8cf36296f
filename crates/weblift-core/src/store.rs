use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::manifest::Manifest;

/// Remote side of a deploy, as seen by the sync driver.
///
/// Listing and upload failures propagate to the caller; implementations do
/// not retry beyond whatever their transport already does.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Enumerate every object in `bucket` into a key -> fingerprint table.
    async fn load_manifest(&self, bucket: &str) -> Result<Manifest>;

    /// Create or overwrite `key` in `bucket` from the file at `path`,
    /// with `content_type` attached.
    async fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<()>;
}
