use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::fingerprint::fingerprint_file;
use crate::store::ObjectStore;
use crate::walker::{resolve_root, walk_site};

/// Outcome of a sync run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Files transferred because they were new or changed.
    pub uploaded: usize,
    /// Files left alone because their fingerprint matched the manifest.
    pub skipped: usize,
}

/// Upload every regular file under `root` into `bucket`, skipping files
/// whose fingerprint already matches the remote manifest.
///
/// The manifest is loaded once, before any upload decision; uploads then
/// run strictly one at a time. A failed transfer aborts the run and leaves
/// the bucket partially updated; re-running converges.
pub async fn sync(store: &dyn ObjectStore, root: &Path, bucket: &str) -> Result<SyncReport> {
    let root = resolve_root(root)?;
    let manifest = store.load_manifest(bucket).await?;
    let files = walk_site(&root)?;
    debug!(
        objects = manifest.len(),
        files = files.len(),
        "remote manifest loaded"
    );

    let mut report = SyncReport::default();
    for file in &files {
        let fingerprint = fingerprint_file(&file.path)?;
        if manifest.needs_upload(&file.key, &fingerprint) {
            store
                .put_file(bucket, &file.key, &file.path, file.content_type)
                .await?;
            debug!(key = %file.key, content_type = file.content_type, "uploaded");
            report.uploaded += 1;
        } else {
            debug!(key = %file.key, "unchanged, skipped");
            report.skipped += 1;
        }
    }

    info!(
        uploaded = report.uploaded,
        skipped = report.skipped,
        %bucket,
        "sync complete"
    );
    Ok(report)
}
