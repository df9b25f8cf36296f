use std::path::Path;

use crate::error::Result;

/// Bucket key for `path` relative to `root`.
///
/// Separators are normalized to `/` regardless of the host convention, so
/// the same tree produces the same keys on every platform.
pub fn object_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root)?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
