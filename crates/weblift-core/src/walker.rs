use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::content_type::content_type_for;
use crate::error::{DeployError, Result};
use crate::key::object_key;

/// A regular file discovered under the sync root.
#[derive(Debug, Clone)]
pub struct LocalFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Bucket key: root-relative with `/` separators.
    pub key: String,
    /// Content type inferred from the key's extension.
    pub content_type: &'static str,
}

/// Resolve the sync root to an absolute path.
///
/// Fails with [`DeployError::SourceNotFound`] if the path does not exist,
/// before any remote call is attempted.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(DeployError::SourceNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Collect every regular file under `root`, depth-first.
///
/// Sibling order is filesystem-dependent. Symbolic links are not followed,
/// so link cycles cannot occur; links and other non-regular entries are
/// skipped.
pub fn walk_site(root: &Path) -> Result<Vec<LocalFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let key = object_key(root, entry.path())?;
        files.push(LocalFile {
            content_type: content_type_for(&key),
            path: entry.into_path(),
            key,
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_nested_files_with_normalized_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), b"<html></html>").unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/site.css"), b"body {}").unwrap();

        let mut files = walk_site(dir.path()).unwrap();
        files.sort_by(|a, b| a.key.cmp(&b.key));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].key, "css/site.css");
        assert_eq!(files[0].content_type, "text/css");
        assert_eq!(files[1].key, "index.html");
        assert_eq!(files[1].content_type, "text/html");
    }

    #[test]
    fn empty_directory_yields_no_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(walk_site(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn resolve_root_rejects_missing_path() {
        let err = resolve_root(Path::new("/definitely/not/a/real/path")).unwrap_err();
        assert!(matches!(err, DeployError::SourceNotFound(_)));
    }

    #[test]
    fn resolve_root_returns_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_root(dir.path()).unwrap();
        assert!(resolved.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("real.txt"), b"content").unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("real.txt"),
            dir.path().join("link.txt"),
        )
        .unwrap();
        // A directory link back to the root must not loop the walk.
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let files = walk_site(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].key, "real.txt");
    }
}
