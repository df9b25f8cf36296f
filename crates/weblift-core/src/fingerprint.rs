use std::fs::File;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::Result;

/// Lowercase hex MD5 digest of the file's bytes.
///
/// This is exactly the entity tag the storage service reports for a
/// single-part upload, so it compares directly against manifest entries.
pub fn fingerprint_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hello world").unwrap();

        assert_eq!(
            fingerprint_file(&path).unwrap(),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
    }

    #[test]
    fn identical_content_yields_identical_fingerprints() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, b"same bytes").unwrap();
        std::fs::write(&b, b"same bytes").unwrap();

        assert_eq!(
            fingerprint_file(&a).unwrap(),
            fingerprint_file(&b).unwrap()
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(fingerprint_file(Path::new("/nonexistent/file.txt")).is_err());
    }
}
