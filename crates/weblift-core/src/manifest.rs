use std::collections::HashMap;

/// Remote object table: key -> content fingerprint.
///
/// Populated once per sync run from the remote listing, read-only
/// thereafter, and discarded at the end of the run. It reflects the bucket
/// at the moment of loading and is not refreshed mid-run.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: HashMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a remote object. Last write wins on duplicate keys.
    pub fn insert(&mut self, key: impl Into<String>, etag: &str) {
        self.entries.insert(key.into(), normalize_etag(etag).to_string());
    }

    /// Fingerprint recorded for `key`, if the object exists remotely.
    pub fn fingerprint(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` must be uploaded given the local `fingerprint`.
    ///
    /// Upload when the key is absent remotely or the recorded fingerprint
    /// differs; a multipart-style remote tag never matches a local digest
    /// and so always re-uploads.
    pub fn needs_upload(&self, key: &str, fingerprint: &str) -> bool {
        self.fingerprint(key) != Some(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Entity tags arrive quoted from the listing API.
fn normalize_etag(etag: &str) -> &str {
    etag.trim_matches('"')
}
