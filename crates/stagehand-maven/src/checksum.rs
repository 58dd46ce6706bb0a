//! Checksum sidecar generation (`.md5`, `.sha1`, `.sha256`).
//!
//! Maven repositories expect a hex digest sidecar next to every deployed
//! artifact and POM. Detached signature files do not get sidecars.

use stagehand_util::hash;

/// The digest set for one file, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumSet {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

impl ChecksumSet {
    pub fn compute(data: &[u8]) -> Self {
        Self {
            md5: hash::md5_bytes(data),
            sha1: hash::sha1_bytes(data),
            sha256: hash::sha256_bytes(data),
        }
    }

    /// Sidecar files as `(extension, content)` pairs in upload order.
    pub fn sidecars(&self) -> [(&'static str, &str); 3] {
        [
            ("md5", &self.md5),
            ("sha1", &self.sha1),
            ("sha256", &self.sha256),
        ]
    }
}

/// Extract the hex hash from a checksum file body.
///
/// Maven checksum files may contain just the hash, or `hash  filename`.
pub fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}
