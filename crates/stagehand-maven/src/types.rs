//! The artifact set making up one publication.

use std::path::PathBuf;

/// A single publishable file: the main jar, or a classified companion
/// (`sources`, `javadoc`).
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub classifier: Option<String>,
    pub extension: String,
}

impl Artifact {
    pub fn jar(path: PathBuf) -> Self {
        Self {
            path,
            classifier: None,
            extension: "jar".to_string(),
        }
    }

    pub fn classified_jar(path: PathBuf, classifier: &str) -> Self {
        Self {
            path,
            classifier: Some(classifier.to_string()),
            extension: "jar".to_string(),
        }
    }

    /// Filename under the repository's version directory:
    /// `artifact-version[-classifier].ext`.
    pub fn remote_name(&self, artifact_id: &str, version: &str) -> String {
        match self.classifier {
            Some(ref c) => format!("{artifact_id}-{version}-{c}.{}", self.extension),
            None => format!("{artifact_id}-{version}.{}", self.extension),
        }
    }
}

/// A detached signature for one uploaded file.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Remote name of the file this signature covers.
    pub signs: String,
    pub path: PathBuf,
}

impl Signature {
    pub fn remote_name(&self) -> String {
        format!("{}.asc", self.signs)
    }
}

/// The complete artifact set plus descriptor submitted to a repository in
/// one upload. Either every file lands or the publication is failed.
#[derive(Debug, Clone)]
pub struct Publication {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Path to the generated POM descriptor.
    pub pom_path: PathBuf,
    pub artifacts: Vec<Artifact>,
    pub signatures: Vec<Signature>,
}

impl Publication {
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with("-SNAPSHOT")
    }

    pub fn pom_remote_name(&self) -> String {
        format!("{}-{}.pom", self.artifact_id, self.version)
    }

    /// Files that get checksum sidecars and are eligible for signing:
    /// artifacts plus the POM (signatures themselves are excluded).
    pub fn publishable_count(&self) -> usize {
        self.artifacts.len() + 1
    }
}

/// One uploaded file in the final report.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub remote_name: String,
    pub bytes: u64,
}

/// Outcome of a successful deploy: every file that was uploaded, in order.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub repository_url: String,
    pub files: Vec<UploadedFile>,
}

impl UploadReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}
