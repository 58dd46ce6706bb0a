//! Staging repository abstraction: URL layout, snapshot routing, credentials.

use stagehand_core::manifest::RepositorySection;

/// Sonatype OSSRH staging endpoint (release deploys).
pub const SONATYPE_STAGING_URL: &str =
    "https://s01.oss.sonatype.org/service/local/staging/deploy/maven2";

/// Sonatype OSSRH snapshot repository.
pub const SONATYPE_SNAPSHOT_URL: &str =
    "https://s01.oss.sonatype.org/content/repositories/snapshots";

/// A configured deploy target with credentials.
#[derive(Debug, Clone)]
pub struct StagingRepository {
    pub name: String,
    pub url: String,
    pub snapshot_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl StagingRepository {
    /// Build a `StagingRepository` from a manifest `[repository]` section.
    /// Credentials resolved elsewhere (property/environment order) are
    /// attached afterwards via [`StagingRepository::with_credentials`].
    pub fn from_section(section: &RepositorySection) -> Self {
        Self {
            name: section.name.clone(),
            url: section.url.trim_end_matches('/').to_string(),
            snapshot_url: section
                .snapshot_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            username: section.username.clone(),
            password: section.password.clone(),
        }
    }

    /// The default Sonatype staging/snapshot pair.
    pub fn sonatype() -> Self {
        Self {
            name: "sonatype".to_string(),
            url: SONATYPE_STAGING_URL.to_string(),
            snapshot_url: Some(SONATYPE_SNAPSHOT_URL.to_string()),
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    /// Base URL for a deploy: the snapshot endpoint for `-SNAPSHOT`
    /// versions when one is configured, the main URL otherwise.
    pub fn deploy_base(&self, snapshot: bool) -> &str {
        if snapshot {
            if let Some(ref url) = self.snapshot_url {
                return url;
            }
        }
        &self.url
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `com.example:extension-sdk:4.2.0` becomes
    /// `com/example/extension-sdk/4.2.0`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Full upload URL for a file within this repository.
    pub fn file_url(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        filename: &str,
        snapshot: bool,
    ) -> String {
        format!(
            "{}/{}/{}",
            self.deploy_base(snapshot),
            Self::coordinate_path(group, artifact, version),
            filename
        )
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(url: &str) -> RepositorySection {
        RepositorySection {
            name: "staging".to_string(),
            url: url.to_string(),
            snapshot_url: None,
            username: None,
            password: None,
        }
    }

    #[test]
    fn coordinate_path_replaces_dots() {
        let path = StagingRepository::coordinate_path("com.example", "extension-sdk", "4.2.0");
        assert_eq!(path, "com/example/extension-sdk/4.2.0");
    }

    #[test]
    fn file_url_format() {
        let repo = StagingRepository::from_section(&section("https://repo.example.com/deploy/"));
        let url = repo.file_url(
            "com.example",
            "extension-sdk",
            "4.2.0",
            "extension-sdk-4.2.0.pom",
            false,
        );
        assert_eq!(
            url,
            "https://repo.example.com/deploy/com/example/extension-sdk/4.2.0/extension-sdk-4.2.0.pom"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let repo = StagingRepository::from_section(&section("https://repo.example.com/deploy/"));
        assert_eq!(repo.url, "https://repo.example.com/deploy");
    }

    #[test]
    fn snapshot_routing() {
        let mut sec = section("https://repo.example.com/releases");
        sec.snapshot_url = Some("https://repo.example.com/snapshots".to_string());
        let repo = StagingRepository::from_section(&sec);

        assert_eq!(repo.deploy_base(false), "https://repo.example.com/releases");
        assert_eq!(repo.deploy_base(true), "https://repo.example.com/snapshots");
    }

    #[test]
    fn snapshot_falls_back_to_main_url() {
        let repo = StagingRepository::from_section(&section("https://repo.example.com/releases"));
        assert_eq!(repo.deploy_base(true), "https://repo.example.com/releases");
    }

    #[test]
    fn credentials_attach() {
        let repo = StagingRepository::sonatype()
            .with_credentials("deployer".to_string(), "s3cret".to_string());
        assert!(repo.has_auth());
        assert_eq!(repo.username.as_deref(), Some("deployer"));
    }
}
