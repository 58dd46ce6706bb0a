//! Metadata derived from the manifest: project and SCM URLs, issue tracker,
//! and the jar manifest attributes stamped into every packaged artifact.

use crate::manifest::{GithubInfo, Manifest};

/// SCM coordinates advertised in the POM `<scm>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmCoordinates {
    pub url: String,
    pub connection: String,
    pub developer_connection: String,
}

impl ScmCoordinates {
    pub fn from_github(github: &GithubInfo) -> Self {
        let slug = format!("{}/{}", github.org, github.repo);
        Self {
            url: format!("https://github.com/{slug}"),
            connection: format!("scm:git:git://github.com/{slug}.git"),
            developer_connection: format!("scm:git:ssh://git@github.com/{slug}.git"),
        }
    }
}

/// Issue-tracker URL for a GitHub repository, or `None` when the manifest
/// opts out of advertising it.
pub fn issues_url(github: &GithubInfo) -> Option<String> {
    github
        .issues
        .then(|| format!("https://github.com/{}/{}/issues", github.org, github.repo))
}

/// Project home page: the GitHub repository when configured, otherwise the
/// organization URL.
pub fn project_url(manifest: &Manifest) -> Option<String> {
    if let Some(ref github) = manifest.github {
        return Some(ScmCoordinates::from_github(github).url);
    }
    manifest
        .organization
        .as_ref()
        .and_then(|org| org.url.clone())
}

/// `META-INF/MANIFEST.MF` attributes for packaged jars.
#[derive(Debug, Clone)]
pub struct JarAttributes {
    pub implementation_title: String,
    pub implementation_vendor: Option<String>,
    pub implementation_version: String,
}

impl JarAttributes {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self {
            implementation_title: manifest.project.name.clone(),
            implementation_vendor: manifest.organization.as_ref().map(|o| o.name.clone()),
            implementation_version: manifest.project.version.clone(),
        }
    }

    /// Render the full `MANIFEST.MF` content. Attribute values here are far
    /// below the 72-byte continuation limit, so no line folding is needed.
    pub fn render(&self) -> String {
        let mut out = String::from("Manifest-Version: 1.0\r\n");
        out.push_str(&format!(
            "Implementation-Title: {}\r\n",
            self.implementation_title
        ));
        if let Some(ref vendor) = self.implementation_vendor {
            out.push_str(&format!("Implementation-Vendor: {vendor}\r\n"));
        }
        out.push_str(&format!(
            "Implementation-Version: {}\r\n",
            self.implementation_version
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::GithubInfo;

    fn github() -> GithubInfo {
        GithubInfo {
            org: "example".to_string(),
            repo: "extension-sdk".to_string(),
            issues: true,
        }
    }

    #[test]
    fn scm_coordinates_from_github() {
        let scm = ScmCoordinates::from_github(&github());
        assert_eq!(scm.url, "https://github.com/example/extension-sdk");
        assert_eq!(
            scm.connection,
            "scm:git:git://github.com/example/extension-sdk.git"
        );
        assert_eq!(
            scm.developer_connection,
            "scm:git:ssh://git@github.com/example/extension-sdk.git"
        );
    }

    #[test]
    fn issues_url_respects_opt_out() {
        assert_eq!(
            issues_url(&github()).as_deref(),
            Some("https://github.com/example/extension-sdk/issues")
        );

        let mut gh = github();
        gh.issues = false;
        assert_eq!(issues_url(&gh), None);
    }

    #[test]
    fn manifest_mf_rendering() {
        let attrs = JarAttributes {
            implementation_title: "extension-sdk".to_string(),
            implementation_vendor: Some("Example GmbH".to_string()),
            implementation_version: "4.2.0".to_string(),
        };
        let rendered = attrs.render();
        assert!(rendered.starts_with("Manifest-Version: 1.0\r\n"));
        assert!(rendered.contains("Implementation-Title: extension-sdk\r\n"));
        assert!(rendered.contains("Implementation-Vendor: Example GmbH\r\n"));
        assert!(rendered.ends_with("Implementation-Version: 4.2.0\r\n"));
    }

    #[test]
    fn manifest_mf_omits_vendor_when_no_organization() {
        let attrs = JarAttributes {
            implementation_title: "lib".to_string(),
            implementation_vendor: None,
            implementation_version: "1.0".to_string(),
        };
        assert!(!attrs.render().contains("Implementation-Vendor"));
    }
}
