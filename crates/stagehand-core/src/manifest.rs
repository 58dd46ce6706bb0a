use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use stagehand_util::errors::StagehandError;

use crate::properties;

/// The parsed representation of a `Publish.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub project: ProjectMetadata,

    #[serde(default)]
    pub organization: Option<Organization>,

    #[serde(default)]
    pub license: Option<LicenseInfo>,

    #[serde(default)]
    pub developers: Vec<Developer>,

    #[serde(default)]
    pub github: Option<GithubInfo>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyEntry>,

    #[serde(default)]
    pub signing: Option<SigningSection>,

    #[serde(default)]
    pub repository: Option<RepositorySection>,

    #[serde(default)]
    pub package: Option<PackageSection>,

    #[serde(default)]
    pub check: Option<CheckSection>,
}

/// Publication identity and descriptive fields from the `[project]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Maven artifact id, e.g. `extension-sdk`.
    pub name: String,
    /// Maven group coordinate, e.g. `com.example`.
    pub group: String,
    pub version: String,
    pub description: String,
    /// Human-readable name used in the POM `<name>` and the javadoc title.
    #[serde(default, rename = "readable-name")]
    pub readable_name: Option<String>,
}

impl ProjectMetadata {
    /// POM `<name>`: the readable name when present, the artifact id otherwise.
    pub fn display_name(&self) -> &str {
        self.readable_name.as_deref().unwrap_or(&self.name)
    }

    /// Maven treats versions with this suffix as mutable snapshots.
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with("-SNAPSHOT")
    }
}

/// Publishing organization from `[organization]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// License declaration from `[license]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// SPDX-style identifier, e.g. `Apache-2.0`.
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl LicenseInfo {
    /// The canonical Apache-2.0 declaration used by the SDK publications.
    pub fn apache2() -> Self {
        Self {
            id: "Apache-2.0".to_string(),
            url: Some("https://www.apache.org/licenses/LICENSE-2.0.txt".to_string()),
        }
    }

    /// Full license name as it appears in the POM.
    pub fn pom_name(&self) -> String {
        match self.id.as_str() {
            "Apache-2.0" => "The Apache License, Version 2.0".to_string(),
            other => other.to_string(),
        }
    }
}

/// A developer record from `[[developers]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Developer {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// GitHub coordinates from `[github]`, used to derive project, SCM, and
/// issue-tracker URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubInfo {
    pub org: String,
    pub repo: String,
    /// Whether the repository's issue tracker is advertised in the POM.
    #[serde(default = "default_true")]
    pub issues: bool,
}

fn default_true() -> bool {
    true
}

/// A dependency declared for the POM, keyed by `group:artifact`, either a
/// bare version string or a detailed entry with a scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    Version(String),
    Detailed {
        version: String,
        #[serde(default)]
        scope: Option<String>,
    },
}

impl DependencyEntry {
    pub fn version(&self) -> &str {
        match self {
            Self::Version(v) => v,
            Self::Detailed { version, .. } => version,
        }
    }

    pub fn scope(&self) -> &str {
        match self {
            Self::Version(_) => "compile",
            Self::Detailed { scope, .. } => scope.as_deref().unwrap_or("compile"),
        }
    }
}

/// Whether detached signatures are produced, and what happens when key
/// material is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningMode {
    /// Missing or invalid key material fails the pipeline.
    Required,
    /// Missing key material skips signing with a warning.
    Optional,
    /// No signatures are produced.
    Disabled,
}

/// Artifact signing configuration from `[signing]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningSection {
    #[serde(default = "default_signing_mode")]
    pub mode: SigningMode,
    /// Armored private key; usually `${env:SIGNING_KEY}` rather than inline.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_signing_mode() -> SigningMode {
    SigningMode::Required
}

/// Destination repository from `[repository]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySection {
    #[serde(default = "default_repository_name")]
    pub name: String,
    pub url: String,
    /// Optional separate endpoint for `-SNAPSHOT` versions.
    #[serde(default, rename = "snapshot-url")]
    pub snapshot_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_repository_name() -> String {
    "staging".to_string()
}

/// Source and output layout from `[package]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    #[serde(default = "default_sources_dir", rename = "sources-dir")]
    pub sources_dir: String,
    /// Pre-compiled classes; when set, `javac` is not invoked.
    #[serde(default, rename = "classes-dir")]
    pub classes_dir: Option<String>,
    #[serde(default, rename = "resources-dir")]
    pub resources_dir: Option<String>,
    #[serde(default = "default_output_dir", rename = "output-dir")]
    pub output_dir: String,
}

fn default_sources_dir() -> String {
    "src/main/java".to_string()
}

fn default_output_dir() -> String {
    "target/publish".to_string()
}

impl Default for PackageSection {
    fn default() -> Self {
        Self {
            sources_dir: default_sources_dir(),
            classes_dir: None,
            resources_dir: None,
            output_dir: default_output_dir(),
        }
    }
}

/// License header compliance configuration from `[check]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSection {
    #[serde(default = "default_header_file")]
    pub header: String,
    #[serde(default = "default_check_include")]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_header_file() -> String {
    "HEADER".to_string()
}

fn default_check_include() -> Vec<String> {
    vec!["src/**/*.java".to_string()]
}

impl Default for CheckSection {
    fn default() -> Self {
        Self {
            header: default_header_file(),
            include: default_check_include(),
            exclude: Vec::new(),
        }
    }
}

impl Manifest {
    /// Load and parse a `Publish.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `.stagehand.env` (if present alongside `Publish.toml`)
    /// and process environment variables.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StagehandError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let props = properties::load_properties(&dir.join(properties::PROPERTIES_FILENAME))
            .unwrap_or_default();
        let resolved = properties::interpolate(&content, &props);

        Self::from_str(&resolved)
    }

    /// Parse a `Publish.toml` from a string (no interpolation).
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            StagehandError::Config {
                message: format!("Failed to parse Publish.toml: {e}"),
            }
            .into()
        })
    }

    /// Validate that every field required for a publication is present.
    ///
    /// Fails fast with a configuration error listing the first missing
    /// field, before any packaging work starts.
    pub fn validate(&self) -> miette::Result<()> {
        fn missing(field: &str) -> miette::Report {
            StagehandError::Config {
                message: format!("required field is missing or empty: {field}"),
            }
            .into()
        }

        if self.project.name.trim().is_empty() {
            return Err(missing("project.name"));
        }
        if self.project.group.trim().is_empty() {
            return Err(missing("project.group"));
        }
        if self.project.version.trim().is_empty() {
            return Err(missing("project.version"));
        }
        if self.project.description.trim().is_empty() {
            return Err(missing("project.description"));
        }
        if self.license.is_none() {
            return Err(missing("[license]"));
        }
        if self.developers.is_empty() {
            return Err(missing("[[developers]] (at least one developer record)"));
        }
        for dev in &self.developers {
            if dev.id.trim().is_empty() || dev.name.trim().is_empty() {
                return Err(missing("developers.id / developers.name"));
            }
        }
        Ok(())
    }

    /// Effective signing mode: `disabled` when no `[signing]` table exists.
    pub fn signing_mode(&self) -> SigningMode {
        self.signing
            .as_ref()
            .map(|s| s.mode)
            .unwrap_or(SigningMode::Disabled)
    }

    /// Effective package layout, defaulted when `[package]` is absent.
    pub fn package_section(&self) -> PackageSection {
        self.package.clone().unwrap_or_default()
    }

    /// Effective check configuration, defaulted when `[check]` is absent.
    pub fn check_section(&self) -> CheckSection {
        self.check.clone().unwrap_or_default()
    }
}
