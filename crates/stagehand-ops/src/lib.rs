//! High-level operations for the stagehand publication pipeline.
//!
//! Each `ops_*` module backs one CLI command. The full pipeline
//! ([`ops_publish`]) walks the publication state machine:
//! configured -> packaged -> signed -> uploaded, failing terminally from
//! any state.

pub mod ops_check;
pub mod ops_package;
pub mod ops_publish;
pub mod ops_sign;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use stagehand_core::manifest::Manifest;
use stagehand_core::properties;
use stagehand_util::errors::StagehandError;

/// Everything an operation needs about the project being published:
/// validated manifest, build properties, and resolved directories.
pub struct PublishContext {
    pub project_dir: PathBuf,
    pub manifest: Manifest,
    pub properties: BTreeMap<String, String>,
    pub out_dir: PathBuf,
}

impl PublishContext {
    /// Locate `Publish.toml` from `start_dir` upwards, parse and validate
    /// it, and load build properties. Configuration errors surface here,
    /// before any packaging work.
    pub fn load(start_dir: &Path) -> miette::Result<Self> {
        let project_dir =
            stagehand_util::fs::find_project_root(start_dir).ok_or_else(|| {
                StagehandError::Config {
                    message: format!(
                        "No {} found in {} or any parent directory",
                        stagehand_util::fs::MANIFEST_FILENAME,
                        start_dir.display()
                    ),
                }
            })?;

        let manifest =
            Manifest::from_path(&project_dir.join(stagehand_util::fs::MANIFEST_FILENAME))?;
        manifest.validate()?;

        let props = properties::load_properties(
            &project_dir.join(properties::PROPERTIES_FILENAME),
        )?;

        let out_dir = project_dir.join(&manifest.package_section().output_dir);

        Ok(Self {
            project_dir,
            manifest,
            properties: props,
            out_dir,
        })
    }
}
