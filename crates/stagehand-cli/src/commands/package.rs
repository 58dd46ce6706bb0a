//! Package command implementation.

use std::path::PathBuf;

use miette::Result;

use stagehand_ops::ops_package::{self, PackageOptions};
use stagehand_ops::PublishContext;
use stagehand_util::errors::StagehandError;

pub fn exec(classes_dir: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(StagehandError::Io)?;
    let ctx = PublishContext::load(&cwd)?;

    let result = ops_package::package(
        &ctx,
        &PackageOptions {
            classes_dir,
            quiet: false,
        },
    )?;

    println!(
        "Packaged {} artifact(s) into {}",
        result.artifacts.len(),
        result.out_dir.display()
    );
    Ok(())
}
