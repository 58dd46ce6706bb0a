//! Pom command: print or write the generated descriptor.

use std::path::Path;

use miette::Result;

use stagehand_maven::pom;
use stagehand_ops::PublishContext;
use stagehand_util::errors::StagehandError;
use stagehand_util::progress::status;

pub fn exec(out: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(StagehandError::Io)?;
    let ctx = PublishContext::load(&cwd)?;

    let xml = pom::generate(&ctx.manifest)?;
    match out {
        Some(path) => {
            std::fs::write(path, &xml).map_err(StagehandError::Io)?;
            status("Wrote", &path.display().to_string());
        }
        None => print!("{xml}"),
    }
    Ok(())
}
