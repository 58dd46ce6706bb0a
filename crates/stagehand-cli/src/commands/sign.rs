//! Sign command: detached signatures for an already-packaged artifact set.

use std::path::PathBuf;

use miette::Result;

use stagehand_ops::{ops_sign, PublishContext};
use stagehand_util::errors::StagehandError;

pub fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(StagehandError::Io)?;
    let ctx = PublishContext::load(&cwd)?;

    let project = &ctx.manifest.project;
    let stem = format!("{}-{}", project.name, project.version);
    let expected = [
        format!("{stem}.jar"),
        format!("{stem}-sources.jar"),
        format!("{stem}-javadoc.jar"),
        format!("{stem}.pom"),
    ];

    let mut files: Vec<PathBuf> = Vec::new();
    for name in &expected {
        let path = ctx.out_dir.join(name);
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(StagehandError::Signing {
            message: format!(
                "nothing to sign in {} (run `stagehand package` first)",
                ctx.out_dir.display()
            ),
        }
        .into());
    }

    let result = ops_sign::sign_artifacts(&ctx, &files)?;
    if result.skipped {
        println!("Signing skipped ({} file(s) untouched)", files.len());
    } else {
        println!("Signed {} file(s)", result.signatures.len());
    }
    Ok(())
}
