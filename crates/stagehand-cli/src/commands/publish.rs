//! Publish command implementation.

use std::path::PathBuf;

use miette::Result;

use stagehand_ops::ops_publish::{self, PublishOptions};
use stagehand_util::errors::StagehandError;

pub async fn exec(dry_run: bool, classes_dir: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(StagehandError::Io)?;

    let summary = ops_publish::publish(
        &cwd,
        &PublishOptions {
            dry_run,
            classes_dir,
        },
    )
    .await?;

    match summary.report {
        Some(report) => println!(
            "Published {} file(s) ({} bytes) to {}",
            report.files.len(),
            report.total_bytes(),
            report.repository_url
        ),
        None => println!(
            "Dry run complete: {} artifact(s), {} signature(s)",
            summary.artifacts.len(),
            summary.signature_count
        ),
    }
    Ok(())
}
