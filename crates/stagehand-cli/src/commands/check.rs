//! Check command: license header compliance.

use miette::Result;

use stagehand_ops::ops_check::{self, CheckOptions};
use stagehand_ops::PublishContext;
use stagehand_util::errors::StagehandError;

pub fn exec(apply: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(StagehandError::Io)?;
    let ctx = PublishContext::load(&cwd)?;

    let report = ops_check::check(&ctx, &CheckOptions { apply })?;

    if apply {
        println!(
            "Checked {} file(s), applied header to {}",
            report.checked, report.applied
        );
        return Ok(());
    }

    if report.is_clean() {
        println!("Checked {} file(s), all carry the license header", report.checked);
        Ok(())
    } else {
        Err(StagehandError::Config {
            message: format!(
                "{} of {} file(s) are missing the license header",
                report.violations.len(),
                report.checked
            ),
        }
        .into())
    }
}
