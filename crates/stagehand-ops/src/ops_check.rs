//! Operation: license header compliance.
//!
//! The `HEADER` file at the project root holds the raw license text. Source
//! files must begin with that text rendered as a slash-star comment. The
//! check walks the configured include/exclude globs and lists every file
//! missing the header; `--apply` prepends it instead.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use stagehand_util::errors::StagehandError;
use stagehand_util::progress::{status, status_warn};

use crate::PublishContext;

/// Options for a check invocation.
#[derive(Default)]
pub struct CheckOptions {
    /// Prepend the header to non-conforming files instead of just reporting.
    pub apply: bool,
}

/// Outcome of a header check.
pub struct CheckReport {
    pub checked: usize,
    /// Files missing the header (relative to the project root).
    pub violations: Vec<PathBuf>,
    pub applied: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Render raw header text as a slash-star comment block.
///
/// Trailing whitespace is trimmed per line so blank header lines become a
/// bare ` *`.
pub fn render_header(header: &str) -> String {
    let mut out = String::from("/*\n");
    for line in header.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */\n");
    out
}

/// Whether a source file body starts with the rendered header.
pub fn has_header(content: &str, rendered: &str) -> bool {
    content.starts_with(rendered)
}

/// Run the license header check for a loaded project.
pub fn check(ctx: &PublishContext, opts: &CheckOptions) -> miette::Result<CheckReport> {
    let section = ctx.manifest.check_section();

    let header_path = ctx.project_dir.join(&section.header);
    let header = std::fs::read_to_string(&header_path).map_err(|e| StagehandError::Config {
        message: format!(
            "Failed to read license header {}: {e}",
            header_path.display()
        ),
    })?;
    let rendered = render_header(&header);

    let include = build_globset(&section.include)?;
    let exclude = build_globset(&section.exclude)?;

    let mut files = Vec::new();
    collect_matching(&ctx.project_dir, &ctx.project_dir, &include, &exclude, &mut files);
    files.sort();

    let mut report = CheckReport {
        checked: files.len(),
        violations: Vec::new(),
        applied: 0,
    };

    for file in files {
        let content = std::fs::read_to_string(&file).map_err(StagehandError::Io)?;
        if has_header(&content, &rendered) {
            continue;
        }
        let rel = file
            .strip_prefix(&ctx.project_dir)
            .unwrap_or(&file)
            .to_path_buf();
        if opts.apply {
            let mut updated = rendered.clone();
            updated.push('\n');
            updated.push_str(&content);
            std::fs::write(&file, updated).map_err(StagehandError::Io)?;
            status("Applied", &rel.display().to_string());
            report.applied += 1;
        } else {
            status_warn("Missing", &rel.display().to_string());
            report.violations.push(rel);
        }
    }

    Ok(report)
}

fn build_globset(patterns: &[String]) -> miette::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| StagehandError::Config {
            message: format!("Invalid glob pattern `{pattern}`: {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        StagehandError::Config {
            message: format!("Failed to build glob set: {e}"),
        }
        .into()
    })
}

fn collect_matching(
    dir: &Path,
    root: &Path,
    include: &GlobSet,
    exclude: &GlobSet,
    files: &mut Vec<PathBuf>,
) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        // Skip VCS metadata and build output.
        if path.is_dir() {
            if name == ".git" || name == "target" {
                continue;
            }
            collect_matching(&path, root, include, exclude, files);
            continue;
        }
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        if include.is_match(rel) && !exclude.is_match(rel) {
            files.push(path);
        }
    }
}
