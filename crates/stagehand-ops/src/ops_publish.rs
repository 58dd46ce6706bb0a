//! Operation: the full publication pipeline.
//!
//! Walks the per-invocation state machine `configured -> packaged ->
//! signed -> uploaded`. Configuration problems — invalid manifest, missing
//! repository credentials, required-but-absent key material — fail while
//! still in the configured state, before any packaging work or network
//! call. Later failures are terminal; there are no retries and no
//! partial-success state.

use std::path::{Path, PathBuf};

use stagehand_core::credentials::{self, REPOSITORY_PASSWORD, REPOSITORY_USERNAME};
use stagehand_maven::repository::StagingRepository;
use stagehand_maven::types::{Publication, UploadReport};
use stagehand_maven::{pom, publish as deploy, upload};
use stagehand_util::errors::StagehandError;
use stagehand_util::progress::status;

use crate::ops_package::{self, PackageOptions};
use crate::ops_sign;
use crate::PublishContext;

/// Pipeline states, in order. Failure is terminal from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Configured,
    Packaged,
    Signed,
    Uploaded,
}

impl std::fmt::Display for PublishState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Configured => "configured",
            Self::Packaged => "packaged",
            Self::Signed => "signed",
            Self::Uploaded => "uploaded",
        };
        f.write_str(s)
    }
}

/// Options for a publish invocation.
#[derive(Default)]
pub struct PublishOptions {
    /// Stop after signing; no network calls.
    pub dry_run: bool,
    /// Use an existing classes directory instead of invoking `javac`.
    pub classes_dir: Option<PathBuf>,
}

/// What a publish run produced.
#[derive(Debug)]
pub struct PublishSummary {
    pub state: PublishState,
    pub artifacts: Vec<PathBuf>,
    pub signature_count: usize,
    pub report: Option<UploadReport>,
}

/// Run the full pipeline for the project at (or above) `start_dir`.
pub async fn publish(start_dir: &Path, opts: &PublishOptions) -> miette::Result<PublishSummary> {
    let ctx = PublishContext::load(start_dir)?;
    let mut state = PublishState::Configured;
    tracing::debug!(%state, "pipeline state");

    // Preflight: resolve repository credentials and key material while
    // still configured, so a misconfigured publish does no work at all.
    let repository = if opts.dry_run {
        None
    } else {
        Some(resolve_repository(&ctx)?)
    };
    let key_material = ops_sign::resolve_key_material(&ctx)?;

    // Packaging.
    let pkg = ops_package::package(
        &ctx,
        &PackageOptions {
            classes_dir: opts.classes_dir.clone(),
            quiet: false,
        },
    )?;
    state = PublishState::Packaged;
    tracing::debug!(%state, "pipeline state");

    // Descriptor.
    let project = &ctx.manifest.project;
    let pom_xml = pom::generate(&ctx.manifest)?;
    let pom_path = pkg
        .out_dir
        .join(format!("{}-{}.pom", project.name, project.version));
    std::fs::write(&pom_path, &pom_xml).map_err(StagehandError::Io)?;

    // Signing.
    let mut to_sign: Vec<PathBuf> = pkg.artifacts.iter().map(|a| a.path.clone()).collect();
    to_sign.push(pom_path.clone());
    let signatures = match key_material {
        Some(ref key) => ops_sign::sign_files(key, &to_sign)?,
        None => Vec::new(),
    };
    let signature_count = signatures.len();
    state = PublishState::Signed;
    tracing::debug!(%state, "pipeline state");

    let artifact_paths: Vec<PathBuf> = pkg.artifacts.iter().map(|a| a.path.clone()).collect();
    let publication = Publication {
        group_id: project.group.clone(),
        artifact_id: project.name.clone(),
        version: project.version.clone(),
        pom_path,
        artifacts: pkg.artifacts,
        signatures,
    };

    if opts.dry_run {
        status(
            "Finished",
            &format!(
                "dry run: {} artifact(s), {} signature(s), upload skipped",
                publication.artifacts.len(),
                signature_count
            ),
        );
        return Ok(PublishSummary {
            state,
            artifacts: artifact_paths,
            signature_count,
            report: None,
        });
    }

    // Upload.
    let repository = repository.expect("resolved during preflight");
    let client = upload::build_client()?;
    let report = deploy::deploy(&client, &repository, &publication).await?;
    state = PublishState::Uploaded;
    tracing::debug!(%state, "pipeline state");

    status(
        "Published",
        &format!(
            "{} v{} ({} file(s) to {})",
            project.name,
            project.version,
            report.files.len(),
            report.repository_url
        ),
    );

    Ok(PublishSummary {
        state,
        artifacts: artifact_paths,
        signature_count,
        report: Some(report),
    })
}

/// Build the deploy target from the manifest (defaulting to Sonatype) and
/// attach credentials: explicit `[repository]` values win, then the
/// property/environment resolver, then a configuration error.
fn resolve_repository(ctx: &PublishContext) -> miette::Result<StagingRepository> {
    let repo = match ctx.manifest.repository {
        Some(ref section) => StagingRepository::from_section(section),
        None => StagingRepository::sonatype(),
    };

    let username = match repo.username {
        Some(ref explicit) if !explicit.is_empty() => explicit.clone(),
        _ => credentials::require(&ctx.properties, &REPOSITORY_USERNAME)?.value,
    };
    let password = match repo.password {
        Some(ref explicit) if !explicit.is_empty() => explicit.clone(),
        _ => credentials::require(&ctx.properties, &REPOSITORY_PASSWORD)?.value,
    };

    Ok(repo.with_credentials(username, password))
}
