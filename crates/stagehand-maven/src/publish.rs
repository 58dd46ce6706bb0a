//! Deploying a publication to a staging repository.
//!
//! Uploads the artifact set plus descriptor file by file: each artifact and
//! the POM, immediately followed by their checksum sidecars, then the
//! detached signatures. Any failed file fails the publication — there is no
//! partial-success state.

use reqwest::Client;

use crate::checksum::ChecksumSet;
use crate::repository::StagingRepository;
use crate::types::{Publication, UploadReport, UploadedFile};
use crate::upload;
use stagehand_util::errors::StagehandError;
use stagehand_util::progress;

/// Deploy every file of `publication` to `repo`, reporting per-file results.
pub async fn deploy(
    client: &Client,
    repo: &StagingRepository,
    publication: &Publication,
) -> miette::Result<UploadReport> {
    let snapshot = publication.is_snapshot();
    let mut report = UploadReport {
        repository_url: repo.deploy_base(snapshot).to_string(),
        files: Vec::new(),
    };

    // Artifacts first, then the descriptor, each with its sidecars.
    for artifact in &publication.artifacts {
        let remote = artifact.remote_name(&publication.artifact_id, &publication.version);
        upload_with_sidecars(client, repo, publication, &artifact.path, &remote, &mut report)
            .await?;
    }

    let pom_remote = publication.pom_remote_name();
    upload_with_sidecars(
        client,
        repo,
        publication,
        &publication.pom_path,
        &pom_remote,
        &mut report,
    )
    .await?;

    // Detached signatures last; no sidecars for these.
    for sig in &publication.signatures {
        let remote = sig.remote_name();
        let bytes = read_file(&sig.path)?;
        let url = file_url(repo, publication, &remote, snapshot);
        let size = bytes.len() as u64;
        upload::put_bytes(client, repo, &url, bytes).await?;
        report.files.push(UploadedFile {
            remote_name: remote,
            bytes: size,
        });
    }

    Ok(report)
}

async fn upload_with_sidecars(
    client: &Client,
    repo: &StagingRepository,
    publication: &Publication,
    local: &std::path::Path,
    remote: &str,
    report: &mut UploadReport,
) -> miette::Result<()> {
    let snapshot = publication.is_snapshot();
    let bytes = read_file(local)?;
    let checksums = ChecksumSet::compute(&bytes);
    let size = bytes.len() as u64;

    progress::status("Uploading", remote);
    let url = file_url(repo, publication, remote, snapshot);
    upload::put_bytes(client, repo, &url, bytes).await?;
    report.files.push(UploadedFile {
        remote_name: remote.to_string(),
        bytes: size,
    });

    for (ext, value) in checksums.sidecars() {
        let sidecar_remote = format!("{remote}.{ext}");
        let sidecar_url = file_url(repo, publication, &sidecar_remote, snapshot);
        upload::put_bytes(client, repo, &sidecar_url, value.as_bytes().to_vec()).await?;
        report.files.push(UploadedFile {
            remote_name: sidecar_remote,
            bytes: value.len() as u64,
        });
    }

    Ok(())
}

fn file_url(
    repo: &StagingRepository,
    publication: &Publication,
    filename: &str,
    snapshot: bool,
) -> String {
    repo.file_url(
        &publication.group_id,
        &publication.artifact_id,
        &publication.version,
        filename,
        snapshot,
    )
}

fn read_file(path: &std::path::Path) -> miette::Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        StagehandError::Packaging {
            message: format!("Failed to read {}: {e}", path.display()),
        }
        .into()
    })
}
