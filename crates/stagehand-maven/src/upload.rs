//! Authenticated artifact upload to a staging repository.
//!
//! Uploads are blocking `PUT`s with a single attempt each: a rejected file
//! fails the whole publication, and failures are terminal for the
//! invocation. Recoverable-looking statuses are not retried.

use std::time::Duration;

use reqwest::Client;

use crate::auth;
use crate::repository::StagingRepository;
use stagehand_util::errors::StagehandError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build a shared reqwest client for repository uploads.
pub fn build_client() -> miette::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent("stagehand/0.1")
        .build()
        .map_err(|e| {
            StagehandError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}

/// `PUT` raw bytes to an upload URL, with authentication.
///
/// Authorization failures (401/403) and repository rejections are reported
/// separately so the operator can tell bad credentials from a bad artifact.
pub async fn put_bytes(
    client: &Client,
    repo: &StagingRepository,
    url: &str,
    bytes: Vec<u8>,
) -> miette::Result<()> {
    let mut req = client.put(url).body(bytes);
    req = auth::apply_auth(req, repo);

    let resp = req.send().await.map_err(|e| StagehandError::Network {
        message: format!("Request to {url} failed: {e}"),
    })?;

    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(StagehandError::Network {
            message: format!("Repository rejected credentials (HTTP {status}) for {url}"),
        }
        .into());
    }
    if !status.is_success() {
        return Err(StagehandError::Network {
            message: format!("Repository rejected upload (HTTP {status}) for {url}"),
        }
        .into());
    }

    tracing::debug!(%url, "uploaded");
    Ok(())
}
