//! Repository authentication for uploads.
//!
//! Credentials come from the `[repository]` section of `Publish.toml`
//! (username/password, typically `${env:...}` interpolated) or from the
//! `repositoryUsername`/`REPOSITORY_USERNAME` resolver pair. By the time a
//! request is built here, resolution has already happened; this module just
//! applies whatever the repository carries.

use reqwest::RequestBuilder;

use crate::repository::StagingRepository;

/// Apply authentication to a request if the repository has credentials.
pub fn apply_auth(request: RequestBuilder, repo: &StagingRepository) -> RequestBuilder {
    match (&repo.username, &repo.password) {
        (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
        (Some(user), None) => request.basic_auth(user, None::<&str>),
        (None, Some(token)) => request.bearer_auth(token),
        (None, None) => request,
    }
}
