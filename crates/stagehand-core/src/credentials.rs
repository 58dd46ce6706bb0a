//! Ordered credential resolution.
//!
//! Every credential the pipeline needs has a fixed pair of names: a build
//! property (looked up in `.stagehand.env`) and an environment variable.
//! The property always wins; the environment variable is the fallback.
//! Absence of both is an explicit "not found" that callers turn into a
//! configuration error when the credential is required, so a publish with
//! missing repository credentials fails before any packaging or network
//! work starts.

use std::collections::BTreeMap;

use stagehand_util::errors::StagehandError;

/// A credential's property name and its environment-variable fallback.
#[derive(Debug, Clone, Copy)]
pub struct CredentialKey {
    pub property: &'static str,
    pub env: &'static str,
}

/// Armored PGP private key used for detached signatures.
pub const SIGNING_KEY: CredentialKey = CredentialKey {
    property: "signingKey",
    env: "SIGNING_KEY",
};

/// Passphrase protecting [`SIGNING_KEY`].
pub const SIGNING_PASSWORD: CredentialKey = CredentialKey {
    property: "signingPassword",
    env: "SIGNING_PASSWORD",
};

/// Username for the staging repository.
pub const REPOSITORY_USERNAME: CredentialKey = CredentialKey {
    property: "repositoryUsername",
    env: "REPOSITORY_USERNAME",
};

/// Password for the staging repository.
pub const REPOSITORY_PASSWORD: CredentialKey = CredentialKey {
    property: "repositoryPassword",
    env: "REPOSITORY_PASSWORD",
};

/// Where a resolved credential value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Property,
    Environment,
}

/// A credential value together with its provenance.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub value: String,
    pub source: CredentialSource,
}

/// Resolve a credential: build property first, then environment variable.
///
/// Empty values are treated as absent so a blank line in `.stagehand.env`
/// does not mask a usable environment variable.
pub fn resolve(properties: &BTreeMap<String, String>, key: &CredentialKey) -> Option<Resolved> {
    if let Some(value) = properties.get(key.property) {
        if !value.is_empty() {
            tracing::debug!(property = key.property, "credential resolved from properties");
            return Some(Resolved {
                value: value.clone(),
                source: CredentialSource::Property,
            });
        }
    }
    match std::env::var(key.env) {
        Ok(value) if !value.is_empty() => {
            tracing::debug!(env = key.env, "credential resolved from environment");
            Some(Resolved {
                value,
                source: CredentialSource::Environment,
            })
        }
        _ => None,
    }
}

/// Like [`resolve`], but absence of both sources is a configuration error
/// naming the property and the environment variable.
pub fn require(
    properties: &BTreeMap<String, String>,
    key: &CredentialKey,
) -> miette::Result<Resolved> {
    resolve(properties, key).ok_or_else(|| {
        StagehandError::Config {
            message: format!(
                "missing credential: set `{}` in .stagehand.env or the {} environment variable",
                key.property, key.env
            ),
        }
        .into()
    })
}
