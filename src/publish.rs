//! Release publishing against a GitHub-compatible releases API.
//!
//! Publishing is the only networked side effect besides pushes. It sits
//! behind the [ReleasePublisher] trait so the orchestrator can be tested
//! without a live API.

use serde::Serialize;

use crate::error::{GitFlowError, Result};

/// Creates a release record for an already-pushed tag
pub trait ReleasePublisher: Send + Sync {
    fn create_release(&self, tag: &str, notes: &str) -> Result<()>;
}

#[derive(Serialize)]
struct ReleaseRequest<'a> {
    name: &'a str,
    tag_name: &'a str,
    draft: bool,
    prerelease: bool,
    body: &'a str,
    generate_release_notes: bool,
}

/// Publisher backed by the GitHub releases REST endpoint.
///
/// The API base URL is configurable for enterprise installs; the token is
/// sent as a bearer credential and never logged.
pub struct GitHubPublisher {
    client: reqwest::blocking::Client,
    api_url: String,
    repository: String,
    token: String,
}

impl GitHubPublisher {
    pub fn new(
        api_url: impl Into<String>,
        repository: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        GitHubPublisher {
            client: reqwest::blocking::Client::new(),
            api_url: api_url.into(),
            repository: repository.into(),
            token: token.into(),
        }
    }
}

impl ReleasePublisher for GitHubPublisher {
    fn create_release(&self, tag: &str, notes: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/releases",
            self.api_url.trim_end_matches('/'),
            self.repository
        );

        let request = ReleaseRequest {
            name: tag,
            tag_name: tag,
            draft: false,
            prerelease: false,
            body: notes,
            generate_release_notes: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "gitflow-release")
            .json(&request)
            .send()
            .map_err(|e| GitFlowError::publish(format!("Release API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GitFlowError::publish(format!(
                "Release API returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
