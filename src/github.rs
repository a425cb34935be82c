use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("prnote/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

/// Abstraction over the GitHub REST API for testability.
pub trait GitHubClient {
    fn get_repository(&self, repo: &str) -> Result<Repository>;

    fn get_pull_request(&self, repo: &str, number: u64) -> Result<PullRequest>;

    fn create_issue_comment(&self, repo: &str, number: u64, body: &str) -> Result<()>;
}

/// Real client speaking to api.github.com with a bearer token.
///
/// One attempt per call: transient-failure handling is left to the calling
/// workflow, which reruns the whole job.
pub struct DefaultGitHubClient {
    token: String,
}

impl DefaultGitHubClient {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, not_found: String) -> Result<T> {
        match ureq::get(&format!("{GITHUB_API_URL}{path}"))
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .call()
        {
            Ok(response) => response
                .into_json()
                .map_err(|e| Error::Api(format!("failed to parse GitHub response: {e}"))),
            Err(ureq::Error::Status(404, _)) => Err(Error::Lookup(not_found)),
            Err(e) => Err(Error::Api(format!("GitHub API request failed: {e}"))),
        }
    }
}

impl GitHubClient for DefaultGitHubClient {
    fn get_repository(&self, repo: &str) -> Result<Repository> {
        self.get_json(
            &format!("/repos/{repo}"),
            format!("repository not found: {repo}"),
        )
    }

    fn get_pull_request(&self, repo: &str, number: u64) -> Result<PullRequest> {
        self.get_json(
            &format!("/repos/{repo}/pulls/{number}"),
            format!("no pull request found at id: {number}"),
        )
    }

    fn create_issue_comment(&self, repo: &str, number: u64, body: &str) -> Result<()> {
        let payload = serde_json::json!({ "body": body });
        match ureq::post(&format!(
            "{GITHUB_API_URL}/repos/{repo}/issues/{number}/comments"
        ))
        .set("Authorization", &format!("Bearer {}", self.token))
        .set("Accept", "application/vnd.github+json")
        .set("User-Agent", USER_AGENT)
        .send_json(&payload)
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(404, _)) => Err(Error::Lookup(format!(
                "no pull request found at id: {number}"
            ))),
            Err(e) => Err(Error::Api(format!("failed to create comment: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pull_request() {
        let json = r#"{
            "number": 42,
            "title": "Add widget support",
            "html_url": "https://github.com/owner/repo/pull/42",
            "state": "open",
            "user": {"login": "octocat"}
        }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.title, "Add widget support");
        assert_eq!(pr.html_url, "https://github.com/owner/repo/pull/42");
    }

    #[test]
    fn test_deserialize_repository() {
        let json = r#"{"full_name": "owner/repo", "private": false, "id": 123}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.full_name, "owner/repo");
    }
}
