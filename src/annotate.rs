use tracing::{error, info};

use crate::artifact::Artifact;
use crate::config::Config;
use crate::error::Result;
use crate::github::{GitHubClient, PullRequest};

/// Run the full annotation sequence: load the artifact, resolve the target
/// pull request, publish the comment(s).
pub fn run(client: &dyn GitHubClient, config: &Config) -> Result<()> {
    let artifact = Artifact::load(&config.artifact_dir)?;
    let pr = resolve_pull_request(client, &config.repo, &artifact)?;
    publish_comments(client, config, &pr, &artifact)
}

/// Resolve the pull request the artifact points at.
///
/// Client errors are logged with the attempted identifiers and propagated
/// unchanged.
pub fn resolve_pull_request(
    client: &dyn GitHubClient,
    repo: &str,
    artifact: &Artifact,
) -> Result<PullRequest> {
    let number = artifact.pr_number()?;
    info!(pr_number = number, "resolving target pull request");

    let repository = match client.get_repository(repo) {
        Ok(r) => r,
        Err(e) => {
            error!(repo, error = %e, "failed to fetch repository");
            return Err(e);
        }
    };

    match client.get_pull_request(&repository.full_name, number) {
        Ok(pr) => {
            info!(pr_number = pr.number, url = %pr.html_url, "found pull request");
            Ok(pr)
        }
        Err(e) => {
            error!(pr_number = number, error = %e, "failed to fetch pull request");
            Err(e)
        }
    }
}

/// Post the comment bodies to the pull request: plan output first when the
/// run type asks for it, full artifact dump always last.
///
/// Posting is not transactional; comments created before a failure stay up.
pub fn publish_comments(
    client: &dyn GitHubClient,
    config: &Config,
    pr: &PullRequest,
    artifact: &Artifact,
) -> Result<()> {
    let mut comments = Vec::new();
    if config.is_plan_run() {
        comments.push(artifact.plan_output_markdown()?);
    }
    comments.push(artifact.to_markdown()?);

    for body in &comments {
        if config.dry_run {
            info!(pr_number = pr.number, bytes = body.len(), "dry run, skipping comment");
            continue;
        }
        if let Err(e) = client.create_issue_comment(&config.repo, pr.number, body) {
            error!(pr_number = pr.number, error = %e, "failed to add comment");
            return Err(e);
        }
        info!(pr_number = pr.number, "added comment");
    }

    Ok(())
}
