//! Locating the pull request a run is about

use crate::error::LabelerError;
use crate::trigger::{EventPayload, TriggerEvent, TriggerKind};
use anyhow::Context;
use gh_client::{GitHubClient, PullRequest};
use log::{debug, info};
use pr_labeler_config::RepositoryRef;

/// Fetch the pull request referenced by the triggering event
///
/// Pull request and review events carry the number in their payload; the
/// pull request is fetched again so labels and head commit are current.
/// Workflow runs only know their head commit, which must belong to exactly
/// one open pull request.
pub async fn resolve_pull_request(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    trigger: &TriggerEvent,
    payload: &EventPayload,
    workflow_run_id: Option<u64>,
) -> anyhow::Result<PullRequest> {
    if trigger.kind() == Some(TriggerKind::WorkflowRun) {
        return pull_request_for_workflow_run(client, repository, payload, workflow_run_id).await;
    }

    let number = payload
        .pull_request_number()
        .ok_or_else(|| LabelerError::MissingPullRequest {
            event: trigger.to_string(),
        })?;

    client
        .fetch_pull_request(&repository.owner, &repository.repo, number)
        .await
}

async fn pull_request_for_workflow_run(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    payload: &EventPayload,
    workflow_run_id: Option<u64>,
) -> anyhow::Result<PullRequest> {
    let sha = workflow_run_head_sha(client, repository, payload, workflow_run_id).await?;
    info!("Finding pull request for commit {} in {}", sha, repository);

    let numbers = client
        .search_open_pull_requests(&repository.owner, &repository.repo, &sha)
        .await?;

    let number = match numbers.as_slice() {
        [] => return Err(LabelerError::NoMatchingPullRequest { sha }.into()),
        [number] => *number,
        more => {
            return Err(LabelerError::AmbiguousSourceCommit {
                sha,
                count: more.len(),
            }
            .into())
        }
    };

    let pr = client
        .fetch_pull_request(&repository.owner, &repository.repo, number)
        .await
        .with_context(|| format!("PR {} found for commit {} could not be fetched", number, sha))?;

    if pr.merged {
        return Err(LabelerError::AlreadyMerged { number }.into());
    }

    Ok(pr)
}

/// Head commit of the run named by `WORKFLOW_ID`, else the one from the payload
async fn workflow_run_head_sha(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    payload: &EventPayload,
    workflow_run_id: Option<u64>,
) -> anyhow::Result<String> {
    let run = payload.workflow_run.as_ref();

    if let Some(run_id) = workflow_run_id {
        return fetch_head_sha(client, repository, run_id).await;
    }

    if let Some(sha) = run.and_then(|r| r.head_sha.clone()).filter(|s| !s.is_empty()) {
        debug!("Using head commit {} from the event payload", sha);
        return Ok(sha);
    }

    let run_id = run
        .and_then(|r| r.id)
        .ok_or(LabelerError::MissingWorkflowRun)?;
    fetch_head_sha(client, repository, run_id).await
}

async fn fetch_head_sha(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    run_id: u64,
) -> anyhow::Result<String> {
    client
        .fetch_workflow_run_head_sha(&repository.owner, &repository.repo, run_id)
        .await?
        .ok_or_else(|| LabelerError::MissingHeadSha { run_id }.into())
}
