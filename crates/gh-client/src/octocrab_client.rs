//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! Endpoints octocrab has no typed model for (reviews, branch protection,
//! requested reviewers, workflow runs) go through raw GET requests into the
//! small response structs at the bottom of this file.

use crate::client::GitHubClient;
use crate::error::from_octocrab;
use crate::types::{
    BranchProtection, PullRequest, PullRequestState, RepositoryLabel, RequestedReviewers,
    Review, ReviewState,
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const PER_PAGE: u8 = 100;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        debug!("Fetching PR #{} for {}/{}", pr_number, owner, repo);

        let pr = self
            .octocrab
            .pulls(owner, repo)
            .get(pr_number)
            .await
            .map_err(from_octocrab)
            .with_context(|| format!("Failed to fetch PR #{} in {}/{}", pr_number, owner, repo))?;

        Ok(convert_pull_request(&pr))
    }

    async fn search_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> anyhow::Result<Vec<u64>> {
        let query = format!("sha:{} is:pr is:open repo:{}/{}", commit_sha, owner, repo);
        debug!("Searching pull requests: {}", query);

        let page = self
            .octocrab
            .search()
            .issues_and_pull_requests(&query)
            .per_page(PER_PAGE)
            .send()
            .await
            .map_err(from_octocrab)
            .context("Failed to search pull requests")?;

        let numbers: Vec<u64> = page.items.iter().map(|issue| issue.number).collect();
        debug!(
            "Found {} open PR(s) for {} in {}/{}",
            numbers.len(),
            commit_sha,
            owner,
            repo
        );
        Ok(numbers)
    }

    async fn fetch_workflow_run_head_sha(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> anyhow::Result<Option<String>> {
        debug!("Fetching workflow run {} for {}/{}", run_id, owner, repo);

        let route = format!("/repos/{}/{}/actions/runs/{}", owner, repo, run_id);
        let run: RawWorkflowRun = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .map_err(from_octocrab)
            .with_context(|| format!("Failed to fetch workflow run {}", run_id))?;

        Ok(run.head_sha.filter(|sha| !sha.is_empty()))
    }

    async fn fetch_reviews(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<Review>> {
        debug!("Fetching reviews for PR #{} in {}/{}", pr_number, owner, repo);

        let route = format!("/repos/{}/{}/pulls/{}/reviews", owner, repo, pr_number);
        let mut reviews = Vec::new();
        let mut page = 1u32;

        loop {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<RawReview> = self
                .octocrab
                .get(&route, Some(&params))
                .await
                .map_err(from_octocrab)
                .with_context(|| format!("Failed to fetch reviews for PR #{}", pr_number))?;

            let last_page = batch.len() < PER_PAGE as usize;
            reviews.extend(batch.into_iter().map(convert_review));

            if last_page {
                break;
            }
            page += 1;
        }

        debug!("Fetched {} reviews for PR #{}", reviews.len(), pr_number);
        Ok(reviews)
    }

    async fn fetch_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> anyhow::Result<BranchProtection> {
        debug!("Fetching branch protection for {}/{}@{}", owner, repo, branch);

        let route = format!(
            "/repos/{}/{}/branches/{}/protection",
            owner,
            repo,
            urlencoding::encode(branch)
        );
        let protection: BranchProtection = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .map_err(from_octocrab)
            .with_context(|| format!("Failed to fetch branch protection for {}", branch))?;

        Ok(protection)
    }

    async fn fetch_requested_reviewers(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<RequestedReviewers> {
        let route = format!(
            "/repos/{}/{}/pulls/{}/requested_reviewers",
            owner, repo, pr_number
        );
        let requested: RawRequestedReviewers = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .map_err(from_octocrab)
            .with_context(|| {
                format!("Failed to fetch requested reviewers for PR #{}", pr_number)
            })?;

        Ok(RequestedReviewers {
            users: requested.users.len(),
            teams: requested.teams.len(),
        })
    }

    async fn fetch_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> anyhow::Result<RepositoryLabel> {
        let route = format!(
            "/repos/{}/{}/labels/{}",
            owner,
            repo,
            urlencoding::encode(name)
        );
        let label: octocrab::models::Label = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .map_err(from_octocrab)?;

        Ok(RepositoryLabel {
            name: label.name,
            color: label.color,
            description: label.description,
        })
    }

    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
        description: &str,
    ) -> anyhow::Result<()> {
        debug!("Creating label '{}' in {}/{}", name, owner, repo);

        self.octocrab
            .issues(owner, repo)
            .create_label(name, color, description)
            .await
            .map_err(from_octocrab)?;

        Ok(())
    }

    async fn add_label(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        name: &str,
    ) -> anyhow::Result<()> {
        debug!("Adding label '{}' to PR #{}", name, pr_number);

        self.octocrab
            .issues(owner, repo)
            .add_labels(pr_number, &[name.to_string()])
            .await
            .map_err(from_octocrab)?;

        Ok(())
    }

    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        name: &str,
    ) -> anyhow::Result<()> {
        debug!("Removing label '{}' from PR #{}", name, pr_number);

        let route = format!(
            "/repos/{}/{}/issues/{}/labels/{}",
            owner,
            repo,
            pr_number,
            urlencoding::encode(name)
        );
        let _remaining: Vec<octocrab::models::Label> = self
            .octocrab
            .delete(route, None::<&()>)
            .await
            .map_err(from_octocrab)?;

        Ok(())
    }
}

/// Convert octocrab PullRequest to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    let state = match pr.state {
        Some(octocrab::models::IssueState::Closed) => PullRequestState::Closed,
        _ => PullRequestState::Open,
    };

    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        draft: pr.draft.unwrap_or(false),
        state,
        merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
        head_sha: pr.head.sha.clone(),
        base_branch: pr.base.ref_field.clone(),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
    }
}

fn convert_review(review: RawReview) -> Review {
    Review {
        id: review.id,
        reviewer_id: review.user.map(|u| u.id),
        state: review.state,
        commit_id: review.commit_id,
        submitted_at: review.submitted_at,
    }
}

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    id: u64,
    #[serde(default)]
    user: Option<RawUser>,
    state: ReviewState,
    #[serde(default)]
    commit_id: Option<String>,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RawRequestedReviewers {
    #[serde(default)]
    users: Vec<serde_json::Value>,
    #[serde(default)]
    teams: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawWorkflowRun {
    #[serde(default)]
    head_sha: Option<String>,
}
