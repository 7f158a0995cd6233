//! In-memory `GitHubClient` for tests

use async_trait::async_trait;
use gh_client::{
    ApiError, BranchProtection, GitHubClient, PullRequest, PullRequestState, RepositoryLabel,
    RequestedReviewers, RequiredPullRequestReviews, Review,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateLabel(String),
    AddLabel(u64, String),
    RemoveLabel(u64, String),
}

/// Mock client for testing
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    pull_requests: HashMap<u64, PullRequest>,
    search_results: HashMap<String, Vec<u64>>,
    workflow_runs: HashMap<u64, Option<String>>,
    reviews: Vec<Review>,
    protection: Option<BranchProtection>,
    protection_status: Option<u16>,
    requested: RequestedReviewers,
    existing_labels: Vec<String>,
    add_label_status: Option<u16>,
    remove_label_status: Option<u16>,
    create_label_status: Option<u16>,
    calls: Arc<Mutex<Vec<Call>>>,
    reads: Arc<Mutex<Vec<&'static str>>>,
}

pub fn pull_request(number: u64) -> PullRequest {
    PullRequest {
        number,
        title: "Add feature".to_string(),
        draft: false,
        state: PullRequestState::Open,
        merged: false,
        head_sha: "abc".to_string(),
        base_branch: "main".to_string(),
        labels: vec![],
    }
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull_request(mut self, pr: PullRequest) -> Self {
        self.pull_requests.insert(pr.number, pr);
        self
    }

    pub fn with_search_result(mut self, sha: &str, numbers: Vec<u64>) -> Self {
        self.search_results.insert(sha.to_string(), numbers);
        self
    }

    pub fn with_workflow_run(mut self, run_id: u64, head_sha: Option<&str>) -> Self {
        self.workflow_runs
            .insert(run_id, head_sha.map(|s| s.to_string()));
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    pub fn with_required_approvals(mut self, count: Option<u32>) -> Self {
        self.protection = Some(BranchProtection {
            required_pull_request_reviews: Some(RequiredPullRequestReviews {
                required_approving_review_count: count,
            }),
        });
        self
    }

    pub fn with_protection(mut self, protection: BranchProtection) -> Self {
        self.protection = Some(protection);
        self
    }

    pub fn fail_protection(mut self, status: u16) -> Self {
        self.protection_status = Some(status);
        self
    }

    pub fn with_requested(mut self, users: usize, teams: usize) -> Self {
        self.requested = RequestedReviewers { users, teams };
        self
    }

    pub fn with_existing_labels(mut self, names: &[&str]) -> Self {
        self.existing_labels = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn fail_add_label(mut self, status: u16) -> Self {
        self.add_label_status = Some(status);
        self
    }

    pub fn fail_remove_label(mut self, status: u16) -> Self {
        self.remove_label_status = Some(status);
        self
    }

    pub fn fail_create_label(mut self, status: u16) -> Self {
        self.create_label_status = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn label_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::CreateLabel(_)))
            .collect()
    }

    pub fn created_labels(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateLabel(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Names of the read endpoints that were hit, in call order
    pub fn reads(&self) -> Vec<&'static str> {
        self.reads.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn read(&self, endpoint: &'static str) {
        self.reads.lock().unwrap().push(endpoint);
    }
}

fn status_error(status: u16) -> anyhow::Error {
    ApiError::new(status, "mock failure").into()
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn fetch_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        self.read("pull_request");
        self.pull_requests
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| status_error(ApiError::NOT_FOUND))
    }

    async fn search_open_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        commit_sha: &str,
    ) -> anyhow::Result<Vec<u64>> {
        self.read("search");
        Ok(self
            .search_results
            .get(commit_sha)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_workflow_run_head_sha(
        &self,
        _owner: &str,
        _repo: &str,
        run_id: u64,
    ) -> anyhow::Result<Option<String>> {
        self.read("workflow_run");
        self.workflow_runs
            .get(&run_id)
            .cloned()
            .ok_or_else(|| status_error(ApiError::NOT_FOUND))
    }

    async fn fetch_reviews(
        &self,
        _owner: &str,
        _repo: &str,
        _pr_number: u64,
    ) -> anyhow::Result<Vec<Review>> {
        self.read("reviews");
        Ok(self.reviews.clone())
    }

    async fn fetch_branch_protection(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
    ) -> anyhow::Result<BranchProtection> {
        self.read("branch_protection");
        if let Some(status) = self.protection_status {
            return Err(status_error(status));
        }
        self.protection
            .clone()
            .ok_or_else(|| status_error(ApiError::NOT_FOUND))
    }

    async fn fetch_requested_reviewers(
        &self,
        _owner: &str,
        _repo: &str,
        _pr_number: u64,
    ) -> anyhow::Result<RequestedReviewers> {
        self.read("requested_reviewers");
        Ok(self.requested)
    }

    async fn fetch_label(
        &self,
        _owner: &str,
        _repo: &str,
        name: &str,
    ) -> anyhow::Result<RepositoryLabel> {
        if self.existing_labels.iter().any(|l| l == name) {
            Ok(RepositoryLabel {
                name: name.to_string(),
                color: "ffffff".to_string(),
                description: None,
            })
        } else {
            Err(status_error(ApiError::NOT_FOUND))
        }
    }

    async fn create_label(
        &self,
        _owner: &str,
        _repo: &str,
        name: &str,
        _color: &str,
        _description: &str,
    ) -> anyhow::Result<()> {
        self.record(Call::CreateLabel(name.to_string()));
        match self.create_label_status {
            Some(status) => Err(status_error(status)),
            None => Ok(()),
        }
    }

    async fn add_label(
        &self,
        _owner: &str,
        _repo: &str,
        pr_number: u64,
        name: &str,
    ) -> anyhow::Result<()> {
        self.record(Call::AddLabel(pr_number, name.to_string()));
        match self.add_label_status {
            Some(status) => Err(status_error(status)),
            None => Ok(()),
        }
    }

    async fn remove_label(
        &self,
        _owner: &str,
        _repo: &str,
        pr_number: u64,
        name: &str,
    ) -> anyhow::Result<()> {
        self.record(Call::RemoveLabel(pr_number, name.to_string()));
        match self.remove_label_status {
            Some(status) => Err(status_error(status)),
            None => Ok(()),
        }
    }
}
