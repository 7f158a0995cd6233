//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy. Everything the labeler needs from GitHub
//! goes through this seam, so the state machine can be exercised against
//! an in-memory client in tests.

use crate::types::{
    BranchProtection, PullRequest, RepositoryLabel, RequestedReviewers, Review,
};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the interface for interacting with the GitHub API.
/// Non-2xx responses are reported as [`crate::ApiError`] wrapped in the
/// returned `anyhow::Error`, so callers can decide which statuses they
/// tolerate.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, Review};
///
/// async fn reviews(client: &dyn GitHubClient) -> anyhow::Result<Vec<Review>> {
///     client.fetch_reviews("rust-lang", "rust", 42).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    // === Pull Requests ===

    /// Fetch a single pull request by number
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    ///
    /// # Returns
    ///
    /// The pull request details, or an error if not found.
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest>;

    /// Search open pull requests of a repository containing a commit
    ///
    /// # Returns
    ///
    /// The numbers of all matching open pull requests.
    async fn search_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        commit_sha: &str,
    ) -> anyhow::Result<Vec<u64>>;

    /// Fetch the head commit of a workflow run
    ///
    /// Returns `None` if the run exists but carries no head SHA.
    async fn fetch_workflow_run_head_sha(
        &self,
        owner: &str,
        repo: &str,
        run_id: u64,
    ) -> anyhow::Result<Option<String>>;

    // === Reviews ===

    /// Fetch every review of a pull request (all pages)
    async fn fetch_reviews(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<Review>>;

    /// Fetch the branch protection rule of a branch
    ///
    /// # Errors
    ///
    /// GitHub answers 404 when the branch is not protected and 403 when
    /// the token lacks administration permission.
    async fn fetch_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> anyhow::Result<BranchProtection>;

    /// Fetch users and teams still requested to review a pull request
    async fn fetch_requested_reviewers(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<RequestedReviewers>;

    // === Labels ===

    /// Fetch a repository label by name (404 if it does not exist)
    async fn fetch_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
    ) -> anyhow::Result<RepositoryLabel>;

    /// Create a repository label
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `name` - Label name
    /// * `color` - Hex color without leading `#`
    /// * `description` - Label description
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
        description: &str,
    ) -> anyhow::Result<()>;

    /// Attach a label to a pull request
    async fn add_label(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        name: &str,
    ) -> anyhow::Result<()>;

    /// Detach a label from a pull request (404 if it is not attached)
    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        name: &str,
    ) -> anyhow::Result<()>;
}
