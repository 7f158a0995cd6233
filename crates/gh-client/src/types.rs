//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the labeler's domain models
//! to keep this crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request from the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// Whether the PR is a draft
    pub draft: bool,

    /// Open or closed
    pub state: PullRequestState,

    /// Whether the PR has been merged
    pub merged: bool,

    /// HEAD commit SHA
    pub head_sha: String,

    /// Base branch name (e.g., "main")
    pub base_branch: String,

    /// Names of the labels attached to the PR, in API order
    pub labels: Vec<String>,
}

/// Pull request state as reported by GitHub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    #[default]
    Open,
    Closed,
}

/// A submitted (or pending) review on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Review ID
    pub id: u64,

    /// Numeric ID of the reviewing user (absent for deleted accounts)
    pub reviewer_id: Option<u64>,

    /// Review outcome
    pub state: ReviewState,

    /// Commit the review was made against
    pub commit_id: Option<String>,

    /// Submission time (absent while the review is pending)
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Review outcome as reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    /// Any state this crate does not know about
    #[serde(other)]
    Unknown,
}

/// Branch protection rule for a single branch
///
/// Only the parts needed to compute the required number of approvals
/// are modelled. When the rule exists but does not require pull request
/// reviews, `required_pull_request_reviews` is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchProtection {
    #[serde(default)]
    pub required_pull_request_reviews: Option<RequiredPullRequestReviews>,
}

/// Review requirements of a branch protection rule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequiredPullRequestReviews {
    #[serde(default)]
    pub required_approving_review_count: Option<u32>,
}

/// Users and teams that were asked for a review and have not responded yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedReviewers {
    pub users: usize,
    pub teams: usize,
}

impl RequestedReviewers {
    pub fn total(&self) -> usize {
        self.users + self.teams
    }
}

/// A label defined on a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryLabel {
    pub name: String,
    pub color: String,
    pub description: Option<String>,
}
