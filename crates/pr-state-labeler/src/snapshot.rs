//! Domain inputs of a single evaluation
//!
//! Built from the `gh-client` DTOs, which stay independent of the labeler.

use chrono::{DateTime, Utc};
use gh_client::{PullRequest, PullRequestState, Review, ReviewState};

/// Pull request as seen at the start of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSnapshot {
    pub number: u64,
    pub draft: bool,
    pub title: String,
    pub state: PullRequestState,
    pub merged: bool,
    pub head_sha: String,
    pub base_ref: String,
    /// Label names in API order
    pub attached_labels: Vec<String>,
}

impl From<PullRequest> for PullRequestSnapshot {
    fn from(pr: PullRequest) -> Self {
        Self {
            number: pr.number,
            draft: pr.draft,
            title: pr.title,
            state: pr.state,
            merged: pr.merged,
            head_sha: pr.head_sha,
            base_ref: pr.base_branch,
            attached_labels: pr.labels,
        }
    }
}

/// Outcome of a single review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    ChangesRequested,
    /// Comments, dismissals and anything else; never counted
    Other,
}

impl From<ReviewState> for Verdict {
    fn from(state: ReviewState) -> Self {
        match state {
            ReviewState::Approved => Verdict::Approved,
            ReviewState::ChangesRequested => Verdict::ChangesRequested,
            _ => Verdict::Other,
        }
    }
}

/// A submitted review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvent {
    pub reviewer_id: u64,
    pub verdict: Verdict,
    pub commit_sha: String,
    pub submitted_at: DateTime<Utc>,
}

impl ReviewEvent {
    /// Convert an API review; pending or orphaned reviews yield `None`
    pub fn from_review(review: Review) -> Option<Self> {
        Some(Self {
            reviewer_id: review.reviewer_id?,
            verdict: review.state.into(),
            commit_sha: review.commit_id?,
            submitted_at: review.submitted_at?,
        })
    }
}
