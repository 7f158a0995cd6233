//! Review aggregation and state derivation
//!
//! Reduces the review history of a pull request to one verdict per reviewer
//! and classifies the pull request. Everything here is pure; the lookups that
//! feed [`derive_state`] live in [`crate::policy`].

use crate::snapshot::{PullRequestSnapshot, ReviewEvent, Verdict};
use crate::state::State;
use chrono::{DateTime, Utc};
use gh_client::PullRequestState;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Latest counted verdict of one reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictEntry {
    pub verdict: Verdict,
    pub submitted_at: DateTime<Utc>,
}

/// Latest verdict per reviewer id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewVerdictMap {
    entries: BTreeMap<u64, VerdictEntry>,
}

impl ReviewVerdictMap {
    /// Fold reviews on `head_sha` into the latest approval or change
    /// request per reviewer
    ///
    /// A later review replaces an earlier one only if its timestamp is
    /// strictly greater; on a tie the first one seen stays.
    pub fn collect<'a, I>(head_sha: &str, reviews: I) -> Self
    where
        I: IntoIterator<Item = &'a ReviewEvent>,
    {
        let mut entries: BTreeMap<u64, VerdictEntry> = BTreeMap::new();

        for review in reviews.into_iter().filter(|r| r.commit_sha == head_sha) {
            if review.verdict == Verdict::Other {
                continue;
            }

            let entry = VerdictEntry {
                verdict: review.verdict,
                submitted_at: review.submitted_at,
            };
            entries
                .entry(review.reviewer_id)
                .and_modify(|current| {
                    if current.submitted_at < entry.submitted_at {
                        *current = entry;
                    }
                })
                .or_insert(entry);
        }

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, reviewer_id: u64) -> Option<&VerdictEntry> {
        self.entries.get(&reviewer_id)
    }

    pub fn approved_count(&self) -> usize {
        self.count(Verdict::Approved)
    }

    pub fn changes_requested_count(&self) -> usize {
        self.count(Verdict::ChangesRequested)
    }

    fn count(&self, verdict: Verdict) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.verdict == verdict)
            .count()
    }
}

/// Whether a title marks the pull request as work in progress
///
/// Matches leading, possibly repeated, `[WIP]`, `WIP:` or `WIP ` markers
/// in any case.
pub fn is_work_in_progress(title: &str) -> bool {
    static WIP_REGEX: OnceLock<Regex> = OnceLock::new();

    WIP_REGEX
        .get_or_init(|| {
            Regex::new(r"(?i)^\s*(\[WIP\]\s*|WIP:\s*|WIP\s+)+\s*").expect("valid WIP pattern")
        })
        .is_match(title)
}

/// States that are decided from metadata alone
///
/// Returns `None` when reviews have to be looked at.
pub fn classify_without_reviews(pr: &PullRequestSnapshot) -> Option<State> {
    if pr.draft {
        return Some(State::DRAFT);
    }

    if is_work_in_progress(&pr.title) {
        return Some(State::Wip);
    }

    if pr.state == PullRequestState::Closed && pr.merged {
        return Some(State::MERGED);
    }

    None
}

/// Classify a pull request
///
/// `required_approvals` is expected to be at least 1 and
/// `outstanding_requested_reviewers` is the number of users and teams
/// that were asked for a review and have not answered yet.
pub fn derive_state(
    pr: &PullRequestSnapshot,
    reviews: &[ReviewEvent],
    required_approvals: u32,
    outstanding_requested_reviewers: usize,
) -> State {
    if let Some(state) = classify_without_reviews(pr) {
        return state;
    }

    let verdicts = ReviewVerdictMap::collect(&pr.head_sha, reviews);

    if verdicts.is_empty() {
        return State::UNREVIEWED;
    }

    if verdicts.changes_requested_count() > 0 {
        return State::CHANGES_REQUESTED;
    }

    let approved = verdicts.approved_count();
    if approved < required_approvals as usize || outstanding_requested_reviewers > 0 {
        return State::PARTIALLY_APPROVED;
    }

    if approved == verdicts.len() {
        return State::APPROVED;
    }

    State::Undefined
}
