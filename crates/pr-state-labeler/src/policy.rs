//! Review requirements of a pull request
//!
//! The two lookups that feed [`crate::aggregator::derive_state`] besides the
//! reviews themselves.

use crate::error::LabelerError;
use gh_client::{ApiError, GitHubClient};
use log::debug;
use pr_labeler_config::RepositoryRef;

/// Approvals required when branch protection does not say otherwise
pub const DEFAULT_REQUIRED_APPROVALS: u32 = 1;

/// Number of approving reviews required to merge into `base_branch`
///
/// Falls back to [`DEFAULT_REQUIRED_APPROVALS`] when the branch is not
/// protected (404), the token may not read the rule (403), or the rule does
/// not require reviews. Any other failure is returned.
pub async fn required_approvals(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    base_branch: &str,
) -> anyhow::Result<u32> {
    let protection = match client
        .fetch_branch_protection(&repository.owner, &repository.repo, base_branch)
        .await
    {
        Ok(protection) => protection,
        Err(e) if ApiError::is_status(&e, &[ApiError::FORBIDDEN, ApiError::NOT_FOUND]) => {
            return Ok(fallback(base_branch, e.to_string()));
        }
        Err(e) => return Err(e),
    };

    match protection.required_pull_request_reviews {
        Some(reviews) => Ok(reviews
            .required_approving_review_count
            .filter(|count| *count > 0)
            .unwrap_or(DEFAULT_REQUIRED_APPROVALS)),
        None => Ok(fallback(base_branch, "reviews are not required".to_string())),
    }
}

fn fallback(base_branch: &str, reason: String) -> u32 {
    let unavailable = LabelerError::PolicyUnavailable {
        branch: base_branch.to_string(),
        reason,
    };
    debug!("{}; assuming {} required approval", unavailable, DEFAULT_REQUIRED_APPROVALS);
    DEFAULT_REQUIRED_APPROVALS
}

/// Users and teams still asked to review the pull request
pub async fn outstanding_reviewers(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    pr_number: u64,
) -> anyhow::Result<usize> {
    let requested = client
        .fetch_requested_reviewers(&repository.owner, &repository.repo, pr_number)
        .await?;

    debug!(
        "PR #{} has {} user(s) and {} team(s) left to review",
        pr_number, requested.users, requested.teams
    );
    Ok(requested.total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockClient;
    use gh_client::BranchProtection;

    fn repository() -> RepositoryRef {
        RepositoryRef {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_configured_count() {
        let client = MockClient::new().with_required_approvals(Some(3));
        assert_eq!(required_approvals(&client, &repository(), "main").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_zero_or_missing_count_means_one() {
        let client = MockClient::new().with_required_approvals(Some(0));
        assert_eq!(required_approvals(&client, &repository(), "main").await.unwrap(), 1);

        let client = MockClient::new().with_required_approvals(None);
        assert_eq!(required_approvals(&client, &repository(), "main").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rule_without_review_requirement() {
        let client = MockClient::new().with_protection(BranchProtection::default());
        assert_eq!(required_approvals(&client, &repository(), "main").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unprotected_or_forbidden_branch() {
        for status in [403, 404] {
            let client = MockClient::new().fail_protection(status);
            assert_eq!(
                required_approvals(&client, &repository(), "main").await.unwrap(),
                1,
                "status {}",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let client = MockClient::new().fail_protection(500);
        let err = required_approvals(&client, &repository(), "main")
            .await
            .unwrap_err();
        assert_eq!(ApiError::status_of(&err), Some(500));
    }

    #[tokio::test]
    async fn test_outstanding_reviewers_counts_users_and_teams() {
        let client = MockClient::new().with_requested(2, 1);
        assert_eq!(outstanding_reviewers(&client, &repository(), 1).await.unwrap(), 3);
    }
}
