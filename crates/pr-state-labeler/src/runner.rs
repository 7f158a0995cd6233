//! One labeling run, from triggering event to applied labels

use crate::aggregator::{classify_without_reviews, derive_state};
use crate::catalog::{ensure_label_catalog, missing_labels};
use crate::error::LabelerError;
use crate::policy::{outstanding_reviewers, required_approvals};
use crate::reconciler::{apply_mutations, reconcile, LabelMutation};
use crate::snapshot::{PullRequestSnapshot, ReviewEvent};
use crate::source::resolve_pull_request;
use crate::state::State;
use crate::trigger::{EventPayload, TriggerEvent};
use gh_client::GitHubClient;
use log::{debug, info, warn};
use pr_labeler_config::RepositoryRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Log label creation and mutations instead of applying them
    pub dry_run: bool,
    /// Treat an undefined review state as an error
    pub fail_on_undefined_state: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            fail_on_undefined_state: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The event is not one the labeler reacts to
    Skipped,
    Labeled {
        number: u64,
        state: State,
        mutations: Vec<LabelMutation>,
    },
}

pub async fn run(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    trigger: &TriggerEvent,
    payload: &EventPayload,
    workflow_run_id: Option<u64>,
    options: &RunOptions,
) -> anyhow::Result<Outcome> {
    if !trigger.is_supported() {
        info!("Ignoring {} event", trigger);
        return Ok(Outcome::Skipped);
    }

    let pr: PullRequestSnapshot =
        resolve_pull_request(client, repository, trigger, payload, workflow_run_id)
            .await?
            .into();
    info!("Labeling PR #{} '{}' in {}", pr.number, pr.title, repository);

    if options.dry_run {
        for preset in missing_labels(client, repository).await? {
            info!("[dry run] would create label '{}' in {}", preset.name, repository);
        }
    } else {
        let created = ensure_label_catalog(client, repository).await?;
        if !created.is_empty() {
            info!("Created {} missing label(s)", created.len());
        }
    }

    let state = evaluate(client, repository, &pr).await?;
    info!("PR #{} is {}", pr.number, state);

    check_defined(pr.number, state, options)?;

    let mutations = reconcile(&pr, state);
    if mutations.is_empty() {
        info!("PR #{} labels are up to date", pr.number);
    } else if options.dry_run {
        for mutation in &mutations {
            info!("[dry run] PR #{}: would {}", pr.number, mutation);
        }
    } else {
        apply_mutations(client, repository, pr.number, &mutations).await?;
    }

    Ok(Outcome::Labeled {
        number: pr.number,
        state,
        mutations,
    })
}

fn check_defined(number: u64, state: State, options: &RunOptions) -> Result<(), LabelerError> {
    if state != State::Undefined {
        return Ok(());
    }

    let err = LabelerError::UndefinedState { number };
    if options.fail_on_undefined_state {
        return Err(err);
    }
    warn!("{}; leaving labels untouched", err);
    Ok(())
}

/// Derive the state, reading reviews only when metadata does not decide it
async fn evaluate(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    pr: &PullRequestSnapshot,
) -> anyhow::Result<State> {
    if let Some(state) = classify_without_reviews(pr) {
        debug!("PR #{} classified without reviews", pr.number);
        return Ok(state);
    }

    let (reviews, required, outstanding) = tokio::try_join!(
        client.fetch_reviews(&repository.owner, &repository.repo, pr.number),
        required_approvals(client, repository, &pr.base_ref),
        outstanding_reviewers(client, repository, pr.number),
    )?;

    let reviews: Vec<ReviewEvent> = reviews
        .into_iter()
        .filter_map(ReviewEvent::from_review)
        .collect();
    debug!(
        "PR #{}: {} review(s), {} approval(s) required, {} outstanding reviewer(s)",
        pr.number,
        reviews.len(),
        required,
        outstanding
    );

    Ok(derive_state(pr, &reviews, required, outstanding))
}
