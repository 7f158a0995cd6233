//! Label reconciliation
//!
//! Diffs the managed label currently attached to a pull request against the
//! derived state and applies the difference, removal first, so a pull request
//! never carries two managed labels at once because of us.

use crate::error::LabelerError;
use crate::label::Label;
use crate::snapshot::PullRequestSnapshot;
use crate::state::State;
use gh_client::{ApiError, GitHubClient};
use log::{debug, info};
use pr_labeler_config::RepositoryRef;
use std::fmt;

/// A single change to the labels of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMutation {
    Add(Label),
    Remove(Label),
}

impl LabelMutation {
    pub fn label(self) -> Label {
        match self {
            LabelMutation::Add(label) | LabelMutation::Remove(label) => label,
        }
    }
}

impl fmt::Display for LabelMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelMutation::Add(label) => write!(f, "add '{}'", label.name()),
            LabelMutation::Remove(label) => write!(f, "remove '{}'", label.name()),
        }
    }
}

/// First attached label that belongs to the managed catalog
pub fn previous_label<S: AsRef<str>>(attached: &[S]) -> Option<Label> {
    attached
        .iter()
        .find_map(|name| Label::from_name(name.as_ref()))
}

/// Mutations that move `pr` to `new_state`
pub fn reconcile(pr: &PullRequestSnapshot, new_state: State) -> Vec<LabelMutation> {
    let previous = previous_label(&pr.attached_labels);

    match (previous, new_state) {
        (_, State::Undefined) => vec![],
        (None, State::Wip) => vec![],
        (None, State::Labeled(next)) => vec![LabelMutation::Add(next)],
        (Some(current), State::Wip) => vec![LabelMutation::Remove(current)],
        (Some(current), State::Labeled(next)) if current == next => vec![],
        (Some(current), State::Labeled(next)) => {
            vec![LabelMutation::Remove(current), LabelMutation::Add(next)]
        }
    }
}

/// Apply mutations to a pull request, one after another
///
/// Removing a label that is already gone (404) and adding one that is
/// already there (422) are not errors: labels can change underneath us
/// between the snapshot and this call.
pub async fn apply_mutations(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    pr_number: u64,
    mutations: &[LabelMutation],
) -> anyhow::Result<()> {
    let RepositoryRef { owner, repo } = repository;

    for mutation in mutations {
        info!("PR #{}: {}", pr_number, mutation);

        let result = match mutation {
            LabelMutation::Remove(label) => client
                .remove_label(owner, repo, pr_number, label.name())
                .await
                .or_else(|e| tolerate(e, ApiError::NOT_FOUND, mutation)),
            LabelMutation::Add(label) => client
                .add_label(owner, repo, pr_number, label.name())
                .await
                .or_else(|e| tolerate(e, ApiError::UNPROCESSABLE, mutation)),
        };
        result?;
    }

    Ok(())
}

fn tolerate(err: anyhow::Error, status: u16, mutation: &LabelMutation) -> anyhow::Result<()> {
    if !ApiError::is_status(&err, &[status]) {
        return Err(err);
    }

    let conflict = LabelerError::LabelOperationConflict {
        label: mutation.label().name().to_string(),
        reason: err.to_string(),
    };
    debug!("Ignoring {} while trying to {}", conflict, mutation);
    Ok(())
}
