use thiserror::Error;

/// Failures of a labeling run that are not plain API errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelerError {
    /// Branch protection could not be used; recovered as one required approval
    #[error("branch protection for '{branch}' unavailable: {reason}")]
    PolicyUnavailable { branch: String, reason: String },

    #[error(
        "more than one open pull request ({count}) contains commit {sha}; \
         cannot tell which one triggered the workflow run"
    )]
    AmbiguousSourceCommit { sha: String, count: usize },

    #[error(
        "no open pull request contains commit {sha}; make sure WORKFLOW_ID is \
         the id of the triggering workflow run (github.event.workflow_run.id)"
    )]
    NoMatchingPullRequest { sha: String },

    #[error("pull request #{number} is already merged")]
    AlreadyMerged { number: u64 },

    #[error("{event} event does not reference a pull request")]
    MissingPullRequest { event: String },

    #[error("workflow_run event without a run id or head commit; set WORKFLOW_ID")]
    MissingWorkflowRun,

    #[error("workflow run {run_id} has no head commit")]
    MissingHeadSha { run_id: u64 },

    #[error("could not derive a review state for pull request #{number}")]
    UndefinedState { number: u64 },

    /// Label already present or already gone; recovered where it happens
    #[error("label '{label}' conflict: {reason}")]
    LabelOperationConflict { label: String, reason: String },
}
