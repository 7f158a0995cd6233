//! Triggering workflow events
//!
//! Decides which events the labeler reacts to and extracts the pull request
//! reference from the event payload GitHub Actions writes to
//! `GITHUB_EVENT_PATH`.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

const PULL_REQUEST_ACTIONS: &[&str] = &[
    "opened",
    "closed",
    "edited",
    "reopened",
    "synchronize",
    "ready_for_review",
];

const REVIEW_ACTIONS: &[&str] = &["submitted", "edited", "dismissed"];

/// Kind of event that started the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    PullRequest,
    PullRequestTarget,
    PullRequestReview,
    WorkflowRun,
}

/// Event name and action of the current run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub name: String,
    pub action: Option<String>,
}

impl TriggerEvent {
    pub fn new(name: impl Into<String>, action: Option<String>) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// The trigger kind, if the labeler handles this event and action
    pub fn kind(&self) -> Option<TriggerKind> {
        let action = self.action.as_deref();
        let kind = match self.name.as_str() {
            "workflow_run" => return Some(TriggerKind::WorkflowRun),
            "pull_request" => TriggerKind::PullRequest,
            "pull_request_target" => TriggerKind::PullRequestTarget,
            "pull_request_review" => TriggerKind::PullRequestReview,
            _ => return None,
        };

        let allowed = match kind {
            TriggerKind::PullRequestReview => REVIEW_ACTIONS,
            _ => PULL_REQUEST_ACTIONS,
        };
        action.filter(|a| allowed.contains(a)).map(|_| kind)
    }

    pub fn is_supported(&self) -> bool {
        self.kind().is_some()
    }
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.action {
            Some(action) => write!(f, "{}.{}", self.name, action),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    pub number: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewRef {
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkflowRunRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub head_sha: Option<String>,
}

/// The parts of a webhook payload the labeler reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
    #[serde(default)]
    pub review: Option<ReviewRef>,
    #[serde(default)]
    pub workflow_run: Option<WorkflowRunRef>,
}

impl EventPayload {
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse event payload")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event payload {}", path.display()))?;
        Self::parse(&json)
    }

    /// Pull request number, preferring the direct reference over the one
    /// nested in a review
    pub fn pull_request_number(&self) -> Option<u64> {
        self.pull_request
            .or_else(|| self.review.as_ref().and_then(|r| r.pull_request))
            .map(|pr| pr.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, action: Option<&str>) -> TriggerEvent {
        TriggerEvent::new(name, action.map(|a| a.to_string()))
    }

    #[test]
    fn test_pull_request_actions() {
        for name in ["pull_request", "pull_request_target"] {
            for &action in PULL_REQUEST_ACTIONS {
                assert!(event(name, Some(action)).is_supported(), "{}.{}", name, action);
            }
            assert!(!event(name, Some("labeled")).is_supported());
            assert!(!event(name, Some("assigned")).is_supported());
            assert!(!event(name, None).is_supported());
        }
    }

    #[test]
    fn test_review_actions() {
        assert_eq!(
            event("pull_request_review", Some("submitted")).kind(),
            Some(TriggerKind::PullRequestReview)
        );
        assert!(event("pull_request_review", Some("dismissed")).is_supported());
        assert!(!event("pull_request_review", Some("opened")).is_supported());
    }

    #[test]
    fn test_workflow_run_accepts_any_action() {
        assert_eq!(
            event("workflow_run", None).kind(),
            Some(TriggerKind::WorkflowRun)
        );
        assert!(event("workflow_run", Some("completed")).is_supported());
    }

    #[test]
    fn test_unrelated_events() {
        assert!(!event("push", None).is_supported());
        assert!(!event("issues", Some("opened")).is_supported());
    }

    #[test]
    fn test_display() {
        assert_eq!(event("pull_request", Some("opened")).to_string(), "pull_request.opened");
        assert_eq!(event("workflow_run", None).to_string(), "workflow_run");
    }

    #[test]
    fn test_pull_request_payload() {
        let payload = EventPayload::parse(
            r#"{"action": "opened", "number": 5, "pull_request": {"number": 5, "title": "x"}}"#,
        )
        .unwrap();

        assert_eq!(payload.action.as_deref(), Some("opened"));
        assert_eq!(payload.pull_request_number(), Some(5));
    }

    #[test]
    fn test_review_payload_falls_back_to_review_pull_request() {
        let payload = EventPayload::parse(
            r#"{"action": "submitted", "review": {"state": "approved", "pull_request": {"number": 8}}}"#,
        )
        .unwrap();

        assert_eq!(payload.pull_request_number(), Some(8));
    }

    #[test]
    fn test_workflow_run_payload() {
        let payload = EventPayload::parse(
            r#"{"action": "completed", "workflow_run": {"id": 99, "head_sha": "abc"}}"#,
        )
        .unwrap();
        let run = payload.workflow_run.as_ref().unwrap();

        assert_eq!(run.id, Some(99));
        assert_eq!(run.head_sha.as_deref(), Some("abc"));
        assert_eq!(payload.pull_request_number(), None);
    }

    #[test]
    fn test_invalid_payload() {
        assert!(EventPayload::parse("not json").is_err());
    }
}
