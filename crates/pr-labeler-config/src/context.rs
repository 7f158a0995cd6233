//! GitHub Actions run context
//!
//! Everything the labeler reads from the environment of a workflow step.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("GITHUB_REPOSITORY must look like owner/repo, got '{0}'")]
    InvalidRepository(String),

    #[error("WORKFLOW_ID must be a decimal run id, got '{0}'")]
    InvalidWorkflowId(String),

    #[error("{key} must be a boolean, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
}

/// Repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    /// Parse `owner/repo`
    pub fn parse(slug: &str) -> Result<Self, ContextError> {
        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(ContextError::InvalidRepository(slug.to_string())),
        }
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Values taken from the workflow environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    /// `GITHUB_REPOSITORY`
    pub repository: RepositoryRef,
    /// `GITHUB_EVENT_NAME`
    pub event_name: String,
    /// `GITHUB_EVENT_PATH`
    pub event_path: Option<PathBuf>,
    /// `WORKFLOW_ID`, the id of the run that triggered a `workflow_run` event
    pub workflow_run_id: Option<u64>,
    /// `PR_STATE_LABELER_DRY_RUN`
    pub dry_run: Option<bool>,
}

impl ActionContext {
    /// Read the context from the process environment
    pub fn from_env() -> Result<Self, ContextError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the context through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ContextError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let repository = get("GITHUB_REPOSITORY")
            .ok_or(ContextError::Missing("GITHUB_REPOSITORY"))
            .and_then(|slug| RepositoryRef::parse(slug.trim()))?;

        let event_name = get("GITHUB_EVENT_NAME").ok_or(ContextError::Missing("GITHUB_EVENT_NAME"))?;

        let workflow_run_id = get("WORKFLOW_ID")
            .map(|id| {
                id.trim()
                    .parse::<u64>()
                    .map_err(|_| ContextError::InvalidWorkflowId(id))
            })
            .transpose()?;

        let dry_run = get("PR_STATE_LABELER_DRY_RUN")
            .map(|value| parse_flag("PR_STATE_LABELER_DRY_RUN", &value))
            .transpose()?;

        Ok(Self {
            repository,
            event_name: event_name.trim().to_string(),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            workflow_run_id,
            dry_run,
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ContextError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ContextError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_context() {
        let ctx = ActionContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/hello"),
            ("GITHUB_EVENT_NAME", "pull_request"),
        ]))
        .unwrap();

        assert_eq!(ctx.repository.owner, "octo");
        assert_eq!(ctx.repository.repo, "hello");
        assert_eq!(ctx.repository.to_string(), "octo/hello");
        assert_eq!(ctx.event_name, "pull_request");
        assert_eq!(ctx.event_path, None);
        assert_eq!(ctx.workflow_run_id, None);
        assert_eq!(ctx.dry_run, None);
    }

    #[test]
    fn test_full_context() {
        let ctx = ActionContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/hello"),
            ("GITHUB_EVENT_NAME", "workflow_run"),
            ("GITHUB_EVENT_PATH", "/tmp/event.json"),
            ("WORKFLOW_ID", "123456"),
            ("PR_STATE_LABELER_DRY_RUN", "true"),
        ]))
        .unwrap();

        assert_eq!(ctx.event_path, Some(PathBuf::from("/tmp/event.json")));
        assert_eq!(ctx.workflow_run_id, Some(123456));
        assert_eq!(ctx.dry_run, Some(true));
    }

    #[test]
    fn test_missing_repository() {
        let err = ActionContext::from_lookup(lookup(&[("GITHUB_EVENT_NAME", "pull_request")]))
            .unwrap_err();
        assert_eq!(err, ContextError::Missing("GITHUB_REPOSITORY"));
    }

    #[test]
    fn test_invalid_repository() {
        for slug in ["octo", "/hello", "octo/", "a/b/c"] {
            assert_eq!(
                RepositoryRef::parse(slug),
                Err(ContextError::InvalidRepository(slug.to_string()))
            );
        }
    }

    #[test]
    fn test_invalid_workflow_id() {
        let err = ActionContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/hello"),
            ("GITHUB_EVENT_NAME", "workflow_run"),
            ("WORKFLOW_ID", "abc"),
        ]))
        .unwrap_err();
        assert_eq!(err, ContextError::InvalidWorkflowId("abc".to_string()));
    }

    #[test]
    fn test_invalid_dry_run_flag() {
        let err = ActionContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/hello"),
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("PR_STATE_LABELER_DRY_RUN", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ContextError::InvalidFlag { .. }));
    }

    #[test]
    fn test_blank_values_are_missing() {
        let err = ActionContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/hello"),
            ("GITHUB_EVENT_NAME", "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ContextError::Missing("GITHUB_EVENT_NAME"));
    }
}
