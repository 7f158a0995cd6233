//! Provisioning of the managed labels in a repository

use crate::error::LabelerError;
use crate::label::{LabelPreset, LABEL_PRESETS};
use gh_client::{ApiError, GitHubClient};
use log::{debug, info};
use pr_labeler_config::RepositoryRef;

/// Presets the repository has no label for yet
///
/// Only reads; safe to call in a dry run.
pub async fn missing_labels(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
) -> anyhow::Result<Vec<&'static LabelPreset>> {
    let RepositoryRef { owner, repo } = repository;
    let mut missing = Vec::new();

    for preset in &LABEL_PRESETS {
        match client.fetch_label(owner, repo, preset.name).await {
            Ok(_) => {}
            Err(e) if ApiError::is_status(&e, &[ApiError::NOT_FOUND]) => missing.push(preset),
            Err(e) => return Err(e),
        }
    }

    Ok(missing)
}

/// Create every preset label the repository does not have yet
///
/// Returns the names of the labels that were created. A label created
/// concurrently by another run (422 on create) counts as present.
pub async fn ensure_label_catalog(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
) -> anyhow::Result<Vec<&'static str>> {
    let mut created = Vec::new();

    for preset in missing_labels(client, repository).await? {
        if create_label(client, repository, preset).await? {
            created.push(preset.name);
        }
    }

    Ok(created)
}

async fn create_label(
    client: &dyn GitHubClient,
    repository: &RepositoryRef,
    preset: &LabelPreset,
) -> anyhow::Result<bool> {
    let RepositoryRef { owner, repo } = repository;

    info!("Creating label '{}' in {}", preset.name, repository);
    match client
        .create_label(owner, repo, preset.name, preset.color, preset.description)
        .await
    {
        Ok(()) => Ok(true),
        Err(e) if ApiError::is_status(&e, &[ApiError::UNPROCESSABLE]) => {
            let conflict = LabelerError::LabelOperationConflict {
                label: preset.name.to_string(),
                reason: e.to_string(),
            };
            debug!("{}; assuming it was created concurrently", conflict);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
