use gh_client::{ClientManager, TokenResolver};
use pr_labeler_config::{ActionContext, AppConfig};
use pr_state_labeler::{run, EventPayload, Outcome, RunOptions, TriggerEvent};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match label_pull_request().await {
        Ok(Outcome::Skipped) => ExitCode::SUCCESS,
        Ok(Outcome::Labeled {
            number,
            state,
            mutations,
        }) => {
            log::info!(
                "PR #{} labeled {} ({} change(s))",
                number,
                state,
                mutations.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn label_pull_request() -> anyhow::Result<Outcome> {
    // Local runs read the token from .env
    if std::env::var("GITHUB_TOKEN").is_err() {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
            Err(_) => log::debug!(".env file not found, will rely on environment variables"),
        }
    }

    let config = AppConfig::load();
    let context = ActionContext::from_env()?;

    let payload = match &context.event_path {
        Some(path) => EventPayload::load(path)?,
        None => {
            log::warn!("GITHUB_EVENT_PATH is not set, using an empty event payload");
            EventPayload::default()
        }
    };
    let trigger = TriggerEvent::new(context.event_name.clone(), payload.action.clone());

    let options = RunOptions {
        dry_run: context.dry_run.unwrap_or(config.dry_run),
        fail_on_undefined_state: config.fail_on_undefined_state,
    };

    let client = ClientManager::new(TokenResolver::new())
        .connect(config.host.as_deref())
        .await?;

    run(
        &client,
        &context.repository,
        &trigger,
        &payload,
        context.workflow_run_id,
        &options,
    )
    .await
}
