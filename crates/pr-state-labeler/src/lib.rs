//! Pull request review state labeling
//!
//! Derives the review state of a pull request from its metadata and reviews
//! and keeps exactly one managed `PR: ...` label on it in sync.
//!
//! The pure core is [`derive_state`] and [`reconcile`]; everything that
//! talks to GitHub goes through [`gh_client::GitHubClient`].
//!
//! ```text
//! event ─► source ─► snapshot ─► aggregator ─► State ─► reconciler ─► labels
//!                                    ▲
//!                       reviews, policy (branch protection,
//!                       requested reviewers)
//! ```

pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod label;
pub mod policy;
pub mod reconciler;
pub mod runner;
pub mod snapshot;
pub mod source;
pub mod state;
pub mod trigger;

#[cfg(test)]
mod test_support;

pub use aggregator::{classify_without_reviews, derive_state, is_work_in_progress};
pub use catalog::{ensure_label_catalog, missing_labels};
pub use error::LabelerError;
pub use label::{Label, LabelPreset, LABEL_PRESETS};
pub use reconciler::{apply_mutations, reconcile, LabelMutation};
pub use runner::{run, Outcome, RunOptions};
pub use snapshot::{PullRequestSnapshot, ReviewEvent, Verdict};
pub use source::resolve_pull_request;
pub use state::State;
pub use trigger::{EventPayload, TriggerEvent, TriggerKind};
