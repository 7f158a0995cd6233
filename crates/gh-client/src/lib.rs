//! GitHub API client for the pull request state labeler
//!
//! This crate provides a trait-based GitHub API client. The labeler only
//! depends on the [`GitHubClient`] trait, so the octocrab-backed
//! implementation can be swapped for an in-memory one in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_request() / fetch_reviews()        │
//! │  - fetch_branch_protection()                     │
//! │  - add_label() / remove_label() / create_label() │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!               ┌─────────────────┐
//!               │ OctocrabClient  │
//!               │ (direct API)    │
//!               └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{ClientManager, GitHubClient, TokenResolver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ClientManager::new(TokenResolver::new()).connect(None).await?;
//! let pr = client.fetch_pull_request("owner", "repo", 42).await?;
//! println!("{} is on {}", pr.title, pr.head_sha);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_manager;
pub mod error;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::GitHubClient;
pub use client_manager::{ClientManager, TokenResolver};
pub use error::ApiError;
pub use octocrab_client::OctocrabClient;
pub use types::{
    BranchProtection, PullRequest, PullRequestState, RepositoryLabel, RequestedReviewers,
    RequiredPullRequestReviews, Review, ReviewState,
};
