//! Configuration for pr-state-labeler
//!
//! This crate provides:
//! - Configuration file lookup and loading (TOML)
//! - Application configuration (AppConfig)
//! - The GitHub Actions run context read from the environment

pub mod app_config;
pub mod config_file;
pub mod context;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use context::{ActionContext, ContextError, RepositoryRef};
