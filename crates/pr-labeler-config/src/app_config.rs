//! Application configuration
//!
//! Configuration loaded from `.pr-state-labeler.toml`.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from `.pr-state-labeler.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// GitHub Enterprise host; github.com when unset
    #[serde(default)]
    pub host: Option<String>,

    /// Compute and log label mutations without applying them
    #[serde(default)]
    pub dry_run: bool,

    /// Fail the run when the review state cannot be classified
    #[serde(default = "default_fail_on_undefined_state")]
    pub fail_on_undefined_state: bool,
}

fn default_fail_on_undefined_state() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: None,
            dry_run: false,
            fail_on_undefined_state: default_fail_on_undefined_state(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the config directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
