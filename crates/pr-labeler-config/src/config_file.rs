use crate::paths::{app_config_path, local_config_path};
use std::path::Path;

/// Load config file content from CWD first, then the user config directory
///
/// Searches for:
/// 1. `.pr-state-labeler.toml` in the current working directory
/// 2. `config.toml` in the platform config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let candidates = [local_config_path(), app_config_path()];

    candidates
        .into_iter()
        .flatten()
        .find_map(|path| read_config(&path))
}

fn read_config(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some(content)
        }
        Err(_) => None,
    }
}
