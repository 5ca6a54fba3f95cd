// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Find `.repo-preflight.toml` directly in the checked path.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Resolve the config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. `--no-config` (nothing is loaded)
/// 2. `--config` (clap also reads `REPO_PREFLIGHT_CONFIG`), which must exist
/// 3. `<root>/.repo-preflight.toml` if present
pub fn resolve_config(explicit: Option<&Path>, no_config: bool, root: &Path) -> Result<Option<PathBuf>> {
    if no_config {
        return Ok(None);
    }
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::config_at(
            format!("config file not found: {}", path.display()),
            path,
        )),
        None => Ok(find_config(root)),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
