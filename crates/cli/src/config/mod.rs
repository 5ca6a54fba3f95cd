// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Reads `.repo-preflight.toml` into a [`ConfigFile`]: the profile and rule
//! pack names it selects plus a [`PolicyLayer`] for everything else.
//! Values are type-checked here; check ids are validated by the resolver.

mod parse;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::policy::{DiffMode, LayerOrigin, PolicyLayer};
use crate::severity::ConfiguredSeverity;

use parse::{expect_bool, expect_str, expect_string_array, expect_u64, warn_unknown_key};

/// Default config file name, looked up in the checked path.
pub const CONFIG_FILE_NAME: &str = ".repo-preflight.toml";

/// Top-level structure with unknown sections captured.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    preflight: Option<toml::Table>,

    #[serde(default)]
    checks: Option<toml::Table>,

    #[serde(default)]
    severity_overrides: Option<toml::Table>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Parsed config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Source path, `None` when no file was loaded.
    pub path: Option<PathBuf>,
    pub profile: Option<String>,
    pub rule_pack: Option<String>,
    pub layer: PolicyLayer,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            path: None,
            profile: None,
            rule_pack: None,
            layer: PolicyLayer::new(LayerOrigin::ConfigFile),
        }
    }
}

/// Load and parse a config file.
pub fn load(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<ConfigFile> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|e| Error::config_at(e.to_string(), path))?;

    for key in raw.unknown.keys() {
        warn_unknown_key(path, key);
    }

    let mut config = ConfigFile {
        path: Some(path.to_path_buf()),
        ..ConfigFile::default()
    };

    if let Some(table) = &raw.preflight {
        parse_preflight(table, path, &mut config)?;
    }
    if let Some(table) = &raw.checks {
        parse_checks(table, path, &mut config.layer)?;
    }
    if let Some(table) = &raw.severity_overrides {
        for (id, value) in table {
            let key = format!("severity_overrides.{id}");
            let severity = expect_str(value, &key, path)?
                .parse::<ConfiguredSeverity>()
                .map_err(|e| Error::config_at(format!("{key}: {e}"), path))?;
            config.layer.severity_overrides.insert(id.clone(), severity);
        }
    }

    Ok(config)
}

fn parse_preflight(table: &toml::Table, path: &Path, config: &mut ConfigFile) -> Result<()> {
    let layer = &mut config.layer;
    let mut gitleaks = None;
    let mut no_gitleaks = None;

    for (name, value) in table {
        let key = format!("preflight.{name}");
        match name.as_str() {
            "profile" => config.profile = Some(expect_str(value, &key, path)?.to_string()),
            "rule_pack" => config.rule_pack = Some(expect_str(value, &key, path)?.to_string()),
            "strict" => layer.strict = Some(expect_bool(value, &key, path)?),
            "gitleaks" => gitleaks = Some(expect_bool(value, &key, path)?),
            "no_gitleaks" => no_gitleaks = Some(expect_bool(value, &key, path)?),
            "max_tracked_file_kib" => {
                layer.thresholds.max_tracked_file_kib = Some(expect_u64(value, &key, path)?)
            }
            "max_history_blob_kib" => {
                layer.thresholds.max_history_blob_kib = Some(expect_u64(value, &key, path)?)
            }
            "history_object_limit" => {
                layer.thresholds.history_object_limit = Some(expect_u64(value, &key, path)?)
            }
            "max_diff_files" => {
                layer.thresholds.max_diff_files = Some(expect_u64(value, &key, path)?)
            }
            "max_diff_changed_lines" => {
                layer.thresholds.max_diff_changed_lines = Some(expect_u64(value, &key, path)?)
            }
            "max_diff_object_kib" => {
                layer.thresholds.max_diff_object_kib = Some(expect_u64(value, &key, path)?)
            }
            "diff_mode" => {
                let mode = expect_str(value, &key, path)?
                    .parse::<DiffMode>()
                    .map_err(|e| Error::config_at(format!("{key}: {e}"), path))?;
                layer.diff_mode = Some(mode);
            }
            "pr_base_ref" => layer.pr_base_ref = Some(expect_str(value, &key, path)?.to_string()),
            "diff_base" => layer.diff_base = Some(expect_str(value, &key, path)?.to_string()),
            "diff_target" => layer.diff_target = Some(expect_str(value, &key, path)?.to_string()),
            _ => warn_unknown_key(path, &key),
        }
    }

    layer.gitleaks = match (gitleaks, no_gitleaks) {
        (Some(on), Some(off)) if on == off => {
            return Err(Error::config_at(
                "preflight.gitleaks and preflight.no_gitleaks contradict each other",
                path,
            ));
        }
        (Some(on), _) => Some(on),
        (None, off) => off.map(|off| !off),
    };
    Ok(())
}

fn parse_checks(table: &toml::Table, path: &Path, layer: &mut PolicyLayer) -> Result<()> {
    for (name, value) in table {
        let key = format!("checks.{name}");
        match name.as_str() {
            "include" => layer.include = expect_string_array(value, &key, path)?,
            "exclude" => layer.exclude = expect_string_array(value, &key, path)?,
            _ => warn_unknown_key(path, &key),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
