// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Policy resolution.
//!
//! Layers are folded lowest precedence first:
//! baseline, profile, rule pack, config file, command line.
//! Group filtering and `exclude` are applied after the fold.

use std::path::Path;

use tracing::debug;

use super::{EffectivePolicy, LayerOrigin, PolicyLayer, Profile, RulePack, Thresholds};
use crate::config::ConfigFile;
use crate::error::{Error, Result};
use crate::registry::{CheckGroup, CheckRegistry, ids};
use crate::severity::ConfiguredSeverity;

/// Resolver inputs taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOverrides {
    pub profile: Option<String>,
    pub rule_pack: Option<String>,
    pub check_groups: Vec<CheckGroup>,
    pub layer: PolicyLayer,
}

impl Default for CliOverrides {
    fn default() -> Self {
        Self {
            profile: None,
            rule_pack: None,
            check_groups: Vec::new(),
            layer: PolicyLayer::new(LayerOrigin::Cli),
        }
    }
}

/// Resolve the effective policy for one invocation.
pub fn resolve(
    registry: &CheckRegistry,
    cli: &CliOverrides,
    config: &ConfigFile,
) -> Result<EffectivePolicy> {
    let config_path = config.path.as_deref();

    let profile = match (&cli.profile, &config.profile) {
        (Some(name), _) => parse_name::<Profile>(name, None)?,
        (None, Some(name)) => parse_name::<Profile>(name, config_path)?,
        (None, None) => Profile::default(),
    };
    let rule_pack = match (&cli.rule_pack, &config.rule_pack) {
        (Some(name), _) => Some(parse_name::<RulePack>(name, None)?),
        (None, Some(name)) => Some(parse_name::<RulePack>(name, config_path)?),
        (None, None) => None,
    };

    let mut layers = vec![PolicyLayer::baseline(), profile.layer()];
    if let Some(pack) = rule_pack {
        layers.push(pack.layer());
    }
    layers.push(config.layer.clone());
    layers.push(cli.layer.clone());

    for layer in &layers {
        let path = match layer.origin {
            LayerOrigin::ConfigFile => config_path,
            _ => None,
        };
        validate_ids(registry, layer, path)?;
    }

    let merged = layers.iter().fold(PolicyLayer::default(), |acc, layer| {
        debug!(origin = %layer.origin, "applying policy layer");
        acc.merged(layer)
    });

    let mut check_groups = cli.check_groups.clone();
    check_groups.sort();
    check_groups.dedup();

    let strict = merged.strict.unwrap_or(false);
    let gitleaks = merged.gitleaks.unwrap_or(true);
    let enabled_check_ids: Vec<String> = registry
        .iter()
        .filter(|def| {
            let disabled = matches!(
                merged.severity_overrides.get(def.id),
                Some(ConfiguredSeverity::Disabled)
            );
            let forced = merged.include.iter().any(|id| id == def.id);
            // gitleaks off removes the scanner even when force-included.
            (!disabled || forced)
                && (gitleaks || def.id != ids::GITLEAKS_SCAN)
                && (check_groups.is_empty() || def.in_any_group(&check_groups))
                && !merged.exclude.iter().any(|id| id == def.id)
        })
        .map(|def| def.id.to_string())
        .collect();

    let severity_overrides = merged
        .severity_overrides
        .iter()
        .filter_map(|(id, configured)| match configured {
            ConfiguredSeverity::Level(s) => Some((id.clone(), *s)),
            ConfiguredSeverity::Disabled => None,
        })
        .collect();

    debug!(
        profile = %profile,
        rule_pack = rule_pack.map(RulePack::as_str).unwrap_or("none"),
        strict,
        enabled = enabled_check_ids.len(),
        "resolved policy"
    );

    Ok(EffectivePolicy {
        profile,
        rule_pack,
        strict,
        gitleaks,
        enabled_check_ids,
        severity_overrides,
        thresholds: merged.thresholds.or_defaults(Thresholds::default()),
        diff_mode: merged.diff_mode.unwrap_or_default(),
        pr_base_ref: merged.pr_base_ref,
        diff_base: merged.diff_base,
        diff_target: merged.diff_target,
        check_groups,
    })
}

fn parse_name<T>(name: &str, path: Option<&Path>) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    name.parse::<T>().map_err(|message| config_error(message, path))
}

fn validate_ids(registry: &CheckRegistry, layer: &PolicyLayer, path: Option<&Path>) -> Result<()> {
    for (key, id) in layer.mentioned_ids() {
        if registry.contains(id) {
            continue;
        }
        let mut message = format!("unknown check id '{id}' in {key} ({})", layer.origin);
        if let Some(suggestion) = registry.suggest(id) {
            message.push_str(&format!(", did you mean '{suggestion}'?"));
        }
        return Err(config_error(message, path));
    }
    Ok(())
}

fn config_error(message: String, path: Option<&Path>) -> Error {
    match path {
        Some(path) => Error::config_at(message, path),
        None => Error::config(message),
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
